/// Data layer: table types, loading, the classification core, and outputs.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  read one sheet → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  fill numeric gaps, add baseMean_log_10
///   └───────────┘
///        │                      └──▶ store  (Parquet copy)
///        ▼
///   ┌───────────┐
///   │ partition │  category predicates → named Subset views
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ threshold │  one subset, column >= threshold
///   └───────────┘
///        │
///        ▼
///     export (CSV) / plot
/// ```

pub mod export;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod partition;
pub mod store;
pub mod threshold;
