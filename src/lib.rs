//! Repetitive element parser.
//!
//! Reads a differential-expression table (one row per gene or repeat element,
//! with `baseMean`, `log2FoldChange`, `Type`, `Family` and `Name` columns),
//! fills numeric gaps, derives `baseMean_log_10`, and splits the rows into
//! possibly-overlapping named views: LINE, SINE and LTR types plus the ERVL
//! family. The ERVL view can be narrowed to upregulated elements, persisted,
//! exported, or drawn as MA plots.
//!
//! ```no_run
//! use std::path::Path;
//! use repel::data::{loader, normalize, partition, threshold};
//!
//! let table = loader::load_file(Path::new("de.xlsx"), 0)?;
//! let table = normalize::normalize(table)?;
//! let subsets = partition::partition(&table, &partition::default_categories())?;
//! let up = threshold::upregulated(&subsets, &threshold::ThresholdConfig::default())?;
//! # Ok::<(), repel::error::RepelError>(())
//! ```

pub mod app;
pub mod cli;
pub mod color;
pub mod data;
pub mod error;
pub mod selection;
pub mod state;
pub mod ui;
