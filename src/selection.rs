use std::fmt;

use crate::data::model::{FAMILY, TYPE};

/// The four subsets the MA plot knows how to draw, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubsetKey {
    Ltr,
    Erv,
    Line,
    Sine,
}

impl SubsetKey {
    pub const ALL: [SubsetKey; 4] = [
        SubsetKey::Ltr,
        SubsetKey::Erv,
        SubsetKey::Line,
        SubsetKey::Sine,
    ];

    /// Name of the partition subset this key draws.
    pub fn subset_name(self) -> &'static str {
        match self {
            SubsetKey::Ltr => "LTR",
            SubsetKey::Erv => "ERVL",
            SubsetKey::Line => "LINE",
            SubsetKey::Sine => "SINE",
        }
    }

    /// Column the subset is defined on.
    pub fn level(self) -> &'static str {
        match self {
            SubsetKey::Erv => FAMILY,
            _ => TYPE,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SubsetKey::Ltr => "LTR Expression",
            SubsetKey::Erv => "ERVL Expression",
            SubsetKey::Line => "LINE Expression",
            SubsetKey::Sine => "SINE Expression",
        }
    }
}

impl fmt::Display for SubsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subset_name())
    }
}

/// Which subsets to present. Built from the command line and handed to the
/// presentation layer as a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(Vec<SubsetKey>),
}

impl Selection {
    /// Non-exclusive flags; no flag at all means every subset.
    pub fn from_flags(erv: bool, ltr: bool, line: bool, sine: bool) -> Self {
        let chosen: Vec<SubsetKey> = [
            (SubsetKey::Ltr, ltr),
            (SubsetKey::Erv, erv),
            (SubsetKey::Line, line),
            (SubsetKey::Sine, sine),
        ]
        .into_iter()
        .filter_map(|(key, on)| on.then_some(key))
        .collect();

        if chosen.is_empty() {
            Selection::All
        } else {
            Selection::Only(chosen)
        }
    }

    /// Selected keys in drawing order, without duplicates.
    pub fn keys(&self) -> Vec<SubsetKey> {
        match self {
            Selection::All => SubsetKey::ALL.to_vec(),
            Selection::Only(keys) => SubsetKey::ALL
                .into_iter()
                .filter(|k| keys.contains(k))
                .collect(),
        }
    }
}
