use std::path::PathBuf;

use clap::Parser;

use crate::data::threshold::{ThresholdConfig, DEFAULT_MIN_LOG2FC};
use crate::selection::Selection;

/// Classify a differential-expression table into repetitive element subsets.
#[derive(Parser, Debug)]
#[command(name = "repel", version, about, long_about = None)]
pub struct Args {
    #[arg(
        value_name = "FILE",
        help = "Spreadsheet with the expression data (.xlsx; .csv, .tsv, .json and .parquet also read)"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'n',
        long = "sheetnumber",
        visible_alias = "sheet-number",
        value_name = "INDEX",
        default_value_t = 0,
        help = "Sheet of interest, indexed at 0"
    )]
    pub sheet_number: usize,

    #[arg(
        short = 'm',
        long = "maplot",
        help = "Open an MA plot of the selected elements"
    )]
    pub maplot: bool,

    #[arg(long = "ERV", help = "Plot the ERVL family")]
    pub erv: bool,

    #[arg(long = "LTR", help = "Plot LTR elements")]
    pub ltr: bool,

    #[arg(long = "LINE", help = "Plot LINE elements")]
    pub line: bool,

    #[arg(long = "SINE", help = "Plot SINE elements")]
    pub sine: bool,

    #[arg(
        long = "min-log2fc",
        value_name = "LOG2FC",
        default_value_t = DEFAULT_MIN_LOG2FC,
        allow_negative_numbers = true,
        help = "Inclusive log2FoldChange lower bound for upregulated ERVL elements"
    )]
    pub min_log2fc: f64,

    #[arg(
        short = 'u',
        long = "upregulated",
        help = "Write the upregulated ERVL elements to stdout as CSV"
    )]
    pub upregulated: bool,

    #[arg(
        long = "store",
        value_name = "DIR",
        help = "Keep a Parquet copy of the normalized table in DIR"
    )]
    pub store: Option<PathBuf>,

    #[arg(
        long = "categories",
        value_name = "JSON",
        help = "Category predicates [{\"name\", \"column\", \"value\"}, ...] replacing LINE/SINE/LTR/ERVL"
    )]
    pub categories: Option<PathBuf>,
}

impl Args {
    pub fn selection(&self) -> Selection {
        Selection::from_flags(self.erv, self.ltr, self.line, self.sine)
    }

    pub fn threshold(&self) -> ThresholdConfig {
        ThresholdConfig {
            threshold: self.min_log2fc,
            ..ThresholdConfig::default()
        }
    }
}
