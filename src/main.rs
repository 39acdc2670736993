use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use repel::app;
use repel::cli::Args;
use repel::data::model::REQUIRED_COLUMNS;
use repel::data::partition::{categories_from_json, default_categories, partition};
use repel::data::{export, loader, normalize, store, threshold};
use repel::state::AppState;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let table = loader::load_file(&args.input, args.sheet_number).with_context(|| {
        format!(
            "cannot read sheet {} of {}",
            args.sheet_number,
            args.input.display()
        )
    })?;
    table
        .require_columns(&REQUIRED_COLUMNS)
        .with_context(|| format!("{} is not a differential-expression table", args.input.display()))?;

    let table = normalize::normalize(table).context("normalizing table")?;

    if let Some(dir) = &args.store {
        if let Err(e) = store::persist(&table, dir) {
            warn!("Could not store normalized table in {}: {e}", dir.display());
        }
    }

    let categories = match &args.categories {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening categories file {}", path.display()))?;
            categories_from_json(io::BufReader::new(file))
                .with_context(|| format!("parsing categories file {}", path.display()))?
        }
        None => default_categories(),
    };

    let subsets = partition(&table, &categories)?;
    info!("{subsets}");

    let config = args.threshold();
    match threshold::upregulated(&subsets, &config)? {
        Some(up) => {
            info!(
                "{} ERVL elements with {} >= {}",
                up.len(),
                config.column,
                config.threshold
            );
            if args.upregulated {
                export::write_csv(&up, io::stdout().lock()).context("writing upregulated elements")?;
            }
        }
        None if args.upregulated => warn!("No ERVL subset configured; nothing to report"),
        None => {}
    }

    if args.maplot {
        let state = AppState::build(&subsets, &args.selection(), table.len())?;
        app::show(state).map_err(|e| anyhow::anyhow!("plot window failed: {e}"))?;
    }

    Ok(())
}
