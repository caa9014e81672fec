//! Apriori CLI: mines every `*.txt` file of a dataset directory.

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use apriori_fset::{run_batch, Config};

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::parse();
    let outcomes = run_batch(&config)?;

    let mut failed = 0;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(summary) => info!(
                file = %path.display(),
                frequent = summary.frequent_itemsets,
                total_ns = summary.total_time_ns,
                "wrote results"
            ),
            Err(e) => {
                error!(file = %path.display(), "{}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} dataset files failed", failed, outcomes.len());
    }
    Ok(())
}
