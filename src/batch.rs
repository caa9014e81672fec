use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    config::Config,
    error::{Error, Result},
    miner::Miner,
    report::{ReportWriter, Summary},
    transactions::TransactionStore,
};

const DATASET_EXTENSION: &str = "txt";

/// Visible `*.txt` files directly inside `directory`, sorted by path.
pub fn dataset_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let dataset_dir = |source| Error::DatasetDir {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(dataset_dir)? {
        let path = entry.map_err(dataset_dir)?.path();
        let hidden = path
            .file_name()
            .map_or(true, |name| name.to_string_lossy().starts_with('.'));
        let is_dataset = path.extension().map_or(false, |ext| ext == DATASET_EXTENSION);
        if path.is_file() && is_dataset && !hidden {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Mines one dataset file and writes all of its result files.
pub fn run_file(path: &Path, config: &Config) -> Result<Summary> {
    info!(file = %path.display(), min_support = config.min_support, "mining");

    let store = TransactionStore::open(path)?;
    let mut writer = ReportWriter::new(&config.output_dir, path, &store, config.min_support);
    let run = Miner::new(&store, config.min_support).mine_with(&mut writer)?;
    let summary = writer.write_summary(&run)?;

    info!(
        file = %path.display(),
        transactions = store.len(),
        levels = run.num_levels(),
        frequent = summary.frequent_itemsets,
        infrequent = summary.infrequent_itemsets,
        "done"
    );
    Ok(summary)
}

/// Runs every dataset file independently; a failing file does not stop the
/// others.
pub fn run_batch(config: &Config) -> Result<Vec<(PathBuf, Result<Summary>)>> {
    fs::create_dir_all(&config.output_dir).map_err(|source| Error::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let files = dataset_files(&config.data_location)?;
    if files.is_empty() {
        warn!(directory = %config.data_location.display(), "no dataset files found");
    }

    Ok(files
        .into_iter()
        .map(|path| {
            let outcome = run_file(&path, config);
            (path, outcome)
        })
        .collect())
}
