//! Result files of one mining run.
//!
//! For an input `<stem>.txt` each level `k` produces `<stem>_C<k>.txt` and
//! `<stem>_L<k>.txt`:
//!
//! ```text
//! number of candidates: 3
//! computation time in nanoseconds: 5120
//! {"0":["A"],"1":["B"],"2":["C"]}
//! ```
//!
//! C files carry the counting time, L files the filtering time. The end of
//! the run adds `<stem>_Frequent.txt`, `<stem>_Infrequent.txt` and
//! `<stem>_Summary.txt`, each a single JSON object.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    miner::{Level, LevelSink, MiningRun},
    transactions::TransactionStore,
    types::{CandidateSet, ItemName, Itemset, LevelSets, SupportCount},
};

/// Totals written to `<stem>_Summary.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub min_support: SupportCount,
    pub candidate_generation_time_ns: u64,
    pub support_counting_time_ns: u64,
    pub total_time_ns: u64,
    pub frequent_itemsets: usize,
    pub infrequent_itemsets: usize,
}

pub struct ReportWriter<'a> {
    directory: &'a Path,
    stem: String,
    store: &'a TransactionStore,
    min_support: SupportCount,
}

impl<'a> ReportWriter<'a> {
    pub fn new(
        directory: &'a Path,
        input: &Path,
        store: &'a TransactionStore,
        min_support: SupportCount,
    ) -> Self {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            directory,
            stem,
            store,
            min_support,
        }
    }

    pub fn path(&self, suffix: &str) -> PathBuf {
        self.directory.join(format!("{}_{}.txt", self.stem, suffix))
    }

    fn write(&self, suffix: &str, contents: &str) -> Result<()> {
        let path = self.path(suffix);
        fs::write(&path, contents).map_err(|source| Error::Write { path, source })
    }

    fn candidate_file(&self, itemsets: &CandidateSet, elapsed: Duration) -> Result<String> {
        let data: BTreeMap<usize, Vec<ItemName>> = itemsets
            .iter()
            .sorted()
            .map(|itemset| self.store.names(itemset))
            .enumerate()
            .collect();

        Ok(format!(
            "number of candidates: {}\ncomputation time in nanoseconds: {}\n{}",
            itemsets.len(),
            elapsed.as_nanos(),
            serde_json::to_string(&data)?
        ))
    }

    /// `{a, b}` rendering of every itemset mapped to its support count.
    fn support_table(&self, levels: &LevelSets, run: &MiningRun) -> BTreeMap<String, SupportCount> {
        levels
            .values()
            .flatten()
            .filter_map(|itemset| {
                run.support
                    .get(itemset)
                    .map(|count| (self.render(itemset), count))
            })
            .collect()
    }

    fn render(&self, itemset: &Itemset) -> String {
        format!("{{{}}}", self.store.names(itemset).iter().join(", "))
    }

    pub fn write_summary(&self, run: &MiningRun) -> Result<Summary> {
        let infrequent = run.infrequent();

        let frequent_table = self.support_table(&run.frequent_by_level, run);
        let infrequent_table = self.support_table(&infrequent, run);

        let candidate_generation = run.timings.join + run.timings.count;
        let support_counting = run.timings.filter;
        let summary = Summary {
            min_support: self.min_support,
            candidate_generation_time_ns: candidate_generation.as_nanos() as u64,
            support_counting_time_ns: support_counting.as_nanos() as u64,
            total_time_ns: (candidate_generation + support_counting).as_nanos() as u64,
            frequent_itemsets: run.num_frequent(),
            infrequent_itemsets: infrequent.values().map(CandidateSet::len).sum(),
        };

        self.write("Frequent", &serde_json::to_string(&frequent_table)?)?;
        self.write("Infrequent", &serde_json::to_string(&infrequent_table)?)?;
        self.write("Summary", &serde_json::to_string(&summary)?)?;

        Ok(summary)
    }
}

impl LevelSink for ReportWriter<'_> {
    type Error = Error;

    fn level(&mut self, level: &Level) -> Result<()> {
        let candidates = self.candidate_file(&level.candidates, level.timings.count)?;
        let frequent = self.candidate_file(&level.frequent, level.timings.filter)?;

        self.write(&format!("C{}", level.size), &candidates)?;
        self.write(&format!("L{}", level.size), &frequent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::Miner;
    use maplit::btreemap;
    use tempfile::TempDir;

    fn abc_store() -> TransactionStore {
        TransactionStore::from_lines(vec!["items", "A B", "A C", "A B C", "B C"])
    }

    fn read_lines(path: PathBuf) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn writes_levels_and_summary() {
        let dir = TempDir::new().unwrap();
        let store = abc_store();
        let mut writer = ReportWriter::new(dir.path(), Path::new("data/basket.txt"), &store, 2);

        let run = Miner::new(&store, 2).mine_with(&mut writer).unwrap();
        let summary = writer.write_summary(&run).unwrap();

        let c1 = read_lines(dir.path().join("basket_C1.txt"));
        assert_eq!(c1.len(), 3);
        assert_eq!(c1[0], "number of candidates: 3");
        assert!(c1[1].starts_with("computation time in nanoseconds: "));
        assert_eq!(c1[2], r#"{"0":["A"],"1":["B"],"2":["C"]}"#);

        let l2 = read_lines(dir.path().join("basket_L2.txt"));
        assert_eq!(l2[0], "number of candidates: 3");
        assert_eq!(l2[2], r#"{"0":["A","B"],"1":["A","C"],"2":["B","C"]}"#);

        let l3 = read_lines(dir.path().join("basket_L3.txt"));
        assert_eq!(l3[0], "number of candidates: 0");
        assert_eq!(l3[2], "{}");
        assert!(!dir.path().join("basket_C4.txt").exists());

        let frequent: BTreeMap<String, u64> =
            serde_json::from_str(&fs::read_to_string(writer.path("Frequent")).unwrap()).unwrap();
        assert_eq!(
            frequent,
            btreemap! {
                "{A}".to_owned() => 3,
                "{B}".to_owned() => 3,
                "{C}".to_owned() => 3,
                "{A, B}".to_owned() => 2,
                "{A, C}".to_owned() => 2,
                "{B, C}".to_owned() => 2,
            }
        );

        let infrequent: BTreeMap<String, u64> =
            serde_json::from_str(&fs::read_to_string(writer.path("Infrequent")).unwrap()).unwrap();
        assert_eq!(infrequent, btreemap! { "{A, B, C}".to_owned() => 1 });

        let written: Summary =
            serde_json::from_str(&fs::read_to_string(writer.path("Summary")).unwrap()).unwrap();
        assert_eq!(written, summary);
        assert_eq!(summary.min_support, 2);
        assert_eq!(summary.frequent_itemsets, 6);
        assert_eq!(summary.infrequent_itemsets, 1);
        assert_eq!(
            summary.total_time_ns,
            summary.candidate_generation_time_ns + summary.support_counting_time_ns
        );
    }

    #[test]
    fn empty_source_writes_one_level() {
        let dir = TempDir::new().unwrap();
        let store = TransactionStore::from_lines(vec!["items"]);
        let mut writer = ReportWriter::new(dir.path(), Path::new("empty.txt"), &store, 1);

        let run = Miner::new(&store, 1).mine_with(&mut writer).unwrap();
        let summary = writer.write_summary(&run).unwrap();

        assert_eq!(read_lines(writer.path("C1"))[0], "number of candidates: 0");
        assert!(!writer.path("C2").exists());
        assert_eq!(fs::read_to_string(writer.path("Frequent")).unwrap(), "{}");
        assert_eq!(summary.frequent_itemsets, 0);
        assert_eq!(summary.infrequent_itemsets, 0);
    }

    #[test]
    fn missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let store = abc_store();
        let mut writer = ReportWriter::new(&missing, Path::new("basket.txt"), &store, 2);

        let err = Miner::new(&store, 2).mine_with(&mut writer).unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
    }
}
