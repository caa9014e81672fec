use std::time::{Duration, Instant};

use tracing::debug;

use crate::types::{CandidateSet, Itemset, SupportCount, SupportTable, Transaction};

/// Outcome of counting one level's candidates.
#[derive(Debug, Clone, Default)]
pub struct LevelCount {
    /// Candidates seen in at least one transaction.
    pub counted: CandidateSet,
    /// Counted candidates meeting the minimum support.
    pub frequent: CandidateSet,
    pub count_time: Duration,
    pub filter_time: Duration,
}

/// Counts every candidate against every transaction and keeps those meeting
/// `min_support`.
///
/// Nonzero counts are added to `table`. Candidates no transaction contains
/// are dropped from both outputs.
pub fn count_support<'a, I>(
    candidates: I,
    transactions: &[Transaction],
    min_support: SupportCount,
    table: &mut SupportTable,
) -> LevelCount
where
    I: IntoIterator<Item = &'a Itemset>,
{
    let start = Instant::now();
    let candidate_counts: Vec<(&Itemset, SupportCount)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let candidate_count = transactions
                .iter()
                .filter(|transaction| candidate.is_subset_of(transaction))
                .count() as SupportCount;
            if candidate_count > 0 {
                Some((candidate, candidate_count))
            } else {
                None
            }
        })
        .collect();

    let mut counted = CandidateSet::with_capacity(candidate_counts.len());
    for &(candidate, candidate_count) in &candidate_counts {
        table.add(candidate, candidate_count);
        counted.insert(candidate.clone());
    }
    let count_time = start.elapsed();

    let start = Instant::now();
    let frequent: CandidateSet = candidate_counts
        .into_iter()
        .filter(|&(_, candidate_count)| candidate_count >= min_support)
        .map(|(candidate, _)| candidate.clone())
        .collect();
    let filter_time = start.elapsed();

    debug!(
        counted = counted.len(),
        frequent = frequent.len(),
        count_ns = count_time.as_nanos() as u64,
        filter_ns = filter_time.as_nanos() as u64,
        "counted support"
    );

    LevelCount {
        counted,
        frequent,
        count_time,
        filter_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashset;

    fn transactions(raw: Vec<Vec<usize>>) -> Vec<Transaction> {
        raw.into_iter().map(|items| items.into_iter().collect()).collect()
    }

    fn candidates(raw: Vec<Vec<usize>>) -> Vec<Itemset> {
        raw.into_iter().map(Itemset::new).collect()
    }

    #[test]
    fn update_counts() {
        let transactions = transactions(vec![vec![0, 1]]);
        let candidates = candidates(vec![vec![0], vec![1]]);
        let mut table = SupportTable::new();

        let level = count_support(&candidates, &transactions, 0, &mut table);

        assert_eq!(level.frequent, hashset! { Itemset::single(0), Itemset::single(1) });
        assert_eq!(table.get(&Itemset::single(0)), Some(1));
        assert_eq!(table.get(&Itemset::single(1)), Some(1));
    }

    #[test]
    fn update_counts_with_min_support_2() {
        let transactions = transactions(vec![vec![10, 11], vec![10, 12]]);
        let candidates = candidates(vec![vec![10], vec![11]]);
        let mut table = SupportTable::new();

        let level = count_support(&candidates, &transactions, 2, &mut table);

        assert_eq!(level.counted, hashset! { Itemset::single(10), Itemset::single(11) });
        assert_eq!(level.frequent, hashset! { Itemset::single(10) });
        assert_eq!(table.get(&Itemset::single(11)), Some(1));
    }

    #[test]
    fn update_counts_2_itemset() {
        let transactions = transactions(vec![
            vec![10, 11],
            vec![10, 15],
            vec![10, 13],
            vec![10, 13],
            vec![10, 13],
            vec![11, 13],
        ]);
        let candidates = candidates(vec![
            vec![10, 11],
            vec![10, 13],
            vec![10, 15],
            vec![11, 13],
            vec![11, 15],
        ]);
        let mut table = SupportTable::new();

        let level = count_support(&candidates, &transactions, 3, &mut table);

        assert_eq!(level.frequent, hashset! { Itemset::new(vec![10, 13]) });
        assert_eq!(level.counted.len(), 4);
        assert!(!level.counted.contains(&Itemset::new(vec![11, 15])));
        assert_eq!(table.get(&Itemset::new(vec![10, 13])), Some(3));
        assert_eq!(table.get(&Itemset::new(vec![11, 15])), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        let transactions = transactions(vec![vec![1, 2], vec![1, 2], vec![1]]);
        let candidates = candidates(vec![vec![1, 2]]);
        let mut table = SupportTable::new();

        let level = count_support(&candidates, &transactions, 2, &mut table);

        assert_eq!(level.frequent, hashset! { Itemset::new(vec![1, 2]) });
    }

    #[test]
    fn zero_support_is_dropped_even_with_zero_threshold() {
        let transactions = transactions(vec![vec![1], vec![2]]);
        let candidates = candidates(vec![vec![1, 2]]);
        let mut table = SupportTable::new();

        let level = count_support(&candidates, &transactions, 0, &mut table);

        assert!(level.counted.is_empty());
        assert!(level.frequent.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn counts_accumulate_into_existing_table() {
        let transactions = transactions(vec![vec![0, 1], vec![0]]);
        let candidates = candidates(vec![vec![0]]);
        let mut table = SupportTable::new();
        table.add(&Itemset::new(vec![0, 1]), 1);

        count_support(&candidates, &transactions, 1, &mut table);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&Itemset::single(0)), Some(2));
    }
}
