use itertools::Itertools;

use crate::types::{CandidateSet, Itemset, ItemsetLength};

/// Self-join of a level's itemsets.
///
/// Every unordered pair whose union holds exactly `size` items yields one
/// candidate. An itemset joined with itself keeps its own size, so it never
/// qualifies for `size = k + 1`.
pub fn join_set<'a, I>(itemsets: I, size: ItemsetLength) -> CandidateSet
where
    I: IntoIterator<Item = &'a Itemset>,
{
    let mut itemsets: Vec<&Itemset> = itemsets.into_iter().collect();
    if itemsets.len() < 2 {
        return CandidateSet::new();
    }

    itemsets.sort_unstable();

    itemsets
        .into_iter()
        .tuple_combinations()
        .map(|(a, b)| a.union(b))
        .filter(|union| union.len() == size)
        .collect()
}
