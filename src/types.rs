use std::collections::{BTreeMap, HashMap, HashSet};

use bitvec::prelude::*;

pub type ItemId = usize;
pub type ItemName<'l> = &'l str;

pub type ReverseLookup = HashMap<String, ItemId>;
pub type Inventory = Vec<String>;

pub type SupportCount = u64;
pub type ItemsetLength = usize;

/// A set of distinct itemsets considered at one level.
pub type CandidateSet = HashSet<Itemset>;
/// Level index to the itemsets kept at that level.
pub type LevelSets = BTreeMap<ItemsetLength, CandidateSet>;

/// An unordered set of items.
///
/// Items are kept sorted and unique, so two itemsets holding the same items
/// compare and hash equal no matter how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Itemset(Vec<ItemId>);

impl Itemset {
    pub fn new(mut items: Vec<ItemId>) -> Self {
        items.sort_unstable();
        items.dedup();
        Itemset(items)
    }

    pub fn single(item: ItemId) -> Self {
        Itemset(vec![item])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[ItemId] {
        &self.0
    }

    /// Merge of two sorted item lists.
    pub fn union(&self, other: &Itemset) -> Itemset {
        let (a, b) = (&self.0, &other.0);
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            if a[i] < b[j] {
                merged.push(a[i]);
                i += 1;
            } else if b[j] < a[i] {
                merged.push(b[j]);
                j += 1;
            } else {
                merged.push(a[i]);
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        Itemset(merged)
    }

    pub fn is_subset_of(&self, transaction: &Transaction) -> bool {
        self.0.iter().all(|&item| transaction.contains(item))
    }
}

impl FromIterator<ItemId> for Itemset {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Itemset::new(iter.into_iter().collect())
    }
}

/// One observed basket, stored as a bitset over item ids.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    bits: BitVec<usize, Lsb0>,
}

impl Transaction {
    pub fn contains(&self, item: ItemId) -> bool {
        self.bits.get(item).map_or(false, |bit| *bit)
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.bits.iter_ones()
    }
}

impl FromIterator<ItemId> for Transaction {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        let mut bits: BitVec<usize, Lsb0> = BitVec::new();
        for item in iter {
            if bits.len() <= item {
                bits.resize(item + 1, false);
            }
            bits.set(item, true);
        }
        Transaction { bits }
    }
}

/// Support counts of every itemset counted during one run.
///
/// Entries are only ever inserted or incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportTable {
    counts: HashMap<Itemset, SupportCount>,
}

impl SupportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, itemset: &Itemset, count: SupportCount) {
        *self.counts.entry(itemset.clone()).or_insert(0) += count;
    }

    pub fn get(&self, itemset: &Itemset) -> Option<SupportCount> {
        self.counts.get(itemset).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, SupportCount)> {
        self.counts.iter().map(|(itemset, &count)| (itemset, count))
    }
}
