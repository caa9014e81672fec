use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{CandidateSet, Inventory, ItemId, ItemName, Itemset, ReverseLookup, Transaction},
};

const APPROX_NUM_UNIQUE_ITEMS: usize = 1024; // arbitrary

/// Transactions of one data source, with item tokens interned to ids.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    reverse_lookup: ReverseLookup,
    inventory: Inventory,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a header line followed by one transaction per line.
    pub fn from_reader<R: Read>(reader: R) -> std::io::Result<Self> {
        let mut store = Self::with_capacity(APPROX_NUM_UNIQUE_ITEMS);

        for (line_no, line) in BufReader::new(reader).split(b'\n').enumerate().skip(1) {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            match String::from_utf8(line) {
                Ok(line) => store.push_line(&line),
                Err(_) => {
                    debug!(line = line_no + 1, "malformed transaction line, keeping it empty");
                    store.transactions.push(Transaction::default());
                }
            }
        }

        Ok(store)
    }

    /// Same as [`TransactionStore::from_reader`] for lines already in memory.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut store = Self::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
        for line in lines.into_iter().skip(1) {
            store.push_line(line);
        }
        store
    }

    /// Builds a store from pre-split baskets; there is no header to drop.
    pub fn from_baskets<B, S>(baskets: B) -> Self
    where
        B: IntoIterator,
        B::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::default();
        for basket in baskets {
            let transaction: Transaction = basket
                .into_iter()
                .map(|token| store.intern(token.as_ref()))
                .collect();
            store.transactions.push(transaction);
        }
        store
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            reverse_lookup: HashMap::with_capacity(capacity),
            inventory: Vec::with_capacity(capacity),
            transactions: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        let transaction: Transaction = line
            .split_whitespace()
            .map(|token| self.intern(token))
            .collect();
        self.transactions.push(transaction);
    }

    fn intern(&mut self, token: &str) -> ItemId {
        if let Some(&item_id) = self.reverse_lookup.get(token) {
            return item_id;
        }
        let item_id = self.inventory.len();
        self.reverse_lookup.insert(token.to_owned(), item_id);
        self.inventory.push(token.to_owned());
        item_id
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.inventory.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Every distinct item as a 1-itemset.
    pub fn universe(&self) -> CandidateSet {
        (0..self.inventory.len()).map(Itemset::single).collect()
    }

    pub fn item_name(&self, item_id: ItemId) -> Option<ItemName<'_>> {
        self.inventory.get(item_id).map(String::as_str)
    }

    pub fn item_id(&self, token: &str) -> Option<ItemId> {
        self.reverse_lookup.get(token).copied()
    }

    /// Item tokens of an itemset, in id order.
    pub fn names<'s>(&'s self, itemset: &Itemset) -> Vec<ItemName<'s>> {
        itemset
            .items()
            .iter()
            .filter_map(|&item_id| self.item_name(item_id))
            .collect()
    }

    /// Looks up an itemset by its tokens; `None` if any token is unknown.
    pub fn itemset(&self, tokens: &[&str]) -> Option<Itemset> {
        tokens
            .iter()
            .map(|token| self.item_id(token))
            .collect::<Option<Vec<_>>>()
            .map(Itemset::new)
    }
}
