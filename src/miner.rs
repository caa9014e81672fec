//! Level-wise Apriori driver.
//!
//! Level 1 counts the item universe directly. Each later level joins the
//! previous level's frequent itemsets into candidates one item larger and
//! counts those. The run stops after the first level whose frequent set is
//! empty, which happens no later than level `num_items + 1`.

use std::{
    convert::Infallible,
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    combi::join_set,
    itemsets::count_support,
    transactions::TransactionStore,
    types::{CandidateSet, ItemsetLength, LevelSets, SupportCount, SupportTable},
};

/// Results of one level, handed to a [`LevelSink`] as soon as they exist.
#[derive(Debug, Clone)]
pub struct Level {
    pub size: ItemsetLength,
    /// Candidates with nonzero support.
    pub candidates: CandidateSet,
    pub frequent: CandidateSet,
    pub timings: LevelTimings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelTimings {
    pub join: Duration,
    pub count: Duration,
    pub filter: Duration,
}

/// Per-phase totals across every level of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTimings {
    pub join: Duration,
    pub count: Duration,
    pub filter: Duration,
    pub total: Duration,
}

impl RunTimings {
    fn accumulate(&mut self, level: &LevelTimings) {
        self.join += level.join;
        self.count += level.count;
        self.filter += level.filter;
    }
}

/// Receives each level's results while a run is in progress.
pub trait LevelSink {
    type Error;

    fn level(&mut self, level: &Level) -> Result<(), Self::Error>;
}

impl LevelSink for () {
    type Error = Infallible;

    fn level(&mut self, _: &Level) -> Result<(), Infallible> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MiningRun {
    /// Only levels with at least one frequent itemset.
    pub frequent_by_level: LevelSets,
    /// Every processed level, including the last one.
    pub counted_by_level: LevelSets,
    pub support: SupportTable,
    pub timings: RunTimings,
}

impl MiningRun {
    /// Counted candidates that missed the threshold, per level.
    pub fn infrequent(&self) -> LevelSets {
        self.counted_by_level
            .iter()
            .map(|(&size, counted)| {
                let infrequent = match self.frequent_by_level.get(&size) {
                    Some(frequent) => counted.difference(frequent).cloned().collect(),
                    None => counted.clone(),
                };
                (size, infrequent)
            })
            .collect()
    }

    pub fn num_frequent(&self) -> usize {
        self.frequent_by_level.values().map(CandidateSet::len).sum()
    }

    pub fn num_levels(&self) -> usize {
        self.counted_by_level.len()
    }
}

pub struct Miner<'s> {
    store: &'s TransactionStore,
    min_support: SupportCount,
}

impl<'s> Miner<'s> {
    pub fn new(store: &'s TransactionStore, min_support: SupportCount) -> Self {
        Self { store, min_support }
    }

    pub fn mine(&self) -> MiningRun {
        match self.mine_with(&mut ()) {
            Ok(run) => run,
            Err(never) => match never {},
        }
    }

    /// Runs every level, reporting each to `sink` before moving on.
    ///
    /// The first sink error ends the run.
    pub fn mine_with<S: LevelSink>(&self, sink: &mut S) -> Result<MiningRun, S::Error> {
        let started = Instant::now();
        let transactions = self.store.transactions();
        let mut run = MiningRun::default();

        let mut size: ItemsetLength = 1;
        let mut candidates = self.store.universe();
        let mut join_time = Duration::ZERO;

        loop {
            info!(size, candidates = candidates.len(), "counting itemsets");
            let counted = count_support(
                &candidates,
                transactions,
                self.min_support,
                &mut run.support,
            );
            let level = Level {
                size,
                candidates: counted.counted,
                frequent: counted.frequent,
                timings: LevelTimings {
                    join: join_time,
                    count: counted.count_time,
                    filter: counted.filter_time,
                },
            };
            info!(
                size,
                counted = level.candidates.len(),
                frequent = level.frequent.len(),
                "level done"
            );

            sink.level(&level)?;
            run.timings.accumulate(&level.timings);

            let Level {
                candidates: counted,
                frequent,
                ..
            } = level;
            run.counted_by_level.insert(size, counted);
            if frequent.is_empty() {
                break;
            }

            size += 1;
            let start = Instant::now();
            candidates = join_set(&frequent, size);
            join_time = start.elapsed();
            run.frequent_by_level.insert(size - 1, frequent);
        }

        run.timings.total = started.elapsed();
        Ok(run)
    }
}
