//! Level-wise frequent itemset mining with Apriori.
//!
//! ```
//! use apriori_fset::{Miner, TransactionStore};
//!
//! let store = TransactionStore::from_lines(vec!["items", "A B", "A C", "A B C", "B C"]);
//! let run = Miner::new(&store, 2).mine();
//!
//! assert_eq!(run.frequent_by_level[&2].len(), 3);
//! assert!(!run.frequent_by_level.contains_key(&3));
//! ```

pub mod batch;
pub mod combi;
pub mod config;
pub mod error;
pub mod itemsets;
pub mod miner;
pub mod report;
pub mod transactions;
pub mod types;
#[cfg(feature = "python")]
mod wrapper;


pub use batch::{run_batch, run_file};
pub use config::Config;
pub use error::{Error, Result};
pub use miner::{Level, LevelSink, Miner, MiningRun};
pub use report::{ReportWriter, Summary};
pub use transactions::TransactionStore;
pub use types::{Itemset, SupportTable, Transaction};
