use pyo3::prelude::*;
use pyo3::types::{IntoPyDict, PyDict, PyFrozenSet};
use pyo3::wrap_pyfunction;

use crate::{miner::Miner, transactions::TransactionStore, types::SupportCount};

macro_rules! pyfrozenset {
    ($py:expr,$x:expr) => {{
        let set: Py<PyFrozenSet> = PyFrozenSet::new($py, &$x)?.into();
        set
    }};
}

/// Frequent itemsets of every nonempty level, as
/// `{size: {frozenset(items): support}}`.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, /)")]
fn frequent_itemsets(
    transactions: Vec<Vec<String>>,
    min_support: SupportCount,
) -> PyResult<Py<PyDict>> {
    let store = TransactionStore::from_baskets(transactions);
    let run = Miner::new(&store, min_support).mine();

    Python::with_gil(|py| {
        let mut levels = Vec::with_capacity(run.frequent_by_level.len());
        for (&size, frequent) in &run.frequent_by_level {
            let mut itemset_counts = Vec::with_capacity(frequent.len());
            for itemset in frequent {
                let count = run.support.get(itemset).unwrap_or_default();
                itemset_counts.push((pyfrozenset![py, store.names(itemset)], count));
            }
            let py_itemset_counts: Py<PyDict> = itemset_counts.into_py_dict(py).into();
            levels.push((size, py_itemset_counts));
        }
        Ok(levels.into_py_dict(py).into())
    })
}

#[pymodule]
fn apriori_fset(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(frequent_itemsets, m)?)?;
    Ok(())
}
