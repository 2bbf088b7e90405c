pub mod fwp;

pub use fwp::{
    mine_stream, FwpError, FwpStream, MiningResult, PruningBound, SlidingWindow, WeightTable,
    WindowConfig, WindowReport,
};

#[cfg(feature = "python")]
mod python {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use numpy::ndarray::Array2;
    use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
    use once_cell::sync::Lazy;
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;

    use crate::fwp::{transactions_from_matrix, FwpError, FwpStream, MiningResult, WeightTable, WindowConfig};

    // Global storage for streaming windows
    static WINDOWS: Lazy<Mutex<HashMap<usize, FwpStream>>> = Lazy::new(|| Mutex::new(HashMap::new()));
    static NEXT_PID: Lazy<Mutex<usize>> = Lazy::new(|| Mutex::new(0));

    type LevelArrays<'py> = (Bound<'py, PyArray2<usize>>, Bound<'py, PyArray1<f64>>);

    fn to_py_err(err: FwpError) -> PyErr {
        match err {
            FwpError::Cancelled => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }

    fn lock_error<T>(e: std::sync::PoisonError<T>) -> PyErr {
        PyRuntimeError::new_err(format!("Lock error: {}", e))
    }

    fn result_to_arrays<'py>(py: Python<'py>, result: &MiningResult) -> PyResult<Vec<LevelArrays<'py>>> {
        let mut arrays = Vec::new();

        for level in result.levels() {
            if level.is_empty() {
                continue;
            }

            let itemset_size = level.itemset_size;
            let num_itemsets = level.len();
            let mut data = vec![0usize; num_itemsets * itemset_size];

            for (i, itemset) in level.iter_itemsets().enumerate() {
                data[i * itemset_size..(i + 1) * itemset_size].copy_from_slice(itemset);
            }

            let itemsets = Array2::from_shape_vec((num_itemsets, itemset_size), data)
                .map_err(|_| PyValueError::new_err("Failed to create array"))?;

            arrays.push((
                itemsets.into_pyarray(py),
                level.supports().to_vec().into_pyarray(py),
            ));
        }

        Ok(arrays)
    }

    fn push_matrix<'py>(
        py: Python<'py>,
        stream: &mut FwpStream,
        transactions: PyReadonlyArray2<'py, i32>,
    ) -> PyResult<Vec<Vec<LevelArrays<'py>>>> {
        let mut reports = Vec::new();
        for items in transactions_from_matrix(transactions.as_array()) {
            if let Some(report) = stream.push_ids(&items).map_err(to_py_err)? {
                reports.push(result_to_arrays(py, &report.patterns)?);
            }
        }
        Ok(reports)
    }

    #[pyfunction]
    fn create_window(
        item_weights: PyReadonlyArray1<'_, f64>,
        window_size: usize,
        min_weighted_support: f64,
    ) -> PyResult<usize> {
        let weights = WeightTable::from_dense(item_weights.as_slice()?);
        let config = WindowConfig::new(window_size, min_weighted_support);
        let stream = FwpStream::new(weights, config).map_err(to_py_err)?;

        let mut pid_lock = NEXT_PID.lock().map_err(lock_error)?;
        let pid = *pid_lock;
        *pid_lock += 1;
        drop(pid_lock);

        WINDOWS.lock().map_err(lock_error)?.insert(pid, stream);
        Ok(pid)
    }

    /// Returns one entry per window state reached while consuming the rows:
    /// a list of `(itemsets, supports)` pairs, one per itemset size.
    #[pyfunction]
    fn window_push<'py>(
        py: Python<'py>,
        pid: usize,
        transactions: PyReadonlyArray2<'py, i32>,
    ) -> PyResult<Vec<Vec<LevelArrays<'py>>>> {
        let mut windows = WINDOWS.lock().map_err(lock_error)?;
        let stream = windows
            .get_mut(&pid)
            .ok_or_else(|| PyValueError::new_err("Invalid window ID"))?;
        push_matrix(py, stream, transactions)
    }

    #[pyfunction]
    fn window_cleanup(pid: usize) -> PyResult<()> {
        WINDOWS
            .lock()
            .map_err(lock_error)?
            .remove(&pid)
            .ok_or_else(|| PyValueError::new_err("Invalid window ID"))?;
        Ok(())
    }

    #[pyfunction]
    fn mine_weighted_patterns<'py>(
        py: Python<'py>,
        transactions: PyReadonlyArray2<'py, i32>,
        item_weights: PyReadonlyArray1<'py, f64>,
        window_size: usize,
        min_weighted_support: f64,
    ) -> PyResult<Vec<Vec<LevelArrays<'py>>>> {
        let weights = WeightTable::from_dense(item_weights.as_slice()?);
        let config = WindowConfig::new(window_size, min_weighted_support);
        let mut stream = FwpStream::new(weights, config).map_err(to_py_err)?;
        push_matrix(py, &mut stream, transactions)
    }

    #[pymodule]
    fn swn_fwp(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(create_window, m)?)?;
        m.add_function(wrap_pyfunction!(window_push, m)?)?;
        m.add_function(wrap_pyfunction!(window_cleanup, m)?)?;
        m.add_function(wrap_pyfunction!(mine_weighted_patterns, m)?)?;
        Ok(())
    }
}
