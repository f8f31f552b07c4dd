use pyo3::prelude::*;

use crate::{
    from_file, CsvDocError, Document as RustDocument, DocumentOptions, LabelParams,
    SeparatorParams,
};

fn to_py_err(err: CsvDocError) -> PyErr {
    match err {
        CsvDocError::Io(_) | CsvDocError::Encoding(_) | CsvDocError::NoPath => {
            PyErr::new::<pyo3::exceptions::PyIOError, _>(err.to_string())
        }
        CsvDocError::IndexOutOfBounds { .. } => {
            PyErr::new::<pyo3::exceptions::PyIndexError, _>(err.to_string())
        }
        CsvDocError::LabelNotFound { .. } | CsvDocError::LabelsDisabled(_) => {
            PyErr::new::<pyo3::exceptions::PyKeyError, _>(err.to_string())
        }
        _ => PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string()),
    }
}

/// A Python wrapper for Document. Cells are exchanged as strings.
#[pyclass(name = "Document")]
pub struct PyDocument {
    inner: RustDocument,
}

#[pymethods]
impl PyDocument {
    /// Create an empty document.
    #[new]
    #[pyo3(signature = (column_name_idx = 0, row_name_idx = -1, separator = ','))]
    pub fn new(column_name_idx: isize, row_name_idx: isize, separator: char) -> Self {
        let options = DocumentOptions::default()
            .with_labels(LabelParams::new(column_name_idx, row_name_idx))
            .with_separator(SeparatorParams::default().with_separator(separator));
        PyDocument {
            inner: RustDocument::new(options),
        }
    }

    /// Load a document from a file.
    #[staticmethod]
    #[pyo3(signature = (path, column_name_idx = 0, row_name_idx = -1, separator = ','))]
    pub fn from_file(
        path: &str,
        column_name_idx: isize,
        row_name_idx: isize,
        separator: char,
    ) -> PyResult<Self> {
        let options = DocumentOptions::default()
            .with_labels(LabelParams::new(column_name_idx, row_name_idx))
            .with_separator(SeparatorParams::default().with_separator(separator));
        let doc = from_file(path, &options).map_err(to_py_err)?;
        Ok(PyDocument { inner: doc })
    }

    /// Write the document back to the file it was loaded from.
    pub fn save(&self) -> PyResult<()> {
        self.inner.save().map_err(to_py_err)
    }

    /// Write the document to another file.
    pub fn save_as(&self, path: &str) -> PyResult<()> {
        self.inner.save_as(path).map_err(to_py_err)
    }

    /// Get a cell by logical column and row index.
    pub fn get_cell(&self, column: usize, row: usize) -> PyResult<String> {
        self.inner.get_cell(column, row).map_err(to_py_err)
    }

    /// Get a cell by column and row label.
    pub fn get_cell_by_name(&self, column: &str, row: &str) -> PyResult<String> {
        self.inner.get_cell(column, row).map_err(to_py_err)
    }

    /// Set a cell by logical column and row index.
    pub fn set_cell(&mut self, column: usize, row: usize, value: String) -> PyResult<()> {
        self.inner.set_cell(column, row, value).map_err(to_py_err)
    }

    /// Get a column by label.
    pub fn get_column(&self, name: &str) -> PyResult<Vec<String>> {
        self.inner.get_column(name).map_err(to_py_err)
    }

    /// Get a row by logical index.
    pub fn get_row(&self, index: usize) -> PyResult<Vec<String>> {
        self.inner.get_row(index).map_err(to_py_err)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.inner.column_names()
    }

    pub fn row_names(&self) -> Vec<String> {
        self.inner.row_names()
    }

    pub fn column_count(&self) -> usize {
        self.inner.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.inner.row_count()
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn lib_csvdoc(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDocument>()?;
    Ok(())
}
