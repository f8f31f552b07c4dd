use std::fmt;

use thiserror::Error;

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, CsvDocError>;

/// The two axes of a document, used to qualify index and label errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur during document operations
#[derive(Error, Debug)]
pub enum CsvDocError {
    /// I/O error on the byte source or sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source could not be decoded as text
    #[error("Text encoding error: {0}")]
    Encoding(String),

    /// `save()` was called on a document that has no backing path
    #[error("Document has no path, use save_as")]
    NoPath,

    /// Index outside the current extent of the matrix
    #[error("{axis} index out of bounds: {index} (len: {len})")]
    IndexOutOfBounds { axis: Axis, index: usize, len: usize },

    /// Name lookup miss
    #[error("{axis} not found: {name}")]
    LabelNotFound { axis: Axis, name: String },

    /// Label access while the label row/column is disabled
    #[error("{0} labels are disabled")]
    LabelsDisabled(Axis),

    /// Numeric parse failure with no default value configured
    #[error("Cannot convert '{text}' to {kind}")]
    Conversion { text: String, kind: &'static str },

    /// The value kind has no converter for the requested direction
    #[error("Unsupported conversion datatype: {0}")]
    NoConverter(&'static str),

    /// A cell that whole-cell quoting cannot represent
    #[error("Cell at row {row}, column {column} contains both quote characters and needs quoting")]
    UnquotableCell { row: usize, column: usize },
}

impl CsvDocError {
    pub(crate) fn out_of_bounds(axis: Axis, index: usize, len: usize) -> Self {
        CsvDocError::IndexOutOfBounds { axis, index, len }
    }

    pub(crate) fn not_found(axis: Axis, name: &str) -> Self {
        CsvDocError::LabelNotFound {
            axis,
            name: name.to_string(),
        }
    }

    /// Whether this error is a name lookup failure, including lookups on a disabled label axis
    pub fn is_label_not_found(&self) -> bool {
        matches!(
            self,
            CsvDocError::LabelNotFound { .. } | CsvDocError::LabelsDisabled(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CsvDocError::out_of_bounds(Axis::Column, 4, 3);
        assert_eq!(err.to_string(), "column index out of bounds: 4 (len: 3)");

        let err = CsvDocError::not_found(Axis::Row, "total");
        assert_eq!(err.to_string(), "row not found: total");
        assert!(err.is_label_not_found());
        assert!(CsvDocError::LabelsDisabled(Axis::Row).is_label_not_found());
        assert!(!CsvDocError::NoPath.is_label_not_found());
    }
}
