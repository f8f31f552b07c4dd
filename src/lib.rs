//! # csvdoc
//!
//! A Rust library for reading, editing and writing delimited text tables (CSV, TSV, ...)
//! as an in-memory document with label-aware access and typed conversion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lib_csvdoc::{from_file, DocumentOptions};
//!
//! // Read a CSV file whose first row holds the column labels
//! let mut doc = from_file("prices.csv", &DocumentOptions::default()).unwrap();
//!
//! // Read a column by label, converted to f64
//! let close: Vec<f64> = doc.get_column("Close").unwrap();
//! println!("Rows: {}, last close: {:?}", doc.row_count(), close.last());
//!
//! // Edit and write back
//! doc.set_cell("Close", 0usize, 12.5).unwrap();
//! doc.save().unwrap();
//! ```
//!
//! ## Features
//!
//! - Whole-cell quoting with `"` or `'`, optional line breaks inside quotes
//! - Access by logical index or by row/column label
//! - Conversion to integers, floats, chars and strings, with an optional default for invalid numbers
//! - Automatic growth when writing past the end of the table
//! - UTF-8 and BOM-prefixed UTF-16 (LE/BE) sources, written back in the same encoding
//! - CRLF/LF detection

pub mod convert;
pub mod document;
pub mod encoding;
pub mod error;
pub mod io;
pub mod label;
pub mod params;
pub mod tokenizer;
pub mod writer;

#[cfg(feature = "python")]
pub mod python;

pub use crate::convert::{CellConvert, Converter};
pub use crate::document::Document;
pub use crate::encoding::TextEncoding;
pub use crate::error::{Axis, CsvDocError, Result};
pub use crate::io::{from_buffer, from_file, from_reader, from_str, to_buffer, to_file, to_writer};
pub use crate::label::{Key, LabelIndex};
pub use crate::params::{ConverterParams, DocumentOptions, LabelParams, LineEnding, SeparatorParams};
