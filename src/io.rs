use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::document::Document;
use crate::error::{CsvDocError, Result};
use crate::params::DocumentOptions;

/// Read a Document from a byte buffer
///
/// # Arguments
/// - `data` - The raw bytes, optionally BOM prefixed
/// - `options` - Label, separator and converter parameters
///
/// # Returns
/// A `Document` populated with the parsed data, or an error if the bytes cannot be decoded
pub fn from_buffer(data: &[u8], options: &DocumentOptions) -> Result<Document> {
    let mut doc = Document::new(options.clone());
    doc.load_from_buffer(data)?;
    Ok(doc)
}

/// Read a Document from any reader
pub fn from_reader<R: Read>(reader: R, options: &DocumentOptions) -> Result<Document> {
    let mut doc = Document::new(options.clone());
    doc.load_from_reader(reader)?;
    Ok(doc)
}

/// Read a Document from text
pub fn from_str(text: &str, options: &DocumentOptions) -> Document {
    let mut doc = Document::new(options.clone());
    doc.load_from_str(text);
    doc
}

/// Read a Document from a file
///
/// The path is remembered, so `Document::save` writes back to it.
///
/// # Arguments
/// - `path` - The path to the file to read
/// - `options` - Label, separator and converter parameters
///
/// # Type
/// - `P` - A type that can be converted to a `Path` reference, such as `&str` or `String`
pub fn from_file<P: AsRef<Path>>(path: P, options: &DocumentOptions) -> Result<Document> {
    let mut doc = Document::new(options.clone());
    doc.load(path)?;
    Ok(doc)
}

/// Write a Document to a byte buffer, re-encoded like its source
pub fn to_buffer(doc: &Document) -> Result<Vec<u8>> {
    doc.to_bytes()
}

/// Write a Document to any writer
pub fn to_writer<W: Write>(doc: &Document, writer: W) -> Result<()> {
    doc.save_to_writer(writer)
}

/// Write a Document to a file
///
/// # Returns
/// Ok(()) if the file was successfully written, or an error if the file cannot be created or written to
pub fn to_file<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    doc.save_as(path)
}

impl FromStr for Document {
    type Err = CsvDocError;

    /// Parse with default options
    fn from_str(text: &str) -> Result<Self> {
        Ok(from_str(text, &DocumentOptions::default()))
    }
}
