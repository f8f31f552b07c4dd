//! Serialization of the matrix back to text
//!
//! Quoting mirrors the tokenizer: a cell is wrapped as a whole in double quotes,
//! or in single quotes when it already contains a double quote. There is no
//! escaping inside a quoted cell.

use std::borrow::Cow;

use crate::error::{CsvDocError, Result};
use crate::params::LineEnding;
use crate::tokenizer::is_wrapped;

/// Quote a cell for output if it needs it
///
/// # Returns
/// The text to write, or `None` if whole-cell quoting cannot represent the cell
pub fn quote_cell(cell: &str, separator: char) -> Option<Cow<'_, str>> {
    let needs_quotes = cell.contains(separator) || cell.contains(['\n', '\r']);

    if !needs_quotes || is_wrapped(cell) {
        Some(Cow::Borrowed(cell))
    } else if !cell.contains('"') {
        Some(Cow::Owned(format!("\"{}\"", cell)))
    } else if !cell.contains('\'') {
        Some(Cow::Owned(format!("'{}'", cell)))
    } else {
        None
    }
}

/// Write the rows as text
///
/// # Arguments
/// - `data` - The matrix to write
/// - `separator` - The column separator
/// - `line_ending` - Terminator appended to every row
///
/// # Errors
/// - `CsvDocError::UnquotableCell` if a cell needs quoting but contains both quote characters
///
/// # Returns
/// The serialized text
pub fn write_text(data: &[Vec<String>], separator: char, line_ending: LineEnding) -> Result<String> {
    let mut out = String::new();

    for (row_idx, row) in data.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if col_idx > 0 {
                out.push(separator);
            }
            let quoted = quote_cell(cell, separator).ok_or(CsvDocError::UnquotableCell {
                row: row_idx,
                column: col_idx,
            })?;
            out.push_str(&quoted);
        }
        out.push_str(line_ending.as_str());
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_quote_cell() {
        assert_eq!(quote_cell("plain", ',').unwrap(), "plain");
        assert_eq!(quote_cell("b,c", ',').unwrap(), "\"b,c\"");
        assert_eq!(quote_cell("say \"hi\", ok", ',').unwrap(), "'say \"hi\", ok'");
        assert_eq!(quote_cell("\"a,b\"", ',').unwrap(), "\"a,b\"");
        assert_eq!(quote_cell("b;c", ',').unwrap(), "b;c");
        assert_eq!(quote_cell("two\nlines", ',').unwrap(), "\"two\nlines\"");
        assert!(quote_cell("it's \"both\", sadly", ',').is_none());
        // Both quotes are harmless when no quoting is needed
        assert_eq!(quote_cell("it's \"fine\"", ',').unwrap(), "it's \"fine\"");
    }

    #[test]
    fn test_write_text() {
        let data = matrix(&[&["a", "b,c", ""], &["1", "2", "3"]]);
        assert_eq!(
            write_text(&data, ',', LineEnding::Lf).unwrap(),
            "a,\"b,c\",\n1,2,3\n"
        );
        assert_eq!(
            write_text(&data, ';', LineEnding::CrLf).unwrap(),
            "a;b,c;\r\n1;2;3\r\n"
        );
        assert_eq!(write_text(&[], ',', LineEnding::Lf).unwrap(), "");
    }

    #[test]
    fn test_wrapped_cells_are_written_bare() {
        use crate::params::SeparatorParams;
        use crate::tokenizer::tokenize;

        assert_eq!(quote_cell("'x'", ',').unwrap(), "'x'");

        // The stored quotes are taken as whole-cell quoting and stripped on reparse
        let data = matrix(&[&["\"a,b\"", "'x'"]]);
        let text = write_text(&data, ',', LineEnding::Lf).unwrap();
        assert_eq!(text, "\"a,b\",'x'\n");
        assert_eq!(
            tokenize(&text, &SeparatorParams::default()).rows,
            vec![vec!["a,b", "x"]]
        );
    }

    #[test]
    fn test_unquotable() {
        let data = matrix(&[&["ok"], &["'x', \"y\""]]);
        assert!(matches!(
            write_text(&data, ',', LineEnding::Lf),
            Err(CsvDocError::UnquotableCell { row: 1, column: 0 })
        ));
    }
}
