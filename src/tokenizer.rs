//! Quote-aware splitting of decoded text into rows of raw cells
//!
//! Quoting only applies to whole cells: a quote character opens a quoted
//! section when it is the first character of the cell, and the same quote
//! character closes it again. Quotes appearing after other content are plain
//! data. The outer pair of quotes is stripped once the cell is complete.

use std::mem;

use crate::params::{LineEnding, SeparatorParams};

/// Rows produced by the tokenizer together with the line-break statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Raw rows, not yet padded to a common width
    pub rows: Vec<Vec<String>>,
    /// Number of carriage returns seen
    pub cr: usize,
    /// Number of line feeds seen
    pub lf: usize,
}

impl Parsed {
    /// Line ending inferred from the counted line breaks, if there were any
    pub fn line_ending(&self) -> Option<LineEnding> {
        LineEnding::infer(self.cr, self.lf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    InDoubleQuote,
    InSingleQuote,
}

impl QuoteState {
    fn opened_by(quote: char) -> Self {
        if quote == '"' {
            QuoteState::InDoubleQuote
        } else {
            QuoteState::InSingleQuote
        }
    }

    fn is_quoted(&self) -> bool {
        *self != QuoteState::Unquoted
    }
}

/// Streaming tokenizer state machine
///
/// Characters are fed one at a time through [`Tokenizer::feed`]; [`Tokenizer::finish`]
/// flushes whatever is pending and hands back the rows.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    params: &'a SeparatorParams,
    state: QuoteState,
    cell: String,
    row: Vec<String>,
    parsed: Parsed,
}

impl<'a> Tokenizer<'a> {
    pub fn new(params: &'a SeparatorParams) -> Self {
        Self {
            params,
            state: QuoteState::Unquoted,
            cell: String::new(),
            row: Vec::new(),
            parsed: Parsed::default(),
        }
    }

    /// Feed a single character
    pub fn feed(&mut self, ch: char) {
        match ch {
            c if c == self.params.separator && !self.state.is_quoted() => self.end_cell(),
            '"' | '\'' => {
                self.toggle_quote(ch);
                self.cell.push(ch);
            }
            '\r' => {
                self.parsed.cr += 1;
                if self.keeps_linebreak() {
                    self.cell.push(ch);
                }
            }
            '\n' => {
                self.parsed.lf += 1;
                if self.keeps_linebreak() {
                    self.cell.push(ch);
                } else {
                    self.end_row();
                }
            }
            _ => self.cell.push(ch),
        }
    }

    /// Flush the last row, if anything is pending, and return the result
    pub fn finish(mut self) -> Parsed {
        if !self.cell.is_empty() || !self.row.is_empty() {
            self.end_cell();
            let row = mem::take(&mut self.row);
            self.parsed.rows.push(row);
        }
        self.parsed
    }

    fn keeps_linebreak(&self) -> bool {
        self.state.is_quoted() && self.params.quoted_linebreaks
    }

    /// The part of the buffer that decides whether a quote is structural
    fn cell_head(&self) -> &str {
        if self.params.trim {
            self.cell.trim_start()
        } else {
            &self.cell
        }
    }

    fn toggle_quote(&mut self, quote: char) {
        let (empty, leads) = {
            let head = self.cell_head();
            (head.is_empty(), head.starts_with(quote))
        };
        let opened = QuoteState::opened_by(quote);

        self.state = match self.state {
            QuoteState::Unquoted if empty || leads => opened,
            state if state == opened && leads => QuoteState::Unquoted,
            state => state,
        };
    }

    fn end_cell(&mut self) {
        let raw = mem::take(&mut self.cell);
        let cell = if self.params.trim {
            raw.trim()
        } else {
            raw.as_str()
        };
        self.row.push(unquote(cell).to_string());
        self.state = QuoteState::Unquoted;
    }

    fn end_row(&mut self) {
        if self.row.is_empty() && self.cell.is_empty() {
            // Blank line
            self.row.push(String::new());
        } else {
            self.end_cell();
        }
        let row = mem::take(&mut self.row);
        self.parsed.rows.push(row);
        self.state = QuoteState::Unquoted;
    }
}

/// Strip one matching pair of outer quotes
pub(crate) fn unquote(cell: &str) -> &str {
    if is_wrapped(cell) {
        &cell[1..cell.len() - 1]
    } else {
        cell
    }
}

/// Whether the cell is exactly wrapped in a matching pair of quote characters
pub(crate) fn is_wrapped(cell: &str) -> bool {
    cell.len() >= 2
        && ((cell.starts_with('"') && cell.ends_with('"'))
            || (cell.starts_with('\'') && cell.ends_with('\'')))
}

/// Tokenize a whole text
///
/// # Arguments
/// - `text` - The decoded text
/// - `params` - Separator, trim and line-break rules
///
/// # Returns
/// The rows found in the text together with the counted line breaks
pub fn tokenize(text: &str, params: &SeparatorParams) -> Parsed {
    let mut tokenizer = Tokenizer::new(params);
    for ch in text.chars() {
        tokenizer.feed(ch);
    }
    tokenizer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<Vec<String>> {
        tokenize(text, &SeparatorParams::default()).rows
    }

    #[test]
    fn test_simple() {
        assert_eq!(
            rows("a,b,c\n1,2,3\n"),
            vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]
        );
    }

    #[test]
    fn test_quoted_separator() {
        assert_eq!(rows("a,\"b,c\",d\n"), vec![vec!["a", "b,c", "d"]]);
        assert_eq!(rows("a,'b,c',d"), vec![vec!["a", "b,c", "d"]]);
    }

    #[test]
    fn test_other_quote_is_literal_inside_quotes() {
        assert_eq!(rows("'say \"hi\", ok',x\n"), vec![vec!["say \"hi\", ok", "x"]]);
        assert_eq!(rows("\"it's, fine\"\n"), vec![vec!["it's, fine"]]);
    }

    #[test]
    fn test_mid_cell_quotes_are_literal() {
        assert_eq!(rows("ab\"c,d\"\n"), vec![vec!["ab\"c", "d\""]]);
        assert_eq!(rows("5'11\",x\n"), vec![vec!["5'11\"", "x"]]);
    }

    #[test]
    fn test_trailing_empty_field_is_kept() {
        assert_eq!(rows("a,b,\n"), vec![vec!["a", "b", ""]]);
        assert_eq!(rows(",,\n"), vec![vec!["", "", ""]]);
        assert_eq!(rows("a,b,"), vec![vec!["a", "b", ""]]);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(rows("a\n\nb\n"), vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_missing_final_terminator() {
        assert_eq!(rows("a,b\nc,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
        assert!(rows("").is_empty());
    }

    #[test]
    fn test_crlf() {
        let parsed = tokenize("a,b\r\nc,d\r\n", &SeparatorParams::default());
        assert_eq!(parsed.rows, vec![vec!["a", "b"], vec!["c", "d"]]);
        assert_eq!((parsed.cr, parsed.lf), (2, 2));
        assert_eq!(parsed.line_ending(), Some(LineEnding::CrLf));

        let parsed = tokenize("a\nb\n", &SeparatorParams::default());
        assert_eq!(parsed.line_ending(), Some(LineEnding::Lf));
    }

    #[test]
    fn test_quotes_do_not_span_rows_by_default() {
        assert_eq!(rows("\"a\nb\",c\n"), vec![vec!["\"a"], vec!["b\"", "c"]]);
    }

    #[test]
    fn test_quoted_linebreaks() {
        let params = SeparatorParams::default().with_quoted_linebreaks(true);
        let parsed = tokenize("\"a\r\nb\",c\r\nd,e\r\n", &params);
        assert_eq!(parsed.rows, vec![vec!["a\r\nb", "c"], vec!["d", "e"]]);
        assert_eq!((parsed.cr, parsed.lf), (3, 3));
    }

    #[test]
    fn test_trim() {
        let params = SeparatorParams::default().with_trim(true);
        let parsed = tokenize("  a , \"b, c\"  ,c  \n", &params);
        assert_eq!(parsed.rows, vec![vec!["a", "b, c", "c"]]);
    }

    #[test]
    fn test_custom_separator() {
        let parsed = tokenize("a;b,c;d\n", &SeparatorParams::semicolon());
        assert_eq!(parsed.rows, vec![vec!["a", "b,c", "d"]]);

        let parsed = tokenize("a\tb\tc", &SeparatorParams::tsv());
        assert_eq!(parsed.rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"x\""), "x");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("\"x'"), "\"x'");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"\""), "");
    }
}
