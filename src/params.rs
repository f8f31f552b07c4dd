//! Configuration for parsing, label handling and value conversion

use std::fmt;

/// Row terminator written by the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The line ending native to the current platform
    pub const fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The terminator as text
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Infer the style from counted carriage returns and line feeds
    ///
    /// CRLF wins when carriage returns outnumber half the line feeds.
    /// Returns `None` when no line feed was seen at all.
    pub fn infer(cr: usize, lf: usize) -> Option<Self> {
        if lf == 0 {
            return None;
        }
        if cr * 2 > lf {
            Some(LineEnding::CrLf)
        } else {
            Some(LineEnding::Lf)
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::platform()
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "LF"),
            LineEnding::CrLf => write!(f, "CRLF"),
        }
    }
}

/// Which row holds column labels and which column holds row labels
///
/// A negative index disables the corresponding labels, and every row (or column)
/// is then addressable as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelParams {
    /// Zero-based row index of the column labels
    pub column_name_idx: isize,
    /// Zero-based column index of the row labels
    pub row_name_idx: isize,
}

impl Default for LabelParams {
    fn default() -> Self {
        Self {
            column_name_idx: 0,
            row_name_idx: -1,
        }
    }
}

impl LabelParams {
    pub fn new(column_name_idx: isize, row_name_idx: isize) -> Self {
        Self {
            column_name_idx,
            row_name_idx,
        }
    }

    /// No labels at all, the whole matrix is data
    pub fn none() -> Self {
        Self::new(-1, -1)
    }

    /// First row holds column labels, first column holds row labels
    pub fn both() -> Self {
        Self::new(0, 0)
    }

    /// Physical index of the first data row
    pub fn data_row_offset(&self) -> usize {
        (self.column_name_idx + 1).max(0) as usize
    }

    /// Physical index of the first data column
    pub fn data_column_offset(&self) -> usize {
        (self.row_name_idx + 1).max(0) as usize
    }

    /// Physical row holding column labels, if enabled
    pub fn column_label_row(&self) -> Option<usize> {
        usize::try_from(self.column_name_idx).ok()
    }

    /// Physical column holding row labels, if enabled
    pub fn row_label_column(&self) -> Option<usize> {
        usize::try_from(self.row_name_idx).ok()
    }
}

/// How cells and rows are separated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorParams {
    /// Column separator
    pub separator: char,
    /// Trim surrounding whitespace from every cell
    pub trim: bool,
    /// Forced line ending for writing. `None` infers it from the parsed input
    pub line_ending: Option<LineEnding>,
    /// Allow line breaks inside quoted cells
    pub quoted_linebreaks: bool,
}

impl Default for SeparatorParams {
    fn default() -> Self {
        Self {
            separator: ',',
            trim: false,
            line_ending: None,
            quoted_linebreaks: false,
        }
    }
}

impl SeparatorParams {
    /// Tab-separated values
    #[must_use]
    pub fn tsv() -> Self {
        Self::default().with_separator('\t')
    }

    /// Semicolon-separated values
    #[must_use]
    pub fn semicolon() -> Self {
        Self::default().with_separator(';')
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }

    #[must_use]
    pub fn with_quoted_linebreaks(mut self, quoted_linebreaks: bool) -> Self {
        self.quoted_linebreaks = quoted_linebreaks;
        self
    }
}

/// What happens when a cell cannot be converted to a numeric kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConverterParams {
    /// Substitute the defaults below instead of failing
    pub has_default_converter: bool,
    /// Used for float kinds
    pub default_float: f64,
    /// Used for integer kinds
    pub default_integer: i64,
}

impl Default for ConverterParams {
    fn default() -> Self {
        Self {
            has_default_converter: false,
            default_float: f64::NAN,
            default_integer: 0,
        }
    }
}

impl ConverterParams {
    /// Enable default substitution with the given values
    pub fn with_defaults(default_float: f64, default_integer: i64) -> Self {
        Self {
            has_default_converter: true,
            default_float,
            default_integer,
        }
    }
}

/// All the parameters of a document
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub labels: LabelParams,
    pub separator: SeparatorParams,
    pub converter: ConverterParams,
}

impl DocumentOptions {
    #[must_use]
    pub fn with_labels(mut self, labels: LabelParams) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: SeparatorParams) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_converter(mut self, converter: ConverterParams) -> Self {
        self.converter = converter;
        self
    }
}
