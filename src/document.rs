use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::convert::{CellConvert, Converter};
use crate::encoding::{self, TextEncoding};
use crate::error::{Axis, CsvDocError, Result};
use crate::label::{Key, LabelIndex};
use crate::params::{ConverterParams, DocumentOptions, LabelParams, LineEnding, SeparatorParams};
use crate::tokenizer;
use crate::writer;

/// The in-memory representation of a delimited text file
///
/// The matrix is always rectangular: every row has the same number of cells.
/// Positions passed to accessors are logical, so the label row and label column
/// are skipped, while the matrix itself stores physical positions.
#[derive(Debug, Clone)]
pub struct Document {
    /// Backing file, if the document was loaded from one
    path: Option<PathBuf>,
    options: DocumentOptions,
    /// Row-major cells
    data: Vec<Vec<String>>,
    index: LabelIndex,
    /// Resolved line ending used by the writer
    line_ending: LineEnding,
    /// Encoding the source was in, reused when saving
    encoding: TextEncoding,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentOptions::default())
    }
}

impl Document {
    /// Create a new empty document
    pub fn new(options: DocumentOptions) -> Self {
        let line_ending = options
            .separator
            .line_ending
            .unwrap_or_else(LineEnding::platform);

        Self {
            path: None,
            options,
            data: Vec::new(),
            index: LabelIndex::default(),
            line_ending,
            encoding: TextEncoding::default(),
        }
    }

    /// Create a new empty document with the given parameters
    pub fn with_params(
        labels: LabelParams,
        separator: SeparatorParams,
        converter: ConverterParams,
    ) -> Self {
        Self::new(DocumentOptions {
            labels,
            separator,
            converter,
        })
    }

    // Loading and saving

    /// Replace the content with the file at `path` and remember the path for `save`
    ///
    /// # Errors
    /// - `CsvDocError::Io` if the file cannot be read
    /// - `CsvDocError::Encoding` if its content cannot be decoded
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        self.load_from_buffer(&data)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace the content with everything read from `reader`
    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.load_from_buffer(&data)
    }

    /// Replace the content with a raw byte buffer, sniffing its BOM
    pub fn load_from_buffer(&mut self, data: &[u8]) -> Result<()> {
        let (text, encoding) = encoding::decode(data)?;
        self.populate(&text, encoding);
        Ok(())
    }

    /// Replace the content with already decoded text
    pub fn load_from_str(&mut self, text: &str) {
        self.populate(text, TextEncoding::Utf8);
    }

    fn populate(&mut self, text: &str, encoding: TextEncoding) {
        let parsed = tokenizer::tokenize(text, &self.options.separator);

        self.line_ending = self
            .options
            .separator
            .line_ending
            .or_else(|| parsed.line_ending())
            .unwrap_or_else(LineEnding::platform);
        self.encoding = encoding;
        self.data = parsed.rows;

        let width = self.data.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut self.data {
            row.resize(width, String::new());
        }
        self.rebuild_index();

        debug!(
            rows = self.data.len(),
            columns = width,
            encoding = ?self.encoding,
            line_ending = %self.line_ending,
            "parsed document"
        );
    }

    /// Write back to the path the document was loaded from
    ///
    /// # Errors
    /// - `CsvDocError::NoPath` if the document was never loaded from a file
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(CsvDocError::NoPath)?;
        self.save_as(path)
    }

    /// Write to `path`, leaving the remembered path untouched
    pub fn save_as<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path.as_ref())?;
        file.write_all(&bytes)?;
        file.flush()?;
        debug!(path = %path.as_ref().display(), bytes = bytes.len(), "saved document");
        Ok(())
    }

    /// Write to any writer
    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize to text, before any re-encoding
    pub fn to_text(&self) -> Result<String> {
        writer::write_text(&self.data, self.options.separator.separator, self.line_ending)
    }

    /// Serialize to bytes in the document's encoding
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let text = self.to_text()?;
        Ok(encoding::encode(&text, self.encoding))
    }

    // Settings

    /// Path used by `save`
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn label_params(&self) -> &LabelParams {
        &self.options.labels
    }

    /// Reconfigure which row and column hold labels, rebuilding the label index
    pub fn set_label_params(&mut self, labels: LabelParams) {
        self.options.labels = labels;
        self.rebuild_index();
    }

    pub fn converter_params(&self) -> &ConverterParams {
        &self.options.converter
    }

    pub fn set_converter_params(&mut self, converter: ConverterParams) {
        self.options.converter = converter;
    }

    pub fn separator_params(&self) -> &SeparatorParams {
        &self.options.separator
    }

    /// Line ending the writer will use
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Force the line ending used by the writer
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Encoding the writer will use
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    /// The raw rectangular matrix, label row and column included
    pub fn data(&self) -> &[Vec<String>] {
        &self.data
    }

    /// Remove all cells
    pub fn clear(&mut self) {
        self.data.clear();
        self.rebuild_index();
    }

    // Columns

    /// Get a column, converting every data cell
    ///
    /// # Arguments
    /// - `key` - Logical column index or column label
    ///
    /// # Errors
    /// - `CsvDocError::LabelNotFound` / `CsvDocError::LabelsDisabled` if a name cannot be resolved
    /// - `CsvDocError::IndexOutOfBounds` if the column does not exist
    /// - `CsvDocError::Conversion` if a cell cannot be converted
    pub fn get_column<T: CellConvert>(&self, key: impl Into<Key>) -> Result<Vec<T>> {
        let col = self.resolve(Axis::Column, &key.into())?;
        self.check_bounds(Axis::Column, col)?;

        let converter = Converter::new(&self.options.converter);
        self.data
            .iter()
            .skip(self.data_row_offset())
            .map(|row| converter.to_val(&row[col]))
            .collect()
    }

    /// Set a column, growing the matrix when the column or the values go past its extent
    ///
    /// Rows not covered by `values` keep their content.
    pub fn set_column<T: CellConvert>(&mut self, key: impl Into<Key>, values: &[T]) -> Result<()> {
        let col = self.resolve(Axis::Column, &key.into())?;
        let cells = self.format_all(values)?;

        let first = self.data_row_offset();
        self.grow(first + cells.len(), col + 1);
        for (row, cell) in self.data[first..].iter_mut().zip(cells) {
            row[col] = cell;
        }
        Ok(())
    }

    /// Remove a whole column, label cells included
    pub fn remove_column(&mut self, key: impl Into<Key>) -> Result<()> {
        let col = self.resolve(Axis::Column, &key.into())?;
        self.check_bounds(Axis::Column, col)?;

        for row in &mut self.data {
            row.remove(col);
        }
        self.rebuild_index();
        Ok(())
    }

    /// Insert a column before the logical index `index`
    ///
    /// An index past the end appends, padding with empty columns in between.
    ///
    /// # Arguments
    /// - `index` - Logical position of the new column
    /// - `values` - Data cells of the new column, may be shorter than the column
    /// - `name` - Label to write in the label row
    pub fn insert_column<T: CellConvert>(
        &mut self,
        index: usize,
        values: &[T],
        name: Option<&str>,
    ) -> Result<()> {
        let label_row = match name {
            Some(_) => Some(self.column_label_row()?),
            None => None,
        };
        let cells = self.format_all(values)?;
        let col = self.physical(Axis::Column, index)?;

        self.grow(0, col);
        for row in &mut self.data {
            row.insert(col, String::new());
        }

        let first = self.data_row_offset();
        self.grow(first + cells.len(), col + 1);
        for (row, cell) in self.data[first..].iter_mut().zip(cells) {
            row[col] = cell;
        }

        if let (Some(label_row), Some(name)) = (label_row, name) {
            self.grow(label_row + 1, col + 1);
            self.data[label_row][col] = name.to_string();
        }
        self.rebuild_index();
        Ok(())
    }

    /// Number of data columns
    pub fn column_count(&self) -> usize {
        self.width().saturating_sub(self.data_column_offset())
    }

    // Rows

    /// Get a row, converting every data cell
    ///
    /// # Arguments
    /// - `key` - Logical row index or row label
    pub fn get_row<T: CellConvert>(&self, key: impl Into<Key>) -> Result<Vec<T>> {
        let row = self.resolve(Axis::Row, &key.into())?;
        self.check_bounds(Axis::Row, row)?;

        let converter = Converter::new(&self.options.converter);
        self.data[row]
            .iter()
            .skip(self.data_column_offset())
            .map(|cell| converter.to_val(cell))
            .collect()
    }

    /// Set a row, growing the matrix when the row or the values go past its extent
    ///
    /// Columns not covered by `values` keep their content.
    pub fn set_row<T: CellConvert>(&mut self, key: impl Into<Key>, values: &[T]) -> Result<()> {
        let row = self.resolve(Axis::Row, &key.into())?;
        let cells = self.format_all(values)?;

        let first = self.data_column_offset();
        self.grow(row + 1, first + cells.len());
        for (slot, cell) in self.data[row][first..].iter_mut().zip(cells) {
            *slot = cell;
        }
        Ok(())
    }

    /// Remove a whole row, label cell included
    pub fn remove_row(&mut self, key: impl Into<Key>) -> Result<()> {
        let row = self.resolve(Axis::Row, &key.into())?;
        self.check_bounds(Axis::Row, row)?;

        self.data.remove(row);
        self.rebuild_index();
        Ok(())
    }

    /// Insert a row before the logical index `index`
    ///
    /// An index past the end appends, padding with empty rows in between.
    pub fn insert_row<T: CellConvert>(
        &mut self,
        index: usize,
        values: &[T],
        name: Option<&str>,
    ) -> Result<()> {
        let label_col = match name {
            Some(_) => Some(self.row_label_column()?),
            None => None,
        };
        let cells = self.format_all(values)?;
        let row = self.physical(Axis::Row, index)?;

        self.grow(row, 0);
        let width = self.width();
        self.data.insert(row, vec![String::new(); width]);

        let first = self.data_column_offset();
        self.grow(row + 1, first + cells.len());
        for (slot, cell) in self.data[row][first..].iter_mut().zip(cells) {
            *slot = cell;
        }

        if let (Some(label_col), Some(name)) = (label_col, name) {
            self.grow(row + 1, label_col + 1);
            self.data[row][label_col] = name.to_string();
        }
        self.rebuild_index();
        Ok(())
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.data.len().saturating_sub(self.data_row_offset())
    }

    // Cells

    /// Get a single cell
    ///
    /// # Arguments
    /// - `column` - Logical column index or column label
    /// - `row` - Logical row index or row label
    pub fn get_cell<T: CellConvert>(&self, column: impl Into<Key>, row: impl Into<Key>) -> Result<T> {
        let col = self.resolve(Axis::Column, &column.into())?;
        let row = self.resolve(Axis::Row, &row.into())?;
        self.check_bounds(Axis::Column, col)?;
        self.check_bounds(Axis::Row, row)?;

        Converter::new(&self.options.converter).to_val(&self.data[row][col])
    }

    /// Set a single cell, growing the matrix if it lies past its extent
    pub fn set_cell<T: CellConvert>(
        &mut self,
        column: impl Into<Key>,
        row: impl Into<Key>,
        value: T,
    ) -> Result<()> {
        let col = self.resolve(Axis::Column, &column.into())?;
        let row = self.resolve(Axis::Row, &row.into())?;
        let cell = Converter::new(&self.options.converter).to_str(&value)?;

        self.grow(row + 1, col + 1);
        self.data[row][col] = cell;
        Ok(())
    }

    // Labels

    /// Label of a column
    ///
    /// # Errors
    /// - `CsvDocError::LabelsDisabled` if there is no label row
    /// - `CsvDocError::IndexOutOfBounds` if the column does not exist
    pub fn column_name(&self, index: usize) -> Result<String> {
        let label_row = self.column_label_row()?;
        let col = self.physical(Axis::Column, index)?;

        self.data
            .get(label_row)
            .and_then(|row| row.get(col))
            .cloned()
            .ok_or_else(|| CsvDocError::out_of_bounds(Axis::Column, index, self.column_count()))
    }

    /// Labels of all data columns, empty when there is no label row
    pub fn column_names(&self) -> Vec<String> {
        self.options
            .labels
            .column_label_row()
            .and_then(|r| self.data.get(r))
            .map(|row| row.iter().skip(self.data_column_offset()).cloned().collect())
            .unwrap_or_default()
    }

    /// Rename a column, growing the matrix if needed, and update the label index
    pub fn set_column_name(&mut self, index: usize, name: &str) -> Result<()> {
        let label_row = self.column_label_row()?;
        let col = self.physical(Axis::Column, index)?;

        self.grow(label_row + 1, col + 1);
        self.data[label_row][col] = name.to_string();
        self.rebuild_index();
        Ok(())
    }

    /// Logical index of a column label
    pub fn column_index(&self, name: &str) -> Result<usize> {
        let col = self.lookup(Axis::Column, name)?;
        Ok(col - self.data_column_offset())
    }

    /// Label of a row
    ///
    /// # Errors
    /// - `CsvDocError::LabelsDisabled` if there is no label column
    /// - `CsvDocError::IndexOutOfBounds` if the row does not exist
    pub fn row_name(&self, index: usize) -> Result<String> {
        let label_col = self.row_label_column()?;
        let row = self.physical(Axis::Row, index)?;

        self.data
            .get(row)
            .and_then(|r| r.get(label_col))
            .cloned()
            .ok_or_else(|| CsvDocError::out_of_bounds(Axis::Row, index, self.row_count()))
    }

    /// Labels of all data rows, empty when there is no label column
    pub fn row_names(&self) -> Vec<String> {
        match self.options.labels.row_label_column() {
            Some(label_col) => self
                .data
                .iter()
                .skip(self.data_row_offset())
                .map(|row| row.get(label_col).cloned().unwrap_or_default())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Rename a row, growing the matrix if needed, and update the label index
    pub fn set_row_name(&mut self, index: usize, name: &str) -> Result<()> {
        let label_col = self.row_label_column()?;
        let row = self.physical(Axis::Row, index)?;

        self.grow(row + 1, label_col + 1);
        self.data[row][label_col] = name.to_string();
        self.rebuild_index();
        Ok(())
    }

    /// Logical index of a row label
    pub fn row_index(&self, name: &str) -> Result<usize> {
        let row = self.lookup(Axis::Row, name)?;
        Ok(row - self.data_row_offset())
    }

    // Offset arithmetic

    fn data_row_offset(&self) -> usize {
        self.options.labels.data_row_offset()
    }

    fn data_column_offset(&self) -> usize {
        self.options.labels.data_column_offset()
    }

    fn offset(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.data_row_offset(),
            Axis::Column => self.data_column_offset(),
        }
    }

    fn width(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }

    fn extent(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.data.len(),
            Axis::Column => self.width(),
        }
    }

    fn column_label_row(&self) -> Result<usize> {
        self.options
            .labels
            .column_label_row()
            .ok_or(CsvDocError::LabelsDisabled(Axis::Column))
    }

    fn row_label_column(&self) -> Result<usize> {
        self.options
            .labels
            .row_label_column()
            .ok_or(CsvDocError::LabelsDisabled(Axis::Row))
    }

    /// Translate a key to a physical index, without bounds checking
    fn resolve(&self, axis: Axis, key: &Key) -> Result<usize> {
        match key {
            Key::Index(index) => self.physical(axis, *index),
            Key::Name(name) => self.lookup(axis, name),
        }
    }

    /// Translate a logical index to a physical one
    ///
    /// The result always leaves room for `physical + 1`, which growth relies on.
    fn physical(&self, axis: Axis, index: usize) -> Result<usize> {
        let offset = self.offset(axis);
        index
            .checked_add(offset)
            .filter(|&physical| physical < usize::MAX)
            .ok_or_else(|| {
                CsvDocError::out_of_bounds(axis, index, self.extent(axis).saturating_sub(offset))
            })
    }

    /// Physical index of a label, ignoring labels that sit in the header area
    fn lookup(&self, axis: Axis, name: &str) -> Result<usize> {
        let found = match axis {
            Axis::Column => {
                self.column_label_row()?;
                self.index.column(name)
            }
            Axis::Row => {
                self.row_label_column()?;
                self.index.row(name)
            }
        };

        found
            .filter(|&physical| physical >= self.offset(axis))
            .ok_or_else(|| CsvDocError::not_found(axis, name))
    }

    fn check_bounds(&self, axis: Axis, physical: usize) -> Result<()> {
        if physical < self.extent(axis) {
            return Ok(());
        }
        let offset = self.offset(axis);
        Err(CsvDocError::out_of_bounds(
            axis,
            physical - offset,
            self.extent(axis).saturating_sub(offset),
        ))
    }

    fn format_all<T: CellConvert>(&self, values: &[T]) -> Result<Vec<String>> {
        let converter = Converter::new(&self.options.converter);
        values.iter().map(|v| converter.to_str(v)).collect()
    }

    /// Make the matrix at least `rows` by `columns`, filling with empty cells
    fn grow(&mut self, rows: usize, columns: usize) {
        let width = self.width();
        let new_width = width.max(columns);
        let old_rows = self.data.len();

        if new_width == width && rows <= old_rows {
            return;
        }

        if new_width > width {
            for row in &mut self.data {
                row.resize(new_width, String::new());
            }
        }
        if rows > old_rows {
            self.data.resize(rows, vec![String::new(); new_width]);
        }

        trace!(rows = self.data.len(), columns = new_width, "grew matrix");
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.index = LabelIndex::build(&self.data, &self.options.labels);
        trace!(
            columns = self.index.num_columns(),
            rows = self.index.num_rows(),
            "rebuilt label index"
        );
    }
}
