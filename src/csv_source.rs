//! CSV files as binding sources.
//!
//! [`CsvReader`] streams typed records one at a time; [`load_table`] reads a
//! whole file into a [`DataTable`]. Cells are parsed according to a [`Schema`]
//! (every column is a string when none is given) and empty cells are null.
//! Numeric columns follow the reader's [`Locale`]; other types use the
//! invariant parsers in [`crate::data`].

use std::{io::Read, path::Path};

use anyhow::{Context, Result, anyhow};
use encoding_rs::Encoding;
use log::debug;

use crate::{
    data::{Value, parse_typed_value},
    error::BindError,
    io_utils,
    locale::Locale,
    schema::{ColumnType, Schema},
    source::DataReader,
    table::DataTable,
};

pub struct CsvReader<R: Read> {
    reader: csv::Reader<R>,
    schema: Schema,
    encoding: &'static Encoding,
    locale: Locale,
    record: csv::ByteRecord,
    current: Vec<Option<Value>>,
    line: u64,
    exhausted: bool,
}

impl CsvReader<Box<dyn Read>> {
    pub fn from_path(
        path: &Path,
        schema: Option<&Schema>,
        delimiter: Option<u8>,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let delimiter = io_utils::resolve_input_delimiter(path, delimiter);
        let has_headers = schema.is_none_or(|s| s.has_headers);
        let reader = io_utils::open_csv_reader_from_path(path, delimiter, has_headers)?;
        CsvReader::new(reader, schema.cloned(), encoding)
            .with_context(|| format!("Opening CSV source {path:?}"))
    }
}

impl<R: Read> CsvReader<R> {
    /// Wraps an already configured `csv::Reader`. Its header row, when present,
    /// must agree with `schema`.
    pub fn new(
        mut reader: csv::Reader<R>,
        schema: Option<Schema>,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let schema = match schema {
            Some(schema) => {
                if reader.has_headers() {
                    let headers = io_utils::reader_headers(&mut reader, encoding)?;
                    schema.validate_headers(&headers)?;
                }
                schema
            }
            None => {
                let headers = io_utils::reader_headers(&mut reader, encoding)?;
                Schema::from_headers(&headers)
            }
        };
        debug!(
            "CSV source exposes {} column(s): {:?}",
            schema.columns.len(),
            schema.headers()
        );
        let line = if reader.has_headers() { 1 } else { 0 };
        Ok(Self {
            reader,
            schema,
            encoding,
            locale: Locale::invariant(),
            record: csv::ByteRecord::new(),
            current: Vec::new(),
            line,
            exhausted: false,
        })
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Line number of the current record, counting the header line.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn current(&self) -> &[Option<Value>] {
        &self.current
    }

    fn advance(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let has_record = self
            .reader
            .read_byte_record(&mut self.record)
            .with_context(|| format!("Reading CSV line {}", self.line + 1))?;
        if !has_record {
            self.exhausted = true;
            self.current.clear();
            return Ok(false);
        }
        self.line += 1;
        let decoded = io_utils::decode_record(&self.record, self.encoding)
            .with_context(|| format!("Decoding CSV line {}", self.line))?;
        self.current = self
            .schema
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let raw = decoded.get(idx).map(String::as_str).unwrap_or("");
                parse_cell(raw, &column.datatype, &self.locale).with_context(|| {
                    format!("Line {} column '{}'", self.line, column.name)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(true)
    }

    /// Drains the remaining records into a table.
    pub fn into_table(mut self) -> Result<DataTable> {
        let mut table = DataTable::from_schema(&self.schema);
        while self.advance()? {
            let cells = std::mem::take(&mut self.current);
            table
                .push_row(cells)
                .map_err(|err| anyhow!("Line {}: {err}", self.line))?;
        }
        Ok(table)
    }
}

/// Empty cells are null; so are blank cells outside string columns.
fn parse_cell(raw: &str, ty: &ColumnType, locale: &Locale) -> Result<Option<Value>> {
    if raw.is_empty() || (*ty != ColumnType::String && raw.trim().is_empty()) {
        return Ok(None);
    }
    let parsed = match ty {
        ColumnType::Integer => locale.parse_integer(raw).map(Value::Integer),
        ColumnType::Float => locale.parse_float(raw).map(Value::Float),
        ColumnType::Decimal => locale.parse_decimal(raw).map(Value::Decimal),
        _ => return parse_typed_value(raw, ty),
    };
    parsed
        .map(Some)
        .map_err(|reason| anyhow!("Failed to parse '{raw}' as {ty}: {reason}"))
}

impl<R: Read> DataReader for CsvReader<R> {
    fn field_count(&self) -> usize {
        self.schema.columns.len()
    }

    fn field_name(&self, ordinal: usize) -> Option<&str> {
        self.schema.columns.get(ordinal).map(|c| c.name.as_str())
    }

    fn read(&mut self) -> Result<bool, BindError> {
        Ok(self.advance()?)
    }

    fn is_null(&self, ordinal: usize) -> bool {
        self.value(ordinal).is_none()
    }

    fn value(&self, ordinal: usize) -> Option<&Value> {
        self.current.get(ordinal).and_then(Option::as_ref)
    }
}

/// Reads every record of a CSV file into memory using invariant numbers.
pub fn load_table(
    path: &Path,
    schema: Option<&Schema>,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
) -> Result<DataTable> {
    let table = CsvReader::from_path(path, schema, delimiter, encoding)?.into_table()?;
    debug!("Loaded {} row(s) from {path:?}", table.row_count());
    Ok(table)
}
