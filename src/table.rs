//! In-memory tables with random-access rows and a forward-only reader.

use anyhow::{Result, ensure};

use crate::{
    data::Value,
    error::BindError,
    schema::{ColumnMeta, Schema},
    source::{DataReader, FieldLookup, SourceRecord},
};

#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<ColumnMeta>,
    lookup: FieldLookup,
    rows: Vec<Vec<Option<Value>>>,
}

impl DataTable {
    pub fn new(columns: Vec<ColumnMeta>) -> Self {
        let lookup = FieldLookup::from_names(columns.iter().map(|c| c.name.as_str()));
        Self {
            columns,
            lookup,
            rows: Vec::new(),
        }
    }

    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(schema.columns.clone())
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row after checking its width and that each non-null cell
    /// matches its column type.
    pub fn push_row(&mut self, cells: Vec<Option<Value>>) -> Result<()> {
        ensure!(
            cells.len() == self.columns.len(),
            "Row has {} cell(s) but the table defines {} column(s)",
            cells.len(),
            self.columns.len()
        );
        for (column, cell) in self.columns.iter().zip(&cells) {
            if let Some(value) = cell {
                ensure!(
                    value.column_type() == column.datatype,
                    "Column '{}' expects {} but received {} value '{}'",
                    column.name,
                    column.datatype,
                    value.column_type(),
                    value
                );
            }
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn row(&self, index: usize) -> Option<DataRow<'_>> {
        (index < self.rows.len()).then_some(DataRow { table: self, index })
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = DataRow<'_>> + '_ {
        (0..self.rows.len()).map(move |index| DataRow { table: self, index })
    }

    /// A forward-only reader positioned before the first row.
    pub fn reader(&self) -> TableReader<'_> {
        TableReader {
            table: self,
            position: None,
        }
    }

    fn cell(&self, row: usize, ordinal: usize) -> Option<&Value> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(ordinal))
            .and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DataRow<'a> {
    table: &'a DataTable,
    index: usize,
}

impl<'a> DataRow<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn table(&self) -> &'a DataTable {
        self.table
    }

    pub fn contains(&self, column: &str) -> bool {
        self.table.lookup.contains(column)
    }

    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let ordinal = self.table.lookup.get(column)?;
        self.table.cell(self.index, ordinal)
    }

    /// True for null cells and for columns the table does not have.
    pub fn is_null_by_name(&self, column: &str) -> bool {
        self.get(column).is_none()
    }
}

impl SourceRecord for DataRow<'_> {
    fn ordinal(&self, name: &str) -> Option<usize> {
        self.table.lookup.get(name)
    }

    fn is_null(&self, ordinal: usize) -> bool {
        self.table.cell(self.index, ordinal).is_none()
    }

    fn value(&self, ordinal: usize) -> Option<&Value> {
        self.table.cell(self.index, ordinal)
    }
}

#[derive(Debug)]
pub struct TableReader<'a> {
    table: &'a DataTable,
    position: Option<usize>,
}

impl TableReader<'_> {
    fn current(&self) -> Option<usize> {
        self.position.filter(|p| *p < self.table.row_count())
    }
}

impl DataReader for TableReader<'_> {
    fn field_count(&self) -> usize {
        self.table.column_count()
    }

    fn field_name(&self, ordinal: usize) -> Option<&str> {
        self.table.columns.get(ordinal).map(|c| c.name.as_str())
    }

    fn read(&mut self) -> Result<bool, BindError> {
        let next = self.position.map_or(0, |p| p.saturating_add(1));
        self.position = Some(next.min(self.table.row_count()));
        Ok(next < self.table.row_count())
    }

    fn is_null(&self, ordinal: usize) -> bool {
        self.value(ordinal).is_none()
    }

    fn value(&self, ordinal: usize) -> Option<&Value> {
        self.current()
            .and_then(|row| self.table.cell(row, ordinal))
    }
}
