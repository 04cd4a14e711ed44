//! In-memory string table built from CSV lines

use std::ops::Index;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::csv::{CharRead, LineTokenizer};
use crate::error::{CsvError, Result};
use crate::types::{Column, ReaderOptions};

type ColumnIndex = IndexMap<String, Column>;

/// A named table of string columns and rows
///
/// Columns are fixed when the table is created. Rows must supply exactly
/// one field per column.
#[derive(Debug, Clone, Default)]
pub struct Table {
    name: String,
    columns: Arc<ColumnIndex>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given columns
    ///
    /// Columns are added in order. An unnamed column gets the first free
    /// `ColumnN` name (N counting from 1) at the moment it is added. Names
    /// are compared ignoring case; a clash fails with
    /// [`CsvError::DuplicateColumn`].
    pub fn with_columns<I, C>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        let mut index = ColumnIndex::new();
        let mut next_auto = 1;
        for column in columns {
            let mut column = column.into();
            if column.name.is_empty() {
                column.name = loop {
                    let candidate = format!("Column{}", next_auto);
                    next_auto += 1;
                    if !contains_name(&index, &candidate) {
                        break candidate;
                    }
                };
            } else if contains_name(&index, &column.name) {
                return Err(CsvError::DuplicateColumn(column.name));
            }
            index.insert(column.name.clone(), column);
        }
        Ok(Table {
            name: String::new(),
            columns: Arc::new(index),
            rows: Vec::new(),
        })
    }

    /// Table name (empty unless set)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the table name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Columns in order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Position of the named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has neither columns nor rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Append a row built from `fields`, matched to columns by position
    ///
    /// The row is only appended when its length equals the column count;
    /// otherwise [`CsvError::ColumnOutOfRange`] names the first position
    /// without a partner.
    pub fn push_row(&mut self, fields: Vec<String>) -> Result<()> {
        let columns = self.columns.len();
        if fields.len() != columns {
            return Err(CsvError::ColumnOutOfRange {
                row: self.rows.len(),
                index: fields.len().min(columns),
                columns,
                fields: fields.len(),
            });
        }
        self.rows.push(Row {
            columns: Arc::clone(&self.columns),
            values: fields,
        });
        Ok(())
    }
}

/// One table row, addressable by column name or position
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<ColumnIndex>,
    values: Vec<String>,
}

impl Row {
    /// Value of the named column
    pub fn get(&self, column: &str) -> Option<&str> {
        let i = self.columns.get_index_of(column)?;
        self.values.get(i).map(String::as_str)
    }

    /// Value at column position `i`
    pub fn get_index(&self, i: usize) -> Option<&str> {
        self.values.get(i).map(String::as_str)
    }

    /// `(column name, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .keys()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Index<&str> for Row {
    type Output = str;

    fn index(&self, column: &str) -> &str {
        match self.get(column) {
            Some(value) => value,
            None => panic!("no column named {:?}", column),
        }
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, i: usize) -> &str {
        &self.values[i]
    }
}

/// Build a [`Table`] from every remaining line of `tokenizer`
///
/// With `has_headers` the first line names the columns; otherwise columns
/// are named `"0"`, `"1"`, ... after the first line's field count and that
/// line becomes the first row. Header names follow the naming rules of
/// [`Table::with_columns`].
pub fn materialize<S: CharRead>(
    tokenizer: &mut LineTokenizer<S>,
    options: &ReaderOptions,
) -> Result<Table> {
    let Some(first) = tokenizer.read_line()? else {
        debug!("no input, returning empty table");
        return Ok(Table::new());
    };

    let (names, mut line) = if options.has_headers {
        (first, tokenizer.read_line()?)
    } else {
        let names: Vec<String> = (0..first.len()).map(|i| i.to_string()).collect();
        (names, Some(first))
    };

    let mut table = Table::with_columns(names)?;
    while let Some(fields) = line {
        table.push_row(fields)?;
        line = tokenizer.read_line()?;
    }

    debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        "materialized table"
    );
    Ok(table)
}

/// Case-insensitive name lookup
fn contains_name(index: &ColumnIndex, name: &str) -> bool {
    let name = name.to_lowercase();
    index.keys().any(|existing| existing.to_lowercase() == name)
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{Row, Table};
    use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

    impl Serialize for Row {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (column, value) in self.iter() {
                map.serialize_entry(column, value)?;
            }
            map.end()
        }
    }

    impl Serialize for Table {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Table", 3)?;
            state.serialize_field("name", &self.name)?;
            state.serialize_field("columns", &self.column_names())?;
            state.serialize_field("rows", &self.rows)?;
            state.end()
        }
    }
}
