//! Column-oriented in-memory table shared by the loaders, the sanitizer and
//! the writers.

use std::collections::HashSet;

use anyhow::{Result, bail};

use crate::data::{ColumnType, Value, infer_column_type};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<Value>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<Value>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn dtype(&self) -> ColumnType {
        infer_column_type(&self.values)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Builds a table, rejecting duplicate names and columns of unequal length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                bail!("Duplicate column name '{}'", column.name);
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                bail!(
                    "Column '{}' has {} value(s) but '{}' has {}",
                    bad.name,
                    bad.len(),
                    first.name,
                    expected
                );
            }
        }
        Ok(Self { columns })
    }

    /// Builds a table from row-major cells. Every row must have one cell per
    /// header.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Option<Value>>>) -> Result<Self> {
        let mut columns = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect::<Vec<_>>();
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                bail!(
                    "Row {} has {} field(s) but {} column(s) were declared",
                    idx + 1,
                    row.len(),
                    columns.len()
                );
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.values.push(cell);
            }
        }
        Self::new(columns)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.column_index(name).map(|idx| &mut self.columns[idx])
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn row(&self, idx: usize) -> Option<Vec<Option<&Value>>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.values[idx].as_ref())
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<&Value>>> + '_ {
        (0..self.row_count()).filter_map(|idx| self.row(idx))
    }
}
