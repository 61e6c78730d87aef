//! In-memory tabular representation shared by every pipeline stage.

use chrono::NaiveDate;

use crate::category::Category;
use crate::error::AggregateError;
use crate::parser::parse_number;

/// A single field value.
///
/// Raw rows only contain `Text` and `Null`; normalization turns the `date`
/// column into `Date` (or `Null` when unparseable).
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Numeric view of the cell. Null and non-numeric cells yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_text().and_then(parse_number)
    }

    /// Text rendering used when writing tables back to CSV.
    pub fn render(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// All rows of one category, in insertion order, sharing one column list.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    category: Category,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl CategoryTable {
    /// A row-less table carrying the category's default schema, so every
    /// aggregation over it yields an empty result instead of a usage error.
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            columns: category.schema().into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table, padding short rows with nulls and truncating long ones.
    pub fn new(category: Category, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Null);
                row
            })
            .collect();

        Self {
            category,
            columns,
            rows,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Like [`column_index`](Self::column_index) but reports a missing column
    /// as a usage error.
    pub fn require_column(&self, name: &str) -> Result<usize, AggregateError> {
        self.column_index(name)
            .ok_or_else(|| AggregateError::MissingColumn {
                category: self.category,
                column: name.to_string(),
            })
    }

    /// Iterates the cells of one column, or errors if the column is absent.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Cell>, AggregateError> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Derives a new table with the same schema from an already-shaped row set.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            category: self.category,
            columns: self.columns.clone(),
            rows,
        }
    }
}
