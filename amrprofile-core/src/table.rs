//! Fixed-schema numeric tables and column projection.
//!
//! A [`FeatureTable`] is a row-major matrix with named columns. Every row has
//! exactly one value per column; [`FeatureTable::push_row`] enforces this.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use log::debug;

use crate::types::AmrError;

/// Named-column table of `f64` values, one row per sequence.
///
/// # Examples
///
/// ```rust
/// use amrprofile_core::table::FeatureTable;
///
/// let mut table = FeatureTable::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
/// table.push_row(vec![1.0, 2.0, 3.0])?;
///
/// let subset = table.select(&["c".to_string(), "a".to_string()])?;
/// assert_eq!(subset.columns(), &["c".to_string(), "a".to_string()]);
/// assert_eq!(subset.row(0), &[3.0, 1.0]);
/// # Ok::<(), amrprofile_core::types::AmrError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureTable {
    /// Creates an empty table with the given schema.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// [`AmrError::SchemaMismatch`] if the row width differs from the column count.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<(), AmrError> {
        if row.len() != self.columns.len() {
            return Err(AmrError::SchemaMismatch(format!(
                "row {} has {} values but the table has {} columns",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, in row order.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Looks up a single cell.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<f64> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| r[index])
    }

    /// Projects the table onto `names`, in the given order.
    ///
    /// # Errors
    ///
    /// [`AmrError::MissingColumn`] naming the first requested column that the
    /// table does not contain.
    pub fn select(&self, names: &[String]) -> Result<FeatureTable, AmrError> {
        let positions: HashMap<&str, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let indices = names
            .iter()
            .map(|name| {
                positions
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| AmrError::MissingColumn(name.clone()))
            })
            .collect::<Result<Vec<usize>, AmrError>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect();

        debug!(
            "Selected {} of {} columns for {} rows",
            names.len(),
            self.columns.len(),
            self.rows.len()
        );

        Ok(FeatureTable {
            columns: names.to_vec(),
            rows,
        })
    }
}

/// Reads the ordered column list from the header row of a CSV file.
///
/// Only the header is consulted; any data rows are ignored.
///
/// # Errors
///
/// - [`AmrError::IoError`] if the file cannot be opened
/// - [`AmrError::CsvError`] if the header cannot be parsed
/// - [`AmrError::ParseError`] if the header is empty
pub fn read_column_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, AmrError> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(AmrError::ParseError(format!(
            "column list {} has an empty header row",
            path.as_ref().display()
        )));
    }

    debug!(
        "Read {} column names from {}",
        columns.len(),
        path.as_ref().display()
    );
    Ok(columns)
}
