// In-memory tabular dataset: one decision-variable candidate per row

use super::compiler::ModelError;

/// Values of one column, typed at construction
#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Numeric column, usable for objectives, right-hand sides and weights
    Numeric(Vec<f64>),
    /// Categorical column, usable only as a grouping key
    Key(Vec<String>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Key(v) => v.len(),
        }
    }
}

/// Read-only table supplied by the caller at model-construction time.
///
/// Rows are identified by their ordinal index (0..N-1), stable for the
/// lifetime of a model. The first column added fixes the row count; every
/// later column must match it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<(String, ColumnData)>,
    rows: usize,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numeric(
        self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, ModelError> {
        self.add_column(name.into(), ColumnData::Numeric(values))
    }

    pub fn with_key<S: Into<String>>(
        self,
        name: impl Into<String>,
        values: Vec<S>,
    ) -> Result<Self, ModelError> {
        let values = values.into_iter().map(Into::into).collect();
        self.add_column(name.into(), ColumnData::Key(values))
    }

    fn add_column(mut self, name: String, data: ColumnData) -> Result<Self, ModelError> {
        if self.columns.is_empty() {
            self.rows = data.len();
        } else if data.len() != self.rows {
            return Err(ModelError::ColumnLength {
                column: name,
                expected: self.rows,
                actual: data.len(),
            });
        }
        self.columns.push((name, data));
        Ok(self)
    }

    /// Number of rows (and therefore of row decision variables)
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data)
    }

    /// Values of a numeric column
    pub fn numeric(&self, name: &str) -> Result<&[f64], ModelError> {
        match self.column(name) {
            Some(ColumnData::Numeric(values)) => Ok(values),
            Some(ColumnData::Key(_)) => Err(ModelError::NotNumeric(name.to_string())),
            None => Err(ModelError::UnknownColumn(name.to_string())),
        }
    }

    /// Partition row indices by distinct value of `name`, in order of first
    /// appearance. Both key and numeric columns can serve as grouping keys.
    pub fn group_rows(&self, name: &str) -> Result<Vec<(String, Vec<usize>)>, ModelError> {
        let labels: Vec<String> = match self.column(name) {
            Some(ColumnData::Key(values)) => values.clone(),
            Some(ColumnData::Numeric(values)) => values.iter().map(|v| v.to_string()).collect(),
            None => return Err(ModelError::UnknownColumn(name.to_string())),
        };

        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
        for (row, label) in labels.into_iter().enumerate() {
            match groups.iter_mut().find(|(g, _)| *g == label) {
                Some((_, rows)) => rows.push(row),
                None => groups.push((label, vec![row])),
            }
        }
        Ok(groups)
    }

    /// Value of `column` shared by every row in `rows`.
    ///
    /// Group right-hand sides and linking bounds are read per group; the
    /// value must be constant within the group, and a disagreement is a
    /// data error naming the offending group and column.
    pub fn uniform_numeric(
        &self,
        column: &str,
        group: &str,
        rows: &[usize],
    ) -> Result<f64, ModelError> {
        let values = self.numeric(column)?;
        let Some(&first_row) = rows.first() else {
            return Err(ModelError::EmptyGroup {
                column: column.to_string(),
                group: group.to_string(),
            });
        };
        let first = values[first_row];
        for &row in &rows[1..] {
            if values[row] != first {
                return Err(ModelError::NonUniformGroup {
                    column: column.to_string(),
                    group: group.to_string(),
                    first,
                    conflicting: values[row],
                });
            }
        }
        Ok(first)
    }
}
