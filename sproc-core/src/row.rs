use crate::{Result, Rows, Value};
use std::sync::Arc;

/// Column names of a cursor, reference counted because every row of the same
/// cursor shares them.
pub type RowNames = Arc<[String]>;
/// Values of a single row, matching the associated [`RowNames`] in length.
pub type Row = Box<[Value]>;

/// A row together with its column labels.
#[derive(Debug, Clone)]
pub struct RowLabeled {
    pub labels: RowNames,
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }

    pub fn labels(&self) -> &RowNames {
        &self.labels
    }

    pub fn values(&self) -> &Row {
        &self.values
    }

    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|label| label == name)
            .map(|index| &self.values[index])
    }
}

/// Drain a row handle front to back, mapping every row. The mapper receives
/// the 0-based row number; its first error aborts the drain.
pub fn map_rows<T>(
    rows: &mut dyn Rows,
    mapper: &(dyn Fn(&RowLabeled, usize) -> Result<T> + Send + Sync),
) -> Result<Vec<T>> {
    let mut mapped = Vec::new();
    let mut index = 0;
    while let Some(row) = rows.next_row()? {
        mapped.push(mapper(&row, index)?);
        index += 1;
    }
    Ok(mapped)
}
