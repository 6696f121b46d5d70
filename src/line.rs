//! Line - one row of a data table

use crate::labels::{self, label_at};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric value keyed by a canonical label sequence.
///
/// Lines handed out by a table are read-only; the value only changes through
/// [`DataTable::inc`](crate::DataTable::inc).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredLine")]
pub struct Line {
    pub(crate) value: f64,
    pub(crate) labels: Vec<String>,
}

/// Serialized form of a line; labels are canonicalized on the way in.
#[derive(Deserialize)]
struct StoredLine {
    value: f64,
    labels: Vec<Option<String>>,
}

impl From<StoredLine> for Line {
    fn from(stored: StoredLine) -> Self {
        Self::from_canonical(stored.value, labels::canonicalize(stored.labels))
    }
}

impl Line {
    /// Build a line, canonicalizing `labels`.
    pub fn new<I>(value: f64, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: labels::IntoLabel,
    {
        Self::from_canonical(value, labels::canonical_labels(labels))
    }

    pub(crate) fn from_canonical(value: f64, labels: Vec<String>) -> Self {
        Self { value, labels }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Label at `column`; empty past the stored labels.
    pub fn column(&self, column: usize) -> &str {
        label_at(&self.labels, column)
    }

    /// Labels at the requested columns, or every stored label when `columns`
    /// is empty.
    pub fn columns(&self, columns: &[usize]) -> Vec<String> {
        if columns.is_empty() {
            return self.labels.clone();
        }
        columns
            .iter()
            .map(|&column| self.column(column).to_string())
            .collect()
    }

    /// The stored canonical labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub(crate) fn starts_with(&self, prefix: &[String]) -> bool {
        prefix
            .iter()
            .enumerate()
            .all(|(i, label)| self.column(i) == label.as_str())
    }

    pub(crate) fn has_key(&self, key: &[String]) -> bool {
        labels::padded_eq(&self.labels, key)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line [{} {}]", self.value, labels::describe(&self.labels))
    }
}
