//! Data Table - in-memory collection of labeled numeric lines
//!
//! Lines are kept in insertion order. Queries are linear scans; every
//! transform (filter, map, grouping) returns a new table holding its own
//! copy of the lines, so later mutation of the source never leaks into it.

use crate::error::{DataTableError, Result};
use crate::labels::{self, IntoLabel};
use crate::line::Line;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTable {
    lines: Vec<Line>,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_lines(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Read-only view of every line, in table order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Append a new line. Lines with equal labels are kept side by side.
    pub fn add<I>(&mut self, value: f64, labels: I)
    where
        I: IntoIterator,
        I::Item: IntoLabel,
    {
        self.lines.push(Line::new(value, labels));
    }

    /// Add `value` to the first line whose key matches `labels`, or append a
    /// new line when none does.
    pub fn inc<I>(&mut self, value: f64, labels: I)
    where
        I: IntoIterator,
        I::Item: IntoLabel,
    {
        let key = labels::canonical_labels(labels);
        self.inc_key(value, key);
    }

    fn inc_key(&mut self, value: f64, key: Vec<String>) {
        match self.lines.iter_mut().find(|line| line.has_key(&key)) {
            Some(line) => {
                line.value += value;
                debug!("Merged {} into {}", value, line);
            }
            None => {
                debug!("No line for {}, inserting", labels::describe(&key));
                self.lines.push(Line::from_canonical(value, key));
            }
        }
    }

    /// Append a copy of every line of `other` without merging.
    pub fn add_table(&mut self, other: &DataTable) {
        self.lines.extend(other.lines.iter().cloned());
    }

    /// [`inc`](Self::inc) every line of `other`, in its order.
    pub fn inc_table(&mut self, other: &DataTable) {
        for line in &other.lines {
            self.inc(line.value, line.labels());
        }
    }

    /// Value of the single line whose key matches `labels`.
    ///
    /// Fails with [`DataTableError::NotFound`] when no line matches and with
    /// [`DataTableError::Ambiguous`] when more than one does.
    pub fn get<I>(&self, labels: I) -> Result<f64>
    where
        I: IntoIterator,
        I::Item: IntoLabel,
    {
        let key = labels::canonical_labels(labels);
        let mut matches = self.lines.iter().filter(|line| line.has_key(&key));

        match (matches.next(), matches.next()) {
            (Some(line), None) => Ok(line.value),
            (Some(_), Some(_)) => Err(DataTableError::Ambiguous(labels::describe(&key))),
            (None, _) => Err(DataTableError::NotFound(labels::describe(&key))),
        }
    }

    /// Lines whose leading labels equal `prefix`, position by position.
    /// Missing prefix entries match the empty label.
    pub fn filter<I>(&self, prefix: I) -> DataTable
    where
        I: IntoIterator,
        I::Item: IntoLabel,
    {
        let prefix: Vec<String> = labels::raw_labels(prefix)
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        self.filter_by(|line| line.starts_with(&prefix))
    }

    /// Lines whose label at `column` equals `value` exactly.
    pub fn filter_column<V: IntoLabel>(&self, column: usize, value: V) -> DataTable {
        let value = value.into_label().unwrap_or_default();
        self.filter_by(|line| line.column(column) == value)
    }

    /// Lines accepted by `predicate`.
    pub fn filter_by<P>(&self, predicate: P) -> DataTable
    where
        P: Fn(&Line) -> bool,
    {
        let lines: Vec<Line> = self
            .lines
            .iter()
            .filter(|&line| predicate(line))
            .cloned()
            .collect();
        debug!("Filter kept {} of {} lines", lines.len(), self.lines.len());
        Self::from_lines(lines)
    }

    /// Lines whose label at `column` is accepted by `predicate`.
    pub fn filter_column_by<P>(&self, column: usize, predicate: P) -> DataTable
    where
        P: Fn(&str) -> bool,
    {
        self.filter_by(|line| predicate(line.column(column)))
    }

    /// Replace the label at `column` of every line with `transform(label)`.
    ///
    /// Writing inside the stored labels keeps the result verbatim. Writing past
    /// the end pads the labels with empty strings first and then
    /// re-canonicalizes them. A `column` of `usize::MAX` cannot be padded to
    /// and leaves lines unchanged.
    pub fn map<F>(&self, column: usize, transform: F) -> DataTable
    where
        F: Fn(&str) -> String,
    {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let original = line.column(column);
                let transformed = transform(original);
                if transformed == original {
                    return line.clone();
                }

                let mut labels = line.labels.clone();
                if column < labels.len() {
                    labels[column] = transformed;
                    return Line::from_canonical(line.value, labels);
                }

                let Some(len) = column.checked_add(1) else {
                    return line.clone();
                };
                labels.resize(len, String::new());
                labels[column] = transformed;
                let labels = labels::canonicalize(labels.into_iter().map(Some).collect());
                Line::from_canonical(line.value, labels)
            })
            .collect();
        Self::from_lines(lines)
    }

    /// Distinct labels at `column`, ordered ignoring case. Labels that differ
    /// only in case are kept as separate entries.
    pub fn get_distinct(&self, column: usize) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.column(column).to_string())
            .sorted_by(|a, b| labels::distinct_order(a, b))
            .dedup()
            .collect()
    }

    /// Distinct label tuples at `columns`, ordered ignoring case position by
    /// position. With no columns, each line's full labels form the tuple.
    pub fn get_distinct_columns(&self, columns: &[usize]) -> Vec<Vec<String>> {
        self.lines
            .iter()
            .map(|line| line.columns(columns))
            .sorted_by(|a, b| labels::distinct_tuple_order(a, b))
            .dedup()
            .collect()
    }

    pub fn sum(&self) -> f64 {
        self.lines.iter().map(Line::value).sum()
    }

    /// Group lines by their labels at `columns` and sum the values of each group.
    pub fn sum_distinct(&self, columns: &[usize]) -> DataTable {
        let mut result = DataTable::new();
        for line in &self.lines {
            result.inc(line.value, line.columns(columns));
        }
        debug!(
            "Grouped {} lines into {} by columns {:?}",
            self.lines.len(),
            result.len(),
            columns
        );
        result
    }

    /// Label at `column` for every line, in table order.
    pub fn get_column(&self, column: usize) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(move |line| line.column(column))
    }

    /// Labels at `columns` for every line, in table order. With no columns,
    /// yields each line's stored labels.
    pub fn get_columns<'a>(
        &'a self,
        columns: &'a [usize],
    ) -> impl Iterator<Item = Vec<String>> + 'a {
        self.lines.iter().map(move |line| line.columns(columns))
    }
}

impl FromIterator<Line> for DataTable {
    fn from_iter<T: IntoIterator<Item = Line>>(iter: T) -> Self {
        Self::from_lines(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a DataTable {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
