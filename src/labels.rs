//! Labels - canonical label sequences, key matching and ordering
//!
//! A label sequence is a variable-depth hierarchical key. Every sequence
//! stored in a table, or used to look rows up, is first brought into
//! canonical form:
//!
//! 1. the trailing run of empty or missing labels is trimmed (an all-empty
//!    sequence collapses to no labels at all);
//! 2. missing labels left inside the sequence become the empty string.
//!
//! Reading past the end of a sequence yields the empty string, so two keys
//! match when they agree after padding the shorter one with empty strings.

use itertools::Itertools;
use std::cmp::Ordering;

/// A value usable as one label. `None` stands for a missing label.
pub trait IntoLabel {
    fn into_label(self) -> Option<String>;
}

impl IntoLabel for &str {
    fn into_label(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoLabel for String {
    fn into_label(self) -> Option<String> {
        Some(self)
    }
}

impl IntoLabel for Option<&str> {
    fn into_label(self) -> Option<String> {
        self.map(str::to_string)
    }
}

impl IntoLabel for Option<String> {
    fn into_label(self) -> Option<String> {
        self
    }
}

impl<'a, T> IntoLabel for &'a T
where
    T: IntoLabel + Clone,
{
    fn into_label(self) -> Option<String> {
        self.clone().into_label()
    }
}

/// Collect raw labels without canonicalizing them.
pub fn raw_labels<I>(labels: I) -> Vec<Option<String>>
where
    I: IntoIterator,
    I::Item: IntoLabel,
{
    labels.into_iter().map(IntoLabel::into_label).collect()
}

/// Bring a raw label sequence into canonical form.
pub fn canonicalize(raw: Vec<Option<String>>) -> Vec<String> {
    let keep = raw
        .iter()
        .rposition(|label| matches!(label, Some(s) if !s.is_empty()))
        .map_or(0, |last| last + 1);

    raw.into_iter()
        .take(keep)
        .map(Option::unwrap_or_default)
        .collect()
}

/// Canonical labels straight from caller input.
pub fn canonical_labels<I>(labels: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: IntoLabel,
{
    canonicalize(raw_labels(labels))
}

/// Label at `index`, or the empty string past the end.
pub fn label_at<S: AsRef<str>>(labels: &[S], index: usize) -> &str {
    labels.get(index).map_or("", |label| label.as_ref())
}

/// Key equality after right-padding the shorter sequence with empty strings.
pub fn padded_eq<A, B>(a: &[A], b: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let len = a.len().max(b.len());
    (0..len).all(|i| label_at(a, i) == label_at(b, i))
}

/// Case-insensitive lexicographic comparison. Each char is folded with
/// `char::to_lowercase` (full Unicode lowercase mapping, no uppercase pass).
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Ordering used for distinct values: case-insensitive first, exact text
/// breaks ties so that values differing only in case stay separate but adjacent.
pub fn distinct_order(a: &str, b: &str) -> Ordering {
    compare_ignore_case(a, b).then_with(|| a.cmp(b))
}

/// Position-by-position [`distinct_order`] over label tuples.
pub fn distinct_tuple_order(a: &[String], b: &[String]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| compare_ignore_case(x, y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| a.cmp(b))
}

/// Render a key for error messages, e.g. `[a, b]`.
pub fn describe<S: AsRef<str>>(labels: &[S]) -> String {
    format!("[{}]", labels.iter().map(|label| label.as_ref()).format(", "))
}
