//! Generic, type-aware result sorting.
//!
//! # Comparison rules
//! ```text
//! a[key], b[key]        ascending           descending
//! ───────────────────   ─────────────────   ─────────────────
//! String, String        byte order          reversed
//! Number, Number        numeric             reversed
//! either side missing   keep input order    keep input order
//! any other pairing     keep input order    keep input order
//! ```
//!
//! # Design Decisions
//! - Values are classified into [`SortValue`] once per record, not per comparison
//! - Unsortable pairs compare as "not greater" in both directions; descending
//!   only inverts real comparisons
//! - Stable merge sort: equal and unsortable pairs never swap, and a comparator
//!   that is not transitive across mixed types cannot make the sort panic
//! - Sorting never fails and never touches record contents

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::catalog::types::{Record, ResultSet, SortDirection, SortSpec};

/// Sort key extracted from one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    /// The record has no such field.
    Missing,
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    /// Nested object or array.
    Composite,
}

impl<'a> SortValue<'a> {
    /// Classify the value stored under `key`.
    pub fn of(record: &'a Record, key: &str) -> Self {
        match record.get(key) {
            None => SortValue::Missing,
            Some(Value::Null) => SortValue::Null,
            Some(Value::Bool(b)) => SortValue::Bool(*b),
            Some(Value::Number(n)) => SortValue::Number(n),
            Some(Value::String(s)) => SortValue::String(s),
            Some(Value::Array(_)) | Some(Value::Object(_)) => SortValue::Composite,
        }
    }

    /// Natural ascending order between two values of a sortable kind.
    ///
    /// Returns `None` when the pair cannot be ordered: a side is missing,
    /// the kinds differ, or the kind has no defined order.
    pub fn natural_cmp(&self, other: &SortValue<'_>) -> Option<Ordering> {
        match (self, other) {
            (SortValue::String(a), SortValue::String(b)) => Some(a.cmp(b)),
            (SortValue::Number(a), SortValue::Number(b)) => Some(compare_numbers(a, b)),
            _ => None,
        }
    }
}

/// Compare two JSON numbers, exactly when both are integers.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(0.0);
    let y = b.as_f64().unwrap_or(0.0);
    x.total_cmp(&y)
}

/// Ordering of `a` relative to `b` for the requested direction.
///
/// Unsortable pairs resolve to `Equal` regardless of direction, so the
/// stable sort leaves them where they were.
pub fn compare(a: &SortValue<'_>, b: &SortValue<'_>, direction: SortDirection) -> Ordering {
    match a.natural_cmp(b) {
        Some(ordering) if direction.is_ascending() => ordering,
        Some(ordering) => ordering.reverse(),
        None => Ordering::Equal,
    }
}

/// Reorder `records` by `spec`.
///
/// The output is always a permutation of the input.
pub fn sort(records: ResultSet, spec: &SortSpec) -> ResultSet {
    if records.len() < 2 {
        return records;
    }

    let order = {
        let keys: Vec<SortValue<'_>> = records
            .iter()
            .map(|record| SortValue::of(record, &spec.key))
            .collect();
        let mut is_less = |a: &usize, b: &usize| {
            compare(&keys[*a], &keys[*b], spec.direction) == Ordering::Less
        };
        let mut indices: Vec<usize> = (0..records.len()).collect();
        merge_sort(&mut indices, &mut is_less);
        indices
    };

    let mut slots: Vec<Option<Record>> = records.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

/// Stable top-down merge sort.
///
/// An element from the right run is only placed ahead of the left run when
/// `is_less(right, left)` holds, so ties keep their input order.
fn merge_sort<T, F>(items: &mut Vec<T>, is_less: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    if items.len() < 2 {
        return;
    }

    let mut right = items.split_off(items.len() / 2);
    merge_sort(items, is_less);
    merge_sort(&mut right, is_less);

    let left = std::mem::take(items);
    items.reserve(left.len() + right.len());

    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if is_less(&right[j], &left[i]) {
            items.push(right[j]);
            j += 1;
        } else {
            items.push(left[i]);
            i += 1;
        }
    }
    items.extend_from_slice(&left[i..]);
    items.extend_from_slice(&right[j..]);
}
