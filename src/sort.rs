//! Column sorting.
//!
//! Clicking a column heading toggles its sort order and clears every other
//! column, then the records are ordered by the matching field with a
//! divide-and-conquer merge sort. Merge sort is stable, records with equal
//! keys keep their relative order, which keeps repeated sorts idempotent.

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::domain::{ColumnDescriptor, Field, PipelineError, Record, SortKey, SortOrder};

thread_local! {
    // Root locale, tertiary strength: lowercase sorts before uppercase
    static COLLATOR: Option<CollatorBorrowed<'static>> =
        Collator::try_new(Default::default(), CollatorOptions::default())
            .inspect_err(|err| warn!("No collation data, using case-folded ordering: {err}"))
            .ok();
}

/// Compares two strings the way a human reader expects them in a table.
///
/// Uses the Unicode collation algorithm for the root locale, so accented
/// letters sort next to their base letter. Strings that differ only in case
/// put the lowercase variant first, and strings the collator considers equal
/// fall back to code point order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => case_folded_cmp(a, b),
        })
        .then_with(|| b.cmp(a))
}

fn case_folded_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b)
}

fn compare_keys(a: SortKey<'_>, b: SortKey<'_>) -> Ordering {
    match (a, b) {
        (SortKey::Number(a), SortKey::Number(b)) => a.cmp(&b),
        (SortKey::Text(a), SortKey::Text(b)) => locale_cmp(a, b),
        // Numbers come before text
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

/// Orders two records by `field` in the direction given by `order`.
///
/// `Unset` treats every pair as equal.
pub fn compare_records(a: &Record, b: &Record, field: Field, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => compare_keys(a.key(field), b.key(field)),
        SortOrder::Descending => compare_keys(b.key(field), a.key(field)),
        SortOrder::Unset => Ordering::Equal,
    }
}

/// Stable merge sort returning a new, ordered vector.
///
/// The input is split at `ceil(len / 2)`; on ties the left head wins.
pub fn merge_sort<T, F>(items: &[T], compare: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let middle = items.len().div_ceil(2);
    let (left, right) = items.split_at(middle);
    let sorted_left = merge_sort(left, compare);
    let sorted_right = merge_sort(right, compare);

    merge(sorted_left, sorted_right, compare)
}

fn merge<T, F>(sorted_left: Vec<T>, sorted_right: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut merged = Vec::with_capacity(sorted_left.len() + sorted_right.len());
    let mut left = sorted_left.into_iter().peekable();
    let mut right = sorted_right.into_iter().peekable();

    loop {
        let left_is_next = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
            _ => break,
        };
        if left_is_next {
            merged.extend(left.next());
        } else {
            merged.extend(right.next());
        }
    }

    // At most one side still holds elements
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Clears every column but `sort_index` and toggles the selected one.
///
/// `Ascending` becomes `Descending`, anything else becomes `Ascending`.
pub fn toggle_columns(
    columns: &[ColumnDescriptor],
    sort_index: usize,
) -> Result<Vec<ColumnDescriptor>, PipelineError> {
    if sort_index >= columns.len() {
        return Err(PipelineError::SortIndexOutOfRange {
            index: sort_index,
            len: columns.len(),
        });
    }

    let toggled = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let order = if idx != sort_index {
                SortOrder::Unset
            } else if column.order == SortOrder::Ascending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            ColumnDescriptor {
                name: column.name.clone(),
                order,
            }
        })
        .collect();
    Ok(toggled)
}

/// Sorts by an already resolved field and direction.
///
/// `Unset` keeps the input order.
pub fn sort_records(records: &[Record], field: Field, order: SortOrder) -> Vec<Record> {
    if order == SortOrder::Unset {
        return records.to_vec();
    }

    let start_time = Instant::now();
    let sorted = merge_sort(records, &|a: &Record, b: &Record| {
        compare_records(a, b, field, order)
    });
    trace!(
        "Sorted {} records by {:?} {:?} in {}µs",
        sorted.len(),
        field,
        order,
        start_time.elapsed().as_micros()
    );
    sorted
}

/// Handles a click on the column heading at `sort_index`.
///
/// Returns the sorted records together with the toggled column descriptors.
/// Neither input is modified.
pub fn sort_by_column(
    records: &[Record],
    columns: &[ColumnDescriptor],
    sort_index: usize,
) -> Result<(Vec<Record>, Vec<ColumnDescriptor>), PipelineError> {
    let toggled = toggle_columns(columns, sort_index)?;
    let selected = &toggled[sort_index];
    let field = Field::resolve(&selected.name)?;

    debug!("Sorting by column \"{}\" {:?}", selected.name, selected.order);
    let sorted = sort_records(records, field, selected.order);
    Ok((sorted, toggled))
}
