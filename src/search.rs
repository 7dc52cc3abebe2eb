//! Substring search over influencer names.
//!
//! The filter keeps every record whose `name` contains the search term as a
//! contiguous, case sensitive substring. Matches keep their relative order.

use std::time::Instant;
use tracing::trace;

use crate::domain::Record;

/// Returns `true` if `needle` occurs in `haystack`.
///
/// Slides a window of `needle.len()` bytes over every offset in
/// `0..=haystack.len() - needle.len()`. An empty needle always matches, a
/// needle longer than the haystack never does.
pub fn contains_substring(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();

    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    // UTF-8 is self-synchronizing, a byte match always lands on char boundaries.
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Keeps the records whose `name` contains `term`.
///
/// An empty term means there is no active search and returns the input as is.
pub fn filter_by_substring(records: &[Record], term: &str) -> Vec<Record> {
    if term.is_empty() {
        return records.to_vec();
    }

    let start_time = Instant::now();
    let matches: Vec<Record> = records
        .iter()
        .filter(|record| contains_substring(&record.name, term))
        .cloned()
        .collect();

    trace!(
        "Search for \"{}\" matched {} of {} records in {}µs",
        term,
        matches.len(),
        records.len(),
        start_time.elapsed().as_micros()
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(name: &str) -> Record {
        Record {
            name: name.into(),
            ..Record::default()
        }
    }

    #[test]
    fn window_reaches_last_offset() {
        assert!(contains_substring("Alice", "ce"));
        assert!(contains_substring("Alice", "Alice"));
        assert!(contains_substring("Alice", "A"));
        assert!(contains_substring("Alice", "e"));
    }

    #[test]
    fn needle_edge_cases() {
        assert!(contains_substring("Alice", ""));
        assert!(contains_substring("", ""));
        assert!(!contains_substring("", "a"));
        assert!(!contains_substring("Bob", "Bobby"));
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(!contains_substring("Alice", "alice"));
        assert!(!contains_substring("Alice", "LI"));
    }

    #[test]
    fn non_ascii_names() {
        assert!(contains_substring("José Núñez", "Núñ"));
        assert!(!contains_substring("José Núñez", "Nun"));
    }

    #[test]
    fn filter_keeps_matching_in_order() {
        let input = vec![named("Alice"), named("Bob"), named("Malik"), named("Lina")];
        let found = filter_by_substring(&input, "li");
        assert_eq!(found, vec![named("Alice"), named("Malik")]);
    }

    #[test]
    fn empty_term_is_identity() {
        let input = vec![named("Bob"), named("Alice")];
        assert_eq!(filter_by_substring(&input, ""), input);
    }

    #[test]
    fn long_term_matches_nothing() {
        let input = vec![named("Al"), named("Bo")];
        assert!(filter_by_substring(&input, "Alexander the Great").is_empty());
    }

    proptest! {
        #[test]
        fn filter_partitions_by_containment(
            names in prop::collection::vec("[ab]{0,4}", 0..30),
            term in "[ab]{0,2}",
        ) {
            let records: Vec<Record> = names.iter().map(|n| named(n)).collect();
            let found = filter_by_substring(&records, &term);

            prop_assert!(found.iter().all(|r| r.name.contains(term.as_str())));
            let excluded = records.iter().filter(|r| !r.name.contains(term.as_str())).count();
            prop_assert_eq!(found.len() + excluded, records.len());

            // Subsequence of the input.
            let mut cursor = records.iter();
            for kept in &found {
                prop_assert!(cursor.any(|r| r == kept));
            }
        }

        #[test]
        fn agrees_with_str_contains(haystack in "[a-c]{0,8}", needle in "[a-c]{0,3}") {
            prop_assert_eq!(
                contains_substring(&haystack, &needle),
                haystack.contains(needle.as_str())
            );
        }
    }
}
