use std::collections::HashSet;
use tracing::debug;

use crate::domain::Record;

/// Removes records whose `name` was already seen, keeping the first occurrence.
pub fn dedupe(records: &[Record]) -> Vec<Record> {
    let mut seen_names: HashSet<&str> = HashSet::with_capacity(records.len());
    let unique: Vec<Record> = records
        .iter()
        .filter(|record| seen_names.insert(record.name.as_str()))
        .cloned()
        .collect();

    debug!(
        "Dedupe kept {} of {} records",
        unique.len(),
        records.len()
    );
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(name: &str, city: &str) -> Record {
        Record {
            name: name.into(),
            city: city.into(),
            ..Record::default()
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let input = vec![named("A", "one"), named("B", "two"), named("A", "three")];
        let unique = dedupe(&input);
        assert_eq!(unique, vec![named("A", "one"), named("B", "two")]);
        // Input stays untouched.
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(dedupe(&[]).is_empty());
    }

    prop_compose! {
        fn arb_record()(
            name in "[a-c]{0,2}",
            priority in 0i64..4,
        ) -> Record {
            Record { name, priority, ..Record::default() }
        }
    }

    proptest! {
        #[test]
        fn dedupe_is_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
            let once = dedupe(&records);
            prop_assert_eq!(dedupe(&once), once.clone());
            prop_assert!(once.len() <= records.len());
        }

        #[test]
        fn dedupe_names_are_unique_and_ordered(records in prop::collection::vec(arb_record(), 0..40)) {
            let unique = dedupe(&records);
            let names: HashSet<&str> = unique.iter().map(|r| r.name.as_str()).collect();
            prop_assert_eq!(names.len(), unique.len());

            // Kept records appear in the input in the same relative order.
            let mut cursor = records.iter();
            for kept in &unique {
                prop_assert!(cursor.any(|r| r == kept));
            }
        }
    }
}
