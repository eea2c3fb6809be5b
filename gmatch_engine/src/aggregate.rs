//! Turning complete mappings into the answer a caller asked for.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::Serialize;

use crate::graph::{Label, Row};
use crate::mapping::Mapping;

/// Rows each queried label can occupy across the confirmed mappings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Answer {
    per_label: BTreeMap<Label, BTreeSet<Row>>,
    exhaustive: bool,
}

/// Collect, for every queried label, the rows it maps to in any of `mappings`.
///
/// `exhaustive` records whether `mappings` holds every isomorphism or only
/// the first one found; a non-exhaustive answer cannot prove uniqueness.
pub fn aggregate<'m>(
    mappings: impl IntoIterator<Item = &'m Mapping<Label, Row>>,
    queried: &[Label],
    exhaustive: bool,
) -> Answer {
    let mut per_label: BTreeMap<Label, BTreeSet<Row>> = queried
        .iter()
        .map(|label| (label.clone(), BTreeSet::new()))
        .collect();

    for mapping in mappings {
        for (label, rows) in per_label.iter_mut() {
            if let Some(&row) = mapping.get(label) {
                rows.insert(row);
            }
        }
    }

    Answer {
        per_label,
        exhaustive,
    }
}

impl Answer {
    /// Rows for one queried label.
    pub fn rows(&self, label: &Label) -> Option<&BTreeSet<Row>> {
        self.per_label.get(label)
    }

    /// Queried labels with their rows, in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, &BTreeSet<Row>)> {
        self.per_label.iter()
    }

    /// True when every mapping was enumerated.
    pub const fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// True when each queried label has exactly one row.
    pub fn is_unambiguous(&self) -> bool {
        self.per_label.values().all(|rows| rows.len() == 1)
    }

    /// Labels that can occupy more than one row.
    pub fn ambiguous_labels(&self) -> Vec<&Label> {
        self.per_label
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(label, _)| label)
            .collect()
    }

    /// Every row any queried label maps to, ascending.
    pub fn union(&self) -> BTreeSet<Row> {
        self.per_label.values().flatten().copied().collect()
    }

    /// The union of row numbers written the way exam answers are,
    /// 1-based, ascending, with no separators (`"15"`).
    pub fn joined(&self) -> String {
        self.union().iter().map(|row| row.number()).join("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, usize)]) -> Mapping<Label, Row> {
        pairs
            .iter()
            .map(|&(l, n)| (Label::from(l), Row::from_number(n)))
            .collect()
    }

    fn rows(numbers: &[usize]) -> BTreeSet<Row> {
        numbers.iter().map(|&n| Row::from_number(n)).collect()
    }

    #[test]
    fn single_mapping_is_unambiguous() {
        let m = mapping(&[("A", 3), ("B", 1), ("C", 2)]);
        let answer = aggregate([&m], &[Label::from("A"), Label::from("B")], true);

        assert!(answer.is_unambiguous());
        assert!(answer.ambiguous_labels().is_empty());
        assert_eq!(answer.rows(&Label::from("A")), Some(&rows(&[3])));
        assert_eq!(answer.joined(), "13");
    }

    #[test]
    fn symmetric_mappings_merge() {
        let forward = mapping(&[("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
        let backward = mapping(&[("A", 4), ("B", 3), ("C", 2), ("D", 1)]);
        let answer = aggregate([&forward, &backward], &[Label::from("A")], true);

        assert!(!answer.is_unambiguous());
        assert_eq!(answer.ambiguous_labels(), vec![&Label::from("A")]);
        assert_eq!(answer.rows(&Label::from("A")), Some(&rows(&[1, 4])));
        assert_eq!(answer.joined(), "14");
    }

    #[test]
    fn union_deduplicates_shared_rows() {
        let forward = mapping(&[("A", 1), ("E", 5)]);
        let backward = mapping(&[("A", 5), ("E", 1)]);
        let answer = aggregate(
            [&forward, &backward],
            &[Label::from("A"), Label::from("E")],
            true,
        );
        assert_eq!(answer.union(), rows(&[1, 5]));
        assert_eq!(answer.joined(), "15");
    }

    #[test]
    fn json_lists_rows_per_label() {
        let m = mapping(&[("A", 2)]);
        let answer = aggregate([&m], &[Label::from("A")], false);
        assert!(!answer.is_exhaustive());
        assert_eq!(
            serde_json::to_string(&answer).unwrap(),
            r#"{"per_label":{"A":[1]},"exhaustive":false}"#
        );
    }
}
