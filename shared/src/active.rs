use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// An entry that is currently eligible for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEntry {
    /// Position of the source entry in the store when the set was resolved.
    pub index: usize,
    pub text: String,
    #[serde(deserialize_with = "crate::entry::deserialize_weight")]
    pub(crate) weight: u32,
}

impl ActiveEntry {
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// Filters `entries` down to the ones eligible under `enabled_tags`,
/// preserving store order.
///
/// An entry is active when it has no tags at all, or when at least one of its
/// tags is enabled.
pub fn resolve_active_entries(entries: &[Entry], enabled_tags: &BTreeSet<String>) -> Vec<ActiveEntry> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.is_untagged() || entry.tags.iter().any(|t| enabled_tags.contains(t)))
        .map(|(index, entry)| ActiveEntry {
            index,
            text: entry.text.clone(),
            weight: entry.weight(),
        })
        .collect()
}

pub fn total_weight(active: &[ActiveEntry]) -> u64 {
    active.iter().map(|e| u64::from(e.weight)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn enabled(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_untagged_always_active() {
        let entries = vec![Entry::new("Apple", 1, ""), Entry::new("Banana", 3, "")];
        let active = resolve_active_entries(&entries, &enabled(&[]));
        assert_eq!(active.len(), 2);
        assert_eq!(total_weight(&active), 4);
    }

    #[test]
    fn test_any_enabled_tag_matches() {
        let entries = vec![
            Entry::new("a", 1, "x, y"),
            Entry::new("b", 1, "y"),
            Entry::new("c", 1, "z"),
            Entry::new("d", 1, ""),
        ];
        let active = resolve_active_entries(&entries, &enabled(&["x"]));
        let texts: Vec<&str> = active.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "d"]);
        assert_eq!(active[1].index, 3);
    }

    #[test]
    fn test_deserialized_weight_is_coerced() {
        let entry: ActiveEntry = serde_json::from_str(r#"{"index": 0, "text": "z", "weight": 0}"#).unwrap();
        assert_eq!(entry.weight(), 1);
    }

    #[test]
    fn test_all_filtered_out() {
        let entries = vec![Entry::new("X", 1, "a")];
        assert!(resolve_active_entries(&entries, &enabled(&[])).is_empty());
        assert!(resolve_active_entries(&[], &enabled(&["a"])).is_empty());
    }

    fn arb_entry() -> impl Strategy<Value = Entry> {
        (1u32..10, proptest::collection::vec(prop_oneof!["a", "b", "c", "d"], 0..3))
            .prop_map(|(weight, tags)| Entry::new("e", weight, &tags.join(",")))
    }

    proptest! {
        #[test]
        fn test_excludes_exactly_disjoint_tagged(
            entries in proptest::collection::vec(arb_entry(), 0..20),
            on in proptest::collection::btree_set(prop_oneof!["a", "b", "c", "d"], 0..4),
        ) {
            let active = resolve_active_entries(&entries, &on);
            let expected: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.tags.is_empty() || !e.tags.iter().all(|t| !on.contains(t)))
                .map(|(i, _)| i)
                .collect();
            let got: Vec<usize> = active.iter().map(|e| e.index).collect();
            prop_assert_eq!(got, expected);
        }
    }
}
