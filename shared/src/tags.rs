use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Which tags are switched on, plus every tag the wheel has already seen.
///
/// A tag is enabled automatically the first time it shows up. After that its
/// enabled state belongs to the user until the tag vanishes from every entry,
/// at which point it is forgotten and will be enabled again if it comes back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagFilterState {
    #[serde(default)]
    enabled_tags: BTreeSet<String>,
    #[serde(default)]
    known_tags: BTreeSet<String>,
}

impl TagFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        enabled: impl IntoIterator<Item = String>,
        known: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            enabled_tags: enabled.into_iter().collect(),
            known_tags: known.into_iter().collect(),
        }
    }

    pub fn enabled_tags(&self) -> &BTreeSet<String> {
        &self.enabled_tags
    }

    pub fn known_tags(&self) -> &BTreeSet<String> {
        &self.known_tags
    }

    pub fn is_enabled(&self, tag: &str) -> bool {
        self.enabled_tags.contains(tag)
    }

    /// Reconciles the filter with the tags currently used by `entries`.
    /// Returns the tags that were discovered (and enabled) by this call.
    pub fn sync(&mut self, entries: &[Entry]) -> Vec<String> {
        let universe: BTreeSet<&str> = entries
            .iter()
            .flat_map(|e| e.tags.iter().map(String::as_str))
            .collect();

        self.enabled_tags.retain(|t| universe.contains(t.as_str()));
        self.known_tags.retain(|t| universe.contains(t.as_str()));

        let mut discovered = Vec::new();
        for tag in universe {
            if self.known_tags.insert(tag.to_string()) {
                self.enabled_tags.insert(tag.to_string());
                discovered.push(tag.to_string());
            }
        }
        if !discovered.is_empty() {
            log::debug!("discovered tags: {:?}", discovered);
        }
        discovered
    }

    /// Flips a tag and returns its new state.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.enabled_tags.remove(tag) {
            false
        } else {
            self.enabled_tags.insert(tag.to_string());
            true
        }
    }

    pub fn set_enabled(&mut self, tag: &str, enabled: bool) {
        if enabled {
            self.enabled_tags.insert(tag.to_string());
        } else {
            self.enabled_tags.remove(tag);
        }
    }
}
