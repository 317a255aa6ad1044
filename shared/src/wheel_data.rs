use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entry::Entry;
use crate::error::WheelResult;
use crate::settings::WheelSettings;

/// The persisted wheel document: entries, tag filter and settings.
///
/// Reading is forgiving: a field that cannot be understood falls back to its
/// default on its own, and an unreadable entry is dropped without taking the
/// rest of the list with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelData {
    #[serde(default = "default_entries", deserialize_with = "deserialize_entries")]
    pub wheel_entries: Vec<Entry>,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub enabled_tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub known_tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub settings: WheelSettings,
}

fn default_entries() -> Vec<Entry> {
    vec![Entry::new("Apple", 1, "fruit")]
}

fn deserialize_entries<'de, D>(deserializer: D) -> Result<Vec<Entry>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items,
        other => {
            log::warn!("wheelEntries is not a list ({}), using defaults", other);
            return Ok(default_entries());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match Entry::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::warn!("dropping unreadable entry {}: {}", i, err);
                None
            }
        })
        .collect())
}

fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        log::warn!("ignoring unreadable wheel field: {}", err);
        T::default()
    }))
}

/// Entries a brand new wheel starts with.
pub fn starter_entries() -> Vec<Entry> {
    vec![Entry::new("Apple", 1, "fruit"), Entry::new("Banana", 1, "fruit")]
}

impl Default for WheelData {
    fn default() -> Self {
        Self {
            wheel_entries: default_entries(),
            enabled_tags: Vec::new(),
            known_tags: Vec::new(),
            settings: WheelSettings::default(),
        }
    }
}

impl WheelData {
    pub fn from_json(json: &str) -> WheelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> WheelResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WheelError;
    use crate::palette::ColorScheme;

    #[test]
    fn test_missing_fields_take_defaults() {
        let data = WheelData::from_json("{}").unwrap();
        assert_eq!(data.wheel_entries, vec![Entry::new("Apple", 1, "fruit")]);
        assert!(data.enabled_tags.is_empty());
        assert_eq!(data.settings, WheelSettings::default());
    }

    #[test]
    fn test_empty_entry_list_is_kept() {
        let data = WheelData::from_json(r#"{"wheelEntries": []}"#).unwrap();
        assert!(data.wheel_entries.is_empty());
    }

    #[test]
    fn test_reads_browser_state() {
        let json = r#"{
            "wheelEntries": [
                {"tags": "fruit", "weight": 1, "text": "Apple"},
                {"tags": "fruit, yellow", "weight": "3", "text": "Banana"}
            ],
            "enabledTags": ["fruit"],
            "knownTags": ["fruit", "yellow"],
            "settings": {"spinStrength": 8, "spinDuration": 2.5, "colorScheme": "warm",
                         "spinSound": "silence", "victorySound": "yippee"}
        }"#;
        let data = WheelData::from_json(json).unwrap();
        assert_eq!(data.wheel_entries[1].weight(), 3);
        assert_eq!(data.wheel_entries[1].tags, vec!["fruit", "yellow"]);
        assert_eq!(data.known_tags, vec!["fruit", "yellow"]);
        assert_eq!(data.settings.color_scheme, ColorScheme::Warm);

        let reread = WheelData::from_json(&data.to_json().unwrap()).unwrap();
        assert_eq!(reread, data);
        assert_eq!(reread.settings.extra["victorySound"], "yippee");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(WheelData::from_json("{nope"), Err(WheelError::Data(_))));
        assert!(matches!(WheelData::from_json("[1, 2]"), Err(WheelError::Data(_))));
    }

    #[test]
    fn test_bad_fields_fall_back_one_at_a_time() {
        let json = r#"{
            "wheelEntries": [
                {"text": "Keep me", "weight": 5, "tags": "work"},
                {"text": 7, "weight": 1},
                42,
                "stray"
            ],
            "enabledTags": "work",
            "knownTags": ["work"],
            "settings": {"spinStrength": 3}
        }"#;
        let data = WheelData::from_json(json).unwrap();
        let texts: Vec<&str> = data.wheel_entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["Keep me", "7"]);
        assert_eq!(data.wheel_entries[0].weight(), 5);
        assert!(data.enabled_tags.is_empty());
        assert_eq!(data.known_tags, vec!["work"]);
        assert_eq!(data.settings.spin_strength, 3);

        let data = WheelData::from_json(r#"{"wheelEntries": 5, "settings": "loud"}"#).unwrap();
        assert_eq!(data.wheel_entries, default_entries());
        assert_eq!(data.settings, WheelSettings::default());
    }
}
