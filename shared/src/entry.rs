use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{WheelError, WheelResult};

pub const DEFAULT_WEIGHT: u32 = 1;

/// One weighted, optionally tagged item on the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub text: String,
    #[serde(default = "default_weight", deserialize_with = "deserialize_weight")]
    weight: u32,
    #[serde(
        default,
        serialize_with = "serialize_tags",
        deserialize_with = "deserialize_tags"
    )]
    pub tags: Vec<String>,
}

impl Entry {
    /// Builds an entry from already-typed values. A zero weight is coerced to 1.
    pub fn new(text: impl Into<String>, weight: u32, tags: &str) -> Self {
        let weight = coerce_weight(weight_from_f64(f64::from(weight)));
        Self {
            text: text.into(),
            weight,
            tags: parse_tags(tags),
        }
    }

    /// Builds an entry from raw form input, the way the entry table hands it over.
    pub fn from_input(text: &str, weight: &str, tags: &str) -> Self {
        Self {
            text: text.to_string(),
            weight: coerce_weight(parse_weight(weight)),
            tags: parse_tags(tags),
        }
    }

    /// Always at least 1.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Sets the weight, coercing 0 to 1.
    pub fn set_weight(&mut self, weight: u32) {
        self.weight = coerce_weight(weight_from_f64(f64::from(weight)));
    }

    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}

fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

/// Parses a user-supplied weight. Anything that is not a number of at least
/// 1 is rejected; fractional weights are truncated.
pub fn parse_weight(raw: &str) -> WheelResult<u32> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) => weight_from_f64(value).map_err(|_| WheelError::InvalidWeight(trimmed.to_string())),
        Err(_) => Err(WheelError::InvalidWeight(trimmed.to_string())),
    }
}

fn weight_from_f64(value: f64) -> WheelResult<u32> {
    if !value.is_finite() || value < 1.0 {
        return Err(WheelError::InvalidWeight(value.to_string()));
    }
    Ok(value.floor().min(f64::from(u32::MAX)) as u32)
}

/// Every entry must contribute positive measure to the wheel, so invalid
/// weights fall back to 1 instead of failing.
pub fn coerce_weight(parsed: WheelResult<u32>) -> u32 {
    match parsed {
        Ok(weight) => weight,
        Err(err) => {
            log::warn!("{}, using weight {}", err, DEFAULT_WEIGHT);
            DEFAULT_WEIGHT
        }
    }
}

/// Splits a comma-separated tag string into trimmed, non-empty, unique tags,
/// keeping first-seen order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

fn normalize_tags<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

pub(crate) fn deserialize_weight<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawWeight::deserialize(deserializer)? {
        RawWeight::Int(value) => weight_from_f64(value as f64),
        RawWeight::Float(value) => weight_from_f64(value),
        RawWeight::Text(value) => parse_weight(&value),
        RawWeight::Other(value) => Err(WheelError::InvalidWeight(value.to_string())),
    };
    Ok(coerce_weight(parsed))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Other(serde_json::Value),
}

impl RawText {
    /// Scalars become their display text; anything else is unusable.
    fn into_text(self) -> Option<String> {
        match self {
            RawText::Text(text) => Some(text),
            RawText::Number(number) => Some(number.to_string()),
            RawText::Flag(flag) => Some(flag.to_string()),
            RawText::Other(serde_json::Value::Null) => None,
            RawText::Other(value) => {
                log::warn!("ignoring unreadable entry field {}", value);
                None
            }
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawText::deserialize(deserializer)?.into_text().unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    List(Vec<RawText>),
    Single(RawText),
}

fn serialize_tags<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tags.join(", "))
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawTags::deserialize(deserializer)? {
        RawTags::Single(raw) => raw.into_text().map(|raw| parse_tags(&raw)).unwrap_or_default(),
        RawTags::List(list) => {
            let names: Vec<String> = list.into_iter().filter_map(RawText::into_text).collect();
            normalize_tags(names.iter().map(String::as_str))
        }
    })
}

/// Entry count and total weight across the whole store, active or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntrySummary {
    pub entries: usize,
    pub total_weight: u64,
}

/// The raw, ordered entry list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Appends an entry and returns its index.
    pub fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Inserts at `index`, shifting later entries down. `index == len` appends.
    pub fn insert(&mut self, index: usize, entry: Entry) -> WheelResult<()> {
        if index > self.entries.len() {
            return Err(self.out_of_range(index));
        }
        self.entries.insert(index, entry);
        Ok(())
    }

    /// Replaces the entry at `index`, returning the previous value.
    pub fn update(&mut self, index: usize, entry: Entry) -> WheelResult<Entry> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(WheelError::EntryOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, entry))
    }

    pub fn remove(&mut self, index: usize) -> WheelResult<Entry> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.entries.remove(index))
    }

    /// Moves the entry at `from` so that it ends up at position `to`.
    pub fn move_entry(&mut self, from: usize, to: usize) -> WheelResult<()> {
        let len = self.entries.len();
        if from >= len {
            return Err(self.out_of_range(from));
        }
        if to >= len {
            return Err(self.out_of_range(to));
        }
        if from != to {
            let moved = self.entries.remove(from);
            self.entries.insert(to, moved);
        }
        Ok(())
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            entries: self.entries.len(),
            total_weight: self.entries.iter().map(|e| u64::from(e.weight())).sum(),
        }
    }

    /// Every tag used by at least one entry, in first-seen order.
    pub fn tag_universe(&self) -> Vec<String> {
        normalize_tags(self.entries.iter().flat_map(|e| e.tags.iter().map(String::as_str)))
    }

    fn out_of_range(&self, index: usize) -> WheelError {
        WheelError::EntryOutOfRange {
            index,
            len: self.entries.len(),
        }
    }
}
