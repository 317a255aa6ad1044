use serde::{Deserialize, Serialize};

use crate::palette::{self, ColorScheme};
use crate::spin::{SpinConfig, DEFAULT_SPIN_DURATION_SECS, DEFAULT_SPIN_STRENGTH};

/// User-facing wheel settings.
///
/// Every field has a default so a partial settings object merges over the
/// defaults. Keys this crate does not understand (the sound selectors, for
/// instance) are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelSettings {
    pub spin_strength: u32,
    /// Seconds.
    pub spin_duration: f64,
    #[serde(deserialize_with = "palette::deserialize_lenient")]
    pub color_scheme: ColorScheme,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            spin_strength: DEFAULT_SPIN_STRENGTH,
            spin_duration: DEFAULT_SPIN_DURATION_SECS,
            color_scheme: ColorScheme::default(),
            extra: serde_json::Map::new(),
        }
    }
}

impl WheelSettings {
    pub fn spin_config(&self) -> SpinConfig {
        SpinConfig::new(self.spin_strength, self.spin_duration)
    }
}
