use serde::{Deserialize, Deserializer, Serialize};

/// Sector colouring schemes offered in the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Classic,
    Cool,
    Dark,
    Warm,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::Classic,
        ColorScheme::Cool,
        ColorScheme::Dark,
        ColorScheme::Warm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Cool => "cool",
            Self::Dark => "dark",
            Self::Warm => "warm",
        }
    }

    /// Unknown names fall back to the classic scheme.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name() == name)
            .unwrap_or_default()
    }

    /// CSS colour for sector `index` out of `count` sectors.
    pub fn color(&self, index: usize, count: usize) -> String {
        let step = index as f64 / count.max(1) as f64;
        match self {
            Self::Classic => format!("hsl({},70%,55%)", step * 360.0),
            Self::Cool => format!("hsl({},70%,55%)", 200.0 + step * 40.0),
            Self::Dark => format!("hsl(220,15%,{}%)", 35.0 + step * 15.0),
            Self::Warm => format!("hsl({},75%,55%)", 20.0 + step * 40.0),
        }
    }
}

pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<ColorScheme, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.as_deref().map(ColorScheme::from_name).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_follow_scheme() {
        assert_eq!(ColorScheme::Classic.color(0, 4), "hsl(0,70%,55%)");
        assert_eq!(ColorScheme::Classic.color(1, 4), "hsl(90,70%,55%)");
        assert_eq!(ColorScheme::Cool.color(2, 4), "hsl(220,70%,55%)");
        assert_eq!(ColorScheme::Dark.color(0, 3), "hsl(220,15%,35%)");
        assert_eq!(ColorScheme::Warm.color(0, 0), "hsl(20,75%,55%)");
    }

    #[test]
    fn test_unknown_scheme_is_classic() {
        assert_eq!(ColorScheme::from_name("warm"), ColorScheme::Warm);
        assert_eq!(ColorScheme::from_name("neon"), ColorScheme::Classic);
    }
}
