use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bucket shared by user state and catalog entries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Sad,
    Healing,
    Empowering,
    Happy,
}

impl Default for MoodCategory {
    fn default() -> Self {
        Self::Healing
    }
}

impl MoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sad => "sad",
            Self::Healing => "healing",
            Self::Empowering => "empowering",
            Self::Happy => "happy",
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sad" => Ok(Self::Sad),
            "healing" => Ok(Self::Healing),
            "empowering" => Ok(Self::Empowering),
            "happy" => Ok(Self::Happy),
            other => Err(format!(
                "Unknown mood category '{}'; expected sad, healing, empowering or happy",
                other
            )),
        }
    }
}

/// Catalog song.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RecommendationItem {
    pub id: &'static str,
    pub title: &'static str,
    pub artist: &'static str,
    pub genre: &'static str,
    pub mood_category: MoodCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_category_parse_roundtrip() {
        for cat in [
            MoodCategory::Sad,
            MoodCategory::Healing,
            MoodCategory::Empowering,
            MoodCategory::Happy,
        ] {
            assert_eq!(cat.as_str().parse::<MoodCategory>().unwrap(), cat);
        }
    }

    #[test]
    fn test_mood_category_parse_unknown() {
        let err = "angry".parse::<MoodCategory>().unwrap_err();
        assert!(err.contains("angry"));
    }

    #[test]
    fn test_mood_category_serde_lowercase() {
        let json = serde_json::to_string(&MoodCategory::Empowering).unwrap();
        assert_eq!(json, "\"empowering\"");
        let cat: MoodCategory = serde_json::from_str("\"sad\"").unwrap();
        assert_eq!(cat, MoodCategory::Sad);
    }
}
