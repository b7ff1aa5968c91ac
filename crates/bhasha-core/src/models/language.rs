use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A spoken language the engine can report, independent of regional variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "or")]
    Odia,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// All supported languages in declaration order.
    pub const ALL: [Language; 11] = [
        Language::Hindi,
        Language::Bengali,
        Language::Telugu,
        Language::Tamil,
        Language::Marathi,
        Language::Gujarati,
        Language::Kannada,
        Language::Malayalam,
        Language::Punjabi,
        Language::Odia,
        Language::English,
    ];

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Hindi => "hi",
            Self::Bengali => "bn",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::Marathi => "mr",
            Self::Gujarati => "gu",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Punjabi => "pa",
            Self::Odia => "or",
            Self::English => "en",
        }
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::Bengali => "Bengali",
            Self::Telugu => "Telugu",
            Self::Tamil => "Tamil",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Punjabi",
            Self::Odia => "Odia",
            Self::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.code() == lower || l.name().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| format!("unknown language: {s}"))
    }
}
