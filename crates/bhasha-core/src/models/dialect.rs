use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Language;

/// A language/region variant identifier.
///
/// The code is `<language>` or `<language>-<region>`; [`Dialect::language`]
/// strips the region suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    Hindi,
    HindiBhojpuri,
    HindiAwadhi,
    Bengali,
    BengaliBangladesh,
    Telugu,
    Tamil,
    TamilSriLanka,
    Marathi,
    Gujarati,
    Kannada,
    Malayalam,
    Punjabi,
    Odia,
    EnglishIndia,
}

impl Dialect {
    /// All supported dialects in declaration order.
    pub const ALL: [Dialect; 15] = [
        Dialect::Hindi,
        Dialect::HindiBhojpuri,
        Dialect::HindiAwadhi,
        Dialect::Bengali,
        Dialect::BengaliBangladesh,
        Dialect::Telugu,
        Dialect::Tamil,
        Dialect::TamilSriLanka,
        Dialect::Marathi,
        Dialect::Gujarati,
        Dialect::Kannada,
        Dialect::Malayalam,
        Dialect::Punjabi,
        Dialect::Odia,
        Dialect::EnglishIndia,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Hindi => "hi",
            Self::HindiBhojpuri => "hi-bho",
            Self::HindiAwadhi => "hi-awa",
            Self::Bengali => "bn",
            Self::BengaliBangladesh => "bn-bd",
            Self::Telugu => "te",
            Self::Tamil => "ta",
            Self::TamilSriLanka => "ta-lk",
            Self::Marathi => "mr",
            Self::Gujarati => "gu",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
            Self::Punjabi => "pa",
            Self::Odia => "or",
            Self::EnglishIndia => "en-in",
        }
    }

    /// English display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hindi => "Hindi",
            Self::HindiBhojpuri => "Bhojpuri",
            Self::HindiAwadhi => "Awadhi",
            Self::Bengali => "Bengali",
            Self::BengaliBangladesh => "Bangladeshi Bengali",
            Self::Telugu => "Telugu",
            Self::Tamil => "Tamil",
            Self::TamilSriLanka => "Sri Lankan Tamil",
            Self::Marathi => "Marathi",
            Self::Gujarati => "Gujarati",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Punjabi => "Punjabi",
            Self::Odia => "Odia",
            Self::EnglishIndia => "Indian English",
        }
    }

    /// Name in the dialect's own script, for prompts shown to its speakers.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::Hindi => "हिन्दी",
            Self::HindiBhojpuri => "भोजपुरी",
            Self::HindiAwadhi => "अवधी",
            Self::Bengali => "বাংলা",
            Self::BengaliBangladesh => "বাংলা (বাংলাদেশ)",
            Self::Telugu => "తెలుగు",
            Self::Tamil => "தமிழ்",
            Self::TamilSriLanka => "இலங்கைத் தமிழ்",
            Self::Marathi => "मराठी",
            Self::Gujarati => "ગુજરાતી",
            Self::Kannada => "ಕನ್ನಡ",
            Self::Malayalam => "മലയാളം",
            Self::Punjabi => "ਪੰਜਾਬੀ",
            Self::Odia => "ଓଡ଼ିଆ",
            Self::EnglishIndia => "Indian English",
        }
    }

    /// The language portion of this dialect.
    pub fn language(self) -> Language {
        match self {
            Self::Hindi | Self::HindiBhojpuri | Self::HindiAwadhi => Language::Hindi,
            Self::Bengali | Self::BengaliBangladesh => Language::Bengali,
            Self::Telugu => Language::Telugu,
            Self::Tamil | Self::TamilSriLanka => Language::Tamil,
            Self::Marathi => Language::Marathi,
            Self::Gujarati => Language::Gujarati,
            Self::Kannada => Language::Kannada,
            Self::Malayalam => Language::Malayalam,
            Self::Punjabi => Language::Punjabi,
            Self::Odia => Language::Odia,
            Self::EnglishIndia => Language::English,
        }
    }

    /// The standard (region-less) dialect of a language.
    pub fn standard(language: Language) -> Self {
        match language {
            Language::Hindi => Self::Hindi,
            Language::Bengali => Self::Bengali,
            Language::Telugu => Self::Telugu,
            Language::Tamil => Self::Tamil,
            Language::Marathi => Self::Marathi,
            Language::Gujarati => Self::Gujarati,
            Language::Kannada => Self::Kannada,
            Language::Malayalam => Self::Malayalam,
            Language::Punjabi => Self::Punjabi,
            Language::Odia => Self::Odia,
            Language::English => Self::EnglishIndia,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if let Some(d) = Self::ALL.iter().copied().find(|d| d.code() == normalized) {
            return Ok(d);
        }
        // "en" alone names the Indian English variant.
        normalized
            .parse::<Language>()
            .map(Self::standard)
            .map_err(|_| format!("unknown dialect: {s}"))
    }
}

impl Serialize for Dialect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_region_suffix() {
        assert_eq!(Dialect::HindiBhojpuri.language(), Language::Hindi);
        assert_eq!(Dialect::BengaliBangladesh.language(), Language::Bengali);
        assert_eq!(Dialect::EnglishIndia.language(), Language::English);
    }

    #[test]
    fn parses_codes_leniently() {
        assert_eq!("hi_bho".parse::<Dialect>().unwrap(), Dialect::HindiBhojpuri);
        assert_eq!("TA-LK".parse::<Dialect>().unwrap(), Dialect::TamilSriLanka);
        assert_eq!("en".parse::<Dialect>().unwrap(), Dialect::EnglishIndia);
        assert!("zz-yy".parse::<Dialect>().is_err());
    }

    #[test]
    fn native_names_are_in_native_script() {
        for d in Dialect::ALL {
            if d == Dialect::EnglishIndia {
                assert_eq!(d.native_name(), d.name());
            } else {
                assert!(!d.native_name().is_ascii(), "{d} has an ascii native name");
            }
        }
    }

    #[test]
    fn every_code_round_trips() {
        for d in Dialect::ALL {
            assert_eq!(d.code().parse::<Dialect>().unwrap(), d);
        }
    }
}
