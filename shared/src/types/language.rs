//! Languages of the message catalog

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Language of e-mails and error messages
///
/// English is the catalog's base language; Polish entries fall back to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "pl")]
    Polish,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Polish => "pl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Accepts plain codes and locale tags such as `pl-PL` or `en_US`
impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(|c| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" | "english" => Ok(Language::English),
            "pl" | "polish" | "polski" => Ok(Language::Polish),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}
