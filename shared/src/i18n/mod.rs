//! TOML-backed message catalog
//!
//! Messages are keyed by dotted names (`registration.mail.subject`) and hold
//! one text per language. Positional arguments are written as `{0}`, `{1}`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::types::Language;

const DEFAULT_CATALOG: &str = include_str!("../../i18n/messages.toml");

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read message catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid message catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct LocalizedText {
    en: String,
    #[serde(default)]
    pl: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    messages: HashMap<String, LocalizedText>,
}

/// Localized message lookup
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<String, LocalizedText>,
}

impl MessageCatalog {
    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Ok(Self {
            messages: file.messages,
        })
    }

    /// The catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    /// Load a catalog, preferring `path` when given and present.
    ///
    /// Keys missing from the file are filled in from the embedded catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let mut catalog = Self::embedded()?;
        if let Some(path) = path.filter(|p| p.exists()) {
            let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let overrides = Self::from_toml_str(&content)?;
            tracing::info!(
                path = %path.display(),
                keys = overrides.messages.len(),
                event = "message_catalog_loaded",
                "Loaded message catalog overrides"
            );
            catalog.messages.extend(overrides.messages);
        }
        Ok(catalog)
    }

    /// Raw text for `key`, falling back to English when no translation exists
    pub fn get(&self, key: &str, lang: Language) -> Option<&str> {
        let text = self.messages.get(key)?;
        let localized = match lang {
            Language::English => None,
            Language::Polish => text.pl.as_deref(),
        };
        Some(localized.unwrap_or(&text.en))
    }

    /// Text for `key` with positional arguments substituted
    pub fn format(&self, key: &str, args: &[&str], lang: Language) -> Option<String> {
        self.get(key, lang).map(|template| format_message(template, args))
    }

    /// Whether the catalog defines `key`
    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }
}

/// Replace `{0}`, `{1}`, ... with the given arguments
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (index, value) in args.iter().enumerate() {
        let placeholder = format!("{{{}}}", index);
        result = result.replace(&placeholder, value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = MessageCatalog::embedded().unwrap();
        assert_eq!(catalog.get("token.valid.time", Language::English), Some("15"));
        assert!(catalog.contains("email.app.name"));
        assert!(catalog.contains("registration.mail.subject"));
        assert!(catalog.contains("donation.subject"));
    }

    #[test]
    fn test_polish_falls_back_to_english() {
        let catalog = MessageCatalog::from_toml_str(
            r#"
            [messages]
            "greeting" = { en = "Hello", pl = "Cześć" }
            "only.english" = { en = "Only" }
            "#,
        )
        .unwrap();

        assert_eq!(catalog.get("greeting", Language::Polish), Some("Cześć"));
        assert_eq!(catalog.get("only.english", Language::Polish), Some("Only"));
        assert_eq!(catalog.get("missing", Language::English), None);
    }

    #[test]
    fn test_format_positional_arguments() {
        assert_eq!(
            format_message("valid for {0} minutes, {1}", &["15", "thanks"]),
            "valid for 15 minutes, thanks"
        );
        assert_eq!(format_message("no args", &[]), "no args");
    }

    #[test]
    fn test_load_without_path_uses_embedded() {
        let catalog = MessageCatalog::load(None).unwrap();
        assert!(catalog.contains("token.valid.time"));

        let missing = MessageCatalog::load(Some(Path::new("does/not/exist.toml"))).unwrap();
        assert!(missing.contains("token.valid.time"));
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        assert!(matches!(
            MessageCatalog::from_toml_str("messages = 3"),
            Err(CatalogError::Parse(_))
        ));
    }
}
