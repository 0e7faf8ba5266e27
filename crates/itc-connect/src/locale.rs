//! Conversion between iTunes Connect language names and locale codes
//!
//! The portal labels languages with its own names ("Brazilian Portuguese",
//! "English_CA"); everything else uses locale codes ("pt-BR", "en-CA").

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const BUNDLED_MAPPING: &str = include_str!("assets/language_mapping.json");

static BUNDLED: LazyLock<LanguageConverter> = LazyLock::new(|| {
    LanguageConverter::from_json(BUNDLED_MAPPING).expect("Invalid bundled language mapping")
});

/// One row of the language table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageMapping {
    /// iTunes Connect name
    pub name: String,
    /// Standard locale code
    pub locale: String,
    /// Other locale codes accepted for the reverse lookup
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// Lookup table between iTunes Connect names and locale codes
#[derive(Debug, Clone)]
pub struct LanguageConverter {
    mapping: Vec<LanguageMapping>,
}

impl LanguageConverter {
    /// The table bundled with this crate, parsed on first use
    pub fn bundled() -> &'static LanguageConverter {
        &BUNDLED
    }

    /// Build a converter from a JSON array of mappings
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping = serde_json::from_str(json)?;
        Ok(Self { mapping })
    }

    /// iTunes Connect name to locale code (`"English_CA"` -> `"en-CA"`)
    pub fn to_standard_locale(&self, itc_name: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|m| m.name == itc_name)
            .map(|m| m.locale.as_str())
    }

    /// Locale code to iTunes Connect name (`"de-DE"` or `"de"` -> `"German"`)
    pub fn to_itc_name(&self, locale: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|m| m.locale == locale || m.alternatives.iter().any(|a| a == locale))
            .map(|m| m.name.as_str())
    }

    /// All rows, in table order
    pub fn mappings(&self) -> &[LanguageMapping] {
        &self.mapping
    }
}

/// Locale conversions on string slices, using the bundled table
pub trait LocaleExt {
    /// Treat `self` as an iTunes Connect name and return its locale code
    fn to_language_code(&self) -> Option<&'static str>;

    /// Treat `self` as a locale code and return its iTunes Connect name
    fn to_full_language(&self) -> Option<&'static str>;
}

impl LocaleExt for str {
    fn to_language_code(&self) -> Option<&'static str> {
        LanguageConverter::bundled().to_standard_locale(self)
    }

    fn to_full_language(&self) -> Option<&'static str> {
        LanguageConverter::bundled().to_itc_name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itc_name_to_locale() {
        let converter = LanguageConverter::bundled();
        assert_eq!(converter.to_standard_locale("Brazilian Portuguese"), Some("pt-BR"));
        assert_eq!(converter.to_standard_locale("English_CA"), Some("en-CA"));
        assert_eq!(converter.to_standard_locale("Klingon"), None);
    }

    #[test]
    fn test_locale_to_itc_name_with_alternatives() {
        let converter = LanguageConverter::bundled();
        assert_eq!(converter.to_itc_name("de-DE"), Some("German"));
        assert_eq!(converter.to_itc_name("de"), Some("German"));
        assert_eq!(converter.to_itc_name("zh-CN"), Some("Simplified Chinese"));
        assert_eq!(converter.to_itc_name("xx-XX"), None);
    }

    #[test]
    fn test_round_trip_for_every_bundled_name() {
        let converter = LanguageConverter::bundled();
        for row in converter.mappings() {
            let locale = converter.to_standard_locale(&row.name).unwrap();
            assert_eq!(converter.to_itc_name(locale), Some(row.name.as_str()));
        }
    }

    #[test]
    fn test_str_extension() {
        assert_eq!("Japanese".to_language_code(), Some("ja"));
        assert_eq!("fr".to_full_language(), Some("French"));
        assert_eq!("nope".to_full_language(), None);
    }

    #[test]
    fn test_custom_table_missing_alternatives() {
        let converter =
            LanguageConverter::from_json(r#"[{"name": "Esperanto", "locale": "eo"}]"#).unwrap();
        assert_eq!(converter.to_itc_name("eo"), Some("Esperanto"));
        assert!(converter.mappings()[0].alternatives.is_empty());
    }

    #[test]
    fn test_invalid_table() {
        assert!(LanguageConverter::from_json("{}").is_err());
    }
}
