//! Locale tags
//!
//! A locale identifies a language plus an optional region variant. Tags
//! normalize on construction (language lowercased, region uppercased), so
//! `en-us`, `en_US` and `en-US` all compare equal.

use crate::{LangError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language/region locale tag.
///
/// # Examples
///
/// ```
/// use hearth_lang::Locale;
/// use std::str::FromStr;
///
/// let en = Locale::new("en", None::<&str>);
/// let en_us = Locale::from_str("en-US").unwrap();
/// assert!(en.same_language(&en_us));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language code (ISO 639-1, e.g. "en", "fr", "de")
    pub language: String,
    /// Optional region code (ISO 3166-1, e.g. "US", "GB")
    pub region: Option<String>,
}

impl Locale {
    /// Create a new locale, normalizing case.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
        }
    }

    /// Parse from a tag such as `en`, `en-US` or `en_US`.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.split(['-', '_']);
        let language = parts.next().unwrap_or_default().to_lowercase();

        if language.len() < 2
            || language.len() > 3
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(LangError::InvalidLocale(tag.to_string()));
        }

        let mut region = None;
        for part in parts {
            if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                // UN M.49 numeric region
                region = Some(part.to_string());
            }
        }

        Ok(Self { language, region })
    }

    /// The canonical tag (e.g. "en-US").
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// This locale with the region stripped.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }

    /// Whether two tags share a language code.
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language
    }

    /// English (no region), the registry default.
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = LangError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_language_only() {
        let en = Locale::parse("en").unwrap();
        assert_eq!(en.language, "en");
        assert!(en.region.is_none());
    }

    #[test]
    fn parse_normalizes_case_and_separator() {
        let a = Locale::parse("en-us").unwrap();
        let b = Locale::parse("EN_US").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.tag(), "en-US");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("x").is_err());
        assert!(Locale::parse("123").is_err());
        assert!(Locale::parse("toolong").is_err());
    }

    #[test]
    fn numeric_region_is_accepted() {
        let es = Locale::parse("es-419").unwrap();
        assert_eq!(es.region.as_deref(), Some("419"));
        assert_eq!(es.tag(), "es-419");
    }

    #[test]
    fn same_language_ignores_region() {
        let en_us = Locale::parse("en-US").unwrap();
        let en_gb = Locale::parse("en-GB").unwrap();
        let fr = Locale::parse("fr").unwrap();
        assert!(en_us.same_language(&en_gb));
        assert!(!en_us.same_language(&fr));
        assert_eq!(en_us.language_only(), Locale::en());
    }
}
