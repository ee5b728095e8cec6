//! Language code handling

use crate::error::{I18nError, I18nResult};
use lingo_config::validation::normalize_language_code;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A normalized language code such as `en` or `en-us`.
///
/// Codes are stored lowercase with `-` as the subtag separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and normalize a language code
    pub fn parse(raw: &str) -> I18nResult<Self> {
        let normalized = normalize_language_code(raw);
        if normalized.is_empty() {
            return Err(I18nError::InvalidLanguageCode(raw.to_string()));
        }

        normalized
            .parse::<LanguageIdentifier>()
            .map_err(|_| I18nError::InvalidLanguageCode(raw.to_string()))?;

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The portion before the first hyphen (`en-us` -> `en`)
    pub fn short(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Short form as its own code
    pub fn short_code(&self) -> Self {
        Self(self.short().to_string())
    }

    /// Whether this code has a region or script suffix
    pub fn has_subtags(&self) -> bool {
        self.0.contains('-')
    }

    /// Two codes are related if one is the short form of the other
    pub fn is_related(&self, other: &LanguageCode) -> bool {
        self == other || self.short() == other.as_str() || other.short() == self.as_str()
    }

    /// Convert to a Unicode language identifier
    pub fn to_language_identifier(&self) -> I18nResult<LanguageIdentifier> {
        self.0
            .parse()
            .map_err(|_| I18nError::InvalidLanguageCode(self.0.clone()))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageCode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(LanguageCode::parse("en-US").unwrap().as_str(), "en-us");
        assert_eq!(LanguageCode::parse(" pt_BR ").unwrap().as_str(), "pt-br");
        assert_eq!(LanguageCode::parse("ru").unwrap().as_str(), "ru");
    }

    #[test]
    fn test_short_form() {
        let code = LanguageCode::parse("en-us").unwrap();
        assert_eq!(code.short(), "en");
        assert_eq!(code.short_code(), LanguageCode::parse("en").unwrap());
        assert!(code.has_subtags());

        let plain = LanguageCode::parse("de").unwrap();
        assert_eq!(plain.short(), "de");
        assert!(!plain.has_subtags());
    }

    #[test]
    fn test_related_codes() {
        let en = LanguageCode::parse("en").unwrap();
        let en_us = LanguageCode::parse("en-us").unwrap();
        let de = LanguageCode::parse("de").unwrap();

        assert!(en.is_related(&en_us));
        assert!(en_us.is_related(&en));
        assert!(en.is_related(&en));
        assert!(!en.is_related(&de));
    }

    #[test]
    fn test_invalid_codes() {
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("   ").is_err());
        assert!(LanguageCode::parse("not a language").is_err());
        assert!(matches!(
            "???".parse::<LanguageCode>(),
            Err(I18nError::InvalidLanguageCode(_))
        ));
    }

    #[test]
    fn test_language_identifier_conversion() {
        let code = LanguageCode::parse("en-us").unwrap();
        let langid = code.to_language_identifier().unwrap();
        assert_eq!(langid.language.as_str(), "en");
    }
}
