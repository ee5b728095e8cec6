//! Validation utilities and regex patterns

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Lowercase language code: a 2-8 letter primary subtag followed by
/// optional hyphenated subtags (e.g. `en`, `en-us`, `zh-hant-tw`).
pub static LANGUAGE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,8}(-[a-z0-9]{1,8})*$").expect("Invalid language code regex pattern")
});

/// Validate a parameter name listed as globally available
pub fn validate_param_names(names: &[String]) -> Result<(), ValidationError> {
    for name in names {
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$');
        if !valid_start || !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
            return Err(ValidationError::new("invalid_parameter_name"));
        }
    }
    Ok(())
}

/// Validate directory path (basic check for valid path characters)
pub fn validate_directory(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_directory"));
    }

    // Colon is allowed for Windows drive letters (C:\)
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_directory_characters"));
    }

    Ok(())
}

/// Normalize a raw language code the way the repository stores it.
pub fn normalize_language_code(raw: &str) -> String {
    raw.trim().replace('_', "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_regex() {
        assert!(LANGUAGE_CODE_REGEX.is_match("en"));
        assert!(LANGUAGE_CODE_REGEX.is_match("en-us"));
        assert!(LANGUAGE_CODE_REGEX.is_match("zh-hant-tw"));
        assert!(LANGUAGE_CODE_REGEX.is_match("es-419"));

        assert!(!LANGUAGE_CODE_REGEX.is_match("EN")); // Uppercase
        assert!(!LANGUAGE_CODE_REGEX.is_match("e")); // Too short
        assert!(!LANGUAGE_CODE_REGEX.is_match("en_us")); // Underscore
        assert!(!LANGUAGE_CODE_REGEX.is_match("en-")); // Dangling hyphen
        assert!(!LANGUAGE_CODE_REGEX.is_match("")); // Empty
    }

    #[test]
    fn test_validate_param_names() {
        assert!(validate_param_names(&[]).is_ok());
        assert!(validate_param_names(&["pluralize".to_string(), "from".to_string()]).is_ok());
        assert!(validate_param_names(&["_private".to_string(), "$helper".to_string()]).is_ok());

        assert!(validate_param_names(&["".to_string()]).is_err());
        assert!(validate_param_names(&["1st".to_string()]).is_err());
        assert!(validate_param_names(&["user.name".to_string()]).is_err());
    }

    #[test]
    fn test_validate_directory() {
        assert!(validate_directory("locales").is_ok());
        assert!(validate_directory("/srv/bot/locales").is_ok());
        assert!(validate_directory("C:\\bot\\locales").is_ok());

        assert!(validate_directory("").is_err());
        assert!(validate_directory("locales?").is_err());
        assert!(validate_directory("<locales>").is_err());
    }

    #[test]
    fn test_normalize_language_code() {
        assert_eq!(normalize_language_code("EN"), "en");
        assert_eq!(normalize_language_code(" en_US "), "en-us");
        assert_eq!(normalize_language_code("pt-BR"), "pt-br");
    }
}
