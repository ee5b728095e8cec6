//! Reading and writing the preferred language in a bot session

use std::collections::HashMap;

/// A session store that can hold the user's language code in a named field
pub trait LanguageSession {
    /// Stored language code, if any
    fn language_code(&self, field: &str) -> Option<String>;

    /// Store the language code
    fn set_language_code(&mut self, field: &str, code: &str);
}

impl LanguageSession for serde_json::Map<String, serde_json::Value> {
    fn language_code(&self, field: &str) -> Option<String> {
        self.get(field)
            .and_then(serde_json::Value::as_str)
            .filter(|code| !code.trim().is_empty())
            .map(str::to_string)
    }

    fn set_language_code(&mut self, field: &str, code: &str) {
        self.insert(field.to_string(), serde_json::Value::from(code));
    }
}

impl LanguageSession for HashMap<String, String> {
    fn language_code(&self, field: &str) -> Option<String> {
        self.get(field).filter(|code| !code.trim().is_empty()).cloned()
    }

    fn set_language_code(&mut self, field: &str, code: &str) {
        self.insert(field.to_string(), code.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELD: &str = "__language_code";

    #[test]
    fn test_json_session() {
        let mut session = serde_json::Map::new();
        assert_eq!(session.language_code(FIELD), None);

        session.set_language_code(FIELD, "ru");
        assert_eq!(session.language_code(FIELD).as_deref(), Some("ru"));
        assert_eq!(session.get(FIELD), Some(&json!("ru")));
    }

    #[test]
    fn test_json_session_ignores_non_strings() {
        let mut session = serde_json::Map::new();
        session.insert(FIELD.to_string(), json!(42));
        assert_eq!(session.language_code(FIELD), None);

        session.insert(FIELD.to_string(), json!(""));
        assert_eq!(session.language_code(FIELD), None);
    }

    #[test]
    fn test_hashmap_session() {
        let mut session: HashMap<String, String> = HashMap::new();
        session.set_language_code("lang", "de");
        assert_eq!(session.language_code("lang").as_deref(), Some("de"));
        assert_eq!(session.language_code(FIELD), None);
    }
}
