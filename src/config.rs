use serde::{Deserialize, Serialize};

/// Key written in place of the field name when a clause has none
pub const UNSET_FIELD_KEY: &str = "undefined";

/// How a clause without a field is rendered
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsetFieldPolicy {
    /// Use the given key in place of the field name
    Placeholder(String),
    /// Refuse to render
    Reject,
}

impl Default for UnsetFieldPolicy {
    fn default() -> Self {
        UnsetFieldPolicy::Placeholder(UNSET_FIELD_KEY.to_string())
    }
}

/// Rendering configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub unset_field: UnsetFieldPolicy,
}

impl RenderSettings {
    /// Settings that require every clause to have a field
    pub fn strict() -> Self {
        Self {
            unset_field: UnsetFieldPolicy::Reject,
        }
    }

    /// Settings that render a missing field under `key`
    pub fn with_placeholder(key: impl Into<String>) -> Self {
        Self {
            unset_field: UnsetFieldPolicy::Placeholder(key.into()),
        }
    }

    /// Resolve the key a clause is rendered under
    ///
    /// Returns `None` when the field is unset and the policy rejects it.
    pub fn field_key<'a>(&'a self, field: Option<&'a str>) -> Option<&'a str> {
        match (field, &self.unset_field) {
            (Some(field), _) => Some(field),
            (None, UnsetFieldPolicy::Placeholder(key)) => Some(key.as_str()),
            (None, UnsetFieldPolicy::Reject) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RenderSettings::default();
        assert_eq!(
            settings.unset_field,
            UnsetFieldPolicy::Placeholder("undefined".to_string())
        );
        assert_eq!(settings.field_key(None), Some("undefined"));
        assert_eq!(settings.field_key(Some("color")), Some("color"));
    }

    #[test]
    fn test_strict_settings() {
        let settings = RenderSettings::strict();
        assert_eq!(settings.field_key(None), None);
        assert_eq!(settings.field_key(Some("")), Some(""));
    }

    #[test]
    fn test_custom_placeholder() {
        let settings = RenderSettings::with_placeholder("_unset");
        assert_eq!(settings.field_key(None), Some("_unset"));
    }

    #[test]
    fn test_settings_from_json() {
        let settings: RenderSettings =
            serde_json::from_str(r#"{ "unset_field": "reject" }"#).unwrap();
        assert_eq!(settings, RenderSettings::strict());

        let settings: RenderSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }
}
