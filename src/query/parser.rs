//! Query DSL parser
//!
//! Reads wire-format clauses back into builders.
//! The syntax is compatible with a subset of Elasticsearch Query DSL.

use crate::error::DslError;
use crate::query::nodes::TermsQuery;
use crate::query::types::SharedOptions;
use crate::query::validate::json_type_name;
use crate::Result;
use serde_json::{Map, Value};
use tracing::debug;

/// Query parser for JSON DSL
pub struct QueryParser;

impl QueryParser {
    /// Parse a terms clause
    ///
    /// Accepts the wrapped form `{ "terms": { ... } }` or just the body.
    ///
    /// An object holding only a `terms` key whose value is an object is read
    /// as the wrapped form. Any other lone `terms` value, such as
    /// `{ "terms": ["a"] }`, is the body of a clause on a field named `terms`.
    /// A lookup on a field named `terms` must therefore be passed wrapped.
    ///
    /// # Example
    ///
    /// ```json
    /// {
    ///   "terms": {
    ///     "boost": 1.5,
    ///     "tags": ["rust", "programming"]
    ///   }
    /// }
    /// ```
    pub fn parse_terms(json: &Value) -> Result<TermsQuery> {
        let map = json.as_object().ok_or_else(|| {
            DslError::InvalidRequest("terms query must be an object".to_string())
        })?;

        match map.get("terms") {
            Some(Value::Object(body)) if map.len() == 1 => Self::parse_terms_object(body),
            _ => Self::parse_terms_object(map),
        }
    }

    /// Parse a JSON string into a terms clause
    pub fn parse_str(json_str: &str) -> Result<TermsQuery> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| DslError::InvalidRequest(format!("Invalid JSON: {}", e)))?;
        Self::parse_terms(&value)
    }

    fn parse_terms_object(map: &Map<String, Value>) -> Result<TermsQuery> {
        // Terms query has the form: { "field": [...] } or { "field": { "index": ..., ... } }
        let mut fields = map
            .iter()
            .filter(|(k, _)| !SharedOptions::KEYS.contains(&k.as_str()));

        let (field, terms_spec) = fields.next().ok_or_else(|| {
            DslError::InvalidRequest("terms query must specify a field".to_string())
        })?;
        if let Some((extra, _)) = fields.next() {
            debug!(field = %field, extra = %extra, "Rejected terms query with several fields");
            return Err(DslError::InvalidRequest(format!(
                "terms query must specify a single field, got '{}' and '{}'",
                field, extra
            )));
        }

        let mut query = TermsQuery::for_field(field.clone());
        match terms_spec {
            Value::Array(_) => {
                query.values_from_json(terms_spec)?;
            }
            Value::Object(_) => {
                query.terms_lookup_from_json(terms_spec)?;
            }
            other => {
                debug!(field = %field, "Rejected terms query payload");
                return Err(DslError::InvalidArgumentType {
                    expected: "array or object",
                    actual: json_type_name(other),
                });
            }
        }

        if let Some(boost) = map.get("boost") {
            let boost = boost.as_f64().ok_or_else(|| {
                DslError::InvalidRequest("boost must be a number".to_string())
            })?;
            query = query.with_boost(boost);
        }

        if let Some(name) = map.get("_name") {
            let name = name.as_str().ok_or_else(|| {
                DslError::InvalidRequest("_name must be a string".to_string())
            })?;
            query = query.with_name(name);
        }

        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ast::QueryClause;
    use crate::query::types::TermValue;
    use serde_json::json;

    #[test]
    fn test_parse_terms() {
        let json = r#"{ "terms": { "tags": ["rust", "programming", "tutorial"] } }"#;
        let query = QueryParser::parse_str(json).unwrap();
        assert_eq!(query.query_type(), "terms");
        assert_eq!(query.field_name(), Some("tags"));
        assert_eq!(query.term_values().len(), 3);
    }

    #[test]
    fn test_parse_terms_body_only() {
        let query = QueryParser::parse_terms(&json!({ "year": [2023, 2024] })).unwrap();
        assert_eq!(
            query.term_values(),
            &[TermValue::Long(2023), TermValue::Long(2024)]
        );
    }

    #[test]
    fn test_parse_terms_with_shared_options() {
        let json = r#"{ "terms": { "boost": 1.5, "_name": "tagged", "tags": ["rust"] } }"#;
        let query = QueryParser::parse_str(json).unwrap();
        assert_eq!(query.shared_options().boost, Some(1.5));
        assert_eq!(query.shared_options().name.as_deref(), Some("tagged"));
    }

    #[test]
    fn test_parse_terms_lookup() {
        let json = r#"{
            "terms": {
                "user": { "index": "users", "id": "2", "path": "followers" }
            }
        }"#;
        let query = QueryParser::parse_str(json).unwrap();
        assert!(query.is_lookup());
        assert_eq!(
            query.render(),
            json!({ "terms": { "user": { "index": "users", "id": "2", "path": "followers" } } })
        );
    }

    #[test]
    fn test_parse_field_named_terms() {
        // A lone "terms" key holding an array is a field, not the wrapper
        let query = QueryParser::parse_terms(&json!({ "terms": ["a", "b"] })).unwrap();
        assert_eq!(query.field_name(), Some("terms"));
        assert_eq!(query.term_values().len(), 2);

        let query = QueryParser::parse_terms(&json!({ "terms": ["a"], "boost": 2.0 })).unwrap();
        assert_eq!(query.field_name(), Some("terms"));

        // The body of a rendered clause on that field parses back
        let rendered = TermsQuery::for_field("terms").value("a").render();
        let query = QueryParser::parse_terms(&rendered["terms"]).unwrap();
        assert_eq!(query.render(), rendered);

        let err = QueryParser::parse_terms(&json!({ "terms": "a" })).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_parse_boost_keeps_decimal() {
        let query = QueryParser::parse_terms(&json!({ "terms": { "tags": [], "boost": 1.1 } }))
            .unwrap();
        assert_eq!(query.shared_options().boost, Some(1.1));
        assert_eq!(query.render()["terms"]["boost"], json!(1.1));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = QueryParser::parse_str("not valid json");
        assert!(matches!(result, Err(DslError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_missing_field() {
        let result = QueryParser::parse_terms(&json!({ "terms": { "boost": 1.0 } }));
        assert!(matches!(result, Err(DslError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_several_fields() {
        let result = QueryParser::parse_terms(&json!({ "terms": { "a": ["x"], "b": ["y"] } }));
        assert!(matches!(result, Err(DslError::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_scalar_payload() {
        let err = QueryParser::parse_terms(&json!({ "terms": { "tags": "rust" } })).unwrap_err();
        assert!(err.is_type_error());
    }

    #[test]
    fn test_parse_bad_values() {
        let err = QueryParser::parse_terms(&json!({ "terms": { "tags": [null] } })).unwrap_err();
        assert!(err.is_type_error());

        let err = QueryParser::parse_terms(&json!({ "terms": { "tags": { "doc": "1" } } }))
            .unwrap_err();
        assert!(matches!(err, DslError::UnknownLookupKey(_)));
    }

    #[test]
    fn test_parse_bad_boost() {
        let result = QueryParser::parse_terms(&json!({ "terms": { "tags": [], "boost": "high" } }));
        assert!(matches!(result, Err(DslError::InvalidRequest(_))));
    }
}
