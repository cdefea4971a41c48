//! Terms query - matches documents containing any of the specified terms

use crate::error::DslError;
use crate::query::ast::QueryClause;
use crate::query::types::{LookupKey, SharedOptions, TermValue, TermsLookup, TermsSeed};
use crate::query::validate::{check_type, json_type_name, ExpectedShape};
use crate::Result;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

/// Builder for a `terms` clause
///
/// The clause either lists literal values for a field, or (in lookup mode)
/// points at a document whose field holds the values. Once any lookup option
/// is set the clause stays in lookup mode and the literal values, though kept,
/// are no longer rendered.
///
/// # Example
///
/// ```
/// use squidex_dsl::{QueryClause, TermsQuery};
/// use serde_json::json;
///
/// let query = TermsQuery::seeded("color", ["red", "green"]);
/// assert_eq!(query.render(), json!({ "terms": { "color": ["red", "green"] } }));
///
/// let lookup = TermsQuery::for_field("color").index("catalog").path("colors");
/// assert_eq!(
///     lookup.render(),
///     json!({ "terms": { "color": { "index": "catalog", "path": "colors" } } })
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermsQuery {
    field: Option<String>,
    values: Vec<TermValue>,
    lookup: Option<TermsLookup>,
    shared: SharedOptions,
}

impl TermsQuery {
    /// Create an empty terms query with no field
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a terms query targeting `field`
    pub fn for_field(field: impl Into<String>) -> Self {
        Self::new().field(field)
    }

    /// Create a terms query with initial values
    ///
    /// A sequence seed is appended like `values()`, a scalar like `value()`.
    pub fn seeded(field: impl Into<String>, seed: impl Into<TermsSeed>) -> Self {
        let query = Self::for_field(field);
        match seed.into() {
            TermsSeed::One(value) => query.value(value),
            TermsSeed::Many(values) => query.values(values),
        }
    }

    /// Set the target field, replacing any previous one
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.field = Some(name.into());
        self
    }

    /// Append one value
    ///
    /// A NaN or infinite `f64` is stored as given but renders as `null`,
    /// which the parser does not accept back.
    pub fn value(mut self, item: impl Into<TermValue>) -> Self {
        self.values.push(item.into());
        self
    }

    /// Append every value of `items`, keeping their order
    pub fn values<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TermValue>,
    {
        self.values.extend(items.into_iter().map(Into::into));
        self
    }

    /// Switch to lookup mode and merge `lookup` into the current options
    pub fn terms_lookup(mut self, lookup: TermsLookup) -> Self {
        self.lookup_mut().merge(lookup);
        self
    }

    /// Set the index holding the lookup document
    pub fn index(self, index: impl Into<String>) -> Self {
        self.with_lookup_key(LookupKey::Index, index)
    }

    /// Set the mapping type of the lookup document
    pub fn doc_type(self, doc_type: impl Into<String>) -> Self {
        self.with_lookup_key(LookupKey::Type, doc_type)
    }

    /// Set the id of the lookup document
    pub fn id(self, id: impl Into<String>) -> Self {
        self.with_lookup_key(LookupKey::Id, id)
    }

    /// Set the path of the field holding the terms
    pub fn path(self, path: impl Into<String>) -> Self {
        self.with_lookup_key(LookupKey::Path, path)
    }

    /// Set the routing used to fetch the lookup document
    pub fn routing(self, routing: impl Into<String>) -> Self {
        self.with_lookup_key(LookupKey::Routing, routing)
    }

    /// Set the boost factor
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.shared.boost = Some(boost);
        self
    }

    /// Set the name reported in `matched_queries`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.shared.name = Some(name.into());
        self
    }

    fn with_lookup_key(mut self, key: LookupKey, value: impl Into<String>) -> Self {
        self.lookup_mut().set(key, value);
        self
    }

    fn lookup_mut(&mut self) -> &mut TermsLookup {
        self.lookup.get_or_insert_with(TermsLookup::default)
    }

    /// Append values from a JSON array
    ///
    /// Fails with `InvalidArgumentType` if `items` is not an array or holds
    /// anything other than strings and numbers. Nothing is appended on failure.
    pub fn values_from_json(&mut self, items: &Value) -> Result<&mut Self> {
        check_type(items, ExpectedShape::Array).inspect_err(|e| {
            debug!(error = %e, "Rejected terms values");
        })?;

        let parsed = items
            .as_array()
            .into_iter()
            .flatten()
            .map(|item| {
                TermValue::from_json(item).ok_or_else(|| DslError::InvalidArgumentType {
                    expected: "string or number",
                    actual: json_type_name(item),
                })
            })
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| {
                debug!(error = %e, "Rejected terms value");
            })?;

        self.values.extend(parsed);
        Ok(self)
    }

    /// Merge lookup options from a JSON object and switch to lookup mode
    ///
    /// Fails with `InvalidArgumentType` if `opts` is not an object or a value
    /// is not a string or number, and with `UnknownLookupKey` for a key outside
    /// `index`, `type`, `id`, `path` and `routing`. Numbers are stored in their
    /// decimal form. On failure lookup mode and options are left untouched.
    pub fn terms_lookup_from_json(&mut self, opts: &Value) -> Result<&mut Self> {
        check_type(opts, ExpectedShape::Object).inspect_err(|e| {
            debug!(error = %e, "Rejected terms lookup");
        })?;

        let mut incoming = TermsLookup::default();
        for (name, value) in opts.as_object().into_iter().flatten() {
            let key = LookupKey::from_name(name).ok_or_else(|| {
                debug!(key = %name, "Rejected terms lookup key");
                DslError::UnknownLookupKey(name.clone())
            })?;
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => {
                    debug!(key = %name, "Rejected terms lookup value");
                    return Err(DslError::InvalidArgumentType {
                        expected: "string",
                        actual: json_type_name(other),
                    });
                }
            };
            incoming.set(key, value);
        }

        self.lookup_mut().merge(incoming);
        Ok(self)
    }

    /// Whether every literal value can be written to JSON as-is
    pub fn has_finite_values(&self) -> bool {
        self.values.iter().all(TermValue::is_finite)
    }

    /// Get the accumulated literal values
    pub fn term_values(&self) -> &[TermValue] {
        &self.values
    }

    /// Whether the clause renders lookup options instead of values
    pub fn is_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    /// Get the lookup options, if in lookup mode
    pub fn lookup(&self) -> Option<&TermsLookup> {
        self.lookup.as_ref()
    }

    /// Render and serialize to a JSON string
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.render())?)
    }
}

impl QueryClause for TermsQuery {
    fn query_type(&self) -> &'static str {
        "terms"
    }

    fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }

    fn shared_options(&self) -> &SharedOptions {
        &self.shared
    }

    fn payload(&self) -> Value {
        trace!(
            field = ?self.field,
            lookup = self.is_lookup(),
            values = self.values.len(),
            "Rendering terms clause"
        );
        match self.lookup {
            Some(ref lookup) => lookup.to_json(),
            None => Value::Array(self.values.iter().map(TermValue::to_json).collect()),
        }
    }

    fn clone_box(&self) -> Box<dyn QueryClause> {
        Box::new(self.clone())
    }
}

impl Serialize for TermsQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.render().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TermsQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        crate::query::parser::QueryParser::parse_terms(&value).map_err(serde::de::Error::custom)
    }
}
