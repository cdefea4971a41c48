//! Core types for the query DSL

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Literal value in a terms clause
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TermValue {
    /// 64-bit integer
    Long(i64),
    /// Unsigned integer above `i64::MAX`
    UnsignedLong(u64),
    /// 64-bit floating point
    ///
    /// JSON has no NaN or infinity; a non-finite value renders as `null`.
    Double(f64),
    /// String (keywords, ids)
    String(String),
}

impl TermValue {
    /// Convert a JSON scalar into a term value
    ///
    /// Returns `None` for anything other than a string or number. Integers
    /// keep their exact value up to `u64::MAX`; JSON numbers are always finite.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(TermValue::String(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(TermValue::Long)
                .or_else(|| n.as_u64().map(TermValue::UnsignedLong))
                .or_else(|| n.as_f64().map(TermValue::Double)),
            _ => None,
        }
    }

    /// Get the string value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TermValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value survives a trip through JSON unchanged
    pub fn is_finite(&self) -> bool {
        match self {
            TermValue::Double(v) => v.is_finite(),
            _ => true,
        }
    }

    /// Convert to a JSON value
    ///
    /// NaN and infinities become `null`, the same as `serde_json` does.
    pub fn to_json(&self) -> Value {
        match self {
            TermValue::Long(n) => Value::from(*n),
            TermValue::UnsignedLong(n) => Value::from(*n),
            TermValue::Double(n) => Value::from(*n),
            TermValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for TermValue {
    fn from(value: &str) -> Self {
        TermValue::String(value.to_string())
    }
}

impl From<String> for TermValue {
    fn from(value: String) -> Self {
        TermValue::String(value)
    }
}

impl From<&String> for TermValue {
    fn from(value: &String) -> Self {
        TermValue::String(value.clone())
    }
}

impl From<i64> for TermValue {
    fn from(value: i64) -> Self {
        TermValue::Long(value)
    }
}

impl From<i32> for TermValue {
    fn from(value: i32) -> Self {
        TermValue::Long(value.into())
    }
}

impl From<u32> for TermValue {
    fn from(value: u32) -> Self {
        TermValue::Long(value.into())
    }
}

impl From<u64> for TermValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => TermValue::Long(v),
            Err(_) => TermValue::UnsignedLong(value),
        }
    }
}

impl From<f64> for TermValue {
    fn from(value: f64) -> Self {
        TermValue::Double(value)
    }
}

impl From<f32> for TermValue {
    fn from(value: f32) -> Self {
        TermValue::Double(value.into())
    }
}

impl fmt::Display for TermValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermValue::Long(v) => write!(f, "{}", v),
            TermValue::UnsignedLong(v) => write!(f, "{}", v),
            TermValue::Double(v) => write!(f, "{}", v),
            TermValue::String(s) => f.write_str(s),
        }
    }
}

/// Initial values handed to a terms query at construction
#[derive(Clone, Debug, PartialEq)]
pub enum TermsSeed {
    /// A single value, appended like `value()`
    One(TermValue),
    /// A sequence, appended like `values()`
    Many(Vec<TermValue>),
}

macro_rules! seed_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for TermsSeed {
                fn from(value: $ty) -> Self {
                    TermsSeed::One(value.into())
                }
            }
        )*
    };
}

seed_from_scalar!(TermValue, &str, String, &String, i64, i32, u32, u64, f64, f32);

impl<T: Into<TermValue>> From<Vec<T>> for TermsSeed {
    fn from(values: Vec<T>) -> Self {
        TermsSeed::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TermValue>, const N: usize> From<[T; N]> for TermsSeed {
    fn from(values: [T; N]) -> Self {
        TermsSeed::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Options common to every clause kind
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedOptions {
    /// Boost factor for scoring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f64>,
    /// Name reported back in `matched_queries`
    #[serde(rename = "_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SharedOptions {
    /// Wire keys owned by the shared options
    pub const KEYS: [&'static str; 2] = ["boost", "_name"];

    pub fn is_empty(&self) -> bool {
        self.boost.is_none() && self.name.is_none()
    }

    /// Write the set options into a clause body
    pub fn write_into(&self, body: &mut Map<String, Value>) {
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }
        if let Some(ref name) = self.name {
            body.insert("_name".to_string(), Value::String(name.clone()));
        }
    }
}

/// Keys accepted in a terms lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupKey {
    Index,
    Type,
    Id,
    Path,
    Routing,
}

impl LookupKey {
    pub const ALL: [LookupKey; 5] = [
        LookupKey::Index,
        LookupKey::Type,
        LookupKey::Id,
        LookupKey::Path,
        LookupKey::Routing,
    ];

    /// Wire name of the key
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupKey::Index => "index",
            LookupKey::Type => "type",
            LookupKey::Id => "id",
            LookupKey::Path => "path",
            LookupKey::Routing => "routing",
        }
    }

    /// Look up a key by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// Reference to a document whose field supplies the terms
///
/// Only the keys that were set are written to the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsLookup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,
}

impl TermsLookup {
    /// Create an empty lookup
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }

    fn slot(&mut self, key: LookupKey) -> &mut Option<String> {
        match key {
            LookupKey::Index => &mut self.index,
            LookupKey::Type => &mut self.doc_type,
            LookupKey::Id => &mut self.id,
            LookupKey::Path => &mut self.path,
            LookupKey::Routing => &mut self.routing,
        }
    }

    /// Get the value stored under a key
    pub fn get(&self, key: LookupKey) -> Option<&str> {
        match key {
            LookupKey::Index => self.index.as_deref(),
            LookupKey::Type => self.doc_type.as_deref(),
            LookupKey::Id => self.id.as_deref(),
            LookupKey::Path => self.path.as_deref(),
            LookupKey::Routing => self.routing.as_deref(),
        }
    }

    /// Set one key, overwriting any previous value
    pub fn set(&mut self, key: LookupKey, value: impl Into<String>) {
        *self.slot(key) = Some(value.into());
    }

    /// Merge `other` into this lookup; keys set in `other` win
    pub fn merge(&mut self, other: TermsLookup) {
        let TermsLookup {
            index,
            doc_type,
            id,
            path,
            routing,
        } = other;
        let incoming = [
            (LookupKey::Index, index),
            (LookupKey::Type, doc_type),
            (LookupKey::Id, id),
            (LookupKey::Path, path),
            (LookupKey::Routing, routing),
        ];
        for (key, value) in incoming {
            if let Some(value) = value {
                self.set(key, value);
            }
        }
    }

    /// Number of keys that are set
    pub fn len(&self) -> usize {
        LookupKey::ALL
            .iter()
            .filter(|key| self.get(**key).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the set keys in canonical order
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = LookupKey::ALL
            .iter()
            .filter_map(|key| {
                self.get(*key)
                    .map(|v| (key.as_str().to_string(), Value::String(v.to_string())))
            })
            .collect();
        Value::Object(map)
    }
}
