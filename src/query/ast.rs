//! Clause abstraction shared by every query DSL builder
//!
//! This module defines the `QueryClause` trait that all field-keyed clause
//! builders implement, providing a unified way to render into the JSON wire
//! format:
//!
//! ```json
//! { "<query_type>": { "boost": 1.5, "_name": "q", "<field>": <payload> } }
//! ```

use crate::config::{RenderSettings, UNSET_FIELD_KEY};
use crate::error::DslError;
use crate::query::types::SharedOptions;
use crate::Result;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Core trait for all clause builders
///
/// A clause renders as a single-key object whose key is the clause type and
/// whose body holds the shared options followed by one field-keyed payload.
pub trait QueryClause: Send + Sync + Debug {
    /// Get the clause type tag (the outer key of the rendered object)
    fn query_type(&self) -> &'static str;

    /// Field the clause targets, if one has been set
    fn field_name(&self) -> Option<&str>;

    /// Options common to every clause kind
    fn shared_options(&self) -> &SharedOptions;

    /// Value written under the field key
    fn payload(&self) -> Value;

    /// Render the clause, writing an unset field as `"undefined"`
    ///
    /// Rendering is a pure read of the current state and never fails.
    fn render(&self) -> Value {
        let key = self.field_name().unwrap_or(UNSET_FIELD_KEY);
        wrap_clause(self.query_type(), self.shared_options(), key, self.payload())
    }

    /// Render the clause under the given settings
    fn render_with(&self, settings: &RenderSettings) -> Result<Value> {
        let key = settings
            .field_key(self.field_name())
            .ok_or(DslError::MissingField)?;
        Ok(wrap_clause(
            self.query_type(),
            self.shared_options(),
            key,
            self.payload(),
        ))
    }

    /// Clone this clause into a boxed trait object
    fn clone_box(&self) -> Box<dyn QueryClause>;
}

impl Clone for Box<dyn QueryClause> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Build `{ query_type: { ...shared, key: payload } }`
///
/// The field entry is written last, so a field named like a shared option
/// replaces it.
pub fn wrap_clause(query_type: &str, shared: &SharedOptions, key: &str, payload: Value) -> Value {
    let mut body = Map::new();
    shared.write_into(&mut body);
    body.insert(key.to_string(), payload);

    let mut outer = Map::new();
    outer.insert(query_type.to_string(), Value::Object(body));
    Value::Object(outer)
}
