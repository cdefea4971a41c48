//! Query DSL builders
//!
//! This module provides typed builders for Squidex's structured query
//! language. Each builder renders to the JSON wire format, e.g. a terms
//! clause:
//!
//! ```json
//! {
//!   "terms": {
//!     "boost": 1.5,
//!     "tags": ["rust", "programming"]
//!   }
//! }
//! ```
//!
//! or, when the values come from another document:
//!
//! ```json
//! {
//!   "terms": {
//!     "user": { "index": "users", "id": "2", "path": "followers" }
//!   }
//! }
//! ```

pub mod ast;
pub mod nodes;
pub mod parser;
pub mod types;
pub mod validate;

pub use ast::{wrap_clause, QueryClause};
pub use nodes::TermsQuery;
pub use parser::QueryParser;
pub use types::*;
pub use validate::{check_type, ExpectedShape};
