pub mod config;
pub mod error;
pub mod query;

pub use config::{RenderSettings, UnsetFieldPolicy};
pub use error::{DslError, Result};
pub use query::{QueryClause, QueryParser, TermsLookup, TermsQuery, TermValue};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
