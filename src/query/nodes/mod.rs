//! Concrete clause builders
//!
//! This module provides implementations of the `QueryClause` trait for
//! the supported clause types.

mod terms_query;

pub use terms_query::TermsQuery;
