//! Tools for scout agents.
//!
//! Each module pairs plain functions with a `register` that exposes them on
//! a [`Runtime`](runtime::Runtime). Handlers never fail: bad arguments and
//! upstream errors come back to the model as text.

pub use address::is_valid_address;
pub use math::{add, multiply};
pub use reflection::{Blend, Personality, reflect};
pub use report::{Report, report_filename};
pub use sql::Database;

pub mod address;
pub mod math;
pub mod onchain;
pub mod reflection;
pub mod report;
pub mod search;
pub mod sql;

use serde::de::DeserializeOwned;

/// Decode tool arguments, describing the failure for the model.
pub(crate) fn parse<T: DeserializeOwned>(args: &str) -> Result<T, String> {
    serde_json::from_str(args).map_err(|e| format!("invalid arguments: {e}"))
}

/// Run `f` over decoded arguments or return the decode error.
pub(crate) fn with_args<T: DeserializeOwned>(args: &str, f: impl FnOnce(T) -> String) -> String {
    parse(args).map(f).unwrap_or_else(|e| e)
}
