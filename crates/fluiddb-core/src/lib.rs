//! FluidDB Core: shared types, errors, and utilities.
//!
//! This crate holds everything about the FluidDB client that does not
//! touch the network (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`method`]: HTTP verbs used by the API
//! - [`response`]: The response envelope
//! - [`value`]: Tag values and their JSON encoding
//! - [`util`]: Path and query helpers

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod error;
pub mod method;
pub mod response;
pub mod util;
pub mod value;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use method::Method;
pub use response::{ERROR_CLASS_HEADER, REQUEST_ID_HEADER, Response, VALUE_CONTENT_TYPE};
pub use value::TagValue;

// Convenience re-exports from util
pub use util::paths::{name_from_path, uri_join};
pub use util::query::{QueryArgs, encode_query, query_args};
