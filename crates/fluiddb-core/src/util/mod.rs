//! Path and query helpers shared by every resource wrapper.
//!
//! # Modules
//!
//! - [`paths`]: joining resource paths and extracting names
//! - [`query`]: query-string composition

pub mod paths;
pub mod query;

mod proptests;
