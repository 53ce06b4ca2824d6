//! # fluiddb-client
//!
//! Rust client library for FluidDB.
//!
//! # Modules
//!
//! - [`config`]: Connection settings and credential files
//! - [`connector`]: Request execution and response envelopes
//! - [`resource`]: Shared plumbing of the resource wrappers
//! - [`namespace`], [`tag`], [`object`], [`user`]: The object model
//! - [`client`]: The [`FluidDb`] facade
//!
//! Errors, responses, tag values and path helpers live in
//! [`fluiddb_core`] and are re-exported here.

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod connector;
pub mod namespace;
pub mod object;
pub mod resource;
pub mod tag;
pub mod user;

pub use client::FluidDb;
pub use config::{ClientConfig, Credentials, FLUIDDB_URL, SANDBOX_URL};
pub use connector::Connector;
pub use namespace::Namespace;
pub use object::Object;
pub use resource::Lazy;
pub use tag::Tag;
pub use user::User;

pub use fluiddb_core::{Error, Method, QueryArgs, Response, Result, TagValue, query_args};
