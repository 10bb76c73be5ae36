//! # jetapi-core
//!
//! Core types and utilities for working with the JetAPI aircraft lookup service.
//!
//! This crate provides the query builder, form handling, error types and
//! configuration shared by the HTTP client and the command-line front end.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`query`] - Clamped query parameters and canonical query URL construction
//! - [`form`] - Raw input field parsing and rendering instructions
//! - [`config`] - Configuration structures for JetAPI clients
//! - [`client`] - HTTP client settings and timeouts

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod query;

// Re-export commonly used types
pub use error::{Error, Result};
pub use form::{FormState, QueryView};
pub use query::{build_query, clamp, parse_count, QueryParameters};
