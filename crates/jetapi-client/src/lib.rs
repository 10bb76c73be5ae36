//! JetAPI client and query session.
//!
//! Provides typed response models, an asynchronous HTTP client for the JetAPI
//! lookup endpoint, the fetch-then-render session used by front ends, and the
//! JSON export offered after a successful lookup.

#![deny(missing_docs)]

pub mod client;
pub mod export;
pub mod models;
pub mod session;

pub use client::{JetApiClient, JetApiClientBuilder, JsonFetcher};
pub use export::JsonExport;
pub use models::{
    FlightAttributes, FlightRadarResult, ImageAttributes, JetPhotosResult, ScrapeResult,
};
pub use session::{DisplayState, FetchOutcome, FetchedRecord, QuerySession};

/// Convenient result alias that reuses the shared JetAPI error type.
pub type Result<T> = jetapi_core::Result<T>;
