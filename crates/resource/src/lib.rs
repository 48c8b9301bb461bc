//! Resource providers for the papier pipeline.
//!
//! This crate provides the platform-facing implementations of the
//! `ResourceProvider` trait from papier-traits:
//!
//! - [`FilesystemResourceProvider`]: loads resources from a local directory
//! - [`HttpResourceProvider`]: fetches ingest-hosted logo URLs over HTTP
//!
//! The in-memory provider lives in papier-traits and is re-exported here
//! for convenience.

mod filesystem;
mod http;

pub use filesystem::FilesystemResourceProvider;
pub use http::HttpResourceProvider;

pub use papier_traits::InMemoryResourceProvider;
