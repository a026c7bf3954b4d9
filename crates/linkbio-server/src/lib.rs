//! linkbio server - HTTP service for shareable link-in-bio pages.
//!
//! A client posts a profile (avatar, name, bio, ordered links, theme) and
//! receives a short identifier. Anyone can then view the profile as a
//! static HTML page at `/u/{identifier}`.
//!
//! # Architecture
//!
//! - **Storage**: Opaque JSON payloads keyed by identifier, behind the
//!   [`storage::ProfileStore`] trait (memory, JSON file, or a KV REST API)
//! - **Resolve**: Looks up a payload and normalizes it with
//!   [`linkbio_core::normalize`]
//! - **Render**: Generates HTML with Open Graph tags using maud (compile-time templates)
//! - **Cache**: In-process moka cache + Cache-Control headers for CDN caching
//!
//! # Security
//!
//! - All dynamic content is HTML-escaped by maud
//! - Link destinations are restricted to http(s), mailto and tel
//! - Strict Content-Security-Policy: no JavaScript execution
//! - X-Frame-Options: DENY prevents clickjacking

pub mod config;
pub mod error;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod state;
pub mod storage;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
