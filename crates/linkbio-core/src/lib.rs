//! Core types and logic for linkbio profile pages.
//!
//! This crate provides:
//! - The profile data model (`ProfileRecord`, `LinkItem`, themes, icons)
//! - Short identifier generation and bounded uniqueness allocation
//! - Tolerant normalization of stored profile JSON
//! - Link destination normalization
//!
//! It performs no I/O; storage and HTTP live in `linkbio-server`.

mod error;
pub mod identifier;
pub mod model;
pub mod normalize;
pub mod url;

pub use error::{Error, Result};
pub use identifier::{Alphabet, IDENTIFIER_LEN, MAX_ALLOCATION_ATTEMPTS};
pub use model::{LinkIcon, LinkItem, ProfileRecord, Theme};
pub use normalize::{AppliedDefault, LinkField, Normalized, normalize};
