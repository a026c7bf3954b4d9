//! Identifier resolution: look up a stored payload and normalize it.

use linkbio_core::identifier;
use linkbio_core::{Alphabet, Normalized};

use crate::storage::{ProfileStore, StorageError};

/// Load and normalize the profile stored under `identifier`.
///
/// Returns `Ok(None)` for identifiers that cannot exist, unknown
/// identifiers, and payloads that fail normalization. Only backend
/// faults are errors.
pub async fn resolve(
    store: &dyn ProfileStore,
    identifier: &str,
) -> Result<Option<Normalized>, StorageError> {
    // Both alphabets are subsets of the mixed-case one.
    if !identifier::is_valid(identifier, &Alphabet::MIXED_CASE) {
        tracing::debug!(identifier = %identifier, "malformed identifier");
        return Ok(None);
    }

    let Some(payload) = store.get(identifier).await? else {
        tracing::debug!(identifier = %identifier, "identifier not found");
        return Ok(None);
    };

    let normalized = linkbio_core::normalize(&payload);
    if normalized.is_none() {
        tracing::warn!(identifier = %identifier, "stored payload failed normalization");
    }

    Ok(normalized)
}
