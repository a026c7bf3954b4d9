//! Short public identifiers for stored profiles.
//!
//! Identifiers are [`IDENTIFIER_LEN`] symbols drawn from an [`Alphabet`].
//! The mixed-case alphabet gives 62^6 (about 5.7e10) identifiers, the
//! lowercase one 36^6 (about 2.2e9).
//!
//! Generation prefers the operating system's CSPRNG. When it is
//! unavailable, a non-cryptographic generator is used instead; those
//! identifiers are predictable and collide more readily, so a warning is
//! logged every time the fallback is taken.
//!
//! Uniqueness is best effort: [`allocate`] retries against a snapshot of
//! known identifiers and gives up after a fixed number of attempts.

use std::borrow::Cow;
use std::collections::HashSet;

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Length of every generated identifier.
pub const IDENTIFIER_LEN: usize = 6;

/// Default bound on allocation attempts before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 100;

const MIXED_CASE_SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const LOWERCASE_SYMBOLS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The set of symbols identifiers are drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Cow<'static, [u8]>,
}

impl Alphabet {
    /// `A-Z`, `a-z`, `0-9` (62 symbols).
    pub const MIXED_CASE: Alphabet = Alphabet {
        symbols: Cow::Borrowed(MIXED_CASE_SYMBOLS),
    };

    /// `a-z`, `0-9` (36 symbols).
    pub const LOWERCASE: Alphabet = Alphabet {
        symbols: Cow::Borrowed(LOWERCASE_SYMBOLS),
    };

    /// Build an alphabet from arbitrary ASCII symbols.
    ///
    /// Rejects empty input, non-ASCII characters and duplicates.
    pub fn custom(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::InvalidAlphabet("alphabet is empty".to_string()));
        }
        if !symbols.is_ascii() {
            return Err(Error::InvalidAlphabet(
                "alphabet must be ASCII".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = symbols.bytes().find(|b| !seen.insert(*b)) {
            return Err(Error::InvalidAlphabet(format!(
                "duplicate symbol '{}'",
                dup as char
            )));
        }
        Ok(Self {
            symbols: Cow::Owned(symbols.as_bytes().to_vec()),
        })
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether `c` is one of the alphabet's symbols.
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.symbols.contains(&(c as u8))
    }

    /// Total number of distinct identifiers (`len ^ IDENTIFIER_LEN`).
    pub fn space_size(&self) -> u64 {
        (self.len() as u64).saturating_pow(IDENTIFIER_LEN as u32)
    }

    fn symbol(&self, index: usize) -> char {
        self.symbols[index] as char
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::MIXED_CASE
    }
}

/// Generate one identifier, falling back to a non-cryptographic source
/// if the OS random source fails.
pub fn generate(alphabet: &Alphabet) -> String {
    match generate_secure(alphabet) {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(
                error = %err,
                "OS random source unavailable, using non-cryptographic identifier"
            );
            generate_fallback(alphabet)
        }
    }
}

/// Draw from the OS CSPRNG with rejection sampling.
///
/// Bytes at or above the largest multiple of the alphabet size are
/// discarded so every symbol is equally likely.
fn generate_secure(alphabet: &Alphabet) -> std::result::Result<String, rand::Error> {
    let n = alphabet.len();
    let limit = 256 - (256 % n);
    let mut id = String::with_capacity(IDENTIFIER_LEN);
    let mut buf = [0u8; 16];

    while id.len() < IDENTIFIER_LEN {
        OsRng.try_fill_bytes(&mut buf)?;
        for byte in buf.iter().map(|b| usize::from(*b)) {
            if byte < limit {
                id.push(alphabet.symbol(byte % n));
                if id.len() == IDENTIFIER_LEN {
                    break;
                }
            }
        }
    }

    Ok(id)
}

fn generate_fallback(alphabet: &Alphabet) -> String {
    (0..IDENTIFIER_LEN)
        .map(|_| alphabet.symbol(fastrand::usize(..alphabet.len())))
        .collect()
}

/// Whether `candidate` has the shape of an identifier from `alphabet`.
pub fn is_valid(candidate: &str, alphabet: &Alphabet) -> bool {
    candidate.len() == IDENTIFIER_LEN && candidate.chars().all(|c| alphabet.contains(c))
}

/// Up to `max_attempts` freshly generated candidates.
pub fn candidates<G>(max_attempts: usize, generate: G) -> impl Iterator<Item = String>
where
    G: FnMut() -> String,
{
    std::iter::repeat_with(generate).take(max_attempts)
}

/// Pick the first generated candidate not present in `existing`.
///
/// `existing` is a point-in-time snapshot; nothing stops another writer
/// from taking the same identifier before it is stored.
pub fn allocate<G>(existing: &HashSet<String>, max_attempts: usize, generate: G) -> Result<String>
where
    G: FnMut() -> String,
{
    candidates(max_attempts, generate)
        .find(|candidate| !existing.contains(candidate))
        .ok_or(Error::IdentifierSpaceExhausted {
            attempts: max_attempts,
        })
}
