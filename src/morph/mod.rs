//! Morphological normalization: maps a surface word form to its set of
//! candidate canonical (lemma) forms. The matcher declares two words
//! equivalent when their lemma sets intersect.

pub mod cache;
pub mod remote;
pub mod simple;

pub use cache::CachedNormalizer;
pub use remote::RemoteNormalizer;
pub use simple::SimpleNormalizer;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// A normalizer collaborator: pure function from word to lemma set.
///
/// Implementations must be case-insensitive (callers pass lowercased input,
/// but an implementation should not depend on it) and must return at least
/// one form for any word, falling back to the word itself when no analysis
/// is available.
#[async_trait]
pub trait Normalizer: Send + Sync {
    async fn normalize(&self, word: &str) -> Result<HashSet<String>>;
}
