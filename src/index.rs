//! Exact nearest-neighbor search over labeled embedding vectors.
//!
//! [`NnIndex`] holds a reference set of (label, vector) pairs and answers
//! top-k queries by cosine similarity. The scan is brute force: embedding
//! demos hold vocabularies of hundreds to a few thousand entries, where an
//! exact O(n·d) pass beats the constant factors of an approximate structure
//! and keeps ranking fully deterministic.
//!
//! # Ordering Contract
//!
//! Results are sorted descending by score. Equal scores are broken by
//! insertion order (first inserted wins), so repeated queries over the same
//! reference set always rank identically.
//!
//! # Example
//!
//! ```rust
//! use latent::index::NnIndex;
//!
//! let mut index = NnIndex::new();
//! index.add("cat", vec![1.0, 0.0]).unwrap();
//! index.add("dog", vec![0.0, 1.0]).unwrap();
//! index.add("kitten", vec![0.9, 0.1]).unwrap();
//!
//! let matches = index.query(&[1.0, 0.0], 2).unwrap();
//! assert_eq!(matches[0].label, "cat");
//! assert_eq!(matches[1].label, "kitten");
//! ```

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::vecmath;

/// A vector paired with an opaque label and optional display text.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledVector {
    /// Label or class identifier.
    pub label: String,
    /// The embedding vector.
    pub vector: Vec<f32>,
    /// Optional free-text rendering of the original item.
    pub display: Option<String>,
}

impl LabeledVector {
    /// Create a labeled vector without display text.
    pub fn new(label: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            vector,
            display: None,
        }
    }

    /// Attach display text for the original item.
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }
}

/// A single ranked query result.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatch {
    /// Insertion index of the matched entry in the reference set.
    pub index: usize,
    /// Label of the matched entry.
    pub label: String,
    /// Cosine similarity in [-1, 1].
    pub score: f32,
}

/// Brute-force cosine top-k index over a reference set.
///
/// The reference set is owned by the index and lives only as long as it.
/// Dimensionality is fixed by the first inserted vector; later insertions
/// and queries must agree with it.
#[derive(Debug, Clone, Default)]
pub struct NnIndex {
    entries: Vec<LabeledVector>,
}

impl NnIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an empty index with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Dimensionality of stored vectors, or `None` while empty.
    pub fn dim(&self) -> Option<usize> {
        self.entries.first().map(|e| e.vector.len())
    }

    /// Append a labeled vector to the reference set.
    ///
    /// Zero-magnitude vectors are rejected here rather than poisoning every
    /// later query: cosine similarity against them is undefined.
    pub fn add(&mut self, label: impl Into<String>, vector: Vec<f32>) -> Result<()> {
        self.add_entry(LabeledVector::new(label, vector))
    }

    /// Append a prepared [`LabeledVector`].
    pub fn add_entry(&mut self, entry: LabeledVector) -> Result<()> {
        if let Some(dim) = self.dim() {
            if entry.vector.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: entry.vector.len(),
                });
            }
        }
        if vecmath::norm(&entry.vector) == 0.0 {
            return Err(Error::ZeroVector);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Bulk append. Entries are validated one by one; on the first failure
    /// the earlier entries remain inserted.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = LabeledVector>) -> Result<()> {
        for entry in entries {
            self.add_entry(entry)?;
        }
        Ok(())
    }

    /// Top-k entries by cosine similarity to `query`, sorted descending.
    ///
    /// `k` is clamped to the reference set size. An empty index returns an
    /// empty vec rather than an error, so callers building up a vocabulary
    /// incrementally need no special casing.
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<SimilarityMatch>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = Vec::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            scored.push((i, vecmath::cosine_similarity(query, &entry.vector)?));
        }

        // Stable sort keeps equal scores in insertion order. Scores are never
        // NaN (zero vectors are rejected at insert and above).
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k.min(self.entries.len()));

        Ok(scored
            .into_iter()
            .map(|(i, score)| SimilarityMatch {
                index: i,
                label: self.entries[i].label.clone(),
                score,
            })
            .collect())
    }

    /// Borrow the reference set in insertion order.
    pub fn entries(&self) -> &[LabeledVector] {
        &self.entries
    }

    /// Drop all entries. Dimensionality resets with the next insertion.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
