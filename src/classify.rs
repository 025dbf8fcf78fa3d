//! Online multi-class example store.
//!
//! [`ClassAccumulator`] accumulates labeled embedding vectors per class and
//! answers "which class is this query closest to, and with what
//! confidence". Examples arrive one at a time; there is no training step,
//! so a caller can add an example and predict against it immediately.
//!
//! # Scoring Policy
//!
//! Each class scores as the **maximum** cosine similarity between the query
//! and that class's stored examples (nearest-example voting). The winner is
//! the argmax over classes, ties broken by class insertion order.
//!
//! Confidences shift raw scores into [0, 2] and normalize them to sum to 1:
//!
//! ```text
//! confidence_i = (s_i + 1) / Σ_j (s_j + 1)
//! ```
//!
//! The shift is affine and positive, so the argmax class always carries the
//! highest confidence.
//!
//! # No Prediction
//!
//! Predicting against an empty store is a defined result, not an error:
//! [`ClassAccumulator::predict`] returns `None` until the first example
//! lands. A class is only ever reported once it holds at least one example.

use crate::error::{Error, Result};
use crate::vecmath;

/// One class's stored examples.
#[derive(Debug, Clone)]
struct ClassBucket {
    label: String,
    examples: Vec<Vec<f32>>,
}

/// A class prediction with per-class confidences.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Winning class label.
    pub label: String,
    /// Normalized confidence of the winning class.
    pub confidence: f32,
    /// Per-class confidences in class insertion order, non-negative,
    /// summing to 1.
    pub scores: Vec<(String, f32)>,
}

/// Online multi-class example store with nearest-example voting.
#[derive(Debug, Clone, Default)]
pub struct ClassAccumulator {
    classes: Vec<ClassBucket>,
}

impl ClassAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// Dimensionality of stored examples, or `None` while empty.
    pub fn dim(&self) -> Option<usize> {
        self.classes
            .first()
            .and_then(|c| c.examples.first())
            .map(|e| e.len())
    }

    /// Append a labeled example to its class bucket, creating the bucket on
    /// first sight of the label.
    pub fn add_example(&mut self, vector: Vec<f32>, label: impl Into<String>) -> Result<()> {
        if let Some(dim) = self.dim() {
            if vector.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: vector.len(),
                });
            }
        }
        if vecmath::norm(&vector) == 0.0 {
            return Err(Error::ZeroVector);
        }

        let label = label.into();
        match self.classes.iter_mut().find(|c| c.label == label) {
            Some(bucket) => bucket.examples.push(vector),
            None => self.classes.push(ClassBucket {
                label,
                examples: vec![vector],
            }),
        }
        Ok(())
    }

    /// Predict the closest class to `query`.
    ///
    /// Returns `Ok(None)` while no examples are stored.
    pub fn predict(&self, query: &[f32]) -> Result<Option<Prediction>> {
        if self.classes.is_empty() {
            return Ok(None);
        }

        // Per-class raw score: max similarity over that class's examples.
        let mut raw: Vec<f32> = Vec::with_capacity(self.classes.len());
        for bucket in &self.classes {
            let mut best = f32::MIN;
            for example in &bucket.examples {
                let sim = vecmath::cosine_similarity(query, example)?;
                if sim > best {
                    best = sim;
                }
            }
            raw.push(best);
        }

        // Winner by raw score; strict > keeps earlier classes on ties.
        let mut winner = 0;
        for (i, &score) in raw.iter().enumerate() {
            if score > raw[winner] {
                winner = i;
            }
        }

        // Shift into [0, 2] and normalize. The degenerate all-opposite case
        // (every score exactly -1) has no signal; report uniform confidence.
        let shifted: Vec<f32> = raw.iter().map(|s| s + 1.0).collect();
        let total: f32 = shifted.iter().sum();
        let confidences: Vec<f32> = if total > 0.0 {
            shifted.iter().map(|s| s / total).collect()
        } else {
            vec![1.0 / self.classes.len() as f32; self.classes.len()]
        };

        let scores: Vec<(String, f32)> = self
            .classes
            .iter()
            .zip(confidences.iter())
            .map(|(c, &conf)| (c.label.clone(), conf))
            .collect();

        Ok(Some(Prediction {
            label: self.classes[winner].label.clone(),
            confidence: confidences[winner],
            scores,
        }))
    }

    /// Per-class example counts in class insertion order.
    pub fn example_counts(&self) -> Vec<(String, usize)> {
        self.classes
            .iter()
            .map(|c| (c.label.clone(), c.examples.len()))
            .collect()
    }

    /// Total number of stored examples across all classes.
    pub fn len(&self) -> usize {
        self.classes.iter().map(|c| c.examples.len()).sum()
    }

    /// Whether no examples are stored.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Drop all classes and examples.
    pub fn clear(&mut self) {
        self.classes.clear();
    }
}
