//! # latent
//!
//! Embedding-space analysis over dense vectors: nearest-neighbor search,
//! k-means clustering, power-method 2-D projection, latent interpolation,
//! and online class prediction.
//!
//! The crate consumes embedding vectors; it never produces them. An
//! external model supplies fixed-length vectors through the
//! [`provider::EmbeddingProvider`] seam, and every engine here is a pure,
//! synchronous transformation from those vectors to derived structures:
//! ranked neighbor lists, cluster assignments, 2-D coordinates, blended
//! predictions.
//!
//! ```rust
//! use latent::{Interpolator, NnIndex};
//!
//! let mut vocabulary = NnIndex::new();
//! vocabulary.add("cat", vec![1.0, 0.0]).unwrap();
//! vocabulary.add("dog", vec![0.0, 1.0]).unwrap();
//! vocabulary.add("kitten", vec![0.9, 0.1]).unwrap();
//!
//! let nearest = vocabulary.query(&[1.0, 0.0], 2).unwrap();
//! assert_eq!(nearest[0].label, "cat");
//!
//! // A quarter of the way from cat to dog, the nearest concept is kitten.
//! let blended = Interpolator::new(&vocabulary)
//!     .interpolate(&[1.0, 0.0], &[0.0, 1.0], 0.25, 1)
//!     .unwrap();
//! assert_eq!(blended[0].label, "kitten");
//! ```
//!
//! Engines are independent values with no shared state; construct one per
//! use and drop it when done. Vectors participating in one operation must
//! share a dimensionality, enforced with [`Error::DimensionMismatch`]
//! rather than silent truncation.

pub mod classify;
pub mod cluster;
/// Error types used across `latent`.
pub mod error;
pub mod index;
pub mod interpolate;
pub mod metrics;
pub mod project;
pub mod provider;
pub mod vecmath;

pub use classify::{ClassAccumulator, Prediction};
pub use cluster::{ClusterAssignment, Clustering, Kmeans, KmeansFit};
pub use error::{Error, Result};
pub use index::{LabeledVector, NnIndex, SimilarityMatch};
pub use interpolate::Interpolator;
pub use metrics::{purity, silhouette, wcss};
pub use project::Projector;
pub use provider::{EmbeddingProvider, FnProvider, Workbench};
pub use vecmath::{cosine_similarity, dot, euclidean_distance, lerp, norm, normalize};
