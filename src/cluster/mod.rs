//! Clustering of embedding vectors.
//!
//! Groups a batch of embeddings into k clusters so a caller can surface
//! cluster membership, per-cluster representatives (centroids), and each
//! point's distance to its representative.
//!
//! ## Algorithm
//!
//! ### K-means (Lloyd's algorithm)
//!
//! Assign each point to the nearest centroid, then update centroids to the
//! mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! Centroids here are seeded from the first k input points rather than by
//! random sampling, so identical input order always reproduces identical
//! clusters. The cost is sensitivity to that order; callers who want a
//! spread-out seeding should reorder their input.
//!
//! ## Usage
//!
//! ```rust
//! use latent::cluster::{Clustering, Kmeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![10.0, 10.0],
//!     vec![10.0, 11.0],
//! ];
//!
//! let labels = Kmeans::new(2).fit_predict(&data).unwrap();
//! assert_eq!(labels[0], labels[1]);  // First two together
//! assert_ne!(labels[0], labels[2]);  // Separate from last two
//! ```

mod kmeans;
mod traits;

pub use kmeans::{ClusterAssignment, Kmeans, KmeansFit};
pub use traits::Clustering;
