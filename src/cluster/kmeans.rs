//! K-means clustering.
//!
//! Partitions data into k clusters by minimizing **within-cluster sum of
//! squares** (WCSS). The foundational clustering algorithm, dating to 1957
//! (Lloyd).
//!
//! # The Objective
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! Sum of squared distances from each point to its cluster centroid.
//!
//! # Lloyd's Algorithm
//!
//! 1. Seed k centroids from the first k input points
//! 2. **Assign**: Each point → nearest centroid
//! 3. **Update**: Each centroid → mean of assigned points
//! 4. Repeat until no assignment changes or the iteration cap is hit
//!
//! **Why it converges**: WCSS decreases monotonically. Each step either
//! decreases WCSS or leaves it unchanged. Bounded below by 0 → must converge.
//!
//! # Seeding Policy
//!
//! Centroids are initialized from the first k input vectors, not sampled
//! randomly. Identical input order therefore always reproduces identical
//! clusters, which matters when a caller re-runs the same batch and expects
//! a stable layout. The trade-off is ordering sensitivity: pathological
//! orderings (e.g. duplicated points at the front) seed coincident centroids.
//!
//! # Empty Clusters
//!
//! A centroid that loses all of its points keeps its previous position
//! rather than being re-seeded or zeroed. It can re-acquire points in a
//! later iteration if the data moves toward it.

use super::traits::Clustering;
use crate::error::{Error, Result};
use ndarray::Array2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-point clustering outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    /// Cluster id in `[0, k)`.
    pub cluster: usize,
    /// Euclidean distance to the assigned centroid.
    pub distance: f32,
}

/// Full result of a k-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// One assignment per input point, in input order.
    pub assignments: Vec<ClusterAssignment>,
    /// Final centroid per cluster, same dimensionality as the input.
    pub centroids: Vec<Vec<f32>>,
    /// Iterations actually run (≤ the configured maximum).
    pub iterations: usize,
}

impl KmeansFit {
    /// Cluster ids only, in input order.
    pub fn labels(&self) -> Vec<usize> {
        self.assignments.iter().map(|a| a.cluster).collect()
    }
}

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
}

impl Kmeans {
    /// Create a new K-means clusterer with the default iteration cap (20).
    pub fn new(k: usize) -> Self {
        Self { k, max_iter: 20 }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Compute squared Euclidean distance.
    fn squared_distance(a: &ndarray::ArrayView1<'_, f32>, b: &ndarray::ArrayView1<'_, f32>) -> f32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    fn nearest_centroid(
        point: &ndarray::ArrayView1<'_, f32>,
        centroids: &Array2<f32>,
        k: usize,
    ) -> usize {
        let mut best_cluster = 0;
        let mut best_dist = f32::MAX;
        for c in 0..k {
            let dist = Self::squared_distance(point, &centroids.row(c));
            if dist < best_dist {
                best_dist = dist;
                best_cluster = c;
            }
        }
        best_cluster
    }

    /// Run Lloyd's algorithm and return assignments, centroids, and the
    /// iteration count.
    ///
    /// Stops early once no point changes cluster; past that fixed point,
    /// further iterations cannot alter the result.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KmeansFit> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = data.len();
        let d = data[0].len();

        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }

        // Convert to ndarray
        let mut flat: Vec<f32> = Vec::with_capacity(n * d);
        for point in data {
            if point.len() != d {
                return Err(Error::DimensionMismatch {
                    expected: d,
                    found: point.len(),
                });
            }
            flat.extend(point);
        }
        let data_arr =
            Array2::from_shape_vec((n, d), flat).map_err(|e| Error::Other(e.to_string()))?;

        // Seed centroids from the first k points.
        let mut centroids = Array2::zeros((self.k, d));
        for c in 0..self.k {
            centroids.row_mut(c).assign(&data_arr.row(c));
        }

        let mut labels = vec![0usize; n];
        let mut iterations = 0;

        for iter in 0..self.max_iter {
            iterations = iter + 1;

            // Assignment step - parallel when feature enabled
            #[cfg(feature = "parallel")]
            let changed = {
                let centroids_ref = &centroids;
                let data_ref = &data_arr;
                labels
                    .par_iter_mut()
                    .enumerate()
                    .map(|(i, label)| {
                        let best = Self::nearest_centroid(&data_ref.row(i), centroids_ref, self.k);
                        let moved = *label != best;
                        *label = best;
                        moved
                    })
                    .reduce(|| false, |a, b| a || b)
            };

            #[cfg(not(feature = "parallel"))]
            let changed = {
                let mut changed = false;
                for (i, label) in labels.iter_mut().enumerate() {
                    let best = Self::nearest_centroid(&data_arr.row(i), &centroids, self.k);
                    if *label != best {
                        *label = best;
                        changed = true;
                    }
                }
                changed
            };

            // Update step
            let mut sums = Array2::<f32>::zeros((self.k, d));
            let mut counts = vec![0usize; self.k];

            for i in 0..n {
                let c = labels[i];
                for j in 0..d {
                    sums[[c, j]] += data_arr[[i, j]];
                }
                counts[c] += 1;
            }

            for c in 0..self.k {
                if counts[c] > 0 {
                    for j in 0..d {
                        centroids[[c, j]] = sums[[c, j]] / counts[c] as f32;
                    }
                }
                // Empty cluster: centroid keeps its previous position.
            }

            if !changed {
                break;
            }
        }

        let assignments = labels
            .iter()
            .enumerate()
            .map(|(i, &c)| ClusterAssignment {
                cluster: c,
                distance: Self::squared_distance(&data_arr.row(i), &centroids.row(c)).sqrt(),
            })
            .collect();

        let centroids = (0..self.k).map(|c| centroids.row(c).to_vec()).collect();

        Ok(KmeansFit {
            assignments,
            centroids,
            iterations,
        })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::wcss;

    fn two_clusters() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
        ]
    }

    #[test]
    fn test_kmeans_well_separated() {
        let labels = Kmeans::new(2).fit_predict(&two_clusters()).unwrap();

        // Points 0,1 should be in same cluster, points 2,3 in another
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_kmeans_centroids_are_means() {
        let fit = Kmeans::new(2).fit(&two_clusters()).unwrap();
        let c0 = fit.assignments[0].cluster;
        let c1 = fit.assignments[2].cluster;

        assert!((fit.centroids[c0][0] - 0.0).abs() < 1e-6);
        assert!((fit.centroids[c0][1] - 0.5).abs() < 1e-6);
        assert!((fit.centroids[c1][0] - 10.0).abs() < 1e-6);
        assert!((fit.centroids[c1][1] - 10.5).abs() < 1e-6);
    }

    #[test]
    fn test_kmeans_distances_match_centroids() {
        let fit = Kmeans::new(2).fit(&two_clusters()).unwrap();
        for (point, assignment) in two_clusters().iter().zip(&fit.assignments) {
            let centroid = &fit.centroids[assignment.cluster];
            let expected = crate::vecmath::euclidean_distance(point, centroid).unwrap();
            assert!((assignment.distance - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_kmeans_all_points_assigned() {
        // Property: every point gets exactly one label in [0, k)
        let data: Vec<Vec<f32>> = (0..50)
            .map(|i| vec![i as f32 * 0.1, (i % 5) as f32])
            .collect();

        let labels = Kmeans::new(5).fit_predict(&data).unwrap();
        assert_eq!(labels.len(), data.len());
        for &label in &labels {
            assert!(label < 5, "label {} out of range", label);
        }
    }

    #[test]
    fn test_kmeans_deterministic() {
        let data: Vec<Vec<f32>> = (0..30).map(|i| vec![(i * 7 % 13) as f32, i as f32]).collect();

        let labels1 = Kmeans::new(4).fit_predict(&data).unwrap();
        let labels2 = Kmeans::new(4).fit_predict(&data).unwrap();
        assert_eq!(labels1, labels2, "same input order should give same result");
    }

    #[test]
    fn test_kmeans_duplicates_zero_radius() {
        // k = number of distinct values, distinct points leading: every
        // cluster is non-empty and every point sits on its centroid.
        let data = vec![
            vec![0.0, 0.0],
            vec![5.0, 0.0],
            vec![0.0, 5.0],
            vec![0.0, 0.0],
            vec![5.0, 0.0],
            vec![0.0, 5.0],
        ];

        let fit = Kmeans::new(3).fit(&data).unwrap();
        let mut seen = std::collections::HashSet::new();
        for assignment in &fit.assignments {
            seen.insert(assignment.cluster);
            assert!(assignment.distance.abs() < 1e-6);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_kmeans_wcss_non_increasing() {
        // Monotonic convergence of the objective across iteration counts.
        let data: Vec<Vec<f32>> = (0..24)
            .map(|i| vec![(i % 7) as f32, (i % 5) as f32, (i % 3) as f32])
            .collect();

        let mut prev = f64::MAX;
        for iters in 1..=8 {
            let fit = Kmeans::new(3).with_max_iter(iters).fit(&data).unwrap();
            let objective = wcss(&data, &fit.labels(), &fit.centroids).unwrap();
            assert!(
                objective <= prev + 1e-6,
                "WCSS increased: {} -> {}",
                prev,
                objective
            );
            prev = objective;
        }
    }

    #[test]
    fn test_kmeans_converges_early() {
        let fit = Kmeans::new(2).with_max_iter(20).fit(&two_clusters()).unwrap();
        assert!(fit.iterations < 20);
    }

    #[test]
    fn test_kmeans_k_equals_n() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = Kmeans::new(3).fit_predict(&data).unwrap();

        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_kmeans_empty_input_error() {
        let data: Vec<Vec<f32>> = vec![];
        assert_eq!(Kmeans::new(2).fit(&data).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_kmeans_k_larger_than_n_error() {
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
        let result = Kmeans::new(5).fit(&data);
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount {
                requested: 5,
                n_items: 2
            })
        ));
    }

    #[test]
    fn test_kmeans_zero_k_error() {
        let data = vec![vec![0.0, 0.0]];
        assert!(Kmeans::new(0).fit(&data).is_err());
    }

    #[test]
    fn test_kmeans_ragged_input_error() {
        let data = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            Kmeans::new(1).fit(&data),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
