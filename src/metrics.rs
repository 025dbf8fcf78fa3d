//! Clustering diagnostics.
//!
//! Measures for assessing a clustering of embedding vectors, either
//! intrinsically (how tight and well separated the clusters are) or against
//! ground truth labels.
//!
//! # Metrics Overview
//!
//! | Metric | Range | Best | Needs truth? |
//! |--------|-------|------|--------------|
//! | [`wcss`] | [0, inf) | 0 | no |
//! | [`silhouette`] | [-1, 1] | 1 | no |
//! | [`purity`] | [0, 1] | 1 | yes |
//!
//! # When to Use Which
//!
//! - **WCSS**: The k-means objective itself. Compare runs on the same data;
//!   it always drops as k grows, so never compare across different k.
//! - **Silhouette**: Cohesion vs separation per point; usable to pick k.
//! - **Purity**: Simple agreement with known labels; favors many clusters.
//!
//! # References
//!
//! - Rousseeuw (1987). "Silhouettes: a graphical aid to the interpretation
//!   and validation of cluster analysis"

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::vecmath;

fn check_assignments(data: &[Vec<f32>], assignments: &[usize]) -> Result<()> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    if data.len() != assignments.len() {
        return Err(Error::InvalidParameter {
            name: "assignments",
            message: "one assignment required per data point",
        });
    }
    Ok(())
}

/// Within-cluster sum of squares: the k-means objective.
///
/// ```text
/// WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
/// ```
///
/// Accumulated in f64 so large batches don't lose precision.
pub fn wcss(data: &[Vec<f32>], assignments: &[usize], centroids: &[Vec<f32>]) -> Result<f64> {
    check_assignments(data, assignments)?;

    let mut total = 0.0f64;
    for (point, &cluster) in data.iter().zip(assignments.iter()) {
        let centroid = centroids.get(cluster).ok_or(Error::InvalidParameter {
            name: "assignments",
            message: "cluster id out of range of centroid list",
        })?;
        total += vecmath::squared_distance(point, centroid)? as f64;
    }
    Ok(total)
}

/// Mean silhouette coefficient over all points.
///
/// Per point: `s = (b - a) / max(a, b)` where `a` is the mean distance to
/// the point's own cluster and `b` the smallest mean distance to any other
/// cluster. Points in singleton clusters contribute 0, following the usual
/// convention.
///
/// Requires at least two distinct clusters; with one there is no "other
/// cluster" to separate from.
pub fn silhouette(data: &[Vec<f32>], assignments: &[usize]) -> Result<f64> {
    check_assignments(data, assignments)?;

    let mut cluster_sizes: HashMap<usize, usize> = HashMap::new();
    for &c in assignments {
        *cluster_sizes.entry(c).or_insert(0) += 1;
    }
    if cluster_sizes.len() < 2 {
        return Err(Error::InvalidParameter {
            name: "assignments",
            message: "silhouette needs at least two clusters",
        });
    }

    let n = data.len();
    let mut total = 0.0f64;

    for i in 0..n {
        let own = assignments[i];
        if cluster_sizes[&own] == 1 {
            continue; // contributes 0
        }

        // Mean distance from point i to every cluster.
        let mut dist_sums: HashMap<usize, f64> = HashMap::new();
        for j in 0..n {
            if i == j {
                continue;
            }
            let d = vecmath::euclidean_distance(&data[i], &data[j])? as f64;
            *dist_sums.entry(assignments[j]).or_insert(0.0) += d;
        }

        let a = dist_sums.get(&own).copied().unwrap_or(0.0) / (cluster_sizes[&own] - 1) as f64;
        let b = dist_sums
            .iter()
            .filter(|(&c, _)| c != own)
            .map(|(&c, &sum)| sum / cluster_sizes[&c] as f64)
            .fold(f64::MAX, f64::min);

        let denom = a.max(b);
        if denom > 0.0 {
            total += (b - a) / denom;
        }
    }

    Ok(total / n as f64)
}

/// Purity of a clustering against ground truth labels.
///
/// Each cluster is credited with its most common true label:
///
/// ```text
/// purity = (1/N) Σₖ max_c |cluster_k ∩ class_c|
/// ```
///
/// Returns 0.0 on empty or mismatched input. Purity is biased toward many
/// clusters (one point per cluster scores 1.0), so read it alongside the
/// intrinsic metrics.
pub fn purity(pred: &[usize], truth: &[usize]) -> f64 {
    if pred.len() != truth.len() || pred.is_empty() {
        return 0.0;
    }

    let mut by_cluster: HashMap<usize, HashMap<usize, usize>> = HashMap::new();
    for (&p, &t) in pred.iter().zip(truth.iter()) {
        *by_cluster.entry(p).or_default().entry(t).or_insert(0) += 1;
    }

    let correct: usize = by_cluster
        .values()
        .map(|counts| counts.values().max().copied().unwrap_or(0))
        .sum();

    correct as f64 / pred.len() as f64
}
