//! 2-D projection of embedding batches via power iteration.
//!
//! Reduces N vectors of dimensionality d (hundreds) to N points in the
//! plane, preserving maximal variance, without a full covariance
//! eigendecomposition.
//!
//! # Algorithm
//!
//! ```text
//! 1. Center the batch: subtract the mean vector from every row of X
//! 2. pc1: power iteration on the implicit covariance operator
//!        v ← normalize(Xᵀ(Xv))
//! 3. Deflate: subtract each row's pc1 component, leaving residuals ⊥ pc1
//! 4. pc2: power iteration on the residuals
//! 5. Emit (x, y) = (row·pc1, row·pc2) per centered row
//! ```
//!
//! Forming `Xᵀ(Xv)` as two matrix-vector products keeps the cost at
//! O(iters · n · d) and never materializes the d×d covariance matrix.
//!
//! # Approximation Quality
//!
//! A handful of iterations is enough when the top two components are well
//! separated, which embedding batches with visible cluster structure
//! usually are. For ill-conditioned data, raise
//! [`Projector::with_power_iters`]; more iterations only sharpen the
//! estimate.
//!
//! # Determinism
//!
//! The start vectors are drawn from a seeded RNG with a fixed default seed,
//! so repeated calls on the same batch produce identical coordinates.
//! [`Projector::with_seed`] selects a different start; note that any seed
//! may flip the sign of an axis, which mirrors the layout but preserves all
//! relative distances.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2, Axis};
use rand::prelude::*;

const DEFAULT_POWER_ITERS: usize = 5;
const DEFAULT_SEED: u64 = 42;

/// Variance-preserving 2-D projector.
#[derive(Debug, Clone)]
pub struct Projector {
    /// Power iterations per principal direction.
    power_iters: usize,
    /// Seed for the iteration start vectors.
    seed: u64,
}

impl Projector {
    /// Create a projector with the default iteration count and seed.
    pub fn new() -> Self {
        Self {
            power_iters: DEFAULT_POWER_ITERS,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the number of power iterations per direction.
    pub fn with_power_iters(mut self, iters: usize) -> Self {
        self.power_iters = iters;
        self
    }

    /// Set the RNG seed for the iteration start vectors.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Project a batch to 2-D coordinates, one `[x, y]` per input vector,
    /// in input order.
    ///
    /// The projection basis is derived from this batch alone and is not
    /// persisted. A batch with zero variance (all points identical) maps
    /// every point to the origin.
    pub fn project(&self, data: &[Vec<f32>]) -> Result<Vec<[f32; 2]>> {
        if data.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = data.len();
        let d = data[0].len();

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

        // Center the batch. n > 0, so the mean exists.
        let mean = data_arr.mean_axis(Axis(0)).ok_or(Error::EmptyInput)?;
        let centered = &data_arr - &mean;

        let mut rng = StdRng::seed_from_u64(self.seed);

        let pc1 = self.power_iteration(&centered, &mut rng);
        let xs = centered.dot(&pc1);

        // Deflate: residual rows are orthogonal to pc1.
        let mut residual = centered;
        for (i, mut row) in residual.outer_iter_mut().enumerate() {
            let s = xs[i];
            row.zip_mut_with(&pc1, |r, &p| *r -= s * p);
        }

        let pc2 = self.power_iteration(&residual, &mut rng);
        let ys = residual.dot(&pc2);

        Ok(xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| [x, y])
            .collect())
    }

    /// Approximate the dominant right singular direction of `x` by power
    /// iteration on `Xᵀ(Xv)`.
    ///
    /// Returns the zero vector when `x` itself is zero (no variance left to
    /// capture), which downstream turns into all-zero coordinates.
    fn power_iteration(&self, x: &Array2<f32>, rng: &mut StdRng) -> Array1<f32> {
        let d = x.ncols();

        let mut v = Array1::from_shape_fn(d, |_| rng.random::<f32>() * 2.0 - 1.0);
        let start_norm = v.dot(&v).sqrt();
        if start_norm == 0.0 {
            return Array1::zeros(d);
        }
        v.mapv_inplace(|e| e / start_norm);

        for _ in 0..self.power_iters {
            let xv = x.dot(&v);
            let mut next = x.t().dot(&xv);
            let next_norm = next.dot(&next).sqrt();
            if next_norm == 0.0 {
                return Array1::zeros(d);
            }
            next.mapv_inplace(|e| e / next_norm);
            v = next;
        }

        v
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread(values: impl Iterator<Item = f32>) -> f32 {
        let values: Vec<f32> = values.collect();
        let min = values.iter().cloned().fold(f32::MAX, f32::min);
        let max = values.iter().cloned().fold(f32::MIN, f32::max);
        max - min
    }

    #[test]
    fn test_project_empty_error() {
        let data: Vec<Vec<f32>> = vec![];
        assert_eq!(Projector::new().project(&data), Err(Error::EmptyInput));
    }

    #[test]
    fn test_project_ragged_error() {
        let data = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(
            Projector::new().project(&data),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_project_identical_points_at_origin() {
        let data = vec![vec![3.0, 1.0, 4.0]; 5];
        let points = Projector::new().project(&data).unwrap();
        for p in points {
            assert!(p[0].abs() < 1e-6);
            assert!(p[1].abs() < 1e-6);
        }
    }

    #[test]
    fn test_project_line_dominates_first_axis() {
        // Points along a single 4-D direction: all variance lands on x,
        // leaving y near zero.
        let dir = [0.5, -0.5, 0.5, 0.5];
        let data: Vec<Vec<f32>> = (0..10)
            .map(|i| dir.iter().map(|c| c * i as f32).collect())
            .collect();

        let points = Projector::new().project(&data).unwrap();
        let x_spread = spread(points.iter().map(|p| p[0]));
        let y_spread = spread(points.iter().map(|p| p[1]));

        assert!(x_spread > 1.0);
        assert!(y_spread < x_spread * 1e-2);
    }

    #[test]
    fn test_project_separates_clusters() {
        // Two tight clusters far apart in 6-D stay far apart in 2-D.
        let mut data = Vec::new();
        for i in 0..5 {
            let jitter = i as f32 * 0.01;
            data.push(vec![jitter, 0.0, jitter, 0.0, 0.0, jitter]);
            data.push(vec![10.0 + jitter, 10.0, 10.0, 10.0 - jitter, 10.0, 10.0]);
        }

        let points = Projector::new().project(&data).unwrap();
        let a: Vec<[f32; 2]> = points.iter().step_by(2).copied().collect();
        let b: Vec<[f32; 2]> = points.iter().skip(1).step_by(2).copied().collect();

        let mean = |ps: &[[f32; 2]]| {
            let n = ps.len() as f32;
            [
                ps.iter().map(|p| p[0]).sum::<f32>() / n,
                ps.iter().map(|p| p[1]).sum::<f32>() / n,
            ]
        };
        let ma = mean(&a);
        let mb = mean(&b);
        let between = ((ma[0] - mb[0]).powi(2) + (ma[1] - mb[1]).powi(2)).sqrt();

        let within: f32 = a
            .iter()
            .map(|p| ((p[0] - ma[0]).powi(2) + (p[1] - ma[1]).powi(2)).sqrt())
            .fold(0.0, f32::max);

        assert!(between > 10.0 * within.max(1e-3));
    }

    #[test]
    fn test_project_deterministic_default_seed() {
        let data: Vec<Vec<f32>> = (0..12)
            .map(|i| vec![(i % 4) as f32, (i % 3) as f32, i as f32 * 0.1])
            .collect();

        let p1 = Projector::new().project(&data).unwrap();
        let p2 = Projector::new().project(&data).unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_project_seed_preserves_distances() {
        // Different seeds may mirror axes but pairwise distances survive.
        let data: Vec<Vec<f32>> = (0..8)
            .map(|i| vec![(i % 4) as f32 * 2.0, (i / 4) as f32 * 3.0, 1.0])
            .collect();

        let p1 = Projector::new().with_power_iters(50).project(&data).unwrap();
        let p2 = Projector::new()
            .with_power_iters(50)
            .with_seed(7)
            .project(&data)
            .unwrap();

        let dist = |ps: &[[f32; 2]], i: usize, j: usize| {
            ((ps[i][0] - ps[j][0]).powi(2) + (ps[i][1] - ps[j][1]).powi(2)).sqrt()
        };
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert!((dist(&p1, i, j) - dist(&p2, i, j)).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn test_project_single_point() {
        // One point has no variance; it sits at the origin.
        let points = Projector::new().project(&[vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0][0].abs() < 1e-6);
        assert!(points[0][1].abs() < 1e-6);
    }
}
