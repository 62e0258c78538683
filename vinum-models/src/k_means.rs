use rand::Rng;
use tracing::{debug, info};
use vinum_core::{Assignments, Float, Label, Matrix, Result, VinumError};

use crate::k_medians::{check_k, sample_initial_indices};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// **K-Means clustering** using squared Euclidean distance.
///
/// This is the baseline the k-medians results are compared against. It follows
/// the usual "random init, several restarts" recipe:
///
/// 1. Pick `k` distinct rows at random as centroids
/// 2. Run Lloyd's algorithm: assign rows to the nearest centroid, move each
///    centroid to the mean of its rows
/// 3. Stop when assignments no longer change, when the total squared centroid
///    shift drops to `tol` or below, or after `max_iter` rounds
/// 4. Repeat `n_init` times and keep the run with the lowest inertia
///
/// A cluster that loses all of its rows keeps its previous centroid.
///
/// # Errors
///
/// - [`VinumError::EmptyInput`] if input has zero rows or columns
/// - [`VinumError::InvalidK`] unless `2 <= k < n_samples`
/// - [`VinumError::InvalidHyperparameter`] if `max_iter`, `n_init` is zero or `tol` is negative
/// - [`VinumError::InvalidValue`] if `NaN` encountered in distance computation
/// - [`VinumError::NotFitted`] if prediction called before fitting
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Cluster centroids of shape `(k, n_features)`.
    centroids: Option<Matrix>,
    /// Labels of the training rows from the best run.
    labels: Option<Assignments>,
    /// Within-cluster sum of squared distances of the best run.
    inertia: Option<Float>,
    n_iter: usize,
    k: usize,
    max_iter: usize,
    n_init: usize,
    tol: Float,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(2, 300)
    }
}

struct Run {
    centroids: Matrix,
    labels: Assignments,
    inertia: Float,
    n_iter: usize,
}

impl KMeans {
    /// Creates a new, unfitted K-Means model with 10 restarts.
    pub fn new(k: usize, max_iter: usize) -> Self {
        Self {
            centroids: None,
            labels: None,
            inertia: None,
            n_iter: 0,
            k,
            max_iter,
            n_init: 10,
            tol: 1e-4,
        }
    }

    pub fn n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    pub fn tol(mut self, tol: Float) -> Self {
        self.tol = tol;
        self
    }

    /// Fits the model on `x`, keeping the best of `n_init` runs.
    ///
    /// # Complexity
    ///
    /// - Time: `O(n_init * t * k * n * d)`
    /// - Space: `O(k * d + n)`
    pub fn fit<R: Rng + ?Sized>(&mut self, x: &Matrix, rng: &mut R) -> Result<()> {
        let n = x.nrows();

        if n == 0 || x.ncols() == 0 {
            return Err(VinumError::EmptyInput);
        }
        check_k(self.k, n)?;

        for (name, value) in [("max_iter", self.max_iter), ("n_init", self.n_init)] {
            if value == 0 {
                return Err(VinumError::InvalidHyperparameter {
                    name: name.into(),
                    value: "0".into(),
                });
            }
        }

        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(VinumError::InvalidHyperparameter {
                name: "tol".into(),
                value: self.tol.to_string(),
            });
        }

        let mut best: Option<Run> = None;

        for restart in 0..self.n_init {
            let run = self.single_run(x, rng)?;
            debug!(k = self.k, restart, inertia = run.inertia, "k-means restart finished");

            if best.as_ref().is_none_or(|b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }

        let best = best.ok_or(VinumError::NotFitted)?;
        info!(k = self.k, inertia = best.inertia, iterations = best.n_iter, "k-means fitted");

        self.centroids = Some(best.centroids);
        self.labels = Some(best.labels);
        self.inertia = Some(best.inertia);
        self.n_iter = best.n_iter;
        Ok(())
    }

    fn single_run<R: Rng + ?Sized>(&self, x: &Matrix, rng: &mut R) -> Result<Run> {
        let indices = sample_initial_indices(rng, x.nrows(), self.k);
        let mut centroids = Matrix::from_fn(self.k, x.ncols(), |c, j| x[(indices[c], j)]);
        let mut labels = assign_nearest(x, &centroids)?;
        let mut n_iter = 0;

        for iteration in 1..=self.max_iter {
            n_iter = iteration;

            let updated = update_centroids(x, &labels, &centroids);
            let shift: Float = updated
                .iter()
                .zip(centroids.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            centroids = updated;

            let next = assign_nearest(x, &centroids)?;
            let stable = next == labels;
            labels = next;

            if stable || shift <= self.tol {
                break;
            }
        }

        let inertia = labels
            .iter()
            .enumerate()
            .map(|(i, &c)| squared_euclidean(x, i, &centroids, c))
            .sum();

        Ok(Run {
            centroids,
            labels,
            inertia,
            n_iter,
        })
    }

    /// Predicts cluster labels for the rows of `x`.
    ///
    /// # Errors
    ///
    /// - [`VinumError::NotFitted`] if model not fitted
    /// - [`VinumError::ShapeMismatch`] if `x.ncols()` doesn't match training data
    /// - [`VinumError::InvalidValue`] if `NaN` encountered
    pub fn predict(&self, x: &Matrix) -> Result<Assignments> {
        let centroids = self.centroids.as_ref().ok_or(VinumError::NotFitted)?;

        if x.ncols() != centroids.ncols() {
            return Err(VinumError::ShapeMismatch {
                expected: format!("Expected {} features", centroids.ncols()),
                got: format!("Got {} features", x.ncols()),
            });
        }

        assign_nearest(x, centroids)
    }

    pub fn centroids(&self) -> Option<&Matrix> {
        self.centroids.as_ref()
    }

    pub fn labels(&self) -> Option<&[Label]> {
        self.labels.as_deref()
    }

    pub fn inertia(&self) -> Option<Float> {
        self.inertia
    }

    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns the number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }
}

fn squared_euclidean(x: &Matrix, i: usize, centroids: &Matrix, c: usize) -> Float {
    x.row(i)
        .iter()
        .zip(centroids.row(c).iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

fn nearest(x: &Matrix, i: usize, centroids: &Matrix) -> Result<Label> {
    let mut min_dist2 = Float::INFINITY;
    let mut best_cluster = 0;

    for c in 0..centroids.nrows() {
        let d2 = squared_euclidean(x, i, centroids, c);

        if d2.is_nan() {
            return Err(VinumError::InvalidValue {
                message: "NaN encountered in distance computation".into(),
            });
        }

        if d2 < min_dist2 {
            min_dist2 = d2;
            best_cluster = c;
        }
    }

    Ok(best_cluster)
}

fn assign_nearest(x: &Matrix, centroids: &Matrix) -> Result<Assignments> {
    let mut labels = vec![0usize; x.nrows()];

    #[cfg(feature = "parallel")]
    {
        labels
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, label)| {
                *label = nearest(x, i, centroids)?;
                Ok::<(), VinumError>(())
            })?;
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, label) in labels.iter_mut().enumerate() {
            *label = nearest(x, i, centroids)?;
        }
    }

    Ok(labels)
}

/// Means of the assigned rows; an empty cluster keeps its previous centroid.
fn update_centroids(x: &Matrix, labels: &[Label], previous: &Matrix) -> Matrix {
    let k = previous.nrows();
    let d = x.ncols();
    let mut sums = Matrix::zeros(k, d);
    let mut counts = vec![0usize; k];

    for (i, &cluster) in labels.iter().enumerate() {
        for j in 0..d {
            sums[(cluster, j)] += x[(i, j)];
        }
        counts[cluster] += 1;
    }

    for (c, &count) in counts.iter().enumerate() {
        if count == 0 {
            sums.row_mut(c).copy_from(&previous.row(c));
        } else {
            let count_f = count as Float;
            for j in 0..d {
                sums[(c, j)] /= count_f;
            }
        }
    }

    sums
}
