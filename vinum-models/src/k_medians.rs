#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use rand::Rng;
use tracing::{debug, info, warn};
use vinum_core::stats::median;
use vinum_core::{manhattan, Assignments, Float, Label, Matrix, Result, VinumError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// When two consecutive median sets count as the same.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Convergence {
    /// Every coordinate of the new medians equals the previous one exactly.
    #[default]
    Exact,
    /// The largest absolute coordinate change is at most the given tolerance.
    Tolerance(Float),
}

impl Convergence {
    /// Returns `true` when `candidate` is a fixed point relative to `previous`.
    pub fn is_reached(&self, previous: &Matrix, candidate: &Matrix) -> bool {
        match *self {
            Convergence::Exact => previous == candidate,
            Convergence::Tolerance(tol) => max_shift(previous, candidate) <= tol,
        }
    }
}

/// What the update step does with a cluster that lost all of its rows.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Abort the run with [`VinumError::EmptyCluster`].
    #[default]
    Fail,
    /// Keep the cluster's previous median row unchanged.
    RetainPrevious,
}

/// Settings for a single k-medians run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMediansConfig {
    /// Number of clusters, `2 <= k < n_samples`.
    pub k: usize,
    /// Cap on update rounds before giving up with [`VinumError::NonConvergence`].
    pub max_iter: usize,
    /// When two consecutive median sets count as converged.
    pub convergence: Convergence,
    /// What happens when a cluster loses all of its rows.
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for KMediansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: 300,
            convergence: Convergence::Exact,
            empty_cluster: EmptyClusterPolicy::Fail,
        }
    }
}

impl KMediansConfig {
    /// Checks the settings that do not depend on the data.
    ///
    /// # Errors
    ///
    /// - [`VinumError::InvalidHyperparameter`] if `max_iter == 0` or the
    ///   tolerance is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(VinumError::InvalidHyperparameter {
                name: "max_iter".into(),
                value: "0".into(),
            });
        }

        if let Convergence::Tolerance(tol) = self.convergence {
            if !tol.is_finite() || tol < 0.0 {
                return Err(VinumError::InvalidHyperparameter {
                    name: "tolerance".into(),
                    value: tol.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// **K-Medians clustering** using Manhattan (L1) distance.
///
/// K-Medians is Lloyd's algorithm with two substitutions:
/// - **Manhattan distance** instead of Euclidean distance
/// - **Coordinate-wise median** instead of mean for the centroid update
///
/// which makes it more robust to outliers than K-Means.
///
/// # Algorithm
///
/// 1. Pick `k` distinct rows uniformly at random as the initial medians
/// 2. Assign every row to its nearest median (lowest index wins ties)
/// 3. Recompute each median as the coordinate-wise median of its rows
/// 4. Stop once the recomputed medians equal the previous ones, otherwise
///    reassign and go back to 3
///
/// The randomness source is passed to [`fit`](KMedians::fit), so a seeded
/// generator gives reproducible runs.
///
/// # Convergence
///
/// By default convergence means an exact fixed point. A tolerance can be set
/// with [`convergence`](KMedians::convergence). Runs that do not settle within
/// `max_iter` rounds fail with [`VinumError::NonConvergence`].
///
/// # Errors
///
/// - [`VinumError::EmptyInput`] if input has zero rows or columns
/// - [`VinumError::InvalidK`] unless `2 <= k < n_samples`
/// - [`VinumError::InvalidHyperparameter`] for a zero `max_iter` or bad tolerance
/// - [`VinumError::EmptyCluster`] if a cluster runs empty under [`EmptyClusterPolicy::Fail`]
/// - [`VinumError::NonConvergence`] if `max_iter` is exhausted
/// - [`VinumError::InvalidValue`] if `NaN` encountered
/// - [`VinumError::NotFitted`] if prediction called before fitting
#[derive(Debug, Clone)]
pub struct KMedians {
    /// Cluster medians of shape `(k, n_features)`.
    medians: Option<Matrix>,
    /// Final assignment of the training rows.
    assignments: Option<Assignments>,
    /// Sum of L1 distances of training rows to their median.
    cost: Option<Float>,
    /// Update rounds performed by the last successful fit.
    n_iter: usize,
    config: KMediansConfig,
}

impl Default for KMedians {
    fn default() -> Self {
        Self::with_config(KMediansConfig::default())
    }
}

impl KMedians {
    /// Creates a new, unfitted K-Medians model with exact convergence and
    /// fail-fast empty cluster handling.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let kmedians = KMedians::new(3, 100);
    /// ```
    pub fn new(k: usize, max_iter: usize) -> Self {
        Self::with_config(KMediansConfig {
            k,
            max_iter,
            ..KMediansConfig::default()
        })
    }

    /// Creates an unfitted model from a full [`KMediansConfig`].
    pub fn with_config(config: KMediansConfig) -> Self {
        Self {
            medians: None,
            assignments: None,
            cost: None,
            n_iter: 0,
            config,
        }
    }

    /// Sets the convergence test.
    pub fn convergence(mut self, convergence: Convergence) -> Self {
        self.config.convergence = convergence;
        self
    }

    /// Sets the handling of clusters that run empty.
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster = policy;
        self
    }

    /// Fits the model on `x`, drawing the initial medians from `rng`.
    ///
    /// Nothing is drawn from `rng` when validation fails.
    ///
    /// # Complexity
    ///
    /// Let `n = n_samples`, `d = n_features`, `t = iterations until convergence`.
    /// - Time: `O(t * k * n * d + t * d * n log n)` (the log factor is the median sort)
    /// - Space: `O(k * d + n)`
    pub fn fit<R: Rng + ?Sized>(&mut self, x: &Matrix, rng: &mut R) -> Result<()> {
        self.medians = None;
        self.assignments = None;
        self.cost = None;
        self.n_iter = 0;

        let n = x.nrows();
        let k = self.config.k;

        if n == 0 || x.ncols() == 0 {
            return Err(VinumError::EmptyInput);
        }
        check_k(k, n)?;
        self.config.validate()?;

        let indices = sample_initial_indices(rng, n, k);
        debug!(k, ?indices, "initial medians drawn");

        let mut medians = Matrix::from_fn(k, x.ncols(), |c, j| x[(indices[c], j)]);
        let mut assignments = assign_clusters(x, &medians)?;

        for iteration in 1..=self.config.max_iter {
            let candidate =
                update_medians(x, &assignments, &medians, self.config.empty_cluster)?;
            let converged = self.config.convergence.is_reached(&medians, &candidate);
            debug!(k, iteration, shift = max_shift(&medians, &candidate), "medians updated");

            medians = candidate;
            assignments = assign_clusters(x, &medians)?;

            if converged {
                let cost = total_cost(x, &medians, &assignments);
                info!(k, iterations = iteration, cost, "k-medians converged");

                self.medians = Some(medians);
                self.assignments = Some(assignments);
                self.cost = Some(cost);
                self.n_iter = iteration;
                return Ok(());
            }
        }

        Err(VinumError::NonConvergence {
            max_iter: self.config.max_iter,
        })
    }

    /// Fits the model and returns the final assignment of the rows of `x`.
    pub fn fit_predict<R: Rng + ?Sized>(&mut self, x: &Matrix, rng: &mut R) -> Result<Assignments> {
        self.fit(x, rng)?;
        self.assignments.clone().ok_or(VinumError::NotFitted)
    }

    /// Assigns the rows of `x` to the fitted medians.
    ///
    /// # Errors
    ///
    /// - [`VinumError::NotFitted`] if model not fitted
    /// - [`VinumError::ShapeMismatch`] if `x.ncols()` doesn't match training data
    /// - [`VinumError::InvalidValue`] if `NaN` encountered
    pub fn predict(&self, x: &Matrix) -> Result<Assignments> {
        let medians = self.medians.as_ref().ok_or(VinumError::NotFitted)?;
        assign_clusters(x, medians)
    }

    /// Returns the learned cluster medians, or `None` if not fitted.
    pub fn medians(&self) -> Option<&Matrix> {
        self.medians.as_ref()
    }

    /// Returns the assignment of the training rows, or `None` if not fitted.
    pub fn assignments(&self) -> Option<&[Label]> {
        self.assignments.as_deref()
    }

    /// Sum of Manhattan distances from each training row to its median.
    pub fn cost(&self) -> Option<Float> {
        self.cost
    }

    /// Update rounds taken by the last successful fit.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Returns the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Settings the model fits with.
    pub fn config(&self) -> &KMediansConfig {
        &self.config
    }
}

/// Fails with [`VinumError::InvalidK`] unless `2 <= k < n`.
pub fn check_k(k: usize, n: usize) -> Result<()> {
    if k < 2 || k >= n {
        return Err(VinumError::InvalidK { k, n });
    }
    Ok(())
}

/// Draws `k` distinct row indices out of `0..n`, uniformly and without
/// replacement.
///
/// # Panics
///
/// Panics if `k > n`; callers validate with [`check_k`] first.
pub fn sample_initial_indices<R: Rng + ?Sized>(rng: &mut R, n: usize, k: usize) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k).into_vec()
}

/// Assigns each row of `x` to its nearest centroid by Manhattan distance.
///
/// Centroids are scanned in index order and only a strictly smaller distance
/// replaces the current best, so ties go to the lowest index.
///
/// # Errors
///
/// - [`VinumError::ShapeMismatch`] if `x` and `centroids` differ in column count
/// - [`VinumError::InvalidValue`] if `NaN` encountered
pub fn assign_clusters(x: &Matrix, centroids: &Matrix) -> Result<Assignments> {
    if x.ncols() != centroids.ncols() {
        return Err(VinumError::ShapeMismatch {
            expected: format!("Expected {} features", centroids.ncols()),
            got: format!("Got {} features", x.ncols()),
        });
    }

    let mut assignments = vec![0usize; x.nrows()];

    #[cfg(feature = "parallel")]
    {
        assignments
            .par_iter_mut()
            .enumerate()
            .try_for_each(|(i, label)| {
                *label = nearest_centroid(x, i, centroids)?;
                Ok::<(), VinumError>(())
            })?;
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, label) in assignments.iter_mut().enumerate() {
            *label = nearest_centroid(x, i, centroids)?;
        }
    }

    Ok(assignments)
}

fn nearest_centroid(x: &Matrix, i: usize, centroids: &Matrix) -> Result<Label> {
    let xi = x.row(i);
    let mut min_dist = Float::INFINITY;
    let mut best_cluster = 0;

    for c in 0..centroids.nrows() {
        let d1 = manhattan(xi.iter(), centroids.row(c).iter());

        if d1.is_nan() {
            return Err(VinumError::InvalidValue {
                message: "NaN encountered in distance computation".into(),
            });
        }

        if d1 < min_dist {
            min_dist = d1;
            best_cluster = c;
        }
    }

    Ok(best_cluster)
}

/// Recomputes each cluster's median row from the rows assigned to it.
///
/// The number of clusters is `previous.nrows()`; `previous` also supplies the
/// rows kept under [`EmptyClusterPolicy::RetainPrevious`].
///
/// # Errors
///
/// - [`VinumError::ShapeMismatch`] if `assignments` or `previous` don't fit `x`
/// - [`VinumError::InvalidValue`] if a label is `>= k`
/// - [`VinumError::EmptyCluster`] for an empty cluster under [`EmptyClusterPolicy::Fail`]
pub fn update_medians(
    x: &Matrix,
    assignments: &[Label],
    previous: &Matrix,
    policy: EmptyClusterPolicy,
) -> Result<Matrix> {
    let k = previous.nrows();
    let d = x.ncols();

    if assignments.len() != x.nrows() {
        return Err(VinumError::ShapeMismatch {
            expected: format!("Expected {} assignments", x.nrows()),
            got: format!("Got {} assignments", assignments.len()),
        });
    }

    if previous.ncols() != d {
        return Err(VinumError::ShapeMismatch {
            expected: format!("Expected {} features", d),
            got: format!("Got {} features", previous.ncols()),
        });
    }

    let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, &cluster) in assignments.iter().enumerate() {
        members
            .get_mut(cluster)
            .ok_or_else(|| VinumError::InvalidValue {
                message: format!("label {} out of range for k = {}", cluster, k),
            })?
            .push(i);
    }

    let mut medians = Matrix::zeros(k, d);
    let mut values: Vec<Float> = Vec::new();

    for (c, rows) in members.iter().enumerate() {
        if rows.is_empty() {
            match policy {
                EmptyClusterPolicy::Fail => return Err(VinumError::EmptyCluster { cluster: c }),
                EmptyClusterPolicy::RetainPrevious => {
                    warn!(cluster = c, "cluster is empty, keeping its previous median");
                    medians.row_mut(c).copy_from(&previous.row(c));
                    continue;
                }
            }
        }

        for j in 0..d {
            values.clear();
            values.extend(rows.iter().map(|&i| x[(i, j)]));
            medians[(c, j)] = median(&values)?;
        }
    }

    Ok(medians)
}

/// Largest absolute coordinate difference between two equally shaped matrices.
fn max_shift(a: &Matrix, b: &Matrix) -> Float {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, Float::max)
}

fn total_cost(x: &Matrix, medians: &Matrix, assignments: &[Label]) -> Float {
    assignments
        .iter()
        .enumerate()
        .map(|(i, &c)| manhattan(x.row(i).iter(), medians.row(c).iter()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use vinum_core::matrix::from_rows;

    fn separated() -> Matrix {
        from_rows(&[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_kmedians_new() {
        let kmedians = KMedians::new(3, 100);
        assert_eq!(kmedians.k(), 3);
        assert_eq!(kmedians.config().max_iter, 100);
        assert_eq!(kmedians.config().convergence, Convergence::Exact);
        assert_eq!(kmedians.config().empty_cluster, EmptyClusterPolicy::Fail);
        assert!(kmedians.medians().is_none());
    }

    #[test]
    fn test_kmedians_empty_data() {
        let mut kmedians = KMedians::new(2, 100);
        let mut rng = StdRng::seed_from_u64(0);
        let result = kmedians.fit(&Matrix::zeros(0, 2), &mut rng);
        assert!(matches!(result, Err(VinumError::EmptyInput)));
    }

    #[test]
    fn test_kmedians_invalid_k_does_no_work() {
        let x = separated();

        for k in [0, 1, 4, 5] {
            let mut kmedians = KMedians::new(k, 100);
            let mut rng = StdRng::seed_from_u64(11);
            let mut untouched = rng.clone();

            let result = kmedians.fit(&x, &mut rng);
            assert!(matches!(result, Err(VinumError::InvalidK { n: 4, .. })));
            assert!(kmedians.medians().is_none());
            assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
        }
    }

    #[test]
    fn test_kmedians_separated_pairs_for_any_seed() {
        let x = separated();

        for seed in 0..64 {
            let mut kmedians = KMedians::new(2, 100);
            let mut rng = StdRng::seed_from_u64(seed);
            let labels = kmedians.fit_predict(&x, &mut rng).unwrap();

            assert_eq!(labels[0], labels[1]);
            assert_eq!(labels[2], labels[3]);
            assert_ne!(labels[0], labels[2]);
        }
    }

    #[test]
    fn test_kmedians_converged_medians() {
        let x = separated();
        let mut kmedians = KMedians::new(2, 100);
        let mut rng = StdRng::seed_from_u64(3);
        kmedians.fit(&x, &mut rng).unwrap();

        let medians = kmedians.medians().unwrap();
        let labels = kmedians.assignments().unwrap();
        let low = labels[0];
        let high = labels[2];

        assert_eq!(medians[(low, 0)], 0.0);
        assert_eq!(medians[(low, 1)], 0.5);
        assert_eq!(medians[(high, 0)], 10.0);
        assert_eq!(medians[(high, 1)], 10.5);
        assert_eq!(kmedians.cost(), Some(2.0));
    }

    #[test]
    fn test_kmedians_fixed_point_is_stable() {
        let x = from_rows(&[
            vec![0.1, 2.0, -1.0],
            vec![0.3, 2.5, -0.5],
            vec![4.0, -3.0, 2.0],
            vec![4.2, -2.9, 2.5],
            vec![4.1, -3.2, 1.5],
            vec![9.0, 9.0, 9.0],
            vec![8.5, 9.5, 8.0],
        ])
        .unwrap();

        for seed in 0..16 {
            let mut kmedians = KMedians::new(3, 300)
                .empty_cluster_policy(EmptyClusterPolicy::RetainPrevious);
            let mut rng = StdRng::seed_from_u64(seed);
            kmedians.fit(&x, &mut rng).unwrap();

            let medians = kmedians.medians().unwrap();
            let labels = assign_clusters(&x, medians).unwrap();
            assert_eq!(labels.as_slice(), kmedians.assignments().unwrap());

            let again =
                update_medians(&x, &labels, medians, EmptyClusterPolicy::RetainPrevious).unwrap();
            assert_eq!(&again, medians);
        }
    }

    #[test]
    fn test_kmedians_assignments_are_total() {
        let x = Matrix::from_fn(40, 3, |i, j| ((i * 7 + j * 13) % 17) as Float * 0.5);
        let mut kmedians = KMedians::new(4, 300)
            .empty_cluster_policy(EmptyClusterPolicy::RetainPrevious);
        let mut rng = StdRng::seed_from_u64(5);
        let labels = kmedians.fit_predict(&x, &mut rng).unwrap();

        assert_eq!(labels.len(), x.nrows());
        assert!(labels.iter().all(|&c| c < 4));
    }

    #[test]
    fn test_kmedians_same_seed_same_result() {
        let x = Matrix::from_fn(30, 2, |i, j| ((i * 31 + j * 17) % 23) as Float);
        let policy = EmptyClusterPolicy::RetainPrevious;

        let mut a = KMedians::new(3, 300).empty_cluster_policy(policy);
        let mut b = KMedians::new(3, 300).empty_cluster_policy(policy);
        let la = a.fit_predict(&x, &mut StdRng::seed_from_u64(42)).unwrap();
        let lb = b.fit_predict(&x, &mut StdRng::seed_from_u64(42)).unwrap();

        assert_eq!(la, lb);
        assert_eq!(a.medians(), b.medians());
    }

    #[test]
    fn test_kmedians_identical_points() {
        let x = from_rows(&[
            vec![5.0, 5.0],
            vec![5.0, 5.0],
            vec![5.0, 5.0],
            vec![5.0, 5.0],
        ])
        .unwrap();

        // Both initial medians coincide, so the second one never wins a row.
        let mut strict = KMedians::new(2, 100);
        let result = strict.fit(&x, &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(VinumError::EmptyCluster { cluster: 1 })));

        let mut lenient =
            KMedians::new(2, 100).empty_cluster_policy(EmptyClusterPolicy::RetainPrevious);
        let labels = lenient.fit_predict(&x, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!(labels.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_kmedians_non_convergence() {
        // The first update always moves the medians off the sampled rows.
        let mut kmedians = KMedians::new(2, 1);
        let result = kmedians.fit(&separated(), &mut StdRng::seed_from_u64(9));
        assert!(matches!(
            result,
            Err(VinumError::NonConvergence { max_iter: 1 })
        ));
        assert!(kmedians.medians().is_none());
    }

    #[test]
    fn test_kmedians_tolerance_convergence() {
        let mut kmedians = KMedians::new(2, 1).convergence(Convergence::Tolerance(100.0));
        kmedians
            .fit(&separated(), &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(kmedians.n_iter(), 1);
    }

    #[test]
    fn test_kmedians_invalid_config() {
        let x = separated();

        let mut zero_iter = KMedians::new(2, 0);
        let result = zero_iter.fit(&x, &mut StdRng::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(VinumError::InvalidHyperparameter { .. })
        ));

        let mut negative = KMedians::new(2, 10).convergence(Convergence::Tolerance(-1.0));
        let result = negative.fit(&x, &mut StdRng::seed_from_u64(0));
        assert!(matches!(
            result,
            Err(VinumError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_kmedians_predict_not_fitted() {
        let kmedians = KMedians::new(2, 100);
        let x = from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert!(matches!(kmedians.predict(&x), Err(VinumError::NotFitted)));
    }

    #[test]
    fn test_kmedians_predict() {
        let mut kmedians = KMedians::new(2, 100);
        let labels = kmedians
            .fit_predict(&separated(), &mut StdRng::seed_from_u64(2))
            .unwrap();

        let queries = from_rows(&[vec![-1.0, 0.5], vec![12.0, 9.0]]).unwrap();
        let predicted = kmedians.predict(&queries).unwrap();
        assert_eq!(predicted, vec![labels[0], labels[2]]);

        let wrong = from_rows(&[vec![1.0]]).unwrap();
        assert!(matches!(
            kmedians.predict(&wrong),
            Err(VinumError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_sample_initial_indices_are_distinct() {
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..50 {
            let mut indices = sample_initial_indices(&mut rng, 10, 9);
            assert!(indices.iter().all(|&i| i < 10));
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), 9);
        }
    }

    #[test]
    fn test_assign_ties_go_to_lowest_index() {
        let x = from_rows(&[vec![1.0, 1.0]]).unwrap();
        let centroids = from_rows(&[vec![2.0, 2.0], vec![0.0, 0.0], vec![1.0, 3.0]]).unwrap();
        assert_eq!(assign_clusters(&x, &centroids).unwrap(), vec![0]);
    }

    #[test]
    fn test_assign_nan() {
        let x = from_rows(&[vec![Float::NAN, 1.0]]).unwrap();
        let centroids = from_rows(&[vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
        assert!(matches!(
            assign_clusters(&x, &centroids),
            Err(VinumError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_update_medians_per_column() {
        let x = from_rows(&[
            vec![1.0, 10.0],
            vec![3.0, 30.0],
            vec![2.0, 50.0],
            vec![7.0, 0.0],
            vec![9.0, 4.0],
        ])
        .unwrap();
        let previous = Matrix::zeros(2, 2);

        let medians =
            update_medians(&x, &[0, 0, 0, 1, 1], &previous, EmptyClusterPolicy::Fail).unwrap();
        assert_eq!(medians, from_rows(&[vec![2.0, 30.0], vec![8.0, 2.0]]).unwrap());
    }

    #[test]
    fn test_update_medians_empty_cluster() {
        let x = separated();
        let previous = from_rows(&[vec![0.0, 0.0], vec![-4.0, 4.0]]).unwrap();
        let labels = [0, 0, 0, 0];

        let result = update_medians(&x, &labels, &previous, EmptyClusterPolicy::Fail);
        assert!(matches!(result, Err(VinumError::EmptyCluster { cluster: 1 })));

        let kept =
            update_medians(&x, &labels, &previous, EmptyClusterPolicy::RetainPrevious).unwrap();
        assert_eq!(kept[(1, 0)], -4.0);
        assert_eq!(kept[(1, 1)], 4.0);
    }

    #[test]
    fn test_update_medians_label_out_of_range() {
        let x = separated();
        let previous = Matrix::zeros(2, 2);
        let result = update_medians(&x, &[0, 1, 2, 0], &previous, EmptyClusterPolicy::Fail);
        assert!(matches!(result, Err(VinumError::InvalidValue { .. })));
    }

    #[test]
    fn test_convergence_modes() {
        let a = from_rows(&[vec![0.0, 1.0]]).unwrap();
        let b = from_rows(&[vec![0.0, 1.0 + 1e-9]]).unwrap();

        assert!(Convergence::Exact.is_reached(&a, &a));
        assert!(!Convergence::Exact.is_reached(&a, &b));
        assert!(Convergence::Tolerance(1e-6).is_reached(&a, &b));
    }
}
