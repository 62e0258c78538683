//! Runs the clustering for a range of `k` values.
//!
//! Each `k` gets its own generator, derived from the base seed and `k`, so a
//! seeded sweep gives the same labels whether it runs sequentially or with the
//! `parallel` feature. A failing `k` is recorded and the sweep moves on.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vinum_core::{Float, Matrix, Result, VinumError};
use vinum_models::{Convergence, EmptyClusterPolicy, KMeans, KMedians, KMediansConfig};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::report::ClusterSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub min_k: usize,
    pub max_k: usize,
    pub max_iter: usize,
    /// Base seed; `None` seeds every run from the OS.
    pub seed: Option<u64>,
    pub convergence: Convergence,
    pub empty_cluster: EmptyClusterPolicy,
    /// Also run the k-means baseline for every `k`.
    pub compare: bool,
    /// Restarts of the k-means baseline.
    pub n_init: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_k: 2,
            max_k: 6,
            max_iter: 300,
            seed: None,
            convergence: Convergence::Exact,
            empty_cluster: EmptyClusterPolicy::Fail,
            compare: false,
            n_init: 10,
        }
    }
}

impl SweepConfig {
    pub fn ks(&self) -> RangeInclusive<usize> {
        self.min_k..=self.max_k
    }

    pub fn kmedians_config(&self, k: usize) -> KMediansConfig {
        KMediansConfig {
            k,
            max_iter: self.max_iter,
            convergence: self.convergence,
            empty_cluster: self.empty_cluster,
        }
    }

    /// Rejects settings that would make every run fail the same way.
    pub fn validate(&self) -> Result<()> {
        if self.min_k > self.max_k {
            return Err(VinumError::InvalidHyperparameter {
                name: "k range".into(),
                value: format!("{}..={}", self.min_k, self.max_k),
            });
        }

        if self.compare && self.n_init == 0 {
            return Err(VinumError::InvalidHyperparameter {
                name: "n_init".into(),
                value: "0".into(),
            });
        }

        self.kmedians_config(self.min_k).validate()
    }

    fn rng_for(&self, k: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(k as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Result of one clustering: iterations, cost and cluster tally.
///
/// `cost` is the L1 cost for k-medians and the inertia for k-means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringOutcome {
    pub iterations: usize,
    pub cost: Float,
    pub summary: ClusterSummary,
}

#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub k: usize,
    pub elapsed: Duration,
    pub result: Result<ClusteringOutcome>,
    /// Baseline result, present when comparison is enabled.
    pub reference: Option<Result<ClusteringOutcome>>,
}

/// Clusters `x` once per `k` in the configured range.
///
/// `x` is expected to be standardized already.
///
/// # Errors
///
/// Only configuration errors abort the sweep; per-`k` failures end up in
/// [`SweepEntry::result`].
pub fn run_sweep(x: &Matrix, config: &SweepConfig) -> Result<Vec<SweepEntry>> {
    config.validate()?;

    let ks: Vec<usize> = config.ks().collect();

    #[cfg(feature = "parallel")]
    let entries = ks.into_par_iter().map(|k| run_k(x, config, k)).collect();

    #[cfg(not(feature = "parallel"))]
    let entries = ks.into_iter().map(|k| run_k(x, config, k)).collect();

    Ok(entries)
}

/// Clusters `x` for a single `k`.
pub fn run_k(x: &Matrix, config: &SweepConfig, k: usize) -> SweepEntry {
    let start = Instant::now();
    let mut rng = config.rng_for(k);

    let mut model = KMedians::with_config(config.kmedians_config(k));
    let result = model.fit(x, &mut rng).and_then(|()| {
        let labels = model.assignments().ok_or(VinumError::NotFitted)?;
        Ok(ClusteringOutcome {
            iterations: model.n_iter(),
            cost: model.cost().unwrap_or_default(),
            summary: ClusterSummary::from_assignments(k, labels)?,
        })
    });

    match &result {
        Ok(outcome) => info!(k, iterations = outcome.iterations, cost = outcome.cost, "clustered"),
        Err(err) => warn!(k, %err, "clustering failed"),
    }

    let reference = config.compare.then(|| {
        let mut baseline = KMeans::new(k, config.max_iter).n_init(config.n_init);
        baseline.fit(x, &mut rng).and_then(|()| {
            let labels = baseline.labels().ok_or(VinumError::NotFitted)?;
            Ok(ClusteringOutcome {
                iterations: baseline.n_iter(),
                cost: baseline.inertia().unwrap_or_default(),
                summary: ClusterSummary::from_assignments(k, labels)?,
            })
        })
    });

    SweepEntry {
        k,
        elapsed: start.elapsed(),
        result,
        reference,
    }
}
