//! Tallies and renders clustering results.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use vinum_core::{Label, Result, VinumError};

use crate::sweep::{ClusteringOutcome, SweepEntry};

/// Member counts (and member rows) per cluster index for one clustering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub k: usize,
    /// `counts[c]` is the number of rows labelled `c`.
    pub counts: Vec<usize>,
    /// Row indices per cluster, in row order.
    pub members: Vec<Vec<usize>>,
}

impl ClusterSummary {
    /// Groups row indices by label.
    ///
    /// # Errors
    ///
    /// - [`VinumError::InvalidValue`] if a label is `>= k`
    pub fn from_assignments(k: usize, assignments: &[Label]) -> Result<Self> {
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];

        for (row, &label) in assignments.iter().enumerate() {
            members
                .get_mut(label)
                .ok_or_else(|| VinumError::InvalidValue {
                    message: format!("label {} out of range for k = {}", label, k),
                })?
                .push(row);
        }

        let counts = members.iter().map(Vec::len).collect();
        Ok(Self { k, counts, members })
    }

    /// Total number of rows summarized.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `Cluster N has M entities` lines for the non-empty clusters, numbered
    /// from 1, optionally followed by the member names.
    pub fn render(&self, with_members: bool) -> String {
        let mut out = String::new();

        for (c, (&count, rows)) in self.counts.iter().zip(&self.members).enumerate() {
            if count == 0 {
                continue;
            }

            out.push_str(&format!("Cluster {} has {} entities\n", c + 1, count));
            if with_members {
                let names: Vec<String> = rows.iter().map(|&i| row_name(i)).collect();
                out.push_str(&format!("    {}\n", names.join(", ")));
            }
        }

        out
    }
}

/// Display name of a data row.
pub fn row_name(row: usize) -> String {
    format!("wine{}", row)
}

/// Plain-text report of a whole sweep.
pub fn render_sweep(entries: &[SweepEntry], with_members: bool) -> String {
    let mut out = String::new();

    for entry in entries {
        out.push_str(&format!("\nNumber of Clusters: {}\n", entry.k));

        match &entry.result {
            Ok(outcome) => out.push_str(&outcome.summary.render(with_members)),
            Err(err) => out.push_str(&format!("k-medians failed: {}\n", err)),
        }

        match &entry.reference {
            Some(Ok(outcome)) => {
                out.push_str(&format!("Reference k-means (inertia {:.4}):\n", outcome.cost));
                out.push_str(&outcome.summary.render(with_members));
            }
            Some(Err(err)) => out.push_str(&format!("Reference k-means failed: {}\n", err)),
            None => {}
        }
    }

    out
}

/// JSON view of a whole sweep; failures carry their error message.
pub fn sweep_to_json(entries: &[SweepEntry]) -> Value {
    fn outcome(result: &Result<ClusteringOutcome>) -> Value {
        match result {
            Ok(outcome) => json!({ "ok": outcome }),
            Err(err) => json!({ "error": err.to_string() }),
        }
    }

    Value::Array(
        entries
            .iter()
            .map(|entry| {
                json!({
                    "k": entry.k,
                    "elapsed_secs": entry.elapsed.as_secs_f64(),
                    "kmedians": outcome(&entry.result),
                    "reference": entry.reference.as_ref().map(outcome),
                })
            })
            .collect(),
    )
}
