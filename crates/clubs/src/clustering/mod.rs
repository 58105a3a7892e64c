//! Cluster labelings, their invariants, and the operations that build them.

mod assemble;
mod breakup;
mod stats;

pub use assemble::{cluster, cluster_within_radius};
pub use breakup::break_clustering;
pub use stats::ClusteringStats;

use crate::{
    Error, Result,
    ids::{self, Label, UNASSIGNED, Vid},
};

/// A partition of points into labeled clusters.
///
/// Each point carries a label in `0..num_clusters`, or [`UNASSIGNED`] while
/// a clustering is still being assembled. The operations in this crate
/// return fully assigned clusterings; partially assigned ones can only be
/// observed when supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Clustering {
    /// The cluster of each point, or [`UNASSIGNED`].
    labels: Vec<Label>,
    /// The number of clusters; valid labels are `0..num_clusters`.
    num_clusters: usize,
}

impl Clustering {
    /// Creates a clustering with every point unassigned.
    pub(crate) fn unassigned(num_points: usize) -> Result<Self> {
        let mut labels = Vec::new();
        labels.try_reserve_exact(num_points)?;
        labels.resize(num_points, UNASSIGNED);
        Ok(Self {
            labels,
            num_clusters: 0,
        })
    }

    /// Creates a clustering from caller-supplied labels.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if any label is neither [`UNASSIGNED`] nor below
    ///   `num_clusters`.
    /// - `ProblemTooLarge` if the point or cluster count does not fit the
    ///   configured id widths.
    pub fn from_labels(labels: Vec<Label>, num_clusters: usize) -> Result<Self> {
        ids::try_vid(labels.len())?;
        ids::try_label(num_clusters)?;
        if labels
            .iter()
            .any(|&l| l != UNASSIGNED && ids::label_index(l) >= num_clusters)
        {
            return Err(Error::InvalidInput(format!(
                "labels must be below {num_clusters} or the unassigned sentinel"
            )));
        }
        Ok(Self {
            labels,
            num_clusters,
        })
    }

    /// Returns the label of each point.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns the number of clusters.
    #[must_use]
    pub const fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    /// Returns the number of points.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.labels.len()
    }

    /// Returns the label of point `v`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `v` is out of bounds.
    pub fn label_of(&self, v: usize) -> Result<Label> {
        self.labels.get(v).copied().ok_or_else(|| {
            Error::InvalidInput(format!("point index {v} out of bounds"))
        })
    }

    /// Relabels point `v`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `v` is out of bounds or `label` is neither a valid
    /// cluster nor [`UNASSIGNED`].
    pub fn set_label(&mut self, v: usize, label: Label) -> Result<()> {
        if label != UNASSIGNED && ids::label_index(label) >= self.num_clusters {
            return Err(Error::InvalidInput(format!(
                "label {label} is out of range"
            )));
        }
        match self.labels.get_mut(v) {
            Some(slot) => {
                *slot = label;
                Ok(())
            }
            None => Err(Error::InvalidInput(format!(
                "point index {v} out of bounds"
            ))),
        }
    }

    /// Iterates over the points of cluster `c`, in ascending point order.
    pub fn iter_members(&self, c: Label) -> impl Iterator<Item = Vid> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |&(_, &l)| l == c)
            .map(|(v, _)| ids::as_vid(v))
    }

    /// Returns the size of every cluster.
    #[must_use]
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0_usize; self.num_clusters];
        for &l in &self.labels {
            if l != UNASSIGNED {
                sizes[ids::label_index(l)] += 1;
            }
        }
        sizes
    }

    /// Returns the number of points without a cluster.
    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == UNASSIGNED).count()
    }

    /// Checks the labeling invariants: every label is in range, and, when
    /// `require_populated`, every cluster has at least one member.
    #[must_use]
    pub fn is_sound(&self, require_populated: bool) -> bool {
        if self
            .labels
            .iter()
            .any(|&l| l != UNASSIGNED && ids::label_index(l) >= self.num_clusters)
        {
            return false;
        }
        if require_populated {
            let mut populated = vec![false; self.num_clusters];
            for &l in &self.labels {
                if l != UNASSIGNED {
                    populated[ids::label_index(l)] = true;
                }
            }
            if !populated.iter().all(|&p| p) {
                return false;
            }
        }
        true
    }
}
