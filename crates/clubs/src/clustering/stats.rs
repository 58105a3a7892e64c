//! Summary statistics of a clustering over its dataset.

use distances::{Number, number::Float};

use super::Clustering;
use crate::{Dataset, Error, Result, ids};

/// Size and within-cluster distance aggregates of a clustering.
///
/// Within-cluster distances are the pairwise distances among the members of
/// each cluster, pooled over all clusters; a singleton cluster contributes
/// none.
#[derive(Clone, Debug)]
#[must_use]
pub struct ClusteringStats<F: Float> {
    /// The number of points in the dataset.
    pub num_points: usize,
    /// The number of points with a cluster.
    pub num_assigned: usize,
    /// The number of clusters.
    pub num_clusters: usize,
    /// The size of the smallest cluster.
    pub min_cluster_size: usize,
    /// The size of the largest cluster.
    pub max_cluster_size: usize,
    /// The mean cluster size.
    pub avg_cluster_size: f64,
    /// The number of pooled within-cluster distances.
    pub num_within_dists: usize,
    /// The smallest within-cluster distance, or zero if there are none.
    pub min_within_dist: F,
    /// The largest within-cluster distance, or zero if there are none.
    pub max_within_dist: F,
    /// The mean within-cluster distance, or zero if there are none.
    pub avg_within_dist: F,
}

impl<F: Float> ClusteringStats<F> {
    /// Computes the statistics of `clustering` over `data`.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the clustering and dataset disagree on the point
    ///   count, or if the clustering has no clusters.
    /// - `OutOfMemory` from the distance buffers.
    pub fn new(clustering: &Clustering, data: &Dataset<F>) -> Result<Self> {
        if clustering.num_points() != data.row_count() {
            return Err(Error::InvalidInput(format!(
                "the clustering covers {} points but the dataset has {}",
                clustering.num_points(),
                data.row_count()
            )));
        }
        if clustering.num_clusters() == 0 {
            return Err(Error::InvalidInput(
                "the clustering has no clusters".to_string(),
            ));
        }

        let sizes = clustering.cluster_sizes();
        let num_assigned = sizes.iter().sum::<usize>();

        let mut num_within_dists = 0_usize;
        let mut sum = F::zero();
        let mut min = F::zero();
        let mut max = F::zero();
        for cl in 0..clustering.num_clusters() {
            let members = clustering
                .iter_members(ids::try_label(cl)?)
                .collect::<Vec<_>>();
            if members.len() < 2 {
                continue;
            }
            for d in data.pairwise_distances(Some(&members))? {
                if num_within_dists == 0 {
                    min = d;
                    max = d;
                } else {
                    if d < min {
                        min = d;
                    }
                    if d > max {
                        max = d;
                    }
                }
                sum = sum + d;
                num_within_dists += 1;
            }
        }
        let avg = if num_within_dists == 0 {
            F::zero()
        } else {
            sum / F::from(num_within_dists)
        };

        Ok(Self {
            num_points: clustering.num_points(),
            num_assigned,
            num_clusters: clustering.num_clusters(),
            min_cluster_size: sizes.iter().copied().min().unwrap_or(0),
            max_cluster_size: sizes.iter().copied().max().unwrap_or(0),
            avg_cluster_size: num_assigned.as_f64() / clustering.num_clusters().as_f64(),
            num_within_dists,
            min_within_dist: min,
            max_within_dist: max,
            avg_within_dist: avg,
        })
    }
}
