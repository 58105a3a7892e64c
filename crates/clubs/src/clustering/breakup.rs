//! Re-labels an existing clustering so every cluster fits the size bound.

use distances::number::Float;

use super::{Clustering, assemble};
use crate::{
    Dataset, Error, Result,
    ids::{self, UNASSIGNED},
    nng,
    seeds::{self, SeedMethod},
};

/// Rebuilds `clustering` so that every output cluster has at least
/// `size_constraint` points.
///
/// A cluster of more than `2 * size_constraint - 1` members could hold two
/// clusters, so it is split by clustering its members recursively: a
/// neighbor digraph over the member subset, seed selection, and a leftover
/// pass among the members (`batch_assign` as in [`cluster`](super::cluster)).
/// Clusters already inside the bound stay whole. Undersized clusters, and any points the input left unassigned,
/// are dissolved and join the cluster of their nearest assigned point.
///
/// # Errors
///
/// - `InvalidInput` if `size_constraint` is below 2 or the clustering and
///   dataset disagree on the point count.
/// - `NoNeighbors` if nothing remains to absorb the dissolved points.
/// - `OutOfMemory` or `ProblemTooLarge` from the working buffers.
pub fn break_clustering<F: Float>(
    clustering: &Clustering,
    data: &Dataset<F>,
    size_constraint: usize,
    batch_assign: bool,
) -> Result<Clustering> {
    let n = data.row_count();
    if size_constraint < 2 {
        return Err(Error::InvalidInput(
            "the size constraint must be at least 2".to_string(),
        ));
    }
    if clustering.num_points() != n {
        return Err(Error::InvalidInput(format!(
            "the clustering covers {} points but the dataset has {n}",
            clustering.num_points()
        )));
    }

    let mut out = Clustering::unassigned(n)?;
    let mut next = 0_usize;

    for cl in 0..clustering.num_clusters() {
        let members = clustering
            .iter_members(ids::try_label(cl)?)
            .collect::<Vec<_>>();

        if members.len() < size_constraint {
            // Too small to stand on its own; its members get re-assigned
            // below.
            continue;
        }
        if members.len() < 2 * size_constraint {
            let label = ids::try_label(next)?;
            for &m in &members {
                out.labels[ids::vid_index(m)] = label;
            }
            next += 1;
            continue;
        }

        ftlog::debug!(
            "splitting a cluster of {} members at size bound {size_constraint}",
            members.len()
        );
        let sub = nng::knn_subgraph(data, &members, size_constraint - 1, None)?;
        let found = seeds::find_seeds(&sub, SeedMethod::InwardsUpdating)?;
        debug_assert!(!found.is_empty());

        next = assemble::label_seed_neighborhoods(&mut out, &sub, &found, Some(&members), next)?;
        let seed_points = found
            .seeds()
            .iter()
            .map(|&s| members[ids::vid_index(s)])
            .collect::<Vec<_>>();
        assemble::assign_leftovers(data, &mut out, &seed_points, batch_assign, Some(&members))?;
    }

    out.num_clusters = next;
    ids::try_label(next)?;

    if out.labels.iter().any(|&l| l == UNASSIGNED) {
        assemble::assign_leftovers(data, &mut out, &[], true, None)?;
    }

    debug_assert!(out.is_sound(true));
    ftlog::debug!(
        "rebuilt {} clusters into {} clusters of at least {size_constraint}",
        clustering.num_clusters(),
        out.num_clusters
    );
    Ok(out)
}
