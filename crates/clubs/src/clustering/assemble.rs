//! Expands seeds into clusters and places the leftover points.

use distances::number::Float;

use super::Clustering;
use crate::{
    Dataset, Digraph, Error, Result,
    ids::{self, UNASSIGNED, VID_SENTINEL, Vid},
    knn::NnSearch,
    nng,
    seeds::{self, SeedMethod, SeedResult},
};

/// Computes a clustering of `data` in which every cluster has at least
/// `size_constraint` points.
///
/// Builds the nearest-neighbor digraph with `k = size_constraint - 1`,
/// selects seeds with the given method, labels each seed's closed
/// neighborhood as a cluster, and then places every remaining point: with
/// `batch_assign`, a leftover joins the cluster of its nearest
/// already-assigned point; without it, the cluster of its nearest seed.
///
/// Identical inputs produce bit-identical labelings.
///
/// # Errors
///
/// - `InvalidInput` if `size_constraint` is below 2 or exceeds the point
///   count.
/// - `NoNeighbors` if no seed could be found.
/// - `OutOfMemory` or `ProblemTooLarge` from the working buffers.
pub fn cluster<F: Float>(
    data: &Dataset<F>,
    size_constraint: usize,
    seed_method: SeedMethod,
    batch_assign: bool,
) -> Result<Clustering> {
    cluster_impl(data, size_constraint, seed_method, batch_assign, None)
}

/// Like [`cluster`], but a point may only list neighbors strictly closer
/// than `radius` in its neighborhood.
///
/// A point that cannot collect `size_constraint - 1` neighbors inside the
/// radius cannot anchor a cluster; it is still placed by the assignment
/// pass, which is not radius-limited.
///
/// # Errors
///
/// Same as [`cluster`], plus `InvalidInput` for a non-positive radius.
pub fn cluster_within_radius<F: Float>(
    data: &Dataset<F>,
    size_constraint: usize,
    seed_method: SeedMethod,
    batch_assign: bool,
    radius: F,
) -> Result<Clustering> {
    if radius <= F::zero() {
        return Err(Error::InvalidInput(
            "the radius must be positive".to_string(),
        ));
    }
    cluster_impl(data, size_constraint, seed_method, batch_assign, Some(radius))
}

/// The shared pipeline behind both entry points.
fn cluster_impl<F: Float>(
    data: &Dataset<F>,
    size_constraint: usize,
    seed_method: SeedMethod,
    batch_assign: bool,
    radius: Option<F>,
) -> Result<Clustering> {
    let n = data.row_count();
    if size_constraint < 2 {
        return Err(Error::InvalidInput(
            "the size constraint must be at least 2".to_string(),
        ));
    }
    if size_constraint > n {
        return Err(Error::InvalidInput(format!(
            "the size constraint {size_constraint} exceeds the {n} points"
        )));
    }

    let g = nng::knn_graph(data, size_constraint - 1, radius)?;
    let found = seeds::find_seeds(&g, seed_method)?;
    if found.is_empty() {
        return Err(Error::NoNeighbors);
    }

    let mut out = Clustering::unassigned(n)?;
    out.num_clusters = label_seed_neighborhoods(&mut out, &g, &found, None, 0)?;
    assign_leftovers(data, &mut out, found.seeds(), batch_assign, None)?;

    debug_assert!(out.is_sound(true));
    ftlog::debug!(
        "clustered {n} points into {} clusters of at least {size_constraint}",
        out.num_clusters
    );
    Ok(out)
}

/// Labels each seed's closed neighborhood with consecutive cluster ids
/// starting at `first`, and returns the next free id.
///
/// Vertex `v` of `g` stands for point `members[v]` (or point `v` when
/// `members` is `None`). Seed neighborhoods are disjoint by construction,
/// so no point is relabeled.
pub(super) fn label_seed_neighborhoods(
    out: &mut Clustering,
    g: &Digraph,
    found: &SeedResult,
    members: Option<&[Vid]>,
    first: usize,
) -> Result<usize> {
    let point_of =
        |v: usize| members.map_or_else(|| ids::as_vid(v), |m| m[v]);

    for (i, &s) in found.seeds().iter().enumerate() {
        let label = ids::try_label(first + i)?;
        let s = ids::vid_index(s);
        debug_assert_eq!(out.labels[ids::vid_index(point_of(s))], UNASSIGNED);
        out.labels[ids::vid_index(point_of(s))] = label;
        for &w in g.successors(s) {
            let w = ids::vid_index(w);
            debug_assert_eq!(out.labels[ids::vid_index(point_of(w))], UNASSIGNED);
            out.labels[ids::vid_index(point_of(w))] = label;
        }
    }
    Ok(first + found.count())
}

/// Places every unassigned point into an existing cluster.
///
/// With `batch_assign`, the targets are all points assigned when the pass
/// starts; otherwise they are `seed_points`. With `scope`, both leftovers
/// and targets are restricted to the listed points.
///
/// # Errors
///
/// `NoNeighbors` if there are leftovers but no targets.
pub(super) fn assign_leftovers<F: Float>(
    data: &Dataset<F>,
    out: &mut Clustering,
    seed_points: &[Vid],
    batch_assign: bool,
    scope: Option<&[Vid]>,
) -> Result<()> {
    let in_scope = match scope {
        Some(points) => points.to_vec(),
        None => (0..out.num_points())
            .map(ids::try_vid)
            .collect::<Result<Vec<_>>>()?,
    };

    let unassigned = in_scope
        .iter()
        .copied()
        .filter(|&p| out.labels[ids::vid_index(p)] == UNASSIGNED)
        .collect::<Vec<_>>();
    if unassigned.is_empty() {
        return Ok(());
    }

    let targets = if batch_assign {
        in_scope
            .iter()
            .copied()
            .filter(|&p| out.labels[ids::vid_index(p)] != UNASSIGNED)
            .collect::<Vec<_>>()
    } else {
        seed_points.to_vec()
    };
    if targets.is_empty() {
        return Err(Error::NoNeighbors);
    }

    let kernel = NnSearch::new(data, Some(&targets), 1, None)?;
    let hits = kernel.query(&unassigned)?;
    for (&p, row) in unassigned.iter().zip(&hits) {
        let (t, _) = row[0];
        if t == VID_SENTINEL {
            return Err(Error::NoNeighbors);
        }
        out.labels[ids::vid_index(p)] = out.labels[ids::vid_index(t)];
    }

    ftlog::debug!("assigned {} leftover points", unassigned.len());
    Ok(())
}
