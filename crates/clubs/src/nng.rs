//! Builds k-nearest-neighbor digraphs over a dataset.

use distances::number::Float;

use crate::{
    Dataset, Digraph, Error, Result,
    ids::{self, VID_SENTINEL, Vid},
    knn::NnSearch,
};

/// Builds the k-nearest-neighbor digraph over all points of `data`.
///
/// Vertex `v` gets arcs to its `k` nearest points other than itself, with
/// distance ties broken by ascending point id. With a `radius`, a neighbor
/// is admissible only if strictly closer than the radius, and a vertex that
/// cannot collect all `k` neighbors inside the radius gets *no* arcs at all:
/// a partial neighborhood could not anchor a full-sized cluster, so the
/// vertex is left isolated and later placed by the assignment pass.
///
/// # Errors
///
/// - `InvalidInput` if `k` is zero or not smaller than the point count.
/// - `OutOfMemory` if the arc buffers cannot be allocated.
pub fn knn_graph<F: Float>(data: &Dataset<F>, k: usize, radius: Option<F>) -> Result<Digraph> {
    let members = (0..data.row_count())
        .map(ids::try_vid)
        .collect::<Result<Vec<_>>>()?;
    knn_subgraph(data, &members, k, radius)
}

/// Builds the k-nearest-neighbor digraph over a subset of points.
///
/// Vertex `i` of the output corresponds to `members[i]`; both queries and
/// candidates are restricted to `members`. See [`knn_graph`] for the radius
/// rule.
///
/// # Errors
///
/// Same as [`knn_graph`], with the subset size in place of the point count.
pub fn knn_subgraph<F: Float>(
    data: &Dataset<F>,
    members: &[Vid],
    k: usize,
    radius: Option<F>,
) -> Result<Digraph> {
    if k == 0 || k >= members.len() {
        return Err(Error::InvalidInput(format!(
            "each point needs k in 1..{} neighbors, got k = {k}",
            members.len()
        )));
    }

    // Map global point ids back to positions within `members`.
    let mut local = vec![VID_SENTINEL; data.row_count()];
    for (i, &m) in members.iter().enumerate() {
        local[ids::vid_index(m)] = ids::try_vid(i)?;
    }

    let kernel = NnSearch::new(data, Some(members), k, radius)?;
    let hits = kernel.query(members)?;

    let mut out = Digraph::builder(members.len(), members.len() * k)?;
    for row in &hits {
        let complete = row.iter().all(|&(w, _)| w != VID_SENTINEL);
        if complete {
            for &(w, _) in row {
                out.push_arc(local[ids::vid_index(w)]);
            }
        }
        out.finish_row();
    }
    let g = out.finish();

    ftlog::debug!(
        "built a neighbor digraph with {} vertices and {} arcs (k = {k})",
        g.vertex_count(),
        g.arc_count()
    );
    Ok(g)
}
