//! Pure algebraic operations on CSR digraphs.
//!
//! Each operation produces a fresh, sound [`Digraph`]; none mutates its
//! inputs. The seed finder composes these to derive its traversal graphs
//! from a neighbor graph.

use super::Digraph;
use crate::{
    Error, Result,
    ids::{self, VID_SENTINEL, Vid},
};

/// Reverses every arc of `g`.
///
/// Two passes: in-degree counting to lay out the output offsets, then a
/// scatter. Within each output row, arcs appear in ascending tail order.
///
/// # Errors
///
/// `OutOfMemory` if the output buffers cannot be allocated.
pub fn transpose(g: &Digraph) -> Result<Digraph> {
    let n = g.vertex_count();
    let in_degrees = g.in_degrees();

    let mut tail_ptr = Vec::new();
    tail_ptr.try_reserve_exact(n + 1)?;
    tail_ptr.push(0_usize);
    for v in 0..n {
        tail_ptr.push(tail_ptr[v] + in_degrees[v]);
    }

    let mut head = Vec::new();
    head.try_reserve_exact(g.arc_count())?;
    head.resize(g.arc_count(), VID_SENTINEL);

    // Next write slot per output row.
    let mut slot = tail_ptr[..n].to_vec();
    for u in 0..n {
        for &w in g.successors(u) {
            head[slot[ids::vid_index(w)]] = ids::as_vid(u);
            slot[ids::vid_index(w)] += 1;
        }
    }

    Digraph::from_parts(tail_ptr, head)
}

/// Composes two digraphs: the output has an arc `u -> w` iff some `v` has
/// an `a`-arc `u -> v` and a `b`-arc `v -> w`.
///
/// With `force_diagonal`, `u` itself also acts as an intermediate, so row
/// `u` of `b` contributes to row `u` of the output; this is what lets the
/// product range over closed neighborhoods. With `ignore_diagonal`, arcs
/// `u -> u` are dropped from the output. Output rows are deduplicated.
///
/// # Errors
///
/// - `InvalidInput` if the two digraphs have different vertex counts.
/// - `OutOfMemory` if the output buffers cannot be allocated.
pub fn adjacency_product(
    a: &Digraph,
    b: &Digraph,
    force_diagonal: bool,
    ignore_diagonal: bool,
) -> Result<Digraph> {
    let n = a.vertex_count();
    if b.vertex_count() != n {
        return Err(Error::InvalidInput(
            "adjacency product requires equal vertex counts".to_string(),
        ));
    }

    // Capacity bound before dedup: every intermediate contributes its whole
    // `b`-row.
    let mut bound = 0_usize;
    for u in 0..n {
        if force_diagonal {
            bound += b.out_degree(u);
        }
        for &v in a.successors(u) {
            bound += b.out_degree(ids::vid_index(v));
        }
    }

    let mut out = Digraph::builder(n, bound)?;
    // `last_writer[w] == u` marks that row `u` already emitted `w`.
    let mut last_writer = vec![VID_SENTINEL; n];

    for u in 0..n {
        let u_vid = ids::as_vid(u);
        if force_diagonal {
            emit_row(&mut out, &mut last_writer, b, u_vid, u, ignore_diagonal);
        }
        for &v in a.successors(u) {
            emit_row(
                &mut out,
                &mut last_writer,
                b,
                u_vid,
                ids::vid_index(v),
                ignore_diagonal,
            );
        }
        out.finish_row();
    }
    Ok(out.finish())
}

/// Appends `b`'s row of `v` to the output row of `u`, deduplicated.
fn emit_row(
    out: &mut super::Builder,
    last_writer: &mut [Vid],
    b: &Digraph,
    u: Vid,
    v: usize,
    ignore_diagonal: bool,
) {
    for &w in b.successors(v) {
        if ignore_diagonal && w == u {
            continue;
        }
        if last_writer[ids::vid_index(w)] != u {
            last_writer[ids::vid_index(w)] = u;
            out.push_arc(w);
        }
    }
}

/// Unions the arc sets of several digraphs, restricted by a vertex mask.
///
/// Vertex `v`'s output row is the deduplicated union of its rows across
/// `graphs`, keeping only arc heads `w` with `keep[w]`; the row is empty
/// when `!keep[v]`.
///
/// # Errors
///
/// - `InvalidInput` if the digraphs and the mask disagree on the vertex
///   count.
/// - `OutOfMemory` if the output buffers cannot be allocated.
pub fn union_and_delete(graphs: &[&Digraph], keep: &[bool]) -> Result<Digraph> {
    let n = keep.len();
    if graphs.iter().any(|g| g.vertex_count() != n) {
        return Err(Error::InvalidInput(
            "union requires equal vertex counts".to_string(),
        ));
    }

    let bound = graphs.iter().map(|g| g.arc_count()).sum::<usize>();
    let mut out = Digraph::builder(n, bound)?;
    let mut last_writer = vec![VID_SENTINEL; n];

    for u in 0..n {
        if keep[u] {
            let u_vid = ids::as_vid(u);
            for g in graphs {
                for &w in g.successors(u) {
                    if keep[ids::vid_index(w)] && last_writer[ids::vid_index(w)] != u_vid {
                        last_writer[ids::vid_index(w)] = u_vid;
                        out.push_arc(w);
                    }
                }
            }
        }
        out.finish_row();
    }
    Ok(out.finish())
}
