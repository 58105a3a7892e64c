//! A compact directed graph in compressed sparse row form.
//!
//! The neighbor graphs this crate builds and derives are all stored as CSR:
//! a monotone offset array plus a flat array of arc heads. The container
//! permits duplicate arcs and self-loops; the operations in [`ops`] and the
//! neighbor-graph builder each document what they forbid on top of that.

pub mod ops;

use crate::{
    Error, Result,
    ids::{self, Vid},
};

/// A directed graph over vertices `0..N` in compressed sparse row form.
///
/// Vertex `v` owns the arcs `head[tail_ptr[v]..tail_ptr[v + 1]]`. A *sound*
/// digraph has monotone offsets ending at `head.len()` and every arc head in
/// bounds; every constructor and operation in this crate produces sound
/// digraphs, and debug builds assert it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digraph {
    /// Monotone offsets into `head`, one per vertex plus the final arc count.
    tail_ptr: Vec<usize>,
    /// The destination vertex of each arc.
    head: Vec<Vid>,
}

impl Digraph {
    /// Creates a digraph with `vertex_count` vertices and no arcs.
    #[must_use]
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            tail_ptr: vec![0; vertex_count + 1],
            head: Vec::new(),
        }
    }

    /// Creates a digraph from raw CSR parts.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the parts do not form a sound digraph.
    pub fn from_parts(tail_ptr: Vec<usize>, head: Vec<Vid>) -> Result<Self> {
        let g = Self { tail_ptr, head };
        if g.is_sound() {
            Ok(g)
        } else {
            Err(Error::InvalidInput(
                "the offset and head arrays do not form a sound digraph".to_string(),
            ))
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.tail_ptr.len() - 1
    }

    /// Returns the number of arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.head.len()
    }

    /// Returns the out-degree of vertex `v`.
    #[must_use]
    pub fn out_degree(&self, v: usize) -> usize {
        self.tail_ptr[v + 1] - self.tail_ptr[v]
    }

    /// Returns the arc heads leaving vertex `v`.
    #[must_use]
    pub fn successors(&self, v: usize) -> &[Vid] {
        &self.head[self.tail_ptr[v]..self.tail_ptr[v + 1]]
    }

    /// Counts the incoming arcs of every vertex.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0_usize; self.vertex_count()];
        for &w in &self.head {
            degrees[ids::vid_index(w)] += 1;
        }
        degrees
    }

    /// Checks the CSR invariants: offsets start at zero, never decrease, end
    /// at the arc count, and every arc head is a valid vertex.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        if self.tail_ptr.is_empty() || self.tail_ptr[0] != 0 {
            return false;
        }
        if self.tail_ptr.windows(2).any(|w| w[0] > w[1]) {
            return false;
        }
        if *self.tail_ptr.last().unwrap_or(&0) != self.head.len() {
            return false;
        }
        let n = self.vertex_count();
        self.head.iter().all(|&w| ids::vid_index(w) < n)
    }

    /// Assembles a digraph from per-vertex rows pushed in vertex order.
    ///
    /// `arc_capacity` is an upper bound on the total arc count, acquired
    /// upfront so a failing allocation surfaces before any work is done.
    pub(crate) fn builder(vertex_count: usize, arc_capacity: usize) -> Result<Builder> {
        let mut tail_ptr = Vec::new();
        tail_ptr.try_reserve_exact(vertex_count + 1)?;
        tail_ptr.push(0);
        let mut head = Vec::new();
        head.try_reserve_exact(arc_capacity)?;
        Ok(Builder { tail_ptr, head })
    }
}

/// An in-progress CSR digraph, filled one vertex row at a time.
pub(crate) struct Builder {
    /// Offsets written so far; one entry per finished row, plus the leading 0.
    tail_ptr: Vec<usize>,
    /// Arc heads written so far.
    head: Vec<Vid>,
}

impl Builder {
    /// Appends one arc to the row currently being filled.
    pub(crate) fn push_arc(&mut self, w: Vid) {
        self.head.push(w);
    }

    /// Closes the current vertex row.
    pub(crate) fn finish_row(&mut self) {
        self.tail_ptr.push(self.head.len());
    }

    /// Finalizes the digraph.
    pub(crate) fn finish(self) -> Digraph {
        let g = Digraph {
            tail_ptr: self.tail_ptr,
            head: self.head,
        };
        debug_assert!(g.is_sound());
        g
    }
}
