//! Seed finding over a nearest-neighbor digraph.
//!
//! A *seed* is a vertex whose closed neighborhood (itself plus its
//! successors) is committed as a cluster nucleus. The finder selects a
//! maximal set of seeds with pairwise disjoint closed neighborhoods; the
//! heuristics differ only in the order candidates are tried, which trades
//! work against how many seeds (and thus clusters) come out.

mod buckets;

use buckets::BucketList;

use crate::{
    Digraph, Error, Result,
    digraph::ops,
    ids::{self, Vid},
};

/// The order in which candidate seeds are tried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeedMethod {
    /// Try vertices in id order, once.
    Lexical,
    /// Try vertices by ascending in-degree, computed once upfront.
    InwardsOrder,
    /// Like [`InwardsOrder`](Self::InwardsOrder), but committing a seed
    /// decrements the in-degree of vertices whose supporters it covered.
    InwardsUpdating,
    /// Derive the graph of overlapping closed neighborhoods and try vertices
    /// by ascending in-degree in it.
    ExclusionOrder,
    /// Like [`ExclusionOrder`](Self::ExclusionOrder), with in-degree updates
    /// as vertices drop out.
    ExclusionUpdating,
}

impl SeedMethod {
    /// Returns the canonical name of the method.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::InwardsOrder => "inwards_order",
            Self::InwardsUpdating => "inwards_updating",
            Self::ExclusionOrder => "exclusion_order",
            Self::ExclusionUpdating => "exclusion_updating",
        }
    }
}

impl core::fmt::Display for SeedMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for SeedMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lexical" => Ok(Self::Lexical),
            "inwards_order" => Ok(Self::InwardsOrder),
            "inwards_updating" => Ok(Self::InwardsUpdating),
            "exclusion_order" => Ok(Self::ExclusionOrder),
            "exclusion_updating" => Ok(Self::ExclusionUpdating),
            _ => Err(Error::NotImplemented(format!("seed method `{s}`"))),
        }
    }
}

/// The seeds chosen from a neighbor digraph, in emission order.
///
/// The closed neighborhoods of the listed vertices are pairwise disjoint,
/// and no further vertex could be added without breaking that.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct SeedResult {
    /// The chosen vertices, in emission order.
    seeds: Vec<Vid>,
}

impl SeedResult {
    /// Returns the seeds in emission order.
    #[must_use]
    pub fn seeds(&self) -> &[Vid] {
        &self.seeds
    }

    /// Returns the number of seeds.
    #[must_use]
    pub fn count(&self) -> usize {
        self.seeds.len()
    }

    /// Whether no seed was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

/// Selects a maximal set of vertices with pairwise disjoint closed
/// neighborhoods from `g`, trying candidates in the order given by `method`.
///
/// # Errors
///
/// `OutOfMemory` if a working buffer cannot be allocated.
pub fn find_seeds(g: &Digraph, method: SeedMethod) -> Result<SeedResult> {
    let seeds = match method {
        SeedMethod::Lexical => lexical(g)?,
        SeedMethod::InwardsOrder => inwards(g, false)?,
        SeedMethod::InwardsUpdating => inwards(g, true)?,
        SeedMethod::ExclusionOrder => exclusion(g, false)?,
        SeedMethod::ExclusionUpdating => exclusion(g, true)?,
    };
    ftlog::debug!("{} found {} seeds among {} vertices", method.name(), seeds.len(), g.vertex_count());
    Ok(SeedResult { seeds })
}

/// A growable seed list with its initial capacity acquired upfront.
fn seed_vec(g: &Digraph) -> Result<Vec<Vid>> {
    // Every seed covers itself and its successors, so the average
    // out-degree bounds the expected seed count.
    let n = g.vertex_count();
    let avg_out = if n == 0 { 0 } else { g.arc_count() / n };
    let mut seeds = Vec::new();
    seeds.try_reserve(n / (avg_out + 1) + 1)?;
    Ok(seeds)
}

/// An all-false cover bitmap over the vertices of `g`.
fn cover_marks(g: &Digraph) -> Result<Vec<bool>> {
    let mut marks = Vec::new();
    marks.try_reserve_exact(g.vertex_count())?;
    marks.resize(g.vertex_count(), false);
    Ok(marks)
}

/// Whether `v` can be committed: uncovered, non-isolated, and with every
/// successor uncovered.
fn is_valid_seed(g: &Digraph, marks: &[bool], v: usize) -> bool {
    !marks[v]
        && g.out_degree(v) > 0
        && g.successors(v).iter().all(|&w| !marks[ids::vid_index(w)])
}

/// Commits `v`: appends it to the seed list and covers its closed
/// neighborhood.
fn commit_seed(g: &Digraph, marks: &mut [bool], seeds: &mut Vec<Vid>, v: usize) {
    marks[v] = true;
    for &w in g.successors(v) {
        marks[ids::vid_index(w)] = true;
    }
    seeds.push(ids::as_vid(v));
}

/// One id-order scan.
fn lexical(g: &Digraph) -> Result<Vec<Vid>> {
    let mut marks = cover_marks(g)?;
    let mut seeds = seed_vec(g)?;
    for v in 0..g.vertex_count() {
        if is_valid_seed(g, &marks, v) {
            commit_seed(g, &mut marks, &mut seeds, v);
        }
    }
    Ok(seeds)
}

/// One scan in ascending in-degree order, optionally re-ranking candidates
/// as their supporters get covered.
fn inwards(g: &Digraph, updating: bool) -> Result<Vec<Vid>> {
    let mut marks = cover_marks(g)?;
    let mut seeds = seed_vec(g)?;
    let mut queue = BucketList::new(g.in_degrees())?;

    while let Some(v) = queue.next() {
        let v = ids::vid_index(v);
        if !is_valid_seed(g, &marks, v) {
            continue;
        }
        commit_seed(g, &mut marks, &mut seeds, v);
        if updating {
            // Every vertex the new seed covered stops supporting its own
            // targets, which makes those targets cheaper to cover later.
            for x in core::iter::once(v).chain(g.successors(v).iter().map(|&w| ids::vid_index(w)))
            {
                for &w in g.successors(x) {
                    let w = ids::vid_index(w);
                    if !marks[w] && queue.pending(w) {
                        queue.decrement(w);
                    }
                }
            }
        }
    }
    Ok(seeds)
}

/// One scan of the derived overlap graph in ascending in-degree order.
///
/// The overlap graph has an arc `u -> w` whenever the closed neighborhoods
/// of `u` and `w` intersect in `g`, so an independent scan of it yields
/// disjoint seeds directly. Vertices that are isolated in `g` can never be
/// seeds and start out dropped.
fn exclusion(g: &Digraph, updating: bool) -> Result<Vec<Vid>> {
    let n = g.vertex_count();
    let keep = (0..n).map(|v| g.out_degree(v) > 0).collect::<Vec<_>>();

    let transposed = ops::transpose(g)?;
    // Rows of the product range over closed neighborhoods, so together with
    // `g` itself it covers all three overlap cases: w in N(u), u in N(w),
    // and a shared successor.
    let overlap = ops::adjacency_product(g, &transposed, true, false)?;
    let e = ops::union_and_delete(&[g, &overlap], &keep)?;

    let mut dropped = keep.iter().map(|&k| !k).collect::<Vec<_>>();
    let mut seeds = seed_vec(g)?;
    let mut queue = BucketList::new(e.in_degrees())?;
    let mut newly = Vec::new();

    while let Some(v) = queue.next() {
        let v = ids::vid_index(v);
        if dropped[v] {
            continue;
        }
        seeds.push(ids::as_vid(v));

        newly.clear();
        dropped[v] = true;
        newly.push(v);
        for &w in e.successors(v) {
            let w = ids::vid_index(w);
            if !dropped[w] {
                dropped[w] = true;
                newly.push(w);
            }
        }
        if updating {
            for &x in &newly {
                for &w in e.successors(x) {
                    let w = ids::vid_index(w);
                    if !dropped[w] && queue.pending(w) {
                        queue.decrement(w);
                    }
                }
            }
        }
    }
    Ok(seeds)
}
