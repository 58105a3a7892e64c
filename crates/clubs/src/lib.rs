//! CLUBS: Clustering Under Bounded Sizes.
//!
//! We provide clusterings of points in Euclidean space in which every
//! cluster is guaranteed a minimum number of members. The bound is a
//! modeling requirement of the intended workloads (matched sampling,
//! micro-aggregation, balanced partitioning), not a tuning knob: callers
//! state the smallest acceptable cluster and every returned cluster honors
//! it.
//!
//! The engine works on a nearest-neighbor digraph. With a size bound `c`,
//! every point gets arcs to its `c - 1` nearest points; a maximal set of
//! vertices with pairwise disjoint closed neighborhoods is selected as
//! *seeds*; each seed's neighborhood becomes a cluster nucleus of exactly
//! `c` points; leftover points then join existing clusters, which only
//! grows them. [`SeedMethod`] picks the order in which seed candidates are
//! tried.
//!
//! - [`cluster`] / [`cluster_within_radius`]: compute a bounded clustering.
//! - [`break_clustering`]: re-fit an existing clustering to a bound,
//!   splitting oversized clusters and dissolving undersized ones.
//! - [`ClusteringStats`]: size and distance summaries of a result.
//!
//! ## Features
//!
//! - `large-ids`: 64-bit point ids and cluster labels.
//! - `serde`: serialization of [`Clustering`], [`SeedResult`], and
//!   [`SeedMethod`] using the [`serde`] crate.
//! - `stable`: bit-identical output under input permutations that preserve
//!   distance ties; a test oracle, at some cost in the updating heuristics.

mod clustering;
mod dataset;
pub mod digraph;
mod error;
mod ids;
pub mod knn;
mod nng;
mod seeds;

pub use clustering::{Clustering, ClusteringStats, break_clustering, cluster, cluster_within_radius};
pub use dataset::Dataset;
pub use digraph::Digraph;
pub use error::{Error, Result};
pub use ids::{Label, UNASSIGNED, VID_SENTINEL, Vid};
pub use nng::{knn_graph, knn_subgraph};
pub use seeds::{SeedMethod, SeedResult, find_seeds};
