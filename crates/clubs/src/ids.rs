//! Compile-time widths for vertex ids and cluster labels.
//!
//! The default widths keep the arc and label arrays compact. Enable the
//! `large-ids` feature for datasets with more than `u32::MAX` points or
//! clusters.

use crate::{Error, Result};

/// The id of a point in a [`Dataset`](crate::Dataset), which doubles as the
/// id of a vertex in a [`Digraph`](crate::Digraph).
#[cfg(not(feature = "large-ids"))]
pub type Vid = u32;

/// The id of a point in a [`Dataset`](crate::Dataset), which doubles as the
/// id of a vertex in a [`Digraph`](crate::Digraph).
#[cfg(feature = "large-ids")]
pub type Vid = u64;

/// The id of a cluster in a [`Clustering`](crate::Clustering).
#[cfg(not(feature = "large-ids"))]
pub type Label = u32;

/// The id of a cluster in a [`Clustering`](crate::Clustering).
#[cfg(feature = "large-ids")]
pub type Label = u64;

/// Marks a missing neighbor in nearest-neighbor query results.
///
/// The sentinel is reserved, so a dataset may hold at most `Vid::MAX` points
/// with ids `0..Vid::MAX`.
pub const VID_SENTINEL: Vid = Vid::MAX;

/// Marks a point that does not yet belong to any cluster.
///
/// The sentinel is reserved, so a clustering may hold at most `Label::MAX`
/// clusters with labels `0..Label::MAX`.
pub const UNASSIGNED: Label = Label::MAX;

/// Converts a count or index to a `Vid`.
///
/// # Errors
///
/// `ProblemTooLarge` if the value does not fit in the configured id width.
pub(crate) fn try_vid(i: usize) -> Result<Vid> {
    Vid::try_from(i).map_err(|_| Error::ProblemTooLarge)
}

/// Converts a cluster count or index to a `Label`.
///
/// # Errors
///
/// `ProblemTooLarge` if the value does not fit in the configured label width.
pub(crate) fn try_label(i: usize) -> Result<Label> {
    Label::try_from(i).map_err(|_| Error::ProblemTooLarge)
}

/// Converts a `Vid` back to an array index.
#[expect(clippy::cast_possible_truncation)]
pub(crate) const fn vid_index(v: Vid) -> usize {
    v as usize
}

/// Converts an index to a `Vid` without the fallible check.
///
/// The caller must guarantee the value fits, e.g. because it indexes into a
/// structure whose size already passed [`try_vid`].
#[expect(clippy::cast_possible_truncation)]
pub(crate) const fn as_vid(u: usize) -> Vid {
    u as Vid
}

/// Converts a `Label` back to an array index.
#[expect(clippy::cast_possible_truncation)]
pub(crate) const fn label_index(l: Label) -> usize {
    l as usize
}
