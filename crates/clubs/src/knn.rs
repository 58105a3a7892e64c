//! Brute-force nearest-neighbor kernels over a fixed search set.
//!
//! Each kernel is a small query object borrowing a [`Dataset`] and a set of
//! candidate points. The kernels are the innermost loops of the crate: the
//! neighbor-graph builder and the greedy assignment pass both run on
//! [`NnSearch`], and it dominates wall time on large inputs.

use distances::number::Float;
use rayon::prelude::*;

use crate::{
    Dataset, Error, Result,
    ids::{self, VID_SENTINEL, Vid},
};

/// Resolves and validates a search set over a dataset.
///
/// `None` means all points of the dataset.
fn resolve_search_set<F: Float>(data: &Dataset<F>, search: Option<&[Vid]>) -> Result<Vec<Vid>> {
    let search = match search {
        Some(s) => s.to_vec(),
        None => (0..data.row_count())
            .map(ids::try_vid)
            .collect::<Result<Vec<_>>>()?,
    };
    if search.is_empty() {
        return Err(Error::InvalidInput("the search set is empty".to_string()));
    }
    if search
        .iter()
        .any(|&s| ids::vid_index(s) >= data.row_count())
    {
        return Err(Error::InvalidInput(
            "search set index out of bounds".to_string(),
        ));
    }
    Ok(search)
}

/// Validates a query list against a dataset.
fn check_queries<F: Float>(data: &Dataset<F>, queries: &[Vid]) -> Result<()> {
    if queries
        .iter()
        .any(|&q| ids::vid_index(q) >= data.row_count())
    {
        return Err(Error::InvalidInput(
            "query index out of bounds".to_string(),
        ));
    }
    Ok(())
}

/// Emits full distance matrices between query points and the search set.
pub struct DistColumn<'a, F: Float> {
    /// The dataset both queries and candidates index into.
    data: &'a Dataset<F>,
    /// The candidate points, in enumeration order.
    search: Vec<Vid>,
}

impl<'a, F: Float> DistColumn<'a, F> {
    /// Creates a kernel over the given search set (`None` for all points).
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the search set is empty or holds an out-of-bounds
    /// index.
    pub fn new(data: &'a Dataset<F>, search: Option<&[Vid]>) -> Result<Self> {
        let search = resolve_search_set(data, search)?;
        Ok(Self { data, search })
    }

    /// Computes the `|Q| x |S|` distance matrix in row-major query order.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if a query index is out of bounds.
    /// - `OutOfMemory` if the output matrix cannot be allocated.
    pub fn query(&self, queries: &[Vid]) -> Result<Vec<F>> {
        check_queries(self.data, queries)?;
        let mut out = Vec::new();
        out.try_reserve_exact(queries.len() * self.search.len())?;
        for &q in queries {
            for &s in &self.search {
                out.push(distances::vectors::euclidean(
                    self.data.row(ids::vid_index(q)),
                    self.data.row(ids::vid_index(s)),
                ));
            }
        }
        Ok(out)
    }

    /// Parallel version of [`query`](Self::query), one task per query row.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub fn par_query(&self, queries: &[Vid]) -> Result<Vec<F>>
    where
        F: Send + Sync,
    {
        check_queries(self.data, queries)?;
        let rows = queries
            .par_iter()
            .map(|&q| {
                self.search
                    .iter()
                    .map(|&s| {
                        distances::vectors::euclidean(
                            self.data.row(ids::vid_index(q)),
                            self.data.row(ids::vid_index(s)),
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Ok(rows.into_iter().flatten().collect())
    }
}

/// Finds, for each query, the farthest point of the search set.
pub struct MaxDist<'a, F: Float> {
    /// The dataset both queries and candidates index into.
    data: &'a Dataset<F>,
    /// The candidate points, in enumeration order.
    search: Vec<Vid>,
}

impl<'a, F: Float> MaxDist<'a, F> {
    /// Creates a kernel over the given search set (`None` for all points).
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the search set is empty or holds an out-of-bounds
    /// index.
    pub fn new(data: &'a Dataset<F>, search: Option<&[Vid]>) -> Result<Self> {
        let search = resolve_search_set(data, search)?;
        Ok(Self { data, search })
    }

    /// Returns `(argmax, max distance)` for each query.
    ///
    /// Ties go to the candidate encountered first in the search set's
    /// enumeration order; the running maximum is only replaced on a strictly
    /// greater distance.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a query index is out of bounds.
    pub fn query(&self, queries: &[Vid]) -> Result<Vec<(Vid, F)>> {
        check_queries(self.data, queries)?;
        Ok(queries.iter().map(|&q| self.query_one(q)).collect())
    }

    /// Parallel version of [`query`](Self::query).
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub fn par_query(&self, queries: &[Vid]) -> Result<Vec<(Vid, F)>>
    where
        F: Send + Sync,
    {
        check_queries(self.data, queries)?;
        Ok(queries.par_iter().map(|&q| self.query_one(q)).collect())
    }

    /// Scans the search set for the farthest candidate from `q`.
    fn query_one(&self, q: Vid) -> (Vid, F) {
        let q_row = self.data.row(ids::vid_index(q));
        let first = self.search[0];
        let mut best = (
            first,
            distances::vectors::euclidean(q_row, self.data.row(ids::vid_index(first))),
        );
        for &s in &self.search[1..] {
            let d = distances::vectors::euclidean(q_row, self.data.row(ids::vid_index(s)));
            if d > best.1 {
                best = (s, d);
            }
        }
        best
    }
}

/// Finds, for each query, up to `k` nearest points of the search set.
///
/// A candidate equal to the query id is never admitted, so a point searching
/// a set that contains itself does not report a zero-distance self-match.
pub struct NnSearch<'a, F: Float> {
    /// The dataset both queries and candidates index into.
    data: &'a Dataset<F>,
    /// The candidate points, in enumeration order.
    search: Vec<Vid>,
    /// The number of neighbors requested per query.
    k: usize,
    /// When set, a candidate is admitted only if its distance is strictly
    /// below this radius.
    radius: Option<F>,
}

impl<'a, F: Float> NnSearch<'a, F> {
    /// Creates a kernel over the given search set (`None` for all points).
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the search set is empty or holds an out-of-bounds
    /// index, or if `k` is zero. A `k` larger than the admissible candidate
    /// count is not an error here; the shortfall is sentinel-filled.
    pub fn new(
        data: &'a Dataset<F>,
        search: Option<&[Vid]>,
        k: usize,
        radius: Option<F>,
    ) -> Result<Self> {
        let search = resolve_search_set(data, search)?;
        if k == 0 {
            return Err(Error::InvalidInput("k must be positive".to_string()));
        }
        Ok(Self {
            data,
            search,
            k,
            radius,
        })
    }

    /// Returns exactly `k` `(id, distance)` slots per query.
    ///
    /// Results are in ascending distance order; equal distances keep their
    /// insertion order, which is ascending position within the search set's
    /// enumeration. When fewer than `k` candidates are admissible, the
    /// remaining slots hold `(VID_SENTINEL, -1)`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a query index is out of bounds.
    pub fn query(&self, queries: &[Vid]) -> Result<Vec<Vec<(Vid, F)>>> {
        check_queries(self.data, queries)?;
        Ok(queries.iter().map(|&q| self.query_one(q)).collect())
    }

    /// Parallel version of [`query`](Self::query), one task per query.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub fn par_query(&self, queries: &[Vid]) -> Result<Vec<Vec<(Vid, F)>>>
    where
        F: Send + Sync,
    {
        check_queries(self.data, queries)?;
        Ok(queries.par_iter().map(|&q| self.query_one(q)).collect())
    }

    /// Runs the insertion-sorted window over the search set for one query.
    ///
    /// The window either grows (not yet full), or replaces its tail when a
    /// strictly closer candidate arrives; the new entry then bubbles left
    /// while the slot on its left is strictly farther. Strict comparisons are
    /// what keep equal-distance candidates in insertion order.
    fn query_one(&self, q: Vid) -> Vec<(Vid, F)> {
        let q_row = self.data.row(ids::vid_index(q));
        let mut hits: Vec<(Vid, F)> = Vec::with_capacity(self.k);

        for &s in &self.search {
            if s == q {
                continue;
            }
            let d = distances::vectors::euclidean(q_row, self.data.row(ids::vid_index(s)));
            if let Some(r) = self.radius {
                if d >= r {
                    continue;
                }
            }
            if hits.len() < self.k {
                hits.push((s, d));
            } else if d < hits[self.k - 1].1 {
                hits[self.k - 1] = (s, d);
            } else {
                continue;
            }
            let mut i = hits.len() - 1;
            while i > 0 && hits[i - 1].1 > hits[i].1 {
                hits.swap(i - 1, i);
                i -= 1;
            }
        }

        while hits.len() < self.k {
            hits.push((VID_SENTINEL, F::from(-1_i32)));
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::{DistColumn, MaxDist, NnSearch};
    use crate::{Dataset, Error, ids::VID_SENTINEL};

    fn line() -> Dataset<f64> {
        Dataset::from_rows(3, 1, vec![0.0, 1.0, 2.0]).map_or_else(|_| unreachable!(), |d| d)
    }

    #[test]
    fn dist_column_is_row_major() -> Result<(), Error> {
        let data = line();
        let kernel = DistColumn::new(&data, Some(&[0, 2]))?;
        let m = kernel.query(&[1, 0])?;
        assert_eq!(m, vec![1.0, 1.0, 0.0, 2.0]);
        assert_eq!(kernel.par_query(&[1, 0])?, m);
        Ok(())
    }

    #[test]
    fn max_dist_breaks_ties_by_first_encountered() -> Result<(), Error> {
        let data = line();
        let kernel = MaxDist::new(&data, Some(&[0, 2]))?;
        // Point 1 is equidistant from 0 and 2; 0 is enumerated first.
        assert_eq!(kernel.query(&[1])?, vec![(0, 1.0)]);
        assert_eq!(kernel.query(&[0])?, vec![(2, 2.0)]);
        Ok(())
    }

    #[test]
    fn knn_orders_by_distance_then_insertion() -> Result<(), Error> {
        let data = line();
        let kernel = NnSearch::new(&data, None, 2, None)?;

        let hits = kernel.query(&[0])?;
        assert_eq!(hits[0], vec![(1, 1.0), (2, 2.0)]);

        // Both neighbors of point 1 are at distance 1; the lower id wins the
        // first slot because it is inserted first.
        let hits = kernel.query(&[1])?;
        assert_eq!(hits[0], vec![(0, 1.0), (2, 1.0)]);

        assert_eq!(kernel.par_query(&[0, 1, 2])?, kernel.query(&[0, 1, 2])?);
        Ok(())
    }

    #[test]
    fn knn_radius_fills_with_sentinels() -> Result<(), Error> {
        let data = line();
        let kernel = NnSearch::new(&data, None, 2, Some(1.5))?;

        let hits = kernel.query(&[0])?;
        assert_eq!(hits[0], vec![(1, 1.0), (VID_SENTINEL, -1.0)]);

        // A radius equal to the distance excludes the candidate.
        let kernel = NnSearch::new(&data, None, 2, Some(1.0))?;
        let hits = kernel.query(&[0])?;
        assert_eq!(hits[0], vec![(VID_SENTINEL, -1.0), (VID_SENTINEL, -1.0)]);
        Ok(())
    }

    #[test]
    fn knn_rejects_zero_k_and_fills_oversized_k() -> Result<(), Error> {
        let data = line();
        assert!(NnSearch::new(&data, None, 0, None).is_err());

        // With k equal to the search set size, the self-excluded query gets
        // one sentinel slot.
        let kernel = NnSearch::new(&data, None, 3, None)?;
        let hits = kernel.query(&[0])?;
        assert_eq!(hits[0], vec![(1, 1.0), (2, 2.0), (VID_SENTINEL, -1.0)]);
        Ok(())
    }
}
