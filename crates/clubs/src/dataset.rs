//! A dataset of points stored as a flat row-major matrix.

use distances::number::Float;
use rayon::prelude::*;

use crate::{
    Error, Result,
    ids::{self, Vid},
};

/// A finite set of points in `D`-dimensional Euclidean space.
///
/// The coordinates are stored as a flat `N * D` buffer in row-major order and
/// are immutable after construction. All derived objects (query kernels,
/// neighbor graphs, clusterings) borrow the dataset, so it must outlive them.
///
/// # Type Parameters
///
/// - `F`: The floating-point type of the coordinates and distance values.
#[derive(Clone, Debug)]
pub struct Dataset<F: Float> {
    /// The number of points.
    rows: usize,
    /// The number of coordinates per point.
    cols: usize,
    /// The coordinates, `rows * cols` values in row-major order.
    data: Vec<F>,
}

impl<F: Float> Dataset<F> {
    /// Creates a new `Dataset` from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `rows` or `cols` is zero, if `data.len()` is not
    ///   `rows * cols`, or if any coordinate is NaN or infinite.
    /// - `ProblemTooLarge` if `rows` does not fit in the configured id width.
    pub fn from_rows(rows: usize, cols: usize, data: Vec<F>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidInput(
                "the dataset must have at least one row and one column".to_string(),
            ));
        }
        if data.len() != rows * cols {
            return Err(Error::InvalidInput(format!(
                "expected {} coordinates for a {rows} x {cols} dataset, got {}",
                rows * cols,
                data.len()
            )));
        }
        if data.iter().any(|x| !x.as_f64().is_finite()) {
            return Err(Error::InvalidInput(
                "coordinates must be finite".to_string(),
            ));
        }
        ids::try_vid(rows)?;

        Ok(Self { rows, cols, data })
    }

    /// Returns the number of points.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns the number of coordinates per point.
    #[must_use]
    pub const fn dim_count(&self) -> usize {
        self.cols
    }

    /// Returns the coordinates of point `i`.
    ///
    /// The caller must ensure that `i` is in bounds.
    #[must_use]
    pub fn row(&self, i: usize) -> &[F] {
        &self.data[(i * self.cols)..((i + 1) * self.cols)]
    }

    /// Returns the Euclidean distance between points `i` and `j`.
    ///
    /// The distance is symmetric and zero when `i == j` or when the two rows
    /// hold equal coordinates.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `i` or `j` is out of bounds.
    pub fn distance(&self, i: usize, j: usize) -> Result<F> {
        if i >= self.rows || j >= self.rows {
            return Err(Error::InvalidInput(format!(
                "point index out of bounds: {i} or {j} >= {}",
                self.rows
            )));
        }
        Ok(distances::vectors::euclidean(self.row(i), self.row(j)))
    }

    /// Computes all pairwise distances among the given points.
    ///
    /// When `indices` is `None`, all points are used. The output holds
    /// `n * (n - 1) / 2` values in `(i, j), i < j` lexicographic order over
    /// positions in the index list.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if any index is out of bounds.
    /// - `OutOfMemory` if the output buffer cannot be allocated.
    pub fn pairwise_distances(&self, indices: Option<&[Vid]>) -> Result<Vec<F>> {
        let ids = self.pairwise_ids(indices)?;
        let n = ids.len();

        let mut out = Vec::new();
        out.try_reserve_exact(n * (n - 1) / 2)?;
        for (a, &i) in ids.iter().enumerate() {
            for &j in &ids[(a + 1)..] {
                out.push(distances::vectors::euclidean(
                    self.row(ids::vid_index(i)),
                    self.row(ids::vid_index(j)),
                ));
            }
        }
        Ok(out)
    }

    /// Parallel version of [`pairwise_distances`](Self::pairwise_distances).
    ///
    /// The output is identical to the sequential version; only the rows of
    /// the triangle are computed in parallel.
    ///
    /// # Errors
    ///
    /// Same as [`pairwise_distances`](Self::pairwise_distances).
    pub fn par_pairwise_distances(&self, indices: Option<&[Vid]>) -> Result<Vec<F>>
    where
        F: Send + Sync,
    {
        let ids = self.pairwise_ids(indices)?;

        let rows = ids
            .par_iter()
            .enumerate()
            .map(|(a, &i)| {
                ids[(a + 1)..]
                    .iter()
                    .map(|&j| {
                        distances::vectors::euclidean(
                            self.row(ids::vid_index(i)),
                            self.row(ids::vid_index(j)),
                        )
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        Ok(rows.into_iter().flatten().collect())
    }

    /// Resolves the optional index list for the pairwise queries, checking
    /// bounds.
    fn pairwise_ids(&self, indices: Option<&[Vid]>) -> Result<Vec<Vid>> {
        match indices {
            Some(ids) => {
                if ids.iter().any(|&i| ids::vid_index(i) >= self.rows) {
                    return Err(Error::InvalidInput(
                        "pairwise index out of bounds".to_string(),
                    ));
                }
                Ok(ids.to_vec())
            }
            None => (0..self.rows).map(ids::try_vid).collect(),
        }
    }
}
