//! A bucket-sorted vertex traversal whose keys may decrease mid-scan.
//!
//! The updating seed heuristics walk vertices in ascending key order while
//! decrementing the keys of vertices not yet reached. Keys are small
//! integers (vertex in-degrees), so the structure is a counting sort kept
//! live: a flat vertex array, a per-vertex position index into it, and one
//! front-boundary index per bucket. All moves are index swaps; positions at
//! or before the scan cursor are never disturbed, so every vertex is yielded
//! at most once.

use crate::{
    Result,
    ids::{self, Vid},
};

/// A mutable bucket-sorted queue over vertices `0..N` keyed by a
/// non-negative integer that only ever decreases.
pub(crate) struct BucketList {
    /// Vertices in ascending key order; decrements reorder the unvisited
    /// suffix.
    sorted: Vec<Vid>,
    /// Position of each vertex in `sorted`; `sorted[position[v]] == v`.
    position: Vec<usize>,
    /// Current key of each vertex.
    key: Vec<usize>,
    /// `bucket_head[k]` is the position of the first vertex with key `k`.
    bucket_head: Vec<usize>,
    /// Position of the next vertex to yield.
    cursor: usize,
}

impl BucketList {
    /// Builds the traversal from per-vertex keys via counting sort.
    ///
    /// Vertices with equal keys are ordered by ascending id.
    ///
    /// # Errors
    ///
    /// `OutOfMemory` if the working arrays cannot be allocated.
    pub(crate) fn new(keys: Vec<usize>) -> Result<Self> {
        let n = keys.len();
        let max_key = keys.iter().copied().max().unwrap_or(0);

        let mut bucket_head = Vec::new();
        bucket_head.try_reserve_exact(max_key + 1)?;
        bucket_head.resize(max_key + 1, 0_usize);
        for &k in &keys {
            bucket_head[k] += 1;
        }
        let mut acc = 0_usize;
        for slot in &mut bucket_head {
            let count = *slot;
            *slot = acc;
            acc += count;
        }

        let mut sorted = Vec::new();
        sorted.try_reserve_exact(n)?;
        sorted.resize(n, 0 as Vid);
        let mut position = Vec::new();
        position.try_reserve_exact(n)?;
        position.resize(n, 0_usize);

        let mut slot = bucket_head.clone();
        for (v, &k) in keys.iter().enumerate() {
            sorted[slot[k]] = ids::as_vid(v);
            position[v] = slot[k];
            slot[k] += 1;
        }

        Ok(Self {
            sorted,
            position,
            key: keys,
            bucket_head,
            cursor: 0,
        })
    }

    /// Yields the next vertex in key order, or `None` when exhausted.
    pub(crate) fn next(&mut self) -> Option<Vid> {
        let v = *self.sorted.get(self.cursor)?;
        self.cursor += 1;
        Some(v)
    }

    /// Whether vertex `v` has not been yielded yet.
    pub(crate) fn pending(&self, v: usize) -> bool {
        self.position[v] >= self.cursor
    }

    /// Returns the current key of vertex `v`.
    #[cfg(test)]
    pub(crate) fn key_of(&self, v: usize) -> usize {
        self.key[v]
    }

    /// Decreases the key of a pending vertex by one.
    ///
    /// The vertex swaps to the front boundary of its bucket, which then
    /// advances by one, placing it at the back of the next-lower bucket. A
    /// boundary that has already been passed by the cursor is clamped to the
    /// cursor, so yielded positions stay untouched.
    pub(crate) fn decrement(&mut self, v: usize) {
        let kv = self.key[v];
        let p = self.position[v];
        debug_assert!(kv > 0);
        debug_assert!(p >= self.cursor);

        let target = self.bucket_head[kv].max(self.cursor);
        debug_assert!(target <= p);

        let moved = self.sorted[target];
        self.sorted.swap(target, p);
        self.position[ids::vid_index(moved)] = p;
        self.position[v] = target;

        self.bucket_head[kv] = target + 1;
        self.key[v] = kv - 1;

        #[cfg(feature = "stable")]
        self.restore_id_order(kv);
    }

    /// Re-sorts the unvisited parts of the two buckets touched by a
    /// decrement so equal-key vertices sit in ascending id order.
    #[cfg(feature = "stable")]
    fn restore_id_order(&mut self, from_key: usize) {
        for k in [from_key - 1, from_key] {
            let start = self.bucket_head[k].max(self.cursor);
            let end = if k + 1 < self.bucket_head.len() {
                self.bucket_head[k + 1]
            } else {
                self.sorted.len()
            };
            if start < end {
                let slice = &mut self.sorted[start..end];
                slice.sort_unstable();
                for (i, &w) in slice.iter().enumerate() {
                    self.position[ids::vid_index(w)] = start + i;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BucketList;

    fn drain(mut buckets: BucketList) -> Vec<u64> {
        let mut order = Vec::new();
        while let Some(v) = buckets.next() {
            order.push(u64::from(v));
        }
        order
    }

    #[test]
    fn yields_in_key_order_with_id_ties() {
        let buckets =
            BucketList::new(vec![2, 0, 1, 2, 0]).map_or_else(|_| unreachable!(), |b| b);
        assert_eq!(drain(buckets), vec![1, 4, 2, 0, 3]);
    }

    #[test]
    fn decrement_moves_one_bucket_down() {
        let mut buckets =
            BucketList::new(vec![0, 2, 3, 2]).map_or_else(|_| unreachable!(), |b| b);
        assert_eq!(buckets.next(), Some(0));

        // Vertex 3 drops to key 1 and jumps ahead of the key-2 bucket.
        buckets.decrement(3);
        assert_eq!(buckets.key_of(3), 1);
        assert!(buckets.pending(3));

        assert_eq!(buckets.next(), Some(3));
        assert_eq!(buckets.next(), Some(1));
        assert_eq!(buckets.next(), Some(2));
        assert_eq!(buckets.next(), None);
    }

    #[test]
    fn decrement_never_disturbs_yielded_positions() {
        let mut buckets = BucketList::new(vec![2, 2]).map_or_else(|_| unreachable!(), |b| b);
        assert_eq!(buckets.next(), Some(0));
        assert!(!buckets.pending(0));

        // Vertex 1's bucket front lies before the cursor; the clamped swap
        // leaves it in place.
        buckets.decrement(1);
        assert_eq!(buckets.key_of(1), 1);
        assert_eq!(buckets.next(), Some(1));
        assert_eq!(buckets.next(), None);
    }

    #[cfg(feature = "stable")]
    #[test]
    fn stable_mode_restores_id_order_within_buckets() {
        let mut buckets =
            BucketList::new(vec![2, 2, 2, 2]).map_or_else(|_| unreachable!(), |b| b);

        // Dropping 3 then 1 into the lower bucket would leave them in
        // arrival order; stable mode re-sorts each touched bucket by id.
        buckets.decrement(3);
        buckets.decrement(1);
        assert_eq!(drain(buckets), vec![1, 3, 0, 2]);
    }

    #[cfg(not(feature = "stable"))]
    #[test]
    fn repeated_decrements_reach_zero() {
        let mut buckets =
            BucketList::new(vec![3, 1, 0]).map_or_else(|_| unreachable!(), |b| b);
        buckets.decrement(0);
        buckets.decrement(0);
        buckets.decrement(0);
        assert_eq!(buckets.key_of(0), 0);
        // Key order is now 2, 0, 1 with the tie between 2 and 0 resolved by
        // arrival: 0 moved in front of 1 but behind the original key-0 run.
        assert_eq!(drain(buckets), vec![2, 0, 1]);
    }
}
