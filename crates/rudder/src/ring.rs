//! The ring: an ordered sequence of virtual-node positions.

/// Growable sequence of 32-bit virtual-node positions.
///
/// The ring is *not* self-sorting: the owner inserts a batch of positions
/// and must call [`sort`](Ring::sort) before the next
/// [`successor`](Ring::successor) lookup. Duplicate positions (label
/// collisions) are kept.
#[derive(Debug, Clone)]
pub(crate) struct Ring {
    /// Insertion order until sorted, ascending afterwards.
    positions: Vec<u32>,
    /// Capacity increment applied when the backing storage fills up.
    grow_by: usize,
}

impl Ring {
    /// Create an empty ring whose storage grows `grow_by` positions at a
    /// time.
    pub(crate) fn new(grow_by: usize) -> Self {
        Self {
            positions: Vec::with_capacity(grow_by),
            grow_by,
        }
    }

    /// Append a position. No duplicate rejection, no sorting.
    pub(crate) fn insert(&mut self, position: u32) {
        if self.positions.len() == self.positions.capacity() {
            self.positions.reserve_exact(self.grow_by);
        }
        self.positions.push(position);
    }

    /// Drop all positions, keeping the allocated storage for the next
    /// rebuild.
    pub(crate) fn clear(&mut self) {
        self.positions.clear();
    }

    /// Sort positions ascending. Must run after every insertion batch and
    /// before any successor lookup.
    pub(crate) fn sort(&mut self) {
        self.positions.sort_unstable();
    }

    /// First position strictly greater than `position`, wrapping to the
    /// smallest position when the query is at or past the maximum.
    /// `None` on an empty ring.
    ///
    /// Requires the ring to be sorted.
    pub(crate) fn successor(&self, position: u32) -> Option<u32> {
        if self.positions.is_empty() {
            return None;
        }
        let i = self.positions.partition_point(|&p| p <= position);
        Some(if i == self.positions.len() {
            self.positions[0]
        } else {
            self.positions[i]
        })
    }

    /// Number of positions, duplicates included.
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.positions.capacity()
    }
}
