//! Odometer-style iteration over the multi-indices of a tensor whose number of
//! axes is only known at runtime.
//!
//! A tensor of type *V*<sup>⊗*n*</sup> with dim *V* = *k* has *k*<sup>*n*</sup>
//! entries addressed by tuples (*i*<sub>1</sub>, ..., *i*<sub>*n*</sub>) with
//! each *i*<sub>*p*</sub> ∈ {0, ..., *k* - 1}. [`MultiIndex`] walks these tuples
//! as a mixed-radix counter in lexicographic (row-major) order, which is also
//! the memory order of a standard-layout [`ndarray`] array.
//!
//! ```
//! use schur_transform::multi_index::MultiIndex;
//!
//! let all: Vec<Vec<usize>> = MultiIndex::new(2, 2).collect();
//! assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
//! ```

/// Iterator over all multi-indices in {0, ..., `radix` - 1}<sup>`len`</sup>,
/// in lexicographic order.
///
/// The last position varies fastest. Zero-length indices yield a single empty
/// tuple; a zero radix (with nonzero length) yields nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiIndex {
    radix: usize,
    current: Vec<usize>,
    done: bool,
}

impl MultiIndex {
    /// Create a new odometer over `len` positions, each running over
    /// `0..radix`.
    pub fn new(len: usize, radix: usize) -> Self {
        Self { radix, current: vec![0; len], done: radix == 0 && len > 0 }
    }

    /// Return the number of positions in each yielded multi-index.
    pub fn len(&self) -> usize { self.current.len() }

    /// Return `true` if the yielded multi-indices have no positions.
    pub fn is_empty(&self) -> bool { self.current.is_empty() }

    /// Return the extent of each position.
    pub fn radix(&self) -> usize { self.radix }

    /// Return the total number of multi-indices, *radix*<sup>*len*</sup>.
    pub fn count_total(&self) -> usize {
        self.radix.pow(self.current.len() as u32)
    }

    // advance the counter by one, carrying leftward; returns `false` on
    // rollover past the last multi-index
    fn step(&mut self) -> bool {
        for digit in self.current.iter_mut().rev() {
            *digit += 1;
            if *digit < self.radix { return true; }
            *digit = 0;
        }
        false
    }
}

impl Iterator for MultiIndex {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done { return None; }
        let item = self.current.clone();
        self.done = !self.step();
        Some(item)
    }
}

/// Convert a multi-index into its row-major flat offset for an array whose
/// axes all have extent `radix`.
///
/// Positions are not bounds-checked.
pub fn flatten(index: &[usize], radix: usize) -> usize {
    index.iter().fold(0, |acc, i| acc * radix + i)
}
