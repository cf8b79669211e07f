//! Index buffer: a closed, single-cycle permutation of `[0, n)`.
//!
//! Cell `i` holds the index of the cell visited after `i`. A buffer starts as
//! the identity and is shuffled with Sattolo's algorithm, which only produces
//! permutations made of one cycle of length `n`. A walk from cell 0 therefore
//! touches every cell before it comes back, whatever the seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::code::hop_read_unchecked;
use crate::error::ProbeError;

/// A permutation that has been checked (or built) to be closed over its own
/// indices. Traversal on this type skips bounds checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexBuffer {
    items: Vec<usize>,
}

impl IndexBuffer {
    /// Identity of length `elements`, shuffled into one random cycle.
    pub fn shuffled(elements: usize, seed: u64) -> Result<Self, ProbeError> {
        if elements == 0 {
            return Err(ProbeError::EmptyBuffer);
        }

        let mut items = identity(elements);
        let mut rng = StdRng::seed_from_u64(seed);
        sattolo_shuffle(&mut items, &mut rng);

        Ok(Self { items })
    }

    /// Adopt caller-supplied cells after checking they form one closed cycle.
    pub fn from_vec(items: Vec<usize>) -> Result<Self, ProbeError> {
        validate(&items)?;
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.items
    }

    /// Follow `next = items[next]` from cell 0, `hops` times.
    #[inline]
    pub fn hop(&self, hops: usize) -> usize {
        // SAFETY: construction guarantees a non-empty buffer whose values are
        // all valid indices into it.
        unsafe { hop_read_unchecked(&self.items, hops) }
    }

    /// Size of the buffer in bytes.
    pub fn size_bytes(&self) -> usize {
        self.items.len() * std::mem::size_of::<usize>()
    }
}

/// `[0, 1, .., n - 1]`
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Sattolo's shuffle: like Fisher–Yates, but `j` never equals `i`, so the
/// result is a uniformly random cyclic permutation.
pub fn sattolo_shuffle<R: Rng + ?Sized>(items: &mut [usize], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..i);
        items.swap(i, j);
    }
}

/// Check `items` is a permutation of `[0, n)` forming a single cycle.
pub fn validate(items: &[usize]) -> Result<(), ProbeError> {
    let len = items.len();
    if len == 0 {
        return Err(ProbeError::EmptyBuffer);
    }

    let mut seen = vec![false; len];
    for (index, &value) in items.iter().enumerate() {
        if value >= len {
            return Err(ProbeError::IndexOutOfRange { index, value, len });
        }
        if std::mem::replace(&mut seen[value], true) {
            return Err(ProbeError::DuplicateIndex { index, value });
        }
    }

    let cycle_len = cycle_len_from_zero(items);
    if cycle_len != len {
        return Err(ProbeError::NotSingleCycle { cycle_len, len });
    }

    Ok(())
}

/// Number of distinct cells visited from 0 before 0 recurs.
///
/// `items` must already be a permutation, otherwise the walk may never
/// return to 0.
pub fn cycle_len_from_zero(items: &[usize]) -> usize {
    let mut next = items[0];
    let mut steps = 1;
    while next != 0 {
        next = items[next];
        steps += 1;
    }
    steps
}
