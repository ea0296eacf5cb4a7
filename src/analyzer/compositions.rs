//! Enumeration of blend ratios and of the subsets they apply to.
//!
//! [`WeightCompositions`] walks every ordered tuple of `parts` positive
//! integers summing to `total`, by mutating one owned vector in place: an
//! odometer on the tail digits with the head digit absorbing the remainder.
//! Each step touches only the digits that roll over.
//!
//! For `total = 5, parts = 2` the sequence is `(4,1) (3,2) (2,3) (1,4)`.

use crate::error::{CurveError, Result};

/// Pull-style enumerator of integer compositions.
#[derive(Clone, Debug)]
pub struct WeightCompositions {
    weights: Vec<u32>,
    total: u32,
    max_part: u32,
    sum: u32,
    started: bool,
    exhausted: bool,
}

impl WeightCompositions {
    /// Requires `2 <= parts <= total`.
    pub fn new(total: u32, parts: usize) -> Result<Self> {
        if parts < 2 || parts > total as usize {
            return Err(CurveError::InvalidComposition { total, parts });
        }
        let mut out = Self {
            weights: Vec::new(),
            total,
            max_part: total - parts as u32 + 1,
            sum: 0,
            started: false,
            exhausted: false,
        };
        out.weights.resize(parts, 1);
        out.reset();
        Ok(out)
    }

    /// Back to the pre-first state `[1, .., 1, 0]`.
    pub fn reset(&mut self) {
        self.weights.fill(1);
        if let Some(last) = self.weights.last_mut() {
            *last = 0;
        }
        self.sum = self.weights.len() as u32 - 1;
        self.started = false;
        self.exhausted = false;
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn parts(&self) -> usize {
        self.weights.len()
    }

    /// Number of compositions, `C(total - 1, parts - 1)`, saturating at `u64::MAX`.
    pub fn composition_count(&self) -> u64 {
        let n = u128::from(self.total - 1);
        let r = self.weights.len() as u128 - 1;
        let k = r.min(n - r);
        // C(n, i) grows with i up to n / 2, so once past u64 it stays past.
        let mut acc: u128 = 1;
        for i in 0..k {
            let Some(next) = acc.checked_mul(n - i) else {
                return u64::MAX;
            };
            acc = next / (i + 1);
            if acc > u128::from(u64::MAX) {
                return u64::MAX;
            }
        }
        acc as u64
    }

    /// Moves to the next composition and lends it, `None` once exhausted.
    pub fn advance(&mut self) -> Option<&[u32]> {
        if self.exhausted {
            return None;
        }
        // The tail has been fully pushed into weights[1].
        if self.started && self.weights[1] == self.max_part {
            self.exhausted = true;
            return None;
        }
        if !self.started && self.max_part == 1 {
            // total == parts: (1, .., 1) is the only composition.
            self.weights.fill(1);
            self.sum = self.total;
            self.started = true;
            self.exhausted = true;
            return Some(&self.weights);
        }
        self.started = true;

        let w = &mut self.weights;
        self.sum -= w[0] - 1;
        w[0] = 1;

        let mut i = w.len() - 1;
        w[i] += 1;
        self.sum += 1;
        while i > 1 && (w[i] > self.max_part || self.sum > self.total) {
            self.sum -= w[i] - 1;
            w[i] = 1;
            i -= 1;
            w[i] += 1;
            self.sum += 1;
        }

        w[0] += self.total - self.sum;
        self.sum = self.total;
        Some(&self.weights)
    }
}

impl Iterator for WeightCompositions {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[u32]>::to_vec)
    }
}

/// Lexicographic `k`-subsets of `0..n`, as sorted index lists.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    first: bool,
}

impl Combinations {
    /// Empty when `k == 0` or `k > n`.
    pub fn new(n: usize, k: usize) -> Self {
        let first = k > 0 && k <= n;
        Self { n, indices: (0..k).collect(), first }
    }

    /// Lends the next subset.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.first {
            self.first = false;
            return Some(&self.indices);
        }
        let k = self.indices.len();
        if k == 0 || k > self.n {
            return None;
        }
        // Rightmost index that can still move.
        let mut i = k;
        loop {
            if i == 0 {
                self.indices.clear();
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}
