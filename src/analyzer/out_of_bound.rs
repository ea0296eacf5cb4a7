//! Out-of-bound cross tabulation of the two axes of composite properties.
//!
//! Each sample is classified on X and on Y against the envelope spanned by two
//! reference properties; the histogram counts co-occurring `(x, y)` classes.
//! Keys with a zero count are simply absent.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use tracing::debug;

use crate::analyzer::bound::{Bound, BoundClass};
use crate::error::{CurveError, Result};
use crate::lerp::{even_coefs, lerp_family};
use crate::modifier::Modifier;
use crate::property::CompositeProperty;

/// `(x class, y class)`.
pub type Cell = (BoundClass, BoundClass);

/// Sparse 3x3 occurrence map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Histogram<T = u64> {
    cells: BTreeMap<Cell, T>,
}

impl<T: Copy + Default + AddAssign> Histogram<T> {
    pub fn new() -> Self {
        Self { cells: BTreeMap::new() }
    }

    pub fn add(&mut self, x: BoundClass, y: BoundClass, amount: T) {
        *self.cells.entry((x, y)).or_default() += amount;
    }

    /// Count at `(x, y)`, zero when absent.
    pub fn get(&self, x: BoundClass, y: BoundClass) -> T {
        self.cells.get(&(x, y)).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, T)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, *v))
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn total(&self) -> T {
        let mut total = T::default();
        for v in self.cells.values() {
            total += *v;
        }
        total
    }

    /// Sums `other` into `self`, key by key.
    pub fn accumulate(&mut self, other: &Self) {
        for ((x, y), v) in other.iter() {
            self.add(x, y, v);
        }
    }

    /// Folds `(i, j)` and `(j, i)` onto the key with `i >= j`.
    ///
    /// Useful when the two axes play symmetric roles. Idempotent, and the
    /// total is unchanged.
    pub fn merged(&self) -> Self {
        let mut out = Self::new();
        for ((x, y), v) in self.iter() {
            if x >= y {
                out.add(x, y, v);
            } else {
                out.add(y, x, v);
            }
        }
        out
    }

    /// Dense grid indexed `[y][x]` (see [`BoundClass::index`]), absent keys set to `fill`.
    pub fn to_grid(&self, fill: T) -> [[T; 3]; 3] {
        let mut grid = [[fill; 3]; 3];
        for ((x, y), v) in self.iter() {
            grid[y.index()][x.index()] = v;
        }
        grid
    }
}

impl Histogram<u64> {
    /// Every count as a percentage of the total.
    pub fn to_percent(&self) -> Result<Histogram<f64>> {
        let total = self.total();
        if total == 0 {
            return Err(CurveError::EmptyHistogram);
        }
        let total = total as f64;
        Ok(Histogram {
            cells: self.cells.iter().map(|(k, v)| (*k, *v as f64 / total * 100.0)).collect(),
        })
    }
}

impl<T: Copy + Default + AddAssign> FromIterator<(Cell, T)> for Histogram<T> {
    fn from_iter<I: IntoIterator<Item = (Cell, T)>>(iter: I) -> Self {
        let mut out = Self::new();
        for ((x, y), v) in iter {
            out.add(x, y, v);
        }
        out
    }
}

/// Classifies every sample against the per-axis envelope of `bound0`/`bound1`.
pub fn analyze<X: Modifier, Y: Modifier>(
    samples: &[CompositeProperty<X, Y>],
    bound0: &CompositeProperty<X, Y>,
    bound1: &CompositeProperty<X, Y>,
) -> Histogram {
    let bx = Bound::from_properties(&bound0.x, &bound1.x);
    let by = Bound::from_properties(&bound0.y, &bound1.y);
    let mut out = Histogram::new();
    for s in samples {
        let (x, y) = s.values();
        out.add(bx.classify(x), by.classify(y), 1);
    }
    out
}

/// Free-function form of [`Histogram::merged`].
pub fn merge<T: Copy + Default + AddAssign>(h: &Histogram<T>) -> Histogram<T> {
    h.merged()
}

/// Free-function form of [`Histogram::to_percent`].
pub fn to_percent(h: &Histogram) -> Result<Histogram<f64>> {
    h.to_percent()
}

/// For each target, interpolates `base -> target` at `0, 1/steps, .., 1` and
/// classifies the family against `(base, target)`. Histograms are summed over
/// targets.
pub fn analyze_across_lerp_family<X: Modifier, Y: Modifier>(
    base: &CompositeProperty<X, Y>,
    targets: &[CompositeProperty<X, Y>],
    steps: usize,
) -> Result<Histogram> {
    let coefs = even_coefs(steps)?;
    let mut out = Histogram::new();
    for (index, target) in targets.iter().enumerate() {
        let family = lerp_family(base, target, &coefs)?;
        let part = analyze(&family, base, target);
        debug!(
            target: "curve_balance::analyzer",
            target_index = index,
            samples = family.len(),
            inside = part.get(BoundClass::Inside, BoundClass::Inside),
            "lerp family classified"
        );
        out.accumulate(&part);
    }
    Ok(out)
}
