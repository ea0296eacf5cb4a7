//! Below / inside / above classification against a reference envelope.

use crate::modifier::Modifier;
use crate::property::ValueProperty;

/// Where a value falls relative to a [`Bound`]. Ordered `Below < Inside < Above`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundClass {
    Below = -1,
    Inside = 0,
    Above = 1,
}

impl BoundClass {
    pub const ALL: [Self; 3] = [Self::Below, Self::Inside, Self::Above];

    /// `-1`, `0` or `1`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Row/column index `0..3` in a dense 3x3 grid.
    #[inline]
    pub fn index(self) -> usize {
        (self.as_i8() + 1) as usize
    }
}

/// Closed interval `[lower, upper]` built from two endpoints in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bound {
    lower: f64,
    upper: f64,
}

impl Bound {
    /// IEEE `min`/`max`: a single NaN endpoint collapses onto the other one.
    pub fn new(a: f64, b: f64) -> Self {
        Self { lower: a.min(b), upper: a.max(b) }
    }

    /// Envelope spanned by the real values of two properties.
    pub fn from_properties<M: Modifier>(a: &ValueProperty<M>, b: &ValueProperty<M>) -> Self {
        Self::new(a.transform(), b.transform())
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Endpoints classify as `Inside`. NaN is always out of bound (`Above`).
    #[inline]
    pub fn classify(&self, value: f64) -> BoundClass {
        if value.is_nan() {
            BoundClass::Above
        } else if value < self.lower {
            BoundClass::Below
        } else if value > self.upper {
            BoundClass::Above
        } else {
            BoundClass::Inside
        }
    }

    /// Classifies every value, preserving order and length.
    pub fn locate(&self, values: &[f64]) -> Vec<BoundClass> {
        values.iter().map(|&v| self.classify(v)).collect()
    }
}
