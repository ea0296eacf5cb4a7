//! Mixtures whose weights modulate each function's *output*.
//!
//! Each term pairs a response function with a [`ProportionModifier`], a
//! continuous map `[0, 1] -> R` fixing 0 and 1. A term carrying weight `w`
//! contributes `sign(x) * f(|x|) * p(w)`, so the raw input reaches every
//! function unchanged.

use std::fmt;
use std::sync::Arc;

use crate::error::{CurveError, Result};
use crate::modifier::{
    FunctionHandle, FunctionId, Mixture, MixtureKind, MixtureTerm, ResponseFunction,
};

const ENDPOINT_TOLERANCE: f64 = 1e-9;

/// `[0, 1] -> R`, continuous, `p(0) = 0`, `p(1) = 1`.
#[derive(Clone)]
pub struct ProportionModifier {
    func: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl ProportionModifier {
    /// Checks the endpoint constraints; continuity is the caller's promise.
    pub fn new(func: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Result<Self> {
        let at_zero = func(0.0);
        let at_one = func(1.0);
        if !(at_zero.abs() <= ENDPOINT_TOLERANCE && (at_one - 1.0).abs() <= ENDPOINT_TOLERANCE) {
            return Err(CurveError::ProportionEndpoints { at_zero, at_one });
        }
        Ok(Self { func: Arc::new(func) })
    }

    /// `p(w) = w`.
    pub fn linear() -> Self {
        Self { func: Arc::new(|w: f64| w) }
    }

    #[inline]
    pub fn apply(&self, proportion: f64) -> f64 {
        (self.func)(proportion)
    }
}

impl fmt::Debug for ProportionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProportionModifier").finish_non_exhaustive()
    }
}

/// A response function plus the modifier applied to its blend proportion.
#[derive(Clone, Debug)]
pub struct ProportionalFunction {
    handle: FunctionHandle,
    proportion: ProportionModifier,
}

impl ProportionalFunction {
    pub fn new(function: impl Into<FunctionHandle>, proportion: ProportionModifier) -> Self {
        Self { handle: function.into(), proportion }
    }

    /// Evaluates the term directly; `proportion` must lie in `[0, 1]`.
    pub fn apply(&self, base: f64, proportion: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&proportion) {
            return Err(CurveError::ProportionOutOfRange(proportion));
        }
        Ok(self.evaluate(base, proportion))
    }

    pub fn function(&self) -> &dyn ResponseFunction {
        self.handle.function()
    }
}

impl PartialEq for ProportionalFunction {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl MixtureTerm for ProportionalFunction {
    const KIND: MixtureKind = MixtureKind::Proportional;

    #[inline]
    fn id(&self) -> FunctionId {
        self.handle.id()
    }

    #[inline]
    fn evaluate(&self, base: f64, weight: f64) -> f64 {
        self.handle.function().transform(base) * self.proportion.apply(weight)
    }

    fn label(&self) -> String {
        self.handle.function().label()
    }
}

/// Mixture whose weights pass through each term's [`ProportionModifier`].
pub type ProportionalMixture = Mixture<ProportionalFunction>;
