// src/modifier/mod.rs

//! # Scalar response modifiers
//!
//! A modifier turns a raw base scalar into the "real" value a designer tunes
//! (a balancing curve). Each kind is an immutable value that also implements
//! the [`Lerp`] protocol, so presets can be blended.
//!
//! | Kind | Blends by |
//! |------|-----------|
//! | [`CurveModifier`] | parameter-space sum/scale of its six parameters |
//! | [`FunctionMixture`] | union of weighted response functions, keyed by [`FunctionId`] |
//! | [`ProportionalMixture`] | same union, but weights modulate the output |
//! | [`PointModifier`] | per-field blend, direction renormalised to the mean length |
//!
//! [`PowModifier`] and [`FunctionModifier`] are plain [`ResponseFunction`]s;
//! they take part in blends once lifted into a single-term [`FunctionMixture`].

use crate::lerp::Lerp;

pub mod curve;
pub mod function;
pub mod point;
pub mod proportional;

pub use curve::*;
pub use function::*;
pub use point::*;
pub use proportional::*;

/// A blendable transformation `base -> real`.
pub trait Modifier: Lerp + Send + Sync + 'static {
    fn transform(&self, base: f64) -> f64;

    /// Structured snapshot of the modifier's parameters.
    fn describe(&self) -> ModifierRecord;

    fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform(v)).collect()
    }
}

/// Which rule a mixture uses to apply its weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MixtureKind {
    /// `f_i(w_i * x)`
    InputScaled,
    /// `f_i(x) * p_i(w_i)`
    Proportional,
}

/// One weighted function inside a mixture record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermRecord {
    pub id: u64,
    pub label: String,
    pub weight: f64,
}

/// Plain-data description of a modifier, for whatever renders it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierRecord {
    Curve {
        log_offset: f64,
        offset: f64,
        period: f64,
        sin_strength: f64,
        coef: f64,
        power: f64,
    },
    Mixture {
        kind: MixtureKind,
        terms: Vec<TermRecord>,
    },
    Point {
        coef: f64,
        center: [f64; 2],
        direction: [f64; 2],
        final_position: [f64; 2],
    },
}
