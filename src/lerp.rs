//! # Lerpable value protocol
//!
//! Every value kind a designer can blend implements [`Lerp`]: it can be added to
//! another value of the *same* type and scaled by a scalar. From those two
//! operations the trait derives the normalised weighted mean and the
//! interpolation on `[0, 1]`.
//!
//! Kinds whose blend is not a plain convex combination (function mixtures,
//! point modifiers) override [`Lerp::weighted_mean_by`]; everything else,
//! including [`Lerp::lerp`], routes through it.
//!
//! ## Contract
//! - `weighted_mean([v], [w]) == v` for any `w`, without dividing by `w`.
//! - `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b` exactly.
//! - Otherwise `lerp(a, b, c) == weighted_mean([a, b], [1 - c, c])`.
//!
//! Operands are homogeneous by construction: the trait is implemented per
//! concrete type, so a mixed-kind blend does not type-check.

use crate::error::{CurveError, Result};

/// Algebra shared by every blendable value kind.
pub trait Lerp: Clone {
    /// `self + other`, producing a new value.
    fn add(&self, other: &Self) -> Self;

    /// `self * weight`, producing a new value.
    fn scale(&self, weight: f64) -> Self;

    /// Weighted mean of `project(item)` over `items`.
    ///
    /// The projection lets composite values blend one field at a time without
    /// cloning the field out of every operand first.
    fn weighted_mean_by<T, F>(items: &[T], weights: &[f64], project: F) -> Result<Self>
    where
        F: Fn(&T) -> &Self,
    {
        let Some(total) = blend_total(items.len(), weights)? else {
            return Ok(project(&items[0]).clone());
        };
        let mut acc = project(&items[0]).scale(weights[0] / total);
        for (item, w) in items.iter().zip(weights).skip(1) {
            acc = acc.add(&project(item).scale(w / total));
        }
        Ok(acc)
    }

    /// Normalised weighted mean of `values`.
    fn weighted_mean(values: &[Self], weights: &[f64]) -> Result<Self> {
        Self::weighted_mean_by(values, weights, |v| v)
    }

    /// Linear interpolation, `coef` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, coef: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&coef) {
            return Err(CurveError::CoefOutOfRange(coef));
        }
        if coef == 0.0 {
            return Ok(a.clone());
        }
        if coef == 1.0 {
            return Ok(b.clone());
        }
        Self::weighted_mean_by(&[a, b], &[1.0 - coef, coef], |v| *v)
    }
}

impl Lerp for f64 {
    #[inline]
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn scale(&self, weight: f64) -> Self {
        self * weight
    }
}

/// Validates a blend and returns the normalising total.
///
/// `Ok(None)` means a single operand: the caller must return it unchanged.
/// Weights are only inspected once there is more than one operand.
pub fn blend_total(len: usize, weights: &[f64]) -> Result<Option<f64>> {
    if len != weights.len() {
        return Err(CurveError::LengthMismatch { values: len, weights: weights.len() });
    }
    if len == 0 {
        return Err(CurveError::Empty);
    }
    if len == 1 {
        return Ok(None);
    }
    let mut total = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CurveError::InvalidWeight { index, weight });
        }
        total += weight;
    }
    if total <= 0.0 {
        return Err(CurveError::ZeroWeightTotal);
    }
    Ok(Some(total))
}

/// Free-function form of [`Lerp::lerp`].
#[inline]
pub fn lerp<T: Lerp>(a: &T, b: &T, coef: f64) -> Result<T> {
    T::lerp(a, b, coef)
}

/// Free-function form of [`Lerp::weighted_mean`].
#[inline]
pub fn weighted_mean<T: Lerp>(values: &[T], weights: &[f64]) -> Result<T> {
    T::weighted_mean(values, weights)
}

/// One interpolation between `a` and `b` per coefficient, in order.
pub fn lerp_family<T: Lerp>(a: &T, b: &T, coefs: &[f64]) -> Result<Vec<T>> {
    coefs.iter().map(|&c| T::lerp(a, b, c)).collect()
}

/// `steps + 1` evenly spaced coefficients `0, 1/steps, .., 1`.
///
/// The last coefficient is exactly `1.0`, so a lerp family built from these
/// ends exactly on its target.
pub fn even_coefs(steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(CurveError::ZeroSteps);
    }
    let n = steps as f64;
    Ok((0..=steps).map(|i| i as f64 / n).collect())
}
