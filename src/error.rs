//! Crate error type. Every variant is a violated precondition; nothing here is
//! retried or recovered internally.

use thiserror::Error;

/// Errors produced by the blend algebra and the analyzers.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CurveError {
    /// Values and weights must pair up one to one.
    #[error("weighted mean needs one weight per value ({values} values, {weights} weights)")]
    LengthMismatch { values: usize, weights: usize },
    /// Nothing to blend.
    #[error("weighted mean over an empty sequence")]
    Empty,
    /// Weights must be finite and `>= 0`.
    #[error("weight {weight} at index {index} is negative or not finite")]
    InvalidWeight { index: usize, weight: f64 },
    /// Weights are valid individually but cannot be normalised.
    #[error("weights sum to zero, cannot normalise")]
    ZeroWeightTotal,
    /// Interpolation is only defined on `[0, 1]`.
    #[error("interpolation coefficient {0} is outside [0, 1]")]
    CoefOutOfRange(f64),
    /// Shape parameters of a pow curve must be strictly positive.
    #[error("{param} must be > 0, got {value}")]
    NonPositiveParameter { param: &'static str, value: f64 },
    /// A mixture needs at least one term carrying weight.
    #[error("mixture needs at least one function with positive weight")]
    EmptyMixture,
    #[error("proportion {0} is outside [0, 1]")]
    ProportionOutOfRange(f64),
    /// A proportion modifier must map 0 to 0 and 1 to 1.
    #[error("proportion modifier must fix 0 and 1 (got p(0) = {at_zero}, p(1) = {at_one})")]
    ProportionEndpoints { at_zero: f64, at_one: f64 },
    /// `parts` positive integers can never sum to `total`.
    #[error("cannot split {total} into {parts} positive parts (need 2 <= parts <= total)")]
    InvalidComposition { total: u32, parts: usize },
    #[error("subset size {k} is not in 1..={available}")]
    InvalidSubsetSize { k: usize, available: usize },
    #[error("index {index} is out of range for {len} base properties")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("need at least {needed} base properties, got {got}")]
    NotEnoughProperties { needed: usize, got: usize },
    #[error("lerp family needs at least one step")]
    ZeroSteps,
    /// Percentages are undefined for a histogram with no mass.
    #[error("histogram has a zero total, cannot convert to percentages")]
    EmptyHistogram,
    #[error("cannot compute percentiles of an empty sample population")]
    EmptyPopulation,
    #[error("sample {index} is NaN, percentiles are undefined")]
    NanSample { index: usize },
}

pub type Result<T> = std::result::Result<T, CurveError>;
