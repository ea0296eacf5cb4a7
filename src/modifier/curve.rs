//! Oscillating power curve.
//!
//! `f(x) = x * (1 + pos(x) + neg(x))` where both envelopes are
//! `±coef / (1 + |sin_strength * sin(phase + period * ln(log_offset + x))|)^power`,
//! `pos` shifted by a quarter period. Blending is done on the parameters, not
//! on the resulting function.

use std::f64::consts::FRAC_PI_2;

use crate::lerp::Lerp;
use crate::modifier::{Modifier, ModifierRecord};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveModifier {
    pub log_offset: f64,
    pub offset: f64,
    pub period: f64,
    pub sin_strength: f64,
    pub coef: f64,
    pub power: f64,
}

impl CurveModifier {
    pub fn new(
        log_offset: f64,
        offset: f64,
        period: f64,
        sin_strength: f64,
        coef: f64,
        power: f64,
    ) -> Self {
        Self { log_offset, offset, period, sin_strength, coef, power }
    }

    #[inline]
    fn envelope(&self, x: f64, phase: f64, coef: f64) -> f64 {
        let wave = self.sin_strength * (phase + self.period * (self.log_offset + x).ln()).sin();
        coef * (1.0 / (1.0 + wave.abs())).powf(self.power)
    }

    /// Multiplicative factor applied to `x` (`f(x) / x`).
    pub fn gain(&self, x: f64) -> f64 {
        let pos = self.envelope(x, self.offset + FRAC_PI_2, self.coef);
        let neg = self.envelope(x, self.offset, -self.coef);
        1.0 + pos + neg
    }
}

impl Lerp for CurveModifier {
    fn add(&self, o: &Self) -> Self {
        Self {
            log_offset: self.log_offset + o.log_offset,
            offset: self.offset + o.offset,
            period: self.period + o.period,
            sin_strength: self.sin_strength + o.sin_strength,
            coef: self.coef + o.coef,
            power: self.power + o.power,
        }
    }

    fn scale(&self, w: f64) -> Self {
        Self {
            log_offset: self.log_offset * w,
            offset: self.offset * w,
            period: self.period * w,
            sin_strength: self.sin_strength * w,
            coef: self.coef * w,
            power: self.power * w,
        }
    }
}

impl Modifier for CurveModifier {
    #[inline]
    fn transform(&self, base: f64) -> f64 {
        base * self.gain(base)
    }

    fn describe(&self) -> ModifierRecord {
        ModifierRecord::Curve {
            log_offset: self.log_offset,
            offset: self.offset,
            period: self.period,
            sin_strength: self.sin_strength,
            coef: self.coef,
            power: self.power,
        }
    }
}
