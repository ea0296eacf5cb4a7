//! Random example presets for exploring the analyzers.
//! Callers inject the RNG (e.g. a seeded `bevy_prng::WyRand`) so runs replay.

use std::f64::consts::TAU;

use bevy_prng::WyRand;
use glam::DVec2;
use rand_core::{RngCore, SeedableRng};

use crate::error::Result;
use crate::modifier::{CurveModifier, PointModifier, PowModifier};

/// A `WyRand` seeded from a `u64`; the same seed replays the same presets.
pub fn seeded_rng(seed: u64) -> WyRand {
    WyRand::from_seed(seed.to_le_bytes())
}

/// Uniform in `[0, 1)` from the top 53 bits.
#[inline]
pub fn uniform01(rng: &mut impl RngCore) -> f64 {
    ((rng.next_u64() >> 11) as f64) / ((1u64 << 53) as f64)
}

/// Uniform in `[lo, hi)`.
#[inline]
pub fn uniform(rng: &mut impl RngCore, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * uniform01(rng)
}

/// Positive factor centred on 1: `1 + t` for `t >= 0`, `1 / (1 - t)` below,
/// with `t ~ U(-scale, scale)`. Growth and shrink are equally likely.
pub fn center_one(rng: &mut impl RngCore, scale: f64) -> f64 {
    let t = uniform(rng, -scale, scale);
    if t >= 0.0 { t + 1.0 } else { 1.0 / (1.0 - t) }
}

pub fn random_curve(rng: &mut impl RngCore) -> CurveModifier {
    CurveModifier {
        log_offset: uniform(rng, 0.0, 100.0).sqrt(),
        offset: uniform(rng, 0.0, TAU),
        period: uniform(rng, 0.1, 2.9).sqrt(),
        sin_strength: uniform(rng, 0.0, 50.0).sqrt(),
        coef: uniform(rng, 0.0, 5.0).sqrt(),
        power: uniform(rng, 0.5, 5.0).sqrt(),
    }
}

/// Pow curve with every parameter drawn around 1 (power flattened by `⁴√`).
pub fn random_pow(rng: &mut impl RngCore, scale: f64) -> Result<PowModifier> {
    let power = center_one(rng, scale).sqrt().sqrt();
    let x_1 = center_one(rng, scale).sqrt();
    let y_1 = center_one(rng, scale).sqrt();
    PowModifier::new(power, x_1, y_1)
}

/// Uniform over the unit disc.
pub fn random_unit_disc(rng: &mut impl RngCore) -> DVec2 {
    let theta = uniform(rng, 0.0, TAU);
    let r = uniform01(rng).sqrt();
    DVec2::new(r * theta.cos(), r * theta.sin())
}

pub fn random_point(rng: &mut impl RngCore) -> PointModifier {
    let coef = uniform(rng, 1.0, 100.0);
    let center = random_unit_disc(rng);
    let direction = random_unit_disc(rng);
    PointModifier::new(coef, center, direction)
}
