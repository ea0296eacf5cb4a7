//! 2D point modifier: a `coef` plus a point `center + direction`.
//!
//! The scalar response is `base * coef`. Blending is *not* a plain per-field
//! mean:
//! - the blended direction keeps the linear combination's heading but takes
//!   the weighted mean of the operands' direction lengths;
//! - `coef` is then scaled by `1 + (y_renormalised - y_linear)`, the vertical
//!   displacement that renormalisation caused on the final position.
//!
//! The coef adjustment is a balancing heuristic kept as is, not a geometric
//! rule.

use glam::DVec2;

use crate::error::Result;
use crate::lerp::{Lerp, blend_total};
use crate::modifier::{Modifier, ModifierRecord};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointModifier {
    pub coef: f64,
    pub center: DVec2,
    pub direction: DVec2,
}

impl PointModifier {
    pub fn new(coef: f64, center: DVec2, direction: DVec2) -> Self {
        Self { coef, center, direction }
    }

    #[inline]
    pub fn final_position(&self) -> DVec2 {
        self.center + self.direction
    }

    /// Length of the direction vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction.length()
    }
}

impl Lerp for PointModifier {
    fn add(&self, o: &Self) -> Self {
        Self {
            coef: self.coef + o.coef,
            center: self.center + o.center,
            direction: self.direction + o.direction,
        }
    }

    fn scale(&self, w: f64) -> Self {
        Self { coef: self.coef * w, center: self.center * w, direction: self.direction * w }
    }

    fn weighted_mean_by<T, F>(items: &[T], weights: &[f64], project: F) -> Result<Self>
    where
        F: Fn(&T) -> &Self,
    {
        let Some(total) = blend_total(items.len(), weights)? else {
            return Ok(*project(&items[0]));
        };
        let mut linear = Self::new(0.0, DVec2::ZERO, DVec2::ZERO);
        let mut length = 0.0;
        for (item, w) in items.iter().zip(weights) {
            let p = project(item);
            let share = w / total;
            linear = linear.add(&p.scale(share));
            length += p.length() * share;
        }

        // A zero heading stays zero.
        let mut out = linear;
        out.direction = linear.direction.normalize_or_zero() * length;
        out.coef *= 1.0 + (out.final_position().y - linear.final_position().y);
        Ok(out)
    }
}

impl Modifier for PointModifier {
    #[inline]
    fn transform(&self, base: f64) -> f64 {
        base * self.coef
    }

    fn describe(&self) -> ModifierRecord {
        ModifierRecord::Point {
            coef: self.coef,
            center: self.center.to_array(),
            direction: self.direction.to_array(),
            final_position: self.final_position().to_array(),
        }
    }
}

/// Column view of a batch of point modifiers, ready for a scatter plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointScatter {
    pub centers: Vec<DVec2>,
    pub directions: Vec<DVec2>,
    pub finals: Vec<DVec2>,
    pub coefs: Vec<f64>,
}

impl PointScatter {
    pub fn collect(points: &[PointModifier]) -> Self {
        let mut out = Self {
            centers: Vec::with_capacity(points.len()),
            directions: Vec::with_capacity(points.len()),
            finals: Vec::with_capacity(points.len()),
            coefs: Vec::with_capacity(points.len()),
        };
        for p in points {
            out.centers.push(p.center);
            out.directions.push(p.direction);
            out.finals.push(p.final_position());
            out.coefs.push(p.coef);
        }
        out
    }
}
