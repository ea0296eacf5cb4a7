//! Properties: a base scalar paired with its modifier, and 2-axis composites.
//!
//! Both blend field by field and delegate to each field's own weighted mean,
//! so modifier-specific blending rules still apply inside a composite.

use crate::error::Result;
use crate::lerp::Lerp;
use crate::modifier::{Modifier, ModifierRecord};

/// One axis: `real = modifier.transform(base_value)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueProperty<M> {
    pub base_value: f64,
    pub modifier: M,
}

impl<M: Modifier> ValueProperty<M> {
    pub fn new(base_value: f64, modifier: M) -> Self {
        Self { base_value, modifier }
    }

    #[inline]
    pub fn transform(&self) -> f64 {
        self.modifier.transform(self.base_value)
    }

    pub fn describe(&self) -> PropertyRecord {
        PropertyRecord {
            real_value: self.transform(),
            base_value: self.base_value,
            modifier: self.modifier.describe(),
        }
    }
}

impl<M: Modifier> Lerp for ValueProperty<M> {
    fn add(&self, o: &Self) -> Self {
        Self {
            base_value: self.base_value + o.base_value,
            modifier: self.modifier.add(&o.modifier),
        }
    }

    fn scale(&self, w: f64) -> Self {
        Self { base_value: self.base_value * w, modifier: self.modifier.scale(w) }
    }

    fn weighted_mean_by<T, F>(items: &[T], weights: &[f64], project: F) -> Result<Self>
    where
        F: Fn(&T) -> &Self,
    {
        Ok(Self {
            base_value: f64::weighted_mean_by(items, weights, |t| &project(t).base_value)?,
            modifier: M::weighted_mean_by(items, weights, |t| &project(t).modifier)?,
        })
    }
}

/// Real values of a batch of properties, in order.
pub fn transform_values<M: Modifier>(properties: &[ValueProperty<M>]) -> Vec<f64> {
    properties.iter().map(ValueProperty::transform).collect()
}

/// Two independently modified axes.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeProperty<X, Y = X> {
    pub x: ValueProperty<X>,
    pub y: ValueProperty<Y>,
}

impl<X: Modifier, Y: Modifier> CompositeProperty<X, Y> {
    pub fn new(x: ValueProperty<X>, y: ValueProperty<Y>) -> Self {
        Self { x, y }
    }

    /// `(real_x, real_y)`.
    #[inline]
    pub fn values(&self) -> (f64, f64) {
        (self.x.transform(), self.y.transform())
    }

    pub fn describe(&self) -> CompositeRecord {
        CompositeRecord { x: self.x.describe(), y: self.y.describe() }
    }
}

impl<X: Modifier, Y: Modifier> Lerp for CompositeProperty<X, Y> {
    fn add(&self, o: &Self) -> Self {
        Self { x: self.x.add(&o.x), y: self.y.add(&o.y) }
    }

    fn scale(&self, w: f64) -> Self {
        Self { x: self.x.scale(w), y: self.y.scale(w) }
    }

    fn weighted_mean_by<T, F>(items: &[T], weights: &[f64], project: F) -> Result<Self>
    where
        F: Fn(&T) -> &Self,
    {
        Ok(Self {
            x: ValueProperty::weighted_mean_by(items, weights, |t| &project(t).x)?,
            y: ValueProperty::weighted_mean_by(items, weights, |t| &project(t).y)?,
        })
    }
}

/// Real X values and real Y values of a batch, as two parallel lists.
pub fn split_values<X: Modifier, Y: Modifier>(
    properties: &[CompositeProperty<X, Y>],
) -> (Vec<f64>, Vec<f64>) {
    properties.iter().map(CompositeProperty::values).unzip()
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyRecord {
    pub real_value: f64,
    pub base_value: f64,
    pub modifier: ModifierRecord,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeRecord {
    pub x: PropertyRecord,
    pub y: PropertyRecord,
}
