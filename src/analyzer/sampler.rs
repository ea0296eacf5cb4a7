//! Combinatorial sampler over blends of base properties.
//!
//! For a subset size `k`, every `k`-subset of the base properties is blended
//! under every integer weight composition of `budget` into `k` parts. The
//! pooled blends are summarised per axis as 101 percentiles. Enumeration
//! order never reaches the statistics: percentiles are computed on sorted
//! copies of the pooled values.
//!
//! With the `parallel` feature, subsets are blended on the rayon pool.

use tracing::{debug, trace};

use crate::analyzer::compositions::{Combinations, WeightCompositions};
use crate::error::{CurveError, Result};
use crate::lerp::Lerp;
use crate::modifier::Modifier;
use crate::property::{CompositeProperty, split_values};

/// Upper bound on the blends reserved up front for one subset.
const PREALLOC_LIMIT: usize = 4096;

#[derive(Clone, Copy, Debug)]
pub struct SamplerConfig {
    /// Integer total each blend's weights sum to. Higher is finer and
    /// combinatorially slower.
    pub budget: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self { budget: 20 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Percentiles `0..=100` of one scalar population.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Centile {
    values: Vec<f64>,
}

impl Centile {
    pub const LAST: usize = 100;

    /// Linear interpolation between closest ranks. Rejects empty or NaN input.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(CurveError::EmptyPopulation);
        }
        if let Some(index) = samples.iter().position(|v| v.is_nan()) {
            return Err(CurveError::NanSample { index });
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let last = (sorted.len() - 1) as f64;
        let values = (0..=Self::LAST)
            .map(|p| {
                let rank = p as f64 / Self::LAST as f64 * last;
                let lo = rank.floor() as usize;
                let hi = rank.ceil() as usize;
                let (a, b) = (sorted[lo], sorted[hi]);
                if lo == hi || a == b || a.is_infinite() {
                    a
                } else if b.is_infinite() {
                    b
                } else {
                    // Clamped so rounding cannot step outside [a, b].
                    (a + (b - a) * (rank - lo as f64)).clamp(a, b)
                }
            })
            .collect();
        Ok(Self { values })
    }

    /// Percentile `p`, `None` past 100.
    pub fn get(&self, p: usize) -> Option<f64> {
        self.values.get(p).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn median(&self) -> f64 {
        self.values[50]
    }

    pub fn max(&self) -> f64 {
        self.values[Self::LAST]
    }
}

/// Per-axis percentiles of the blends of one subset size.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PercentileSummary {
    pub subset_size: usize,
    pub sample_count: usize,
    pub x: Centile,
    pub y: Centile,
}

impl PercentileSummary {
    fn from_population<X: Modifier, Y: Modifier>(
        subset_size: usize,
        population: &[CompositeProperty<X, Y>],
    ) -> Result<Self> {
        let (xs, ys) = split_values(population);
        Ok(Self {
            subset_size,
            sample_count: population.len(),
            x: Centile::from_samples(&xs)?,
            y: Centile::from_samples(&ys)?,
        })
    }

    pub fn axis(&self, axis: Axis) -> &Centile {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// `(0th, 50th, 100th)` percentiles of one axis.
    pub fn bounds(&self, axis: Axis) -> (f64, f64, f64) {
        let c = self.axis(axis);
        (c.min(), c.median(), c.max())
    }
}

/// One summary per subset size `1..=n`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerReport {
    pub by_subset_size: Vec<PercentileSummary>,
}

impl SamplerReport {
    pub fn summary(&self, subset_size: usize) -> Option<&PercentileSummary> {
        self.by_subset_size.iter().find(|s| s.subset_size == subset_size)
    }

    /// The centiles of one axis, ordered by subset size.
    pub fn axis_series(&self, axis: Axis) -> Vec<&Centile> {
        self.by_subset_size.iter().map(|s| s.axis(axis)).collect()
    }
}

/// Real values of one pooled blend, tagged with the subset size it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendPoint {
    pub x: f64,
    pub y: f64,
    pub subset_size: usize,
}

/// Weighted mean of `base[indices]` under integer `weights`.
pub fn blend_combination<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    indices: &[usize],
    weights: &[u32],
) -> Result<CompositeProperty<X, Y>> {
    if indices.len() != weights.len() {
        return Err(CurveError::LengthMismatch { values: indices.len(), weights: weights.len() });
    }
    if let Some(&index) = indices.iter().find(|&&i| i >= base.len()) {
        return Err(CurveError::IndexOutOfRange { index, len: base.len() });
    }
    let selected: Vec<&CompositeProperty<X, Y>> = indices.iter().map(|&i| &base[i]).collect();
    let weights: Vec<f64> = weights.iter().map(|&w| f64::from(w)).collect();
    CompositeProperty::<X, Y>::weighted_mean_by(&selected, &weights, |p| *p)
}

/// Every blend of one subset under every composition of `budget`.
fn blend_subset<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    indices: &[usize],
    budget: u32,
) -> Result<Vec<CompositeProperty<X, Y>>> {
    let selected: Vec<&CompositeProperty<X, Y>> = indices.iter().map(|&i| &base[i]).collect();
    let mut compositions = WeightCompositions::new(budget, indices.len())?;
    let capacity = usize::try_from(compositions.composition_count())
        .map_or(PREALLOC_LIMIT, |c| c.min(PREALLOC_LIMIT));
    let mut out = Vec::with_capacity(capacity);
    let mut weights = vec![0.0; indices.len()];
    let total = f64::from(budget);

    while let Some(parts) = compositions.advance() {
        for (w, &p) in weights.iter_mut().zip(parts) {
            *w = f64::from(p) / total;
        }
        out.push(CompositeProperty::<X, Y>::weighted_mean_by(&selected, &weights, |p| *p)?);
    }
    trace!(target: "curve_balance::sampler", ?indices, blends = out.len(), "subset blended");
    Ok(out)
}

#[cfg(not(feature = "parallel"))]
fn blend_subsets<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    k: usize,
    budget: u32,
) -> Result<Vec<CompositeProperty<X, Y>>> {
    let mut pool = Vec::new();
    let mut subsets = Combinations::new(base.len(), k);
    while let Some(indices) = subsets.advance() {
        pool.extend(blend_subset(base, indices, budget)?);
    }
    Ok(pool)
}

#[cfg(feature = "parallel")]
fn blend_subsets<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    k: usize,
    budget: u32,
) -> Result<Vec<CompositeProperty<X, Y>>> {
    use rayon::prelude::*;

    let subsets: Vec<Vec<usize>> = Combinations::new(base.len(), k).collect();
    let parts: Vec<Vec<CompositeProperty<X, Y>>> = subsets
        .par_iter()
        .map(|indices| blend_subset(base, indices, budget))
        .collect::<Result<_>>()?;
    Ok(parts.into_iter().flatten().collect())
}

/// The pooled population for subset size `k`: `base` itself when `k == 1`.
pub fn blend_samples<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    k: usize,
    config: SamplerConfig,
) -> Result<Vec<CompositeProperty<X, Y>>> {
    if k == 0 || k > base.len() {
        return Err(CurveError::InvalidSubsetSize { k, available: base.len() });
    }
    if k == 1 {
        return Ok(base.to_vec());
    }
    let pool = blend_subsets(base, k, config.budget)?;
    debug!(
        target: "curve_balance::sampler",
        subset_size = k,
        budget = config.budget,
        samples = pool.len(),
        "pooled blend samples"
    );
    Ok(pool)
}

/// Percentile summary of all blends of `k` base properties.
pub fn sample_for_subset_size<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    k: usize,
    config: SamplerConfig,
) -> Result<PercentileSummary> {
    let pool = blend_samples(base, k, config)?;
    PercentileSummary::from_population(k, &pool)
}

/// Summaries for every subset size `1..=base.len()`. Needs two or more bases.
pub fn sample_all<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    config: SamplerConfig,
) -> Result<SamplerReport> {
    if base.len() < 2 {
        return Err(CurveError::NotEnoughProperties { needed: 2, got: base.len() });
    }
    let by_subset_size = (1..=base.len())
        .map(|k| sample_for_subset_size(base, k, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(SamplerReport { by_subset_size })
}

/// Real `(x, y)` of every pooled blend for every subset size, tagged by size.
pub fn sample_points<X: Modifier, Y: Modifier>(
    base: &[CompositeProperty<X, Y>],
    config: SamplerConfig,
) -> Result<Vec<BlendPoint>> {
    if base.len() < 2 {
        return Err(CurveError::NotEnoughProperties { needed: 2, got: base.len() });
    }
    let mut out = Vec::new();
    for k in 1..=base.len() {
        for p in blend_samples(base, k, config)? {
            let (x, y) = p.values();
            out.push(BlendPoint { x, y, subset_size: k });
        }
    }
    Ok(out)
}
