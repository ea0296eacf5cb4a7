// src/analyzer/mod.rs

//! # Analyzers
//!
//! Two questions a designer asks about a family of presets, each answered by
//! plain functions over [`CompositeProperty`](crate::property::CompositeProperty)
//! slices. Nothing here prints or plots; callers render the returned aggregates.
//!
//! ## Local: "how often does a blend leave the envelope?"
//! - [`bound`]: `Bound` spanned by two reference values, `classify` /
//!   `locate` into `Below | Inside | Above`.
//! - [`out_of_bound`]: `analyze` cross-tabulates both axes into a sparse
//!   3x3 `Histogram`; `merged` folds mirrored keys, `to_percent`
//!   normalises; `analyze_across_lerp_family` sums the histograms of
//!   `base -> target` interpolations over several targets.
//!
//! ## Global: "what spread do all blends of my presets cover?"
//! - [`compositions`]: `WeightCompositions` enumerates integer blend ratios
//!   in place, `Combinations` the subsets they apply to.
//! - [`sampler`]: `sample_for_subset_size` / `sample_all` pool every
//!   weighted blend and summarise each axis as 101 percentiles.
//!
//! ## Cost
//! The sampler evaluates `C(n, k) * C(budget - 1, k - 1)` blends per subset
//! size. Keep `n` and `budget` small (the default budget is 20), or enable the
//! `parallel` feature to spread subsets over threads.

pub mod bound;
pub mod compositions;
pub mod out_of_bound;
pub mod sampler;

pub use bound::*;
pub use compositions::*;
pub use out_of_bound::*;
pub use sampler::*;
