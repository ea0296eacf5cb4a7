/*!
`curve_balance` — blend algebra and statistics for tuning property curves.

What it does
- Gives every tunable value kind one algebra (`add`, `scale`,
  `weighted_mean`, `lerp`) through the [`Lerp`] trait: scalars, oscillating
  power curves, weighted function mixtures, 2D point modifiers, and the
  properties built from them.
- Answers two questions about a set of anchor presets:
  * local: how often does an interpolation between two presets leave the
    envelope they span? (`analyzer::out_of_bound`)
  * global: across every integer-weighted blend of every subset of the
    presets, what is the per-axis percentile spread? (`analyzer::sampler`)

How to use (call surface only)
- Build modifiers (`CurveModifier`, `FunctionMixture`, `PointModifier`, ...),
  pair each with a base value in a [`ValueProperty`], and pair two of those
  in a [`CompositeProperty`].
- Call `analyze_across_lerp_family(&base, &targets, steps)` for the
  out-of-bound histogram, then `merged()` / `to_percent()` as needed.
- Call `sample_all(&presets, SamplerConfig::default())` for one
  `PercentileSummary` per subset size.

What it does NOT do
- No plotting, no printing, no persistence. Records returned by `describe()`
  and the analyzer aggregates are plain data for the caller to render.

Features
- `parallel`: blend sampler subsets on the rayon pool.
- `serde`: `Serialize`/`Deserialize` on records and summaries.
*/

pub mod analyzer;
pub mod error;
pub mod generators;
pub mod lerp;
pub mod modifier;
pub mod property;

pub use error::{CurveError, Result};
pub use lerp::{Lerp, lerp, lerp_family, weighted_mean};
pub use modifier::Modifier;
pub use property::{CompositeProperty, ValueProperty};
