//! Response functions and weighted mixtures of them.
//!
//! A [`ResponseFunction`] is defined on the positive half-line and mirrored to
//! negative inputs (`sign(x) * f(|x|)`). To blend functions they are wrapped
//! in a [`FunctionHandle`], which carries a [`FunctionId`] assigned once at
//! construction. Mixtures merge terms by that id: cloning a handle keeps the
//! identity, wrapping the same function twice creates two distinct terms.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CurveError, Result};
use crate::lerp::{Lerp, blend_total};
use crate::modifier::{MixtureKind, Modifier, ModifierRecord, TermRecord};

/// Identity of a function inside mixtures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionId(u64);

impl FunctionId {
    /// A process-unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A scalar response `|x| -> y`, mirrored for negative inputs.
pub trait ResponseFunction: Send + Sync {
    fn transform_positive(&self, base: f64) -> f64;

    /// `copysign(1, x) * f(|x|)`; `-0.0` takes the negative branch.
    #[inline]
    fn transform(&self, base: f64) -> f64 {
        1f64.copysign(base) * self.transform_positive(base.abs())
    }

    fn label(&self) -> String;
}

/// `f(x) = (x / x_1)^power * y_1`, passing through `(x_1, y_1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowModifier {
    power: f64,
    x_1: f64,
    y_1: f64,
}

impl PowModifier {
    /// All three parameters must be strictly positive.
    pub fn new(power: f64, x_1: f64, y_1: f64) -> Result<Self> {
        for (param, value) in [("x_1", x_1), ("y_1", y_1), ("power", power)] {
            if !(value > 0.0) {
                return Err(CurveError::NonPositiveParameter { param, value });
            }
        }
        Ok(Self { power, x_1, y_1 })
    }

    pub fn power(&self) -> f64 {
        self.power
    }
    pub fn x_1(&self) -> f64 {
        self.x_1
    }
    pub fn y_1(&self) -> f64 {
        self.y_1
    }
}

impl ResponseFunction for PowModifier {
    #[inline]
    fn transform_positive(&self, base: f64) -> f64 {
        (base / self.x_1).powf(self.power) * self.y_1
    }

    fn label(&self) -> String {
        format!("pow(power={}, x_1={}, y_1={})", self.power, self.x_1, self.y_1)
    }
}

/// An arbitrary caller-supplied response.
#[derive(Clone)]
pub struct FunctionModifier {
    label: String,
    func: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl FunctionModifier {
    pub fn new(
        label: impl Into<String>,
        func: impl Fn(f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self { label: label.into(), func: Arc::new(func) }
    }
}

impl fmt::Debug for FunctionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionModifier").field("label", &self.label).finish_non_exhaustive()
    }
}

impl ResponseFunction for FunctionModifier {
    #[inline]
    fn transform_positive(&self, base: f64) -> f64 {
        (self.func)(base)
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// A response function with a stable identity.
#[derive(Clone)]
pub struct FunctionHandle {
    id: FunctionId,
    function: Arc<dyn ResponseFunction>,
}

impl FunctionHandle {
    pub fn new(function: impl ResponseFunction + 'static) -> Self {
        Self { id: FunctionId::fresh(), function: Arc::new(function) }
    }

    #[inline]
    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn function(&self) -> &dyn ResponseFunction {
        self.function.as_ref()
    }
}

impl PartialEq for FunctionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for FunctionHandle {}

impl fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionHandle")
            .field("id", &self.id.0)
            .field("label", &self.function.label())
            .finish()
    }
}

impl From<PowModifier> for FunctionHandle {
    fn from(p: PowModifier) -> Self {
        Self::new(p)
    }
}

impl From<FunctionModifier> for FunctionHandle {
    fn from(f: FunctionModifier) -> Self {
        Self::new(f)
    }
}

/// A function that can sit inside a [`Mixture`].
pub trait MixtureTerm: Clone + Send + Sync + 'static {
    const KIND: MixtureKind;

    fn id(&self) -> FunctionId;

    /// Contribution of this term at `base` when it carries `weight`.
    fn evaluate(&self, base: f64, weight: f64) -> f64;

    fn label(&self) -> String;
}

impl MixtureTerm for FunctionHandle {
    const KIND: MixtureKind = MixtureKind::InputScaled;

    #[inline]
    fn id(&self) -> FunctionId {
        self.id
    }

    #[inline]
    fn evaluate(&self, base: f64, weight: f64) -> f64 {
        self.function.transform(base * weight)
    }

    fn label(&self) -> String {
        self.function.label()
    }
}

/// Weighted set of functions, at most one entry per [`FunctionId`].
///
/// Terms are kept sorted by id so equal mixtures compare equal regardless of
/// the order they were built in.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixture<F> {
    terms: Vec<(F, f64)>,
}

/// Mixture whose weights scale each function's input.
pub type FunctionMixture = Mixture<FunctionHandle>;

impl<F: MixtureTerm> Mixture<F> {
    /// Merges duplicate ids and normalises the weights to sum 1.
    pub fn new(terms: impl IntoIterator<Item = (F, f64)>) -> Result<Self> {
        let mut out = Self { terms: Vec::new() };
        for (index, (term, weight)) in terms.into_iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CurveError::InvalidWeight { index, weight });
            }
            out.insert(term, weight);
        }
        if !(out.total() > 0.0) {
            return Err(CurveError::EmptyMixture);
        }
        out.normalise();
        Ok(out)
    }

    /// A mixture holding one function with weight 1.
    pub fn single(term: impl Into<F>) -> Self {
        Self { terms: vec![(term.into(), 1.0)] }
    }

    pub fn terms(&self) -> impl Iterator<Item = (&F, f64)> {
        self.terms.iter().map(|(t, w)| (t, *w))
    }

    /// Weight carried by `id`, zero when absent.
    pub fn weight_of(&self, id: FunctionId) -> f64 {
        self.position(id).map_or(0.0, |i| self.terms[i].1)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.terms.iter().map(|(_, w)| w).sum()
    }

    fn position(&self, id: FunctionId) -> std::result::Result<usize, usize> {
        self.terms.binary_search_by_key(&id, |(t, _)| t.id())
    }

    fn insert(&mut self, term: F, weight: f64) {
        match self.position(term.id()) {
            Ok(i) => self.terms[i].1 += weight,
            Err(i) => self.terms.insert(i, (term, weight)),
        }
    }

    fn normalise(&mut self) {
        let total = self.total();
        if total > 0.0 {
            for (_, w) in &mut self.terms {
                *w /= total;
            }
        }
    }
}

impl<F: MixtureTerm> Lerp for Mixture<F> {
    /// Union of both term sets, renormalised to unit mass.
    fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (term, weight) in &other.terms {
            out.insert(term.clone(), *weight);
        }
        out.normalise();
        out
    }

    fn scale(&self, weight: f64) -> Self {
        Self {
            terms: self.terms.iter().map(|(t, w)| (t.clone(), w * weight)).collect(),
        }
    }

    fn weighted_mean_by<T, P>(items: &[T], weights: &[f64], project: P) -> Result<Self>
    where
        P: Fn(&T) -> &Self,
    {
        let Some(total) = blend_total(items.len(), weights)? else {
            return Ok(project(&items[0]).clone());
        };
        let mut out = Self { terms: Vec::new() };
        for (item, w) in items.iter().zip(weights) {
            let share = w / total;
            for (term, tw) in &project(item).terms {
                out.insert(term.clone(), tw * share);
            }
        }
        out.normalise();
        Ok(out)
    }
}

impl<F: MixtureTerm> Modifier for Mixture<F> {
    fn transform(&self, base: f64) -> f64 {
        self.terms.iter().map(|(t, w)| t.evaluate(base, *w)).sum()
    }

    fn describe(&self) -> ModifierRecord {
        ModifierRecord::Mixture {
            kind: F::KIND,
            terms: self
                .terms
                .iter()
                .map(|(t, w)| TermRecord { id: t.id().get(), label: t.label(), weight: *w })
                .collect(),
        }
    }
}

impl From<PowModifier> for FunctionMixture {
    fn from(p: PowModifier) -> Self {
        Self::single(p)
    }
}

impl From<FunctionModifier> for FunctionMixture {
    fn from(f: FunctionModifier) -> Self {
        Self::single(f)
    }
}

impl From<FunctionHandle> for FunctionMixture {
    fn from(h: FunctionHandle) -> Self {
        Self::single(h)
    }
}
