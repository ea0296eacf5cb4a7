// tests/modifiers.rs
use std::f64::consts::{E, FRAC_1_SQRT_2, FRAC_PI_2};

use curve_balance::generators::{
    random_curve, random_point, random_pow, random_unit_disc, seeded_rng, uniform01,
};
use curve_balance::modifier::{
    CurveModifier, FunctionHandle, FunctionMixture, FunctionModifier, MixtureKind, ModifierRecord,
    PointModifier, PointScatter, PowModifier, ProportionModifier, ProportionalFunction,
    ProportionalMixture, ResponseFunction,
};
use bevy_prng::WyRand;
use curve_balance::{CurveError, Lerp, Modifier};
use glam::DVec2;
use rand_core::{RngCore, SeedableRng};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

/* ──────────────────────────────────────────────────────────────────────────
1) CurveModifier
────────────────────────────────────────────────────────────────────────── */

#[test]
fn curve_matches_closed_form() {
    let c = CurveModifier::new(1.0, 0.0, 1.0, 1.0, 0.5, 1.0);
    let x = E - 1.0;
    let phase = (1.0 + x).ln();
    let pos = 0.5 / (1.0 + (FRAC_PI_2 + phase).sin().abs());
    let neg = -0.5 / (1.0 + phase.sin().abs());
    let expected = x * (1.0 + pos + neg);
    assert!(close(c.transform(x), expected), "{} vs {expected}", c.transform(x));
}

#[test]
fn curve_without_amplitude_is_identity() {
    let c = CurveModifier::new(2.0, 0.3, 1.4, 9.0, 0.0, 2.5);
    for x in [0.5, 3.0, 40.0] {
        assert_eq!(c.transform(x), x);
    }
    assert_eq!(c.transform_all(&[1.0, 2.0]), vec![1.0, 2.0]);
}

#[test]
fn curve_blends_in_parameter_space() {
    let a = CurveModifier::new(1.0, 0.0, 1.0, 2.0, 0.4, 1.0);
    let b = CurveModifier::new(3.0, 1.0, 2.0, 4.0, 1.2, 3.0);
    let m = CurveModifier::lerp(&a, &b, 0.5).unwrap();
    assert!(close(m.log_offset, 2.0));
    assert!(close(m.period, 1.5));
    assert!(close(m.coef, 0.8));
    assert!(close(m.power, 2.0));
    match m.describe() {
        ModifierRecord::Curve { sin_strength, .. } => assert!(close(sin_strength, 3.0)),
        other => panic!("unexpected record {other:?}"),
    }
}

/* ──────────────────────────────────────────────────────────────────────────
2) Response functions
────────────────────────────────────────────────────────────────────────── */

#[test]
fn pow_passes_through_anchor_and_mirrors_sign() {
    let p = PowModifier::new(2.0, 2.0, 3.0).unwrap();
    assert_eq!(p.transform(2.0), 3.0);
    assert_eq!(p.transform(4.0), 12.0);
    assert_eq!(p.transform(-4.0), -12.0);
    assert_eq!(p.transform(0.0), 0.0);
}

#[test]
fn pow_rejects_non_positive_parameters() {
    assert_eq!(
        PowModifier::new(0.0, 1.0, 1.0),
        Err(CurveError::NonPositiveParameter { param: "power", value: 0.0 })
    );
    assert_eq!(
        PowModifier::new(1.0, -2.0, 1.0),
        Err(CurveError::NonPositiveParameter { param: "x_1", value: -2.0 })
    );
    assert!(matches!(
        PowModifier::new(1.0, 1.0, f64::NAN),
        Err(CurveError::NonPositiveParameter { param: "y_1", .. })
    ));
}

#[test]
fn function_modifier_is_mirrored() {
    let sq = FunctionModifier::new("square", |x| x * x);
    assert_eq!(sq.transform(3.0), 9.0);
    assert_eq!(sq.transform(-3.0), -9.0);
    assert_eq!(sq.label(), "square");
}

/* ──────────────────────────────────────────────────────────────────────────
3) FunctionMixture
────────────────────────────────────────────────────────────────────────── */

#[test]
fn handles_keep_identity_across_clones() {
    let h = FunctionHandle::new(FunctionModifier::new("id", |x| x));
    let again = h.clone();
    assert_eq!(h.id(), again.id());
    let other = FunctionHandle::new(FunctionModifier::new("id", |x| x));
    assert_ne!(h.id(), other.id());
}

#[test]
fn mixture_merges_duplicates_and_normalises() {
    let f = FunctionHandle::new(FunctionModifier::new("f", |x| x));
    let g = FunctionHandle::new(FunctionModifier::new("g", |x| 2.0 * x));

    let merged = FunctionMixture::new([(f.clone(), 1.0), (f.clone(), 3.0)]).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.weight_of(f.id()), 1.0);

    let mix = FunctionMixture::new([(f.clone(), 1.0), (g.clone(), 3.0)]).unwrap();
    assert!(close(mix.weight_of(f.id()), 0.25));
    assert!(close(mix.weight_of(g.id()), 0.75));
    assert!(close(mix.total(), 1.0));

    // Build order does not matter.
    let flipped = FunctionMixture::new([(g, 3.0), (f, 1.0)]).unwrap();
    assert_eq!(mix, flipped);
}

#[test]
fn mixture_rejects_bad_weights() {
    let f = FunctionHandle::new(FunctionModifier::new("f", |x| x));
    assert_eq!(FunctionMixture::new(Vec::new()), Err(CurveError::EmptyMixture));
    assert_eq!(FunctionMixture::new([(f.clone(), 0.0)]), Err(CurveError::EmptyMixture));
    assert_eq!(
        FunctionMixture::new([(f.clone(), 1.0), (f, -1.0)]),
        Err(CurveError::InvalidWeight { index: 1, weight: -1.0 })
    );
}

#[test]
fn mixture_weights_scale_the_input() {
    let f = FunctionHandle::new(FunctionModifier::new("id", |x| x));
    let g = FunctionHandle::new(FunctionModifier::new("double", |x| 2.0 * x));
    let mix = FunctionMixture::new([(f, 0.25), (g, 0.75)]).unwrap();
    // id(8 * 0.25) + double(8 * 0.75)
    assert_eq!(mix.transform(8.0), 14.0);
    assert_eq!(mix.transform(-8.0), -14.0);
}

#[test]
fn single_term_mixture_matches_its_function() {
    let p = PowModifier::new(1.5, 2.0, 5.0).unwrap();
    let mix = FunctionMixture::from(p);
    for x in [0.5, 2.0, 7.0, -3.0] {
        assert_eq!(mix.transform(x), p.transform(x));
    }
}

#[test]
fn mixture_add_unions_and_scale_keeps_mass() {
    let f = FunctionMixture::from(FunctionModifier::new("f", |x| x));
    let g = FunctionMixture::from(FunctionModifier::new("g", |x| x * x));

    let sum = f.add(&g);
    assert_eq!(sum.len(), 2);
    assert!(sum.terms().all(|(_, w)| close(w, 0.5)));

    let same = f.add(&f);
    assert_eq!(same.len(), 1);
    assert!(close(same.total(), 1.0));

    assert!(close(f.scale(0.5).total(), 0.5));
}

#[test]
fn mixture_weighted_mean_accumulates_by_id() {
    let fh = FunctionHandle::new(FunctionModifier::new("f", |x| x));
    let gh = FunctionHandle::new(FunctionModifier::new("g", |x| x * x));
    let f = FunctionMixture::from(fh.clone());
    let g = FunctionMixture::from(gh.clone());

    let m = FunctionMixture::weighted_mean(&[f.clone(), g, f], &[1.0, 1.0, 2.0]).unwrap();
    assert_eq!(m.len(), 2);
    assert!(close(m.weight_of(fh.id()), 0.75));
    assert!(close(m.weight_of(gh.id()), 0.25));

    match m.describe() {
        ModifierRecord::Mixture { kind, terms } => {
            assert_eq!(kind, MixtureKind::InputScaled);
            assert_eq!(terms.len(), 2);
            assert!(terms.iter().any(|t| t.label == "g" && close(t.weight, 0.25)));
        }
        other => panic!("unexpected record {other:?}"),
    }
}

/* ──────────────────────────────────────────────────────────────────────────
4) ProportionalMixture
────────────────────────────────────────────────────────────────────────── */

#[test]
fn proportion_modifier_checks_endpoints() {
    assert!(ProportionModifier::new(|w| w * w).is_ok());
    assert!(matches!(
        ProportionModifier::new(|w| w + 0.1),
        Err(CurveError::ProportionEndpoints { .. })
    ));
    assert_eq!(ProportionModifier::linear().apply(0.3), 0.3);
}

#[test]
fn proportional_term_rejects_out_of_range_proportion() {
    let term =
        ProportionalFunction::new(FunctionModifier::new("id", |x| x), ProportionModifier::linear());
    assert_eq!(term.apply(4.0, 0.5), Ok(2.0));
    assert_eq!(term.apply(4.0, 1.5), Err(CurveError::ProportionOutOfRange(1.5)));
}

#[test]
fn proportional_weights_modulate_the_output() {
    let square = ProportionModifier::new(|w| w * w).unwrap();
    let f =
        ProportionalFunction::new(FunctionModifier::new("id", |x| x), ProportionModifier::linear());
    let g = ProportionalFunction::new(FunctionModifier::new("double", |x| 2.0 * x), square);
    let mix = ProportionalMixture::new([(f, 1.0), (g, 1.0)]).unwrap();

    // id(4) * 0.5 + double(4) * 0.5^2
    assert_eq!(mix.transform(4.0), 4.0);
    match mix.describe() {
        ModifierRecord::Mixture { kind, .. } => assert_eq!(kind, MixtureKind::Proportional),
        other => panic!("unexpected record {other:?}"),
    }
}

/* ──────────────────────────────────────────────────────────────────────────
5) PointModifier
────────────────────────────────────────────────────────────────────────── */

#[test]
fn point_transform_is_linear_in_coef() {
    let p = PointModifier::new(2.5, DVec2::new(1.0, 1.0), DVec2::new(0.0, 1.0));
    assert_eq!(p.transform(4.0), 10.0);
    assert_eq!(p.final_position(), DVec2::new(1.0, 2.0));
}

#[test]
fn point_blend_renormalises_direction_and_adjusts_coef() {
    let a = PointModifier::new(1.0, DVec2::ZERO, DVec2::X);
    let b = PointModifier::new(1.0, DVec2::ZERO, DVec2::Y);
    let m = PointModifier::weighted_mean(&[a, b], &[0.5, 0.5]).unwrap();

    assert!(close(m.length(), 1.0));
    assert!(close(m.direction.x, FRAC_1_SQRT_2));
    assert!(close(m.direction.y, FRAC_1_SQRT_2));
    // Linear final y is 0.5, renormalised is 1/sqrt(2).
    assert!(close(m.coef, 1.0 + (FRAC_1_SQRT_2 - 0.5)));
}

#[test]
fn point_blend_with_cancelling_directions_stays_put() {
    let a = PointModifier::new(2.0, DVec2::new(0.0, 1.0), DVec2::X);
    let b = PointModifier::new(4.0, DVec2::new(0.0, 3.0), -DVec2::X);
    let m = PointModifier::lerp(&a, &b, 0.5).unwrap();
    assert_eq!(m.direction, DVec2::ZERO);
    assert!(close(m.coef, 3.0));
    assert!(close(m.center.y, 2.0));
}

#[test]
fn point_scatter_collects_columns() {
    let pts = [
        PointModifier::new(1.0, DVec2::ZERO, DVec2::X),
        PointModifier::new(2.0, DVec2::ONE, DVec2::Y),
    ];
    let s = PointScatter::collect(&pts);
    assert_eq!(s.coefs, vec![1.0, 2.0]);
    assert_eq!(s.finals, vec![DVec2::X, DVec2::new(1.0, 2.0)]);
    assert_eq!(s.centers.len(), 2);
    assert_eq!(s.directions.len(), 2);
}

/* ──────────────────────────────────────────────────────────────────────────
6) Preset generators replay from a seed
────────────────────────────────────────────────────────────────────────── */

#[test]
fn generators_replay_from_seed() {
    let (mut a, mut b) = (seeded_rng(42), seeded_rng(42));
    for _ in 0..8 {
        assert_eq!(random_curve(&mut a), random_curve(&mut b));
        assert_eq!(random_point(&mut a), random_point(&mut b));
    }
}

#[test]
fn seeded_rng_is_plain_wyrand() {
    let mut direct = WyRand::from_seed(7u64.to_le_bytes());
    let mut helper = seeded_rng(7);
    for _ in 0..16 {
        assert_eq!(direct.next_u64(), helper.next_u64());
    }
}

#[test]
fn generators_stay_in_range() {
    let mut rng = seeded_rng(1234);
    for _ in 0..500 {
        let u = uniform01(&mut rng);
        assert!((0.0..1.0).contains(&u));

        let c = random_curve(&mut rng);
        assert!((0.0..=10.0).contains(&c.log_offset));
        assert!(c.period >= 0.1_f64.sqrt() && c.period <= 2.9_f64.sqrt());
        assert!(c.power >= 0.5_f64.sqrt() && c.power <= 5.0_f64.sqrt());

        let p = random_pow(&mut rng, 2.0).unwrap();
        assert!(p.power() > 0.75 && p.power() < 1.32, "{}", p.power());
        assert!(p.x_1() > 0.57 && p.x_1() < 1.74, "{}", p.x_1());

        assert!(random_unit_disc(&mut rng).length() <= 1.0 + 1e-12);
        let pt = random_point(&mut rng);
        assert!((1.0..=100.0).contains(&pt.coef));
    }
}
