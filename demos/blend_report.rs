// demos/blend_report.rs
// Run with:
//   cargo run --example blend_report
//   cargo run --example blend_report --features parallel

use curve_balance::analyzer::{
    Axis, BoundClass, SamplerConfig, analyze_across_lerp_family, sample_all,
};
use curve_balance::generators::{random_curve, seeded_rng};
use curve_balance::modifier::CurveModifier;
use curve_balance::{CompositeProperty, Result, ValueProperty};

fn main() -> Result<()> {
    let mut rng = seeded_rng(7);

    // Four random presets, both axes on oscillating curves.
    let presets: Vec<CompositeProperty<CurveModifier>> = (0..4)
        .map(|i| {
            let base = 10.0 + 5.0 * i as f64;
            CompositeProperty::new(
                ValueProperty::new(base, random_curve(&mut rng)),
                ValueProperty::new(base * 2.0, random_curve(&mut rng)),
            )
        })
        .collect();

    println!("== Presets ==");
    for (i, p) in presets.iter().enumerate() {
        let (x, y) = p.values();
        println!("#{i}: x = {x:.3}, y = {y:.3}");
    }

    // Local: interpolate preset 0 toward every other preset.
    let hist = analyze_across_lerp_family(&presets[0], &presets[1..], 20)?;
    let pct = hist.to_percent()?;
    println!("\n== Out-of-bound appearance (%) ==");
    print_grid(&pct.to_grid(0.0));
    println!("\n== Merged (%) ==");
    print_grid(&pct.merged().to_grid(0.0));

    // Global: every blend of every subset.
    let report = sample_all(&presets, SamplerConfig::default())?;
    println!("\n== Percentile spread per subset size ==");
    for s in &report.by_subset_size {
        let (x0, x50, x100) = s.bounds(Axis::X);
        let (y0, y50, y100) = s.bounds(Axis::Y);
        println!(
            "k={} n={:>6}  x: [{x0:.3}, {x50:.3}, {x100:.3}]  y: [{y0:.3}, {y50:.3}, {y100:.3}]",
            s.subset_size, s.sample_count
        );
    }
    Ok(())
}

fn print_grid(grid: &[[f64; 3]; 3]) {
    println!("        x=-1     x=0     x=1");
    for class in BoundClass::ALL.iter().rev() {
        let row = &grid[class.index()];
        println!("y={:>2} {:>8.2} {:>7.2} {:>7.2}", class.as_i8(), row[0], row[1], row[2]);
    }
}
