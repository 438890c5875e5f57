use ewa_tariff::billing::calculator::{allocate_by_bill, calculate, compute_cost};
use ewa_tariff::billing::{InputMode, Schedule, TariffTable};
use ewa_tariff::config::ConfigLoader;

/// Print allocations and the bill round-trip over a usage sweep for each configured table
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load();
    config.check()?;

    let step: f64 = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<f64>())
        .transpose()?
        .unwrap_or(500.0);
    if !(step.is_finite() && step > 0.0) {
        return Err(format!("step must be a positive number, got {}", step).into());
    }

    for table in [&config.electricity, &config.water] {
        sweep(table, step)?;
    }

    Ok(())
}

fn sweep(table: &TariffTable, step: f64) -> Result<(), Box<dyn std::error::Error>> {
    let unit = table.utility.unit();
    println!("=== {:?} ({} slabs) ===\n", table.utility, table.slabs.len());

    // Sweep up to twice the bounded capacity so the unbounded slab is exercised
    let bounded: f64 = table.slabs.iter().filter_map(|s| s.capacity).sum();
    let limit = (bounded * 2.0).max(step);
    let step = if step > limit / 4.0 { limit / 20.0 } else { step };

    let mut worst_drift = 0.0_f64;
    let mut usage = 0.0;
    while usage <= limit {
        let result = calculate(InputMode::Usage(usage), &table.slabs)?;
        let inferred = allocate_by_bill(result.old_cost, &table.slabs)?;
        let drift = (inferred.total() - usage).abs();
        worst_drift = worst_drift.max(drift);

        println!(
            "  {:>10.1} {:<6} {:?} old {:>9.3} new {:>9.3} ({:+.1}%)",
            usage,
            unit,
            result.allocation.as_slice(),
            result.old_cost,
            result.new_cost,
            result.percent_change
        );

        let replayed = compute_cost(&inferred, &table.slabs, Schedule::Old);
        if (replayed - result.old_cost).abs() > 1e-6 {
            println!("  ❌ bill round-trip mismatch at {} {}", usage, unit);
        }

        usage += step;
    }

    println!("\n✅ Max usage drift through bill inversion: {:.2e} {}\n", worst_drift, unit);
    Ok(())
}
