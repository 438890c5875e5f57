use crate::billing::error::{ensure_non_negative, TariffError};
use crate::billing::{CostComparison, InputMode, Schedule, SlabRule, TariffResult, UsageAllocation};
use crate::debug_println;

/// Relative tolerance under which leftover payment counts as spent
const BILL_EPS: f64 = 1e-9;

/// Check the slab table shape: non-empty, non-negative, exactly one unbounded slab and it is last
pub fn validate_slabs(slabs: &[SlabRule]) -> Result<(), TariffError> {
    let last = match slabs.last() {
        Some(last) => last,
        None => return Err(TariffError::InvalidSlabTable("no slabs defined".to_string())),
    };

    if !last.is_unbounded() {
        return Err(TariffError::InvalidSlabTable(
            "last slab must have unbounded capacity".to_string(),
        ));
    }

    for (i, slab) in slabs.iter().enumerate() {
        if slab.is_unbounded() && i + 1 != slabs.len() {
            return Err(TariffError::InvalidSlabTable(format!(
                "slab {} is unbounded but is not the last slab",
                i + 1
            )));
        }
        if let Some(capacity) = slab.capacity {
            if !capacity.is_finite() || capacity < 0.0 {
                return Err(TariffError::InvalidSlabTable(format!(
                    "slab {} has invalid capacity {}",
                    i + 1,
                    capacity
                )));
            }
        }
        for price in [slab.old_unit_price, slab.new_unit_price] {
            if !price.is_finite() || price < 0.0 {
                return Err(TariffError::InvalidSlabTable(format!(
                    "slab {} has invalid unit price {}",
                    i + 1,
                    price
                )));
            }
        }
    }

    Ok(())
}

/// Split a total consumption across slabs, filling each slab before the next.
///
/// A slab whose capacity is exactly reached is full; the remainder (zero) goes
/// nowhere and later slabs stay at zero.
pub fn allocate_by_usage(
    total_usage: f64,
    slabs: &[SlabRule],
) -> Result<UsageAllocation, TariffError> {
    let total_usage = ensure_non_negative("usage", total_usage)?;
    validate_slabs(slabs)?;

    let mut per_slab = vec![0.0; slabs.len()];
    let mut remaining = total_usage;

    for (i, slab) in slabs.iter().enumerate() {
        match slab.capacity {
            Some(capacity) if remaining >= capacity => {
                per_slab[i] = capacity;
                remaining -= capacity;
            }
            _ => {
                per_slab[i] = remaining;
                break;
            }
        }
    }

    Ok(UsageAllocation::new(per_slab))
}

/// Infer the per-slab usage that produced `paid_amount` under the old schedule.
///
/// Uses the same `>=` boundary as [`allocate_by_usage`]: a payment that exactly
/// covers a slab buys that whole slab. Once the payment is used up no further
/// slab is touched, so free (zero-priced) slabs after that point stay empty.
/// Payments are compared within a relative tolerance of the amount paid, so rounding
/// leftovers such as `0.9 - 3.0 * 0.3` never spill into the next slab.
pub fn allocate_by_bill(
    paid_amount: f64,
    slabs: &[SlabRule],
) -> Result<UsageAllocation, TariffError> {
    let paid_amount = ensure_non_negative("bill", paid_amount)?;
    validate_slabs(slabs)?;

    let mut per_slab = vec![0.0; slabs.len()];
    let mut remaining = paid_amount;
    let tolerance = BILL_EPS * paid_amount;

    for (i, slab) in slabs.iter().enumerate() {
        if remaining <= tolerance {
            break;
        }

        let price = slab.old_unit_price;
        if let Some(capacity) = slab.capacity {
            let slab_max_cost = capacity * price;
            if remaining + tolerance >= slab_max_cost {
                per_slab[i] = capacity;
                remaining = (remaining - slab_max_cost).max(0.0);
                continue;
            }
        }

        if price == 0.0 {
            return Err(TariffError::DivisionUndefined { slab: i });
        }
        per_slab[i] = remaining / price;
        break;
    }

    Ok(UsageAllocation::new(per_slab))
}

/// Price an allocation under one schedule. Extra entries on either side are ignored.
pub fn compute_cost(allocation: &UsageAllocation, slabs: &[SlabRule], schedule: Schedule) -> f64 {
    allocation
        .iter()
        .zip(slabs)
        .map(|(usage, slab)| usage * slab.price(schedule))
        .sum()
}

/// Difference and percent change from old to new cost
pub fn compare(old_cost: f64, new_cost: f64) -> CostComparison {
    let difference = new_cost - old_cost;
    let percent_change = if old_cost > 0.0 {
        difference / old_cost * 100.0
    } else {
        0.0
    };

    CostComparison {
        old_cost,
        new_cost,
        difference,
        percent_change,
    }
}

/// Run a full comparison for one input against one slab table
pub fn calculate(input: InputMode, slabs: &[SlabRule]) -> Result<TariffResult, TariffError> {
    let allocation = match input {
        InputMode::Usage(usage) => allocate_by_usage(usage, slabs)?,
        InputMode::Bill(paid) => {
            // Re-derive through the usage path so both modes share one allocation rule
            let inferred = allocate_by_bill(paid, slabs)?;
            allocate_by_usage(inferred.total(), slabs)?
        }
    };

    let old_cost = compute_cost(&allocation, slabs, Schedule::Old);
    let new_cost = compute_cost(&allocation, slabs, Schedule::New);
    let comparison = compare(old_cost, new_cost);
    let total_usage = allocation.total();

    debug_println!(
        "calculate {:?}: allocation={:?} old={:.3} new={:.3}",
        input,
        allocation.as_slice(),
        old_cost,
        new_cost
    );

    Ok(TariffResult {
        allocation,
        old_cost,
        new_cost,
        difference: comparison.difference,
        percent_change: comparison.percent_change,
        total_usage,
    })
}

/// Like [`calculate`], but a bad input yields an all-zero result instead of an error
pub fn calculate_or_empty(input: InputMode, slabs: &[SlabRule]) -> TariffResult {
    match calculate(input, slabs) {
        Ok(result) => result,
        Err(e) => {
            debug_println!("calculation failed for {:?}: {}", input, e);
            TariffResult::empty(slabs.len())
        }
    }
}
