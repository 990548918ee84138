//! Cartesian combinations of sweep axes.

use remora_params::ParamMap;

use crate::axis::SweepAxis;
use crate::error::SweepError;

/// One point of a sweep: axis key to value, in axis order.
pub type Combination = ParamMap;

/// Every combination of the axes' values.
///
/// Odometer order: the last axis varies fastest and the first slowest.
/// No axes yields a single empty combination.
///
/// # Errors
///
/// Propagates the first axis that fails to [`resolve`](SweepAxis::resolve).
pub fn generate_combinations(axes: &[SweepAxis]) -> Result<Vec<Combination>, SweepError> {
    let resolved: Vec<(&str, Vec<_>)> = axes
        .iter()
        .map(|axis| axis.resolve().map(|values| (axis.key.as_str(), values)))
        .collect::<Result<_, SweepError>>()?;

    let mut combos = vec![Combination::new()];
    for (key, values) in &resolved {
        combos = combos
            .iter()
            .flat_map(|combo| {
                values.iter().map(move |value| {
                    let mut next = combo.clone();
                    next.insert(key.to_string(), value.clone());
                    next
                })
            })
            .collect();
    }
    Ok(combos)
}
