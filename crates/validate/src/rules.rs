//! The rule catalogue.
//!
//! Every rule is a pure function over the parameter mapping. A rule whose
//! inputs are missing or have the wrong shape returns no findings; it never
//! fails the whole pass.

use remora_params::{FACE_BC_KEYS, PERIODIC_KEY, ParamMap, Value};

use crate::engine::ValidationContext;
use crate::message::ValidationMessage;

/// Signature shared by every rule.
pub type Rule = fn(&ParamMap, &ValidationContext) -> Vec<ValidationMessage>;

/// Every rule with its identifier, in execution order.
pub static RULES: &[(&str, Rule)] = &[
    ("R001", fast_dt_divides_dt),
    ("R002", periodic_faces_unset),
    ("R003", n_cell_positive),
    ("R004", prob_hi_above_lo),
    ("R005", coriolis_unused),
    ("R006", grid_size_covers_blocking),
    ("R007", cfl_estimate),
    ("R008", procs_divide_cells),
    ("R009", blocking_divides_cells),
];

const FIXED_DT: &str = "remora.fixed_dt";
const FIXED_FAST_DT: &str = "remora.fixed_fast_dt";
const N_CELL: &str = "remora.n_cell";
const PROB_LO: &str = "remora.prob_lo";
const PROB_HI: &str = "remora.prob_hi";
const USE_CORIOLIS: &str = "remora.use_coriolis";
const CORIOLIS_SUB_KEYS: [&str; 3] = [
    "remora.coriolis_type",
    "remora.coriolis_f0",
    "remora.coriolis_beta",
];
const MAX_GRID_SIZE: &str = "amr.max_grid_size";
const BLOCKING_FACTOR: &str = "amr.blocking_factor";

const AXIS_LABELS: [&str; 3] = ["x", "y", "z"];

/// Velocity scale assumed by the CFL estimate, in m/s.
const CFL_VELOCITY: f64 = 2.0;

const DIVISIBILITY_TOL: f64 = 1e-12;

fn number(params: &ParamMap, key: &str) -> Option<f64> {
    params.get(key).and_then(Value::as_f64)
}

fn axis_label(axis: usize) -> String {
    AXIS_LABELS
        .get(axis)
        .map_or_else(|| axis.to_string(), |l| l.to_string())
}

/// R001: the fast (barotropic) step should evenly divide the slow step.
fn fast_dt_divides_dt(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let (Some(dt), Some(fast)) = (number(params, FIXED_DT), number(params, FIXED_FAST_DT)) else {
        return Vec::new();
    };
    if fast == 0.0 {
        return Vec::new();
    }

    // Floored modulo so the remainder takes the sign of the divisor.
    let remainder = dt - fast * (dt / fast).floor();
    if remainder.abs() > DIVISIBILITY_TOL && (remainder - fast).abs() > DIVISIBILITY_TOL {
        return vec![ValidationMessage::warning(
            "R001",
            format!(
                "fixed_fast_dt ({}) does not evenly divide fixed_dt ({}).",
                params[FIXED_FAST_DT], params[FIXED_DT]
            ),
            &[FIXED_DT, FIXED_FAST_DT],
        )];
    }
    Vec::new()
}

/// R002: a periodic axis must not carry explicit face boundary types.
fn periodic_faces_unset(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let Some(flags) = params.get(PERIODIC_KEY).and_then(Value::as_list) else {
        return Vec::new();
    };
    if flags.len() < FACE_BC_KEYS.len() {
        return Vec::new();
    }

    let mut msgs = Vec::new();
    for (axis, (lo_key, hi_key)) in FACE_BC_KEYS.iter().enumerate() {
        if !is_periodic_flag(&flags[axis]) {
            continue;
        }
        for face_key in [*lo_key, *hi_key] {
            let Some(face_type) = params.get(face_key) else {
                continue;
            };
            if face_type.as_str() == Some("Periodic") {
                continue;
            }
            msgs.push(ValidationMessage::error(
                "R002",
                format!(
                    "Axis {axis} is periodic but {face_key} is set to '{face_type}' \
                     (expected Periodic or unset)."
                ),
                &[PERIODIC_KEY, face_key],
            ));
        }
    }
    msgs
}

fn is_periodic_flag(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        other => other.as_f64() == Some(1.0),
    }
}

/// R003: every cell count must be positive. Only the first offender is
/// reported.
fn n_cell_positive(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let Some(n_cell) = params.get(N_CELL).and_then(Value::as_list) else {
        return Vec::new();
    };

    n_cell
        .iter()
        .enumerate()
        .find(|(_, v)| v.as_f64().is_some_and(|n| n <= 0.0))
        .map(|(i, v)| {
            vec![ValidationMessage::error(
                "R003",
                format!("n_cell[{i}] is {v}; all values must be > 0."),
                &[N_CELL],
            )]
        })
        .unwrap_or_default()
}

/// R004: the upper domain bound must exceed the lower bound on every axis.
fn prob_hi_above_lo(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let (Some(lo), Some(hi)) = (
        params.get(PROB_LO).and_then(Value::as_list),
        params.get(PROB_HI).and_then(Value::as_list),
    ) else {
        return Vec::new();
    };

    lo.iter()
        .zip(hi)
        .enumerate()
        .filter_map(|(i, (l, h))| {
            let (lv, hv) = (l.as_f64()?, h.as_f64()?);
            (hv <= lv).then(|| {
                let label = axis_label(i);
                ValidationMessage::error(
                    "R004",
                    format!(
                        "prob_hi[{label}]={h} must be greater than prob_lo[{label}]={l}."
                    ),
                    &[PROB_LO, PROB_HI],
                )
            })
        })
        .collect()
}

/// R005: Coriolis sub-parameters are ignored while Coriolis is off.
fn coriolis_unused(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    if params.get(USE_CORIOLIS) != Some(&Value::Bool(false)) {
        return Vec::new();
    }
    let set_keys: Vec<&str> = CORIOLIS_SUB_KEYS
        .into_iter()
        .filter(|k| params.contains_key(*k))
        .collect();
    if set_keys.is_empty() {
        return Vec::new();
    }

    let mut keys = vec![USE_CORIOLIS];
    keys.extend(&set_keys);
    vec![ValidationMessage::info(
        "R005",
        format!(
            "use_coriolis is false but Coriolis sub-parameters are set: {}. \
             They will be ignored by REMORA.",
            set_keys.join(", ")
        ),
        &keys,
    )]
}

/// R006: a grid box smaller than the blocking factor cannot be built.
fn grid_size_covers_blocking(
    params: &ParamMap,
    _ctx: &ValidationContext,
) -> Vec<ValidationMessage> {
    let (Some(grid), Some(block)) = (number(params, MAX_GRID_SIZE), number(params, BLOCKING_FACTOR))
    else {
        return Vec::new();
    };
    if grid < block {
        return vec![ValidationMessage::warning(
            "R006",
            format!(
                "max_grid_size ({}) is less than blocking_factor ({}).",
                params[MAX_GRID_SIZE], params[BLOCKING_FACTOR]
            ),
            &[MAX_GRID_SIZE, BLOCKING_FACTOR],
        )];
    }
    Vec::new()
}

/// Smallest positive `(hi - lo) / n` over the axes where all three are
/// numeric and `n > 0`.
fn min_cell_spacing(params: &ParamMap) -> Option<f64> {
    let lo = params.get(PROB_LO)?.as_f64_list()?;
    let hi = params.get(PROB_HI)?.as_f64_list()?;
    let n = params.get(N_CELL)?.as_f64_list()?;

    lo.iter()
        .zip(&hi)
        .zip(&n)
        .filter(|&(_, &n)| n > 0.0)
        .map(|((l, h), n)| (h - l) / n)
        .filter(|&d| d > 0.0)
        .min_by(f64::total_cmp)
}

/// R007: conservative CFL estimate at a fixed velocity scale.
fn cfl_estimate(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let (Some(dt), Some(spacing)) = (number(params, FIXED_DT), min_cell_spacing(params)) else {
        return Vec::new();
    };

    let cfl = dt * CFL_VELOCITY / spacing;
    if cfl >= 1.0 {
        return vec![ValidationMessage::warning(
            "R007",
            format!(
                "Estimated CFL number {cfl:.3} >= 1 for fixed_dt {dt} and minimum cell \
                 spacing {spacing} (assuming velocity {CFL_VELOCITY} m/s)."
            ),
            &[FIXED_DT, N_CELL, PROB_LO, PROB_HI],
        )];
    }
    Vec::new()
}

/// R008: the domain should split evenly across processes.
fn procs_divide_cells(params: &ParamMap, ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let procs = ctx.num_procs();
    if procs <= 1 {
        return Vec::new();
    }
    let Some(counts) = params
        .get(N_CELL)
        .and_then(Value::as_list)
        .and_then(|l| l.iter().map(Value::as_i64).collect::<Option<Vec<_>>>())
    else {
        return Vec::new();
    };
    let Some(total) = counts.iter().try_fold(1i64, |acc, &n| acc.checked_mul(n)) else {
        return Vec::new();
    };
    if total <= 0 {
        return Vec::new();
    }

    if total % procs as i64 != 0 {
        return vec![ValidationMessage::warning(
            "R008",
            format!("Total cell count {total} is not divisible by {procs} processes."),
            &[N_CELL],
        )];
    }
    Vec::new()
}

/// R009: each cell count should be a multiple of the blocking factor.
fn blocking_divides_cells(params: &ParamMap, _ctx: &ValidationContext) -> Vec<ValidationMessage> {
    let Some(bf) = params.get(BLOCKING_FACTOR).and_then(Value::as_i64) else {
        return Vec::new();
    };
    if bf <= 0 {
        return Vec::new();
    }
    let Some(n_cell) = params.get(N_CELL).and_then(Value::as_list) else {
        return Vec::new();
    };

    n_cell
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let n = v.as_i64()?;
            (n % bf != 0).then(|| {
                ValidationMessage::warning(
                    "R009",
                    format!(
                        "n_cell[{}]={n} is not divisible by blocking_factor {bf}.",
                        axis_label(i)
                    ),
                    &[N_CELL, BLOCKING_FACTOR],
                )
            })
        })
        .collect()
}
