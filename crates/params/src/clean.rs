//! Sanitizing a parameter mapping before the solver reads it.

use tracing::debug;

use crate::value::ParamMap;

/// Key holding the per-axis periodicity flags.
pub const PERIODIC_KEY: &str = "remora.is_periodic";

/// Key holding the physical stop time.
pub const STOP_TIME_KEY: &str = "remora.stop_time";

/// Face boundary-condition keys, indexed by spatial axis.
pub const FACE_BC_KEYS: [(&str, &str); 3] = [
    ("remora.bc.xlo.type", "remora.bc.xhi.type"),
    ("remora.bc.ylo.type", "remora.bc.yhi.type"),
    ("remora.bc.zlo.type", "remora.bc.zhi.type"),
];

/// Return a copy of `params` the solver will accept.
///
/// - Face boundary types are removed for every axis whose periodicity flag
///   is truthy; the solver aborts on explicit face types for periodic axes.
/// - The stop time is removed when it is exactly zero, which the solver
///   reads as "stop at t = 0" rather than "no limit".
pub fn clean_params(params: &ParamMap) -> ParamMap {
    let mut out = params.clone();

    if let Some(flags) = params.get(PERIODIC_KEY).and_then(|v| v.as_list()) {
        for (axis, flag) in flags.iter().enumerate().take(FACE_BC_KEYS.len()) {
            if !flag.is_truthy() {
                continue;
            }
            let (lo, hi) = FACE_BC_KEYS[axis];
            for key in [lo, hi] {
                if out.shift_remove(key).is_some() {
                    debug!(key, axis, "removed face boundary type on periodic axis");
                }
            }
        }
    }

    if params
        .get(STOP_TIME_KEY)
        .and_then(|v| v.as_f64())
        .is_some_and(|t| t == 0.0)
    {
        out.shift_remove(STOP_TIME_KEY);
        debug!(key = STOP_TIME_KEY, "removed zero stop time");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn base() -> ParamMap {
        let mut p = ParamMap::new();
        p.insert(PERIODIC_KEY.into(), Value::from(vec![1, 0, 1]));
        for (lo, hi) in FACE_BC_KEYS {
            p.insert(lo.into(), Value::from("SlipWall"));
            p.insert(hi.into(), Value::from("Outflow"));
        }
        p.insert("remora.max_step".into(), Value::Int(10));
        p
    }

    #[test]
    fn removes_faces_of_periodic_axes_only() {
        let cleaned = clean_params(&base());
        assert!(!cleaned.contains_key("remora.bc.xlo.type"));
        assert!(!cleaned.contains_key("remora.bc.xhi.type"));
        assert!(cleaned.contains_key("remora.bc.ylo.type"));
        assert!(cleaned.contains_key("remora.bc.yhi.type"));
        assert!(!cleaned.contains_key("remora.bc.zlo.type"));
        assert!(!cleaned.contains_key("remora.bc.zhi.type"));
    }

    #[test]
    fn preserves_order_of_remaining_keys() {
        let cleaned = clean_params(&base());
        let keys: Vec<&str> = cleaned.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                PERIODIC_KEY,
                "remora.bc.ylo.type",
                "remora.bc.yhi.type",
                "remora.max_step",
            ]
        );
    }

    #[test]
    fn boolean_periodicity_flags_count() {
        let mut p = base();
        p.insert(
            PERIODIC_KEY.into(),
            Value::List(vec![Value::Bool(false), Value::Bool(true), Value::Bool(false)]),
        );
        let cleaned = clean_params(&p);
        assert!(cleaned.contains_key("remora.bc.xlo.type"));
        assert!(!cleaned.contains_key("remora.bc.ylo.type"));
    }

    #[test]
    fn zero_stop_time_removed() {
        let mut p = base();
        p.insert(STOP_TIME_KEY.into(), Value::Float(0.0));
        assert!(!clean_params(&p).contains_key(STOP_TIME_KEY));

        p.insert(STOP_TIME_KEY.into(), Value::Int(0));
        assert!(!clean_params(&p).contains_key(STOP_TIME_KEY));
    }

    #[test]
    fn non_zero_stop_time_kept() {
        let mut p = base();
        p.insert(STOP_TIME_KEY.into(), Value::Float(86400.0));
        assert_eq!(clean_params(&p)[STOP_TIME_KEY], Value::Float(86400.0));
    }

    #[test]
    fn input_is_not_modified() {
        let p = base();
        let _ = clean_params(&p);
        assert!(p.contains_key("remora.bc.xlo.type"));
    }
}
