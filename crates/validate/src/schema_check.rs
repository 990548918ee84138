//! Per-parameter checks against schema definitions.

use remora_params::{ParamKind, ParamMap, ParameterDefinition, Schema, Value};

use crate::message::ValidationMessage;

/// Check every parameter that has a schema definition.
///
/// - `S001` (error): a numeric value outside the declared bounds, checked
///   element-wise for vector kinds.
/// - `S002` (error): an enum value that is not one of the options.
/// - `S003` (info): a parameter set while the parameter it depends on does
///   not have the required value. A missing dependency key falls back to
///   its schema default.
///
/// Keys without a definition and empty values are ignored.
pub fn check_schema(params: &ParamMap, schema: &Schema) -> Vec<ValidationMessage> {
    let mut msgs = Vec::new();

    for (key, value) in params {
        let Some(def) = schema.find(key) else {
            continue;
        };
        if value.is_empty_value() {
            continue;
        }
        check_bounds(def, value, &mut msgs);
        check_options(def, value, &mut msgs);
        check_dependency(def, params, schema, &mut msgs);
    }

    msgs
}

fn check_bounds(def: &ParameterDefinition, value: &Value, msgs: &mut Vec<ValidationMessage>) {
    if def.min_value().is_none() && def.max_value().is_none() {
        return;
    }

    let elements: Vec<(Option<usize>, f64)> = match value {
        Value::List(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_f64().map(|x| (Some(i), x)))
            .collect(),
        other => other.as_f64().map(|x| (None, x)).into_iter().collect(),
    };

    for (index, x) in elements {
        let name = match index {
            Some(i) => format!("{}[{i}]", def.key()),
            None => def.key().to_string(),
        };
        if let Some(min) = def.min_value()
            && x < min
        {
            msgs.push(ValidationMessage::error(
                "S001",
                format!("{name} = {x} is below the minimum {min}."),
                &[def.key()],
            ));
        }
        if let Some(max) = def.max_value()
            && x > max
        {
            msgs.push(ValidationMessage::error(
                "S001",
                format!("{name} = {x} is above the maximum {max}."),
                &[def.key()],
            ));
        }
    }
}

fn check_options(def: &ParameterDefinition, value: &Value, msgs: &mut Vec<ValidationMessage>) {
    if def.kind() != ParamKind::Enum {
        return;
    }
    let Some(options) = def.enum_options() else {
        return;
    };
    if value.as_str().is_some_and(|s| options.iter().any(|o| o == s)) {
        return;
    }
    msgs.push(ValidationMessage::error(
        "S002",
        format!(
            "{} = {value} is not one of: {}.",
            def.key(),
            options.join(", ")
        ),
        &[def.key()],
    ));
}

fn check_dependency(
    def: &ParameterDefinition,
    params: &ParamMap,
    schema: &Schema,
    msgs: &mut Vec<ValidationMessage>,
) {
    let Some((dep_key, required)) = def.depends_on() else {
        return;
    };
    let actual = params.get(dep_key).or_else(|| schema.default_for(dep_key));
    if actual.is_some_and(|a| a.loosely_eq(required)) {
        return;
    }
    msgs.push(ValidationMessage::info(
        "S003",
        format!(
            "{} is set but only used when {dep_key} = {required}.",
            def.key()
        ),
        &[def.key(), dep_key],
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Severity;

    fn schema() -> Schema {
        Schema::from_definitions(vec![
            ParameterDefinition::new("remora.v", "output", ParamKind::Int)
                .with_min(0.0)
                .with_max(2.0),
            ParameterDefinition::new("remora.n_cell", "domain", ParamKind::IntVec3).with_min(1.0),
            ParameterDefinition::new("remora.mode", "physics", ParamKind::Enum)
                .with_options(&["gls", "analytic"]),
            ParameterDefinition::new("remora.gls_P", "mixing", ParamKind::Float)
                .with_dependency("remora.mode", "gls"),
        ])
    }

    fn map(pairs: &[(&str, Value)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn in_bounds_values_pass() {
        let p = map(&[
            ("remora.v", Value::Int(1)),
            ("remora.n_cell", Value::from(vec![4, 4, 4])),
        ]);
        assert!(check_schema(&p, &schema()).is_empty());
    }

    #[test]
    fn out_of_bounds_scalar() {
        let p = map(&[("remora.v", Value::Int(5))]);
        let msgs = check_schema(&p, &schema());
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].rule_id, "S001");
        assert_eq!(msgs[0].severity, Severity::Error);
        assert!(msgs[0].message.contains("above the maximum"));
    }

    #[test]
    fn out_of_bounds_vector_element() {
        let p = map(&[("remora.n_cell", Value::from(vec![4, 0, 4]))]);
        let msgs = check_schema(&p, &schema());
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].message.starts_with("remora.n_cell[1] = 0"));
    }

    #[test]
    fn unknown_enum_option() {
        let p = map(&[("remora.mode", Value::from("kpp"))]);
        let msgs = check_schema(&p, &schema());
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].rule_id, "S002");
        assert!(msgs[0].message.contains("gls, analytic"));
    }

    #[test]
    fn unmet_dependency_is_info() {
        let p = map(&[
            ("remora.mode", Value::from("analytic")),
            ("remora.gls_P", Value::Float(3.0)),
        ]);
        let msgs = check_schema(&p, &schema());
        assert_eq!(msgs.len(), 1);
        assert_eq!(msgs[0].rule_id, "S003");
        assert_eq!(msgs[0].severity, Severity::Info);
        assert_eq!(msgs[0].parameter_keys, vec!["remora.gls_P", "remora.mode"]);
    }

    #[test]
    fn met_dependency_is_silent() {
        let p = map(&[
            ("remora.mode", Value::from("gls")),
            ("remora.gls_P", Value::Float(3.0)),
        ]);
        assert!(check_schema(&p, &schema()).is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let p = map(&[("remora.something_else", Value::Int(-99))]);
        assert!(check_schema(&p, &schema()).is_empty());
    }
}
