//! Typed parameter values and the ordered parameter mapping.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from parameter key to value.
///
/// Insertion order is preserved so that a written control file groups keys
/// in the order they were first seen. Re-inserting an existing key keeps its
/// original position and replaces the value.
pub type ParamMap = IndexMap<String, Value>;

/// A single control-file value.
///
/// Lists hold scalars; the parser never produces nested lists, but the
/// writer formats them recursively if a caller builds one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// `true` / `false`.
    Bool(bool),
    /// Optionally signed decimal integer.
    Int(i64),
    /// Any other numeric token.
    Float(f64),
    /// Anything that is not a boolean or a number.
    Str(String),
    /// Two or more whitespace-separated tokens.
    List(Vec<Value>),
}

impl Value {
    /// Numeric view of an `Int` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view of an `Int`, or of a `Float` with no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// String view of a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Element view of a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric view of every element of a `List`.
    ///
    /// Returns `None` if the value is not a list or any element is not a
    /// number.
    pub fn as_f64_list(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(Value::as_f64).collect()
    }

    /// Truthiness as the solver reads flags: `true`, non-zero numbers and
    /// non-empty strings or lists.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Returns `true` for the empty string and the empty list.
    ///
    /// The solver rejects `key =` with no value, so the writer drops these.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Equality that compares numbers by value: `Int(n)` equals
    /// `Float(n)`, and a boolean equals `1` or `0`.
    ///
    /// Used when comparing against schema defaults, which are declared with
    /// their nominal kind while a parsed file may spell `300.0` as `300`
    /// or a flag as `1`.
    pub fn loosely_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Bool(a), Value::Int(b)) | (Value::Int(b), Value::Bool(a)) => {
                i64::from(*a) == *b
            }
            (Value::Bool(a), Value::Float(b)) | (Value::Float(b), Value::Bool(a)) => {
                f64::from(u8::from(*a)) == *b
            }
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loosely_eq(y))
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

/// Format a float the way the control-file writer emits it.
///
/// Non-zero magnitudes below `1e-3` or at/above `1e7` use `%g`-style
/// scientific layout (`1e-05`, `1.5e+07`); everything else is plain decimal
/// with a trailing `.0` on whole numbers. Mantissas carry the shortest digit
/// string that parses back to the same `f64`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = x.abs();
    if x != 0.0 && (abs < 1e-3 || abs >= 1e7) {
        return format_general(x);
    }

    let plain = format!("{x}");
    if plain.contains('.') {
        plain
    } else {
        format!("{plain}.0")
    }
}

/// `%g` layout: scientific when the decimal exponent is below -4 or at least
/// 6, fixed otherwise. The exponent is signed and at least two digits wide.
fn format_general(x: f64) -> String {
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if (-4..6).contains(&exp) {
        return format!("{x}");
    }

    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- format_float --------------------------------------------------------

    #[test]
    fn whole_floats_keep_trailing_zero() {
        assert_eq!(format_float(300.0), "300.0");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-150.0), "-150.0");
        assert_eq!(format_float(41000.0), "41000.0");
    }

    #[test]
    fn mid_range_floats_are_plain_decimal() {
        assert_eq!(format_float(0.01), "0.01");
        assert_eq!(format_float(0.001), "0.001");
        assert_eq!(format_float(1027.5), "1027.5");
        assert_eq!(format_float(9_999_999.0), "9999999.0");
    }

    #[test]
    fn small_floats_use_scientific() {
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(-8.26e-5), "-8.26e-05");
        assert_eq!(format_float(1e-6), "1e-06");
    }

    #[test]
    fn exponent_minus_four_stays_fixed_like_percent_g() {
        assert_eq!(format_float(1.7e-4), "0.00017");
        assert_eq!(format_float(1e-4), "0.0001");
    }

    #[test]
    fn large_floats_use_scientific() {
        assert_eq!(format_float(1e7), "1e+07");
        assert_eq!(format_float(1.5e7), "1.5e+07");
        assert_eq!(format_float(2.5e120), "2.5e+120");
    }

    #[test]
    fn non_finite_floats() {
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    // -- Display -------------------------------------------------------------

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(-57600).to_string(), "-57600");
        assert_eq!(Value::from("upstream3").to_string(), "upstream3");
    }

    #[test]
    fn display_list_is_space_joined() {
        let v = Value::from(vec![41, 80, 16]);
        assert_eq!(v.to_string(), "41 80 16");

        let mixed = Value::List(vec![Value::Float(0.0), Value::Float(-150.0), Value::Int(3)]);
        assert_eq!(mixed.to_string(), "0.0 -150.0 3");
    }

    // -- accessors -----------------------------------------------------------

    #[test]
    fn numeric_accessors() {
        assert_eq!(Value::Int(4).as_f64(), Some(4.0));
        assert_eq!(Value::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(Value::Float(8.0).as_i64(), Some(8));
        assert_eq!(Value::Float(8.5).as_i64(), None);
        assert_eq!(Value::Bool(true).as_f64(), None);
        assert_eq!(Value::from("x").as_i64(), None);
    }

    #[test]
    fn f64_list_rejects_non_numeric_elements() {
        let ok = Value::from(vec![1.0, 2.0]);
        assert_eq!(ok.as_f64_list(), Some(vec![1.0, 2.0]));

        let bad = Value::List(vec![Value::Int(1), Value::from("a")]);
        assert_eq!(bad.as_f64_list(), None);
        assert_eq!(Value::Int(1).as_f64_list(), None);
    }

    #[test]
    fn truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Int(1).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from(vec![0]).is_truthy());
    }

    #[test]
    fn empty_values() {
        assert!(Value::from("").is_empty_value());
        assert!(Value::List(vec![]).is_empty_value());
        assert!(!Value::Int(0).is_empty_value());
        assert!(!Value::Bool(false).is_empty_value());
    }

    #[test]
    fn loose_equality_crosses_int_and_float() {
        assert!(Value::Int(300).loosely_eq(&Value::Float(300.0)));
        assert!(Value::Float(300.0).loosely_eq(&Value::Int(300)));
        assert!(!Value::Int(300).loosely_eq(&Value::Float(300.5)));
        assert!(Value::from(vec![1, 0, 0]).loosely_eq(&Value::from(vec![1.0, 0.0, 0.0])));
        assert!(!Value::from(vec![1, 0]).loosely_eq(&Value::from(vec![1, 0, 0])));
        assert!(!Value::Int(1).loosely_eq(&Value::from("1")));
    }

    #[test]
    fn loose_equality_treats_flags_as_numbers() {
        assert!(Value::Bool(true).loosely_eq(&Value::Int(1)));
        assert!(Value::Int(0).loosely_eq(&Value::Bool(false)));
        assert!(Value::Bool(true).loosely_eq(&Value::Float(1.0)));
        assert!(!Value::Bool(true).loosely_eq(&Value::Int(2)));
        assert!(!Value::Bool(false).loosely_eq(&Value::Float(0.5)));
    }

    // -- serde ---------------------------------------------------------------

    #[test]
    fn deserializes_untagged_from_toml() {
        #[derive(Deserialize)]
        struct Doc {
            a: Value,
            b: Value,
            c: Value,
            d: Value,
            e: Value,
        }
        let doc: Doc =
            toml::from_str("a = true\nb = 3\nc = 1.5\nd = \"SlipWall\"\ne = [1, 2]\n").unwrap();
        assert_eq!(doc.a, Value::Bool(true));
        assert_eq!(doc.b, Value::Int(3));
        assert_eq!(doc.c, Value::Float(1.5));
        assert_eq!(doc.d, Value::from("SlipWall"));
        assert_eq!(doc.e, Value::from(vec![1, 2]));
    }
}
