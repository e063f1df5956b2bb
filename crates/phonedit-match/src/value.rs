//! Equality over JSON values.
//!
//! [`strict_eq`] is the literal comparison used everywhere a query value is
//! checked against data without any predicate semantics. It never coerces
//! between kinds: `"1"` is not `1`, `true` is not `1`. Numbers are the one
//! place where representation is ignored, so `1`, `1u64` and `1.0` are equal.

use serde_json::{Number, Value};

/// Literal equality between two JSON values.
///
/// Scalars compare by value, numbers numerically across representations,
/// arrays element-wise and objects key-wise. Values of different kinds are
/// never equal.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => same_number(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| strict_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| strict_eq(a, b)))
        }
        _ => false,
    }
}

// Integers stay exact; a float on either side compares as f64.
fn same_number(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    match (a.as_i64(), b.as_i64()) {
        (Some(a), Some(b)) => a == b,
        (None, None) => a.as_u64() == b.as_u64(),
        // One side is negative or one is above i64::MAX.
        _ => false,
    }
}

/// JavaScript-style truthiness, used when reading option flags out of
/// query documents.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_ignore_representation() {
        assert!(strict_eq(&json!(30), &json!(30.0)));
        assert!(strict_eq(&json!(7u64), &json!(7i64)));
        assert!(strict_eq(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!strict_eq(&json!(-1), &json!(u64::MAX)));
        assert!(!strict_eq(&json!(0.5), &json!(0)));
    }

    #[test]
    fn strict_eq_scalars() {
        assert!(strict_eq(&json!("gato"), &json!("gato")));
        assert!(!strict_eq(&json!("gato"), &json!("Gato")));
        assert!(strict_eq(&json!(null), &json!(null)));
        assert!(!strict_eq(&json!(1), &json!(true)));
        assert!(!strict_eq(&json!("1"), &json!(1)));
        assert!(!strict_eq(&json!(null), &json!(false)));
    }

    #[test]
    fn strict_eq_containers() {
        assert!(strict_eq(&json!([1, "a"]), &json!([1, "a"])));
        assert!(!strict_eq(&json!([1, "a"]), &json!(["a", 1])));
        assert!(strict_eq(
            &json!({"a": 1, "b": [true]}),
            &json!({"b": [true], "a": 1})
        ));
        assert!(!strict_eq(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn truthiness() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("some")));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }
}
