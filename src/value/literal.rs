//! SQL literal rendering for `sea_query::Value`.

use sea_query::Value;

/// Does this value represent SQL NULL?
///
/// `sea_query::Value` carries the column type even for nulls, so every typed
/// `None` counts.
pub fn is_null_value(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
            | Value::Json(None)
    )
}

/// Convert a `sea_query::Value` to a SQL literal
///
/// Strings are quoted with single quotes doubled, nulls become `NULL`, numbers
/// and booleans are written bare.
///
/// # Example
///
/// ```
/// use sea_query::Value;
/// use cbean::value::to_sql_literal;
///
/// assert_eq!(to_sql_literal(&Value::Int(Some(42))), "42");
/// assert_eq!(to_sql_literal(&Value::String(Some("it's".to_string()))), "'it''s'");
/// assert_eq!(to_sql_literal(&Value::Int(None)), "NULL");
/// ```
pub fn to_sql_literal(value: &Value) -> String {
    if is_null_value(value) {
        return "NULL".to_string();
    }
    match value {
        Value::Bool(Some(b)) => {
            if *b {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }

        Value::TinyInt(Some(i)) => i.to_string(),
        Value::SmallInt(Some(i)) => i.to_string(),
        Value::Int(Some(i)) => i.to_string(),
        Value::BigInt(Some(i)) => i.to_string(),
        Value::TinyUnsigned(Some(u)) => u.to_string(),
        Value::SmallUnsigned(Some(u)) => u.to_string(),
        Value::Unsigned(Some(u)) => u.to_string(),
        Value::BigUnsigned(Some(u)) => u.to_string(),

        Value::Float(Some(f)) => f.to_string(),
        Value::Double(Some(d)) => d.to_string(),

        Value::String(Some(s)) => quote(s),
        Value::Char(Some(c)) => quote(&c.to_string()),

        Value::Bytes(Some(b)) => {
            let hex: String = b.iter().map(|byte| format!("{:02x}", byte)).collect();
            format!("X'{}'", hex)
        }

        Value::Json(Some(j)) => quote(&j.to_string()),

        // date/time and other feature-gated variants
        other => quote(&format!("{other:?}")),
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_integers() {
        assert_eq!(to_sql_literal(&Value::TinyInt(Some(-5))), "-5");
        assert_eq!(to_sql_literal(&Value::SmallInt(Some(100))), "100");
        assert_eq!(to_sql_literal(&Value::BigInt(Some(9_000_000_000))), "9000000000");
        assert_eq!(to_sql_literal(&Value::BigUnsigned(Some(7))), "7");
    }

    #[test]
    fn test_literal_strings_are_escaped() {
        assert_eq!(to_sql_literal(&Value::String(Some("hello".to_string()))), "'hello'");
        assert_eq!(to_sql_literal(&Value::String(Some("O'Brien".to_string()))), "'O''Brien'");
        assert_eq!(to_sql_literal(&Value::Char(Some('\''))), "''''");
    }

    #[test]
    fn test_literal_booleans_and_bytes() {
        assert_eq!(to_sql_literal(&Value::Bool(Some(true))), "true");
        assert_eq!(to_sql_literal(&Value::Bool(Some(false))), "false");
        assert_eq!(to_sql_literal(&Value::Bytes(Some(vec![0x0a, 0xff]))), "X'0aff'");
    }

    #[test]
    fn test_typed_nulls() {
        assert!(is_null_value(&Value::Int(None)));
        assert!(is_null_value(&Value::String(None)));
        assert!(is_null_value(&Value::Json(None)));
        assert!(!is_null_value(&Value::Int(Some(0))));
        assert_eq!(to_sql_literal(&Value::Double(None)), "NULL");
    }
}
