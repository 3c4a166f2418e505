use crate::error::CBeanError;
use sea_query::Value;

/// The current row of a result set
pub trait RowSource {
    fn value_at(&self, index: usize) -> Result<Value, CBeanError>;
}

impl RowSource for [Value] {
    fn value_at(&self, index: usize) -> Result<Value, CBeanError> {
        self.get(index).cloned().ok_or_else(|| {
            CBeanError::database(format!(
                "The row has no column at index {index}: column count={}",
                self.len()
            ))
        })
    }
}

impl RowSource for Vec<Value> {
    fn value_at(&self, index: usize) -> Result<Value, CBeanError> {
        self.as_slice().value_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_at() {
        let row = vec![Value::from(1), Value::from("Stojkovic")];
        assert_eq!(row.value_at(1).unwrap(), Value::from("Stojkovic"));
        let err = row.value_at(2).unwrap_err();
        assert!(matches!(err, CBeanError::Database(_)));
        assert!(err.to_string().contains("index 2"));
    }
}
