//! Relation keys: identity of a related row inside one traversal.

use crate::value::hash_value;
use sea_query::Value;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Key of a relation row, built from the foreign-side key columns
///
/// A `Simple` key compares by value only: two simple keys with different
/// column labels but equal values are equal. A `Compound` key compares by
/// its whole label-to-value map.
///
/// # Example
///
/// ```no_run
/// use cbean::relation::RelationKey;
/// use sea_query::Value;
///
/// let a = RelationKey::simple("MEMBER_STATUS_CODE", Value::from("FML"));
/// let b = RelationKey::simple("STATUS", Value::from("FML"));
/// assert_eq!(a, b);
/// assert!(a.contains_column("MEMBER_STATUS_CODE"));
/// ```
#[derive(Debug, Clone)]
pub enum RelationKey {
    Simple { column_label: String, value: Value },
    Compound(BTreeMap<String, Value>),
}

impl RelationKey {
    pub fn simple(column_label: &str, value: Value) -> Self {
        RelationKey::Simple {
            column_label: column_label.to_string(),
            value,
        }
    }

    pub fn compound<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        RelationKey::Compound(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Simple for one pair, compound for more, `None` for none.
    pub fn from_key_values(pairs: Vec<(String, Value)>) -> Option<Self> {
        match pairs.len() {
            0 => None,
            1 => pairs
                .into_iter()
                .next()
                .map(|(column_label, value)| RelationKey::Simple { column_label, value }),
            _ => Some(RelationKey::Compound(pairs.into_iter().collect())),
        }
    }

    pub fn contains_column(&self, column_label: &str) -> bool {
        match self {
            RelationKey::Simple { column_label: label, .. } => label == column_label,
            RelationKey::Compound(map) => map.contains_key(column_label),
        }
    }

    pub fn extract_key_value(&self, column_label: &str) -> Option<&Value> {
        match self {
            RelationKey::Simple { column_label: label, value } if label == column_label => {
                Some(value)
            }
            RelationKey::Simple { .. } => None,
            RelationKey::Compound(map) => map.get(column_label),
        }
    }
}

impl PartialEq for RelationKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RelationKey::Simple { value: a, .. }, RelationKey::Simple { value: b, .. }) => a == b,
            (RelationKey::Compound(a), RelationKey::Compound(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for RelationKey {}

impl Hash for RelationKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            RelationKey::Simple { value, .. } => {
                0u8.hash(state);
                hash_value(value, state);
            }
            RelationKey::Compound(map) => {
                1u8.hash(state);
                map.len().hash(state);
                for (label, value) in map {
                    label.hash(state);
                    hash_value(value, state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_simple_key_ignores_label() {
        let a = RelationKey::simple("MEMBER_STATUS_CODE", Value::from("FML"));
        let b = RelationKey::simple("OTHER_LABEL", Value::from("FML"));
        assert_eq!(a, b);
        let set: HashSet<RelationKey> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_simple_key_differs_by_value() {
        let a = RelationKey::simple("ID", Value::from(1));
        assert_ne!(a, RelationKey::simple("ID", Value::from(2)));
        assert_ne!(a, RelationKey::simple("ID", Value::from(1i64)));
    }

    #[test]
    fn test_compound_key_uses_whole_map() {
        let a = RelationKey::compound([("SHOP_ID", Value::from(1)), ("ITEM_ID", Value::from(7))]);
        let b = RelationKey::compound([("ITEM_ID", Value::from(7)), ("SHOP_ID", Value::from(1))]);
        let c =
            RelationKey::compound([("SHOP_ID", Value::from(1)), ("PRODUCT_ID", Value::from(7))]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        let set: HashSet<RelationKey> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_simple_never_equals_compound() {
        let simple = RelationKey::simple("ID", Value::from(1));
        let compound = RelationKey::compound([("ID", Value::from(1))]);
        assert_ne!(simple, compound);
    }

    #[test]
    fn test_column_access() {
        let key = RelationKey::compound([("SHOP_ID", Value::from(1)), ("ITEM_ID", Value::from(7))]);
        assert!(key.contains_column("ITEM_ID"));
        assert!(!key.contains_column("PRODUCT_ID"));
        assert_eq!(key.extract_key_value("SHOP_ID"), Some(&Value::from(1)));

        let simple = RelationKey::simple("ID", Value::from(3));
        assert_eq!(simple.extract_key_value("ID"), Some(&Value::from(3)));
        assert_eq!(simple.extract_key_value("OTHER"), None);
    }

    #[test]
    fn test_from_key_values() {
        assert!(RelationKey::from_key_values(Vec::new()).is_none());
        let one = RelationKey::from_key_values(vec![("ID".to_string(), Value::from(1))]).unwrap();
        assert!(matches!(one, RelationKey::Simple { .. }));
        let two = RelationKey::from_key_values(vec![
            ("A".to_string(), Value::from(1)),
            ("B".to_string(), Value::from(2)),
        ])
        .unwrap();
        assert!(matches!(two, RelationKey::Compound(_)));
    }
}
