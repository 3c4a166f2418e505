//! Caches of one row-assembly session.

use crate::relation::{EntityRef, RelationKey};
use std::collections::HashMap;
use std::rc::Rc;

/// A property found in the select window, with its result-set position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    pub property_name: String,
    pub column_db_name: String,
    pub select_index: usize,
}

/// Relation path -> properties selected for that path
///
/// Built once per query shape. A path missing here was not selected at all.
#[derive(Debug, Clone, Default)]
pub struct RelationPropertyCache {
    by_path: HashMap<String, Vec<PropertyMapping>>,
}

impl RelationPropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, relation_path: &str, mapping: PropertyMapping) {
        self.by_path
            .entry(relation_path.to_string())
            .or_default()
            .push(mapping);
    }

    pub fn mappings_of(&self, relation_path: &str) -> Option<&[PropertyMapping]> {
        self.by_path.get(relation_path).map(Vec::as_slice)
    }

    pub fn contains_path(&self, relation_path: &str) -> bool {
        self.by_path.contains_key(relation_path)
    }

    /// Number of paths with at least one property.
    pub fn path_count(&self) -> usize {
        self.by_path.len()
    }
}

/// Identity map: relation path + key -> the row already built for it
#[derive(Debug, Default)]
pub struct RelationRowCache {
    by_path: HashMap<String, HashMap<RelationKey, EntityRef>>,
}

impl RelationRowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relation_path: &str, key: &RelationKey) -> Option<EntityRef> {
        self.by_path
            .get(relation_path)
            .and_then(|rows| rows.get(key))
            .map(Rc::clone)
    }

    pub fn add(&mut self, relation_path: &str, key: RelationKey, row: EntityRef) {
        self.by_path
            .entry(relation_path.to_string())
            .or_default()
            .insert(key, row);
    }

    /// Number of cached rows over all paths.
    pub fn len(&self) -> usize {
        self.by_path.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.by_path.clear();
    }
}
