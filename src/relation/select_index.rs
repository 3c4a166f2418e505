use std::collections::HashMap;

/// Relation path -> column -> position in the result set
///
/// Column labels are case-insensitive. The base table lives under the empty path.
#[derive(Debug, Clone, Default)]
pub struct SelectIndexMap {
    by_path: HashMap<String, HashMap<String, usize>>,
}

impl SelectIndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, relation_path: &str, column_db_name: &str, index: usize) {
        self.by_path
            .entry(relation_path.to_string())
            .or_default()
            .insert(column_db_name.to_lowercase(), index);
    }

    /// `None` when the column is outside the select window of this query.
    pub fn index_of(&self, relation_path: &str, column_db_name: &str) -> Option<usize> {
        self.by_path
            .get(relation_path)
            .and_then(|columns| columns.get(&column_db_name.to_lowercase()))
            .copied()
    }

    pub fn contains_path(&self, relation_path: &str) -> bool {
        self.by_path.contains_key(relation_path)
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
