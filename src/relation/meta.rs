//! Bean metadata: what a table's entity looks like to the row creator.

use std::sync::Arc;

/// Relation path of relation `relation_no` below `parent_path`
/// (`""` + 0 gives `_0`, `_0` + 1 gives `_0_1`).
pub fn relation_path_of(parent_path: &str, relation_no: usize) -> String {
    format!("{parent_path}_{relation_no}")
}

/// A scalar property mapped to one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyType {
    pub property_name: String,
    pub column_db_name: String,
}

/// A foreign relation (many-to-one or one-to-one) of an entity
#[derive(Debug, Clone)]
pub struct RelationPropertyType {
    /// Position among the owner's relations, used in relation paths
    pub relation_no: usize,
    pub property_name: String,
    /// Join columns on the owning side
    pub my_keys: Vec<String>,
    /// Join columns on the related side, in the same order as `my_keys`
    pub your_keys: Vec<String>,
    pub target: Arc<BeanMeta>,
}

impl RelationPropertyType {
    pub fn new(relation_no: usize, property_name: &str, target: Arc<BeanMeta>) -> Self {
        Self {
            relation_no,
            property_name: property_name.to_string(),
            my_keys: Vec::new(),
            your_keys: Vec::new(),
            target,
        }
    }

    /// Add a join column pair.
    pub fn key(mut self, my_key: &str, your_key: &str) -> Self {
        self.my_keys.push(my_key.to_string());
        self.your_keys.push(your_key.to_string());
        self
    }

    /// `(my, your)` pairs as expected by outer-join registration.
    pub fn join_on(&self) -> Vec<(&str, &str)> {
        self.my_keys
            .iter()
            .zip(&self.your_keys)
            .map(|(my, your)| (my.as_str(), your.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct BeanMeta {
    pub table_db_name: String,
    pub property_types: Vec<PropertyType>,
    pub relation_property_types: Vec<RelationPropertyType>,
}

impl BeanMeta {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            table_db_name: table_db_name.to_string(),
            property_types: Vec::new(),
            relation_property_types: Vec::new(),
        }
    }

    pub fn property(mut self, property_name: &str, column_db_name: &str) -> Self {
        self.property_types.push(PropertyType {
            property_name: property_name.to_string(),
            column_db_name: column_db_name.to_string(),
        });
        self
    }

    /// Add a relation; its number is its position among the relations.
    pub fn relation(
        mut self,
        property_name: &str,
        target: Arc<BeanMeta>,
        join_on: &[(&str, &str)],
    ) -> Self {
        let relation_no = self.relation_property_types.len();
        let rpt = join_on.iter().fold(
            RelationPropertyType::new(relation_no, property_name, target),
            |rpt, (my, your)| rpt.key(my, your),
        );
        self.relation_property_types.push(rpt);
        self
    }

    pub fn find_property_type(&self, property_name: &str) -> Option<&PropertyType> {
        self.property_types.iter().find(|p| p.property_name == property_name)
    }

    pub fn find_relation_property_type(
        &self,
        property_name: &str,
    ) -> Option<&RelationPropertyType> {
        self.relation_property_types
            .iter()
            .find(|r| r.property_name == property_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_numbers_follow_declaration() {
        let status =
            Arc::new(BeanMeta::new("MEMBER_STATUS").property("statusName", "MEMBER_STATUS_NAME"));
        let service = Arc::new(BeanMeta::new("MEMBER_SERVICE"));
        let member = BeanMeta::new("MEMBER")
            .property("memberId", "MEMBER_ID")
            .relation("memberStatus", status, &[("MEMBER_STATUS_CODE", "MEMBER_STATUS_CODE")])
            .relation("memberService", service, &[("MEMBER_ID", "MEMBER_ID")]);
        assert_eq!(member.find_relation_property_type("memberService").unwrap().relation_no, 1);
        assert_eq!(
            member.find_relation_property_type("memberStatus").unwrap().join_on(),
            vec![("MEMBER_STATUS_CODE", "MEMBER_STATUS_CODE")]
        );
        assert_eq!(member.find_property_type("memberId").unwrap().column_db_name, "MEMBER_ID");
        assert!(member.find_property_type("missing").is_none());
    }

    #[test]
    fn test_relation_path_of() {
        assert_eq!(relation_path_of("", 0), "_0");
        assert_eq!(relation_path_of("_0", 1), "_0_1");
    }
}
