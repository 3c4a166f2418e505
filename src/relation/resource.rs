use crate::relation::{
    relation_path_of, RelationPropertyCache, RelationPropertyType, RelationRowCache, RowSource,
    SelectIndexMap,
};

/// What the row creator needs while walking one row's relations
///
/// A child resource reborrows the parent's row and caches, so the recursion
/// shares them without any global state.
pub struct RelationRowCreationResource<'r> {
    pub(crate) row: &'r dyn RowSource,
    pub(crate) select_index_map: &'r SelectIndexMap,
    pub(crate) property_cache: &'r RelationPropertyCache,
    pub(crate) row_cache: &'r mut RelationRowCache,
    pub(crate) relation_property_type: &'r RelationPropertyType,
    pub(crate) relation_path: String,
    pub(crate) current_nest_level: usize,
}

impl<'r> RelationRowCreationResource<'r> {
    /// Resource of a first-level relation of the base row.
    pub fn new(
        row: &'r dyn RowSource,
        select_index_map: &'r SelectIndexMap,
        property_cache: &'r RelationPropertyCache,
        row_cache: &'r mut RelationRowCache,
        relation_property_type: &'r RelationPropertyType,
    ) -> Self {
        Self {
            row,
            select_index_map,
            property_cache,
            row_cache,
            relation_property_type,
            relation_path: relation_path_of("", relation_property_type.relation_no),
            current_nest_level: 1,
        }
    }

    /// Resource of a relation one level below this one.
    pub fn prepare_next<'b>(
        &'b mut self,
        relation_property_type: &'b RelationPropertyType,
    ) -> RelationRowCreationResource<'b> {
        RelationRowCreationResource {
            row: self.row,
            select_index_map: self.select_index_map,
            property_cache: self.property_cache,
            row_cache: &mut *self.row_cache,
            relation_property_type,
            relation_path: relation_path_of(
                &self.relation_path,
                relation_property_type.relation_no,
            ),
            current_nest_level: self.current_nest_level + 1,
        }
    }

    pub fn relation_path(&self) -> &str {
        &self.relation_path
    }

    pub fn current_nest_level(&self) -> usize {
        self.current_nest_level
    }

    pub fn relation_property_type(&self) -> &RelationPropertyType {
        self.relation_property_type
    }
}
