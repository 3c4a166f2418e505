//! Whole-row assembly: base entity plus its relation graph.

use crate::error::CBeanError;
use crate::relation::{
    BeanMeta, EntityFactory, EntityRef, RelationPropertyCache, RelationRowCache,
    RelationRowCreationResource, RelationRowCreator, RelationRowOption, RowSource, SelectIndexMap,
};

/// Turns result-set rows of one query into entities
///
/// The property cache is built on construction; the relation-row cache lives
/// as long as the assembler, so related rows are shared across all rows it
/// assembles.
pub struct BeanRowAssembler<'a> {
    base_meta: &'a BeanMeta,
    creator: RelationRowCreator<'a>,
    factory: &'a dyn EntityFactory,
    select_index_map: SelectIndexMap,
    property_cache: RelationPropertyCache,
    row_cache: RelationRowCache,
}

impl<'a> BeanRowAssembler<'a> {
    pub fn new(
        base_meta: &'a BeanMeta,
        select_index_map: SelectIndexMap,
        factory: &'a dyn EntityFactory,
        option: RelationRowOption,
    ) -> Self {
        let creator = RelationRowCreator::new(factory, option);
        let property_cache = creator.create_property_cache(base_meta, &select_index_map);
        Self {
            base_meta,
            creator,
            factory,
            select_index_map,
            property_cache,
            row_cache: RelationRowCache::new(),
        }
    }

    pub fn property_cache(&self) -> &RelationPropertyCache {
        &self.property_cache
    }

    pub fn row_cache(&self) -> &RelationRowCache {
        &self.row_cache
    }

    /// One base entity with its selected relations.
    pub fn assemble_row(&mut self, row: &dyn RowSource) -> Result<EntityRef, CBeanError> {
        let entity = self.factory.new_entity(self.base_meta)?;
        if let Some(mappings) = self.property_cache.mappings_of("") {
            for mapping in mappings {
                let value = row.value_at(mapping.select_index)?;
                entity.borrow_mut().set_property(&mapping.property_name, value)?;
            }
        }
        if self.creator.option().limit_relation_nest_level == 0 {
            return Ok(entity);
        }
        for rpt in &self.base_meta.relation_property_types {
            let mut res = RelationRowCreationResource::new(
                row,
                &self.select_index_map,
                &self.property_cache,
                &mut self.row_cache,
                rpt,
            );
            let related = self.creator.create_relation_row(&mut res)?;
            entity.borrow_mut().set_relation(&rpt.property_name, related)?;
        }
        Ok(entity)
    }

    pub fn assemble_all<R: RowSource>(&mut self, rows: &[R]) -> Result<Vec<EntityRef>, CBeanError> {
        rows.iter().map(|row| self.assemble_row(row)).collect()
    }
}
