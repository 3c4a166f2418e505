//! Relation row creation.
//!
//! The property cache is built once per query shape: for every relation path
//! it lists the properties whose columns are in the select window. Rows are
//! then created per result-set row, reusing rows already built for the same
//! path and key.

use crate::error::CBeanError;
use crate::relation::{
    relation_path_of, BeanMeta, EntityFactory, EntityRef, PropertyMapping, RelationKey,
    RelationPropertyCache, RelationRowCreationResource, RelationRowOption, SelectIndexMap,
};
use crate::tracing_helpers;
use crate::value::is_null_value;

pub struct RelationRowCreator<'f> {
    factory: &'f dyn EntityFactory,
    option: RelationRowOption,
}

impl<'f> RelationRowCreator<'f> {
    pub fn new(factory: &'f dyn EntityFactory, option: RelationRowOption) -> Self {
        Self { factory, option }
    }

    pub fn option(&self) -> RelationRowOption {
        self.option
    }

    // ===================================================================
    //                                                   Property Cache
    //                                                   ==============
    /// Map the selected columns of the base table (path `""`) and of every
    /// reachable relation path.
    pub fn create_property_cache(
        &self,
        base_meta: &BeanMeta,
        select_index_map: &SelectIndexMap,
    ) -> RelationPropertyCache {
        let _span = tracing_helpers::relation_cache_span(&base_meta.table_db_name).entered();
        let mut cache = RelationPropertyCache::new();
        register_selected_properties(&mut cache, base_meta, "", select_index_map);
        self.setup_relation_property_cache(&mut cache, base_meta, "", 1, select_index_map);
        log::debug!(
            "relation property cache of {}: {} path(s)",
            base_meta.table_db_name,
            cache.path_count()
        );
        cache
    }

    fn setup_relation_property_cache(
        &self,
        cache: &mut RelationPropertyCache,
        meta: &BeanMeta,
        parent_path: &str,
        nest_level: usize,
        select_index_map: &SelectIndexMap,
    ) {
        if nest_level > self.option.limit_relation_nest_level {
            return;
        }
        for rpt in &meta.relation_property_types {
            let relation_path = relation_path_of(parent_path, rpt.relation_no);
            if !register_selected_properties(cache, &rpt.target, &relation_path, select_index_map) {
                continue;
            }
            self.setup_relation_property_cache(
                cache,
                &rpt.target,
                &relation_path,
                nest_level + 1,
                select_index_map,
            );
        }
    }

    // ===================================================================
    //                                                       Row Create
    //                                                       ==========
    /// The related row of the resource's relation, or `None` when the
    /// relation is not selected, has no key, or holds only nulls without
    /// dead links enabled.
    pub fn create_relation_row(
        &self,
        res: &mut RelationRowCreationResource<'_>,
    ) -> Result<Option<EntityRef>, CBeanError> {
        let property_cache = res.property_cache;
        let Some(mappings) = property_cache.mappings_of(&res.relation_path) else {
            return Ok(None);
        };
        let key = self.create_relation_key(res, mappings)?;
        if let Some(key) = &key {
            if let Some(cached) = res.row_cache.get(&res.relation_path, key) {
                return Ok(Some(cached));
            }
        } else if !self.option.create_dead_link {
            return Ok(None);
        }

        let rpt = res.relation_property_type;
        let row = self.factory.new_entity(&rpt.target)?;
        let mut valid_value_count = 0;
        for mapping in mappings {
            let value = res.row.value_at(mapping.select_index)?;
            if !is_null_value(&value) {
                valid_value_count += 1;
            }
            row.borrow_mut().set_property(&mapping.property_name, value)?;
        }
        if !self.is_valid_relation_after_property_loop(valid_value_count) {
            return Ok(None);
        }

        if res.current_nest_level < self.option.limit_relation_nest_level {
            for child in &rpt.target.relation_property_types {
                let mut next = res.prepare_next(child);
                let related = self.create_relation_row(&mut next)?;
                row.borrow_mut().set_relation(&child.property_name, related)?;
            }
        }

        if let Some(key) = key {
            res.row_cache.add(&res.relation_path, key, row.clone());
        }
        Ok(Some(row))
    }

    /// Key from the related side's join columns, if all of them are selected and not null.
    pub fn create_relation_key(
        &self,
        res: &RelationRowCreationResource<'_>,
        mappings: &[PropertyMapping],
    ) -> Result<Option<RelationKey>, CBeanError> {
        let mut pairs = Vec::with_capacity(res.relation_property_type.your_keys.len());
        for your_key in &res.relation_property_type.your_keys {
            // a partial key would merge rows that differ in the missing column
            let Some(mapping) = mappings
                .iter()
                .find(|m| m.column_db_name.eq_ignore_ascii_case(your_key))
            else {
                return Ok(None);
            };
            let value = res.row.value_at(mapping.select_index)?;
            if is_null_value(&value) {
                return Ok(None);
            }
            pairs.push((mapping.column_db_name.clone(), value));
        }
        Ok(RelationKey::from_key_values(pairs))
    }

    fn is_valid_relation_after_property_loop(&self, valid_value_count: usize) -> bool {
        self.option.create_dead_link || valid_value_count > 0
    }
}

/// Register the selected properties of `meta` under `relation_path`;
/// false when none of them is selected.
fn register_selected_properties(
    cache: &mut RelationPropertyCache,
    meta: &BeanMeta,
    relation_path: &str,
    select_index_map: &SelectIndexMap,
) -> bool {
    let mut found = false;
    for pt in &meta.property_types {
        // out of the select window: not selected in this query
        let Some(select_index) = select_index_map.index_of(relation_path, &pt.column_db_name) else {
            continue;
        };
        cache.register(
            relation_path,
            PropertyMapping {
                property_name: pt.property_name.clone(),
                column_db_name: pt.column_db_name.clone(),
                select_index,
            },
        );
        found = true;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{MapEntityFactory, RelationRowCache, RowSource};
    use sea_query::Value;
    use std::rc::Rc;
    use std::sync::Arc;

    /// MEMBER -> MEMBER_STATUS -> STATUS_GROUP
    fn member_meta() -> BeanMeta {
        let group = Arc::new(
            BeanMeta::new("STATUS_GROUP")
                .property("groupCode", "GROUP_CODE")
                .property("groupName", "GROUP_NAME"),
        );
        let status = Arc::new(
            BeanMeta::new("MEMBER_STATUS")
                .property("memberStatusCode", "MEMBER_STATUS_CODE")
                .property("memberStatusName", "MEMBER_STATUS_NAME")
                .relation("statusGroup", group, &[("GROUP_CODE", "GROUP_CODE")]),
        );
        BeanMeta::new("MEMBER")
            .property("memberId", "MEMBER_ID")
            .property("memberName", "MEMBER_NAME")
            .relation("memberStatus", status, &[("MEMBER_STATUS_CODE", "MEMBER_STATUS_CODE")])
    }

    /// base: 0 MEMBER_ID, 1 MEMBER_NAME; _0: 2 code, 3 name; _0_0: 4 code, 5 name
    fn full_index_map() -> SelectIndexMap {
        let mut map = SelectIndexMap::new();
        map.register("", "MEMBER_ID", 0);
        map.register("", "MEMBER_NAME", 1);
        map.register("_0", "MEMBER_STATUS_CODE", 2);
        map.register("_0", "MEMBER_STATUS_NAME", 3);
        map.register("_0_0", "GROUP_CODE", 4);
        map.register("_0_0", "GROUP_NAME", 5);
        map
    }

    fn option(limit: usize, dead_link: bool) -> RelationRowOption {
        RelationRowOption {
            limit_relation_nest_level: limit,
            create_dead_link: dead_link,
        }
    }

    fn create(
        creator: &RelationRowCreator<'_>,
        meta: &BeanMeta,
        cache: &RelationPropertyCache,
        index_map: &SelectIndexMap,
        row_cache: &mut RelationRowCache,
        row: &dyn RowSource,
    ) -> Option<EntityRef> {
        let rpt = &meta.relation_property_types[0];
        let mut res = RelationRowCreationResource::new(row, index_map, cache, row_cache, rpt);
        creator.create_relation_row(&mut res).unwrap()
    }

    #[test]
    fn test_property_cache_follows_select_window() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, false));
        let meta = member_meta();
        let cache = creator.create_property_cache(&meta, &full_index_map());
        assert_eq!(cache.path_count(), 3);
        assert_eq!(cache.mappings_of("_0_0").unwrap()[1].select_index, 5);

        let mut partial = SelectIndexMap::new();
        partial.register("", "MEMBER_ID", 0);
        partial.register("_0_0", "GROUP_CODE", 1);
        let cache = creator.create_property_cache(&meta, &partial);
        assert!(cache.contains_path(""));
        assert!(!cache.contains_path("_0"));
        // nothing selected on _0, so _0_0 is never reached
        assert!(!cache.contains_path("_0_0"));
    }

    #[test]
    fn test_property_cache_stops_at_nest_limit() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(1, false));
        let cache = creator.create_property_cache(&member_meta(), &full_index_map());
        assert!(cache.contains_path("_0"));
        assert!(!cache.contains_path("_0_0"));
    }

    #[test]
    fn test_same_key_yields_same_row() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, false));
        let meta = member_meta();
        let index_map = full_index_map();
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();

        let first = vec![
            Value::from(1),
            Value::from("Stojkovic"),
            Value::from("FML"),
            Value::from("Formalized"),
            Value::from("G1"),
            Value::from("Regular"),
        ];
        let second = vec![
            Value::from(2),
            Value::from("Pixy"),
            Value::from("FML"),
            Value::from("Formalized"),
            Value::from("G1"),
            Value::from("Regular"),
        ];
        let a = create(&creator, &meta, &cache, &index_map, &mut row_cache, &first).unwrap();
        let b = create(&creator, &meta, &cache, &index_map, &mut row_cache, &second).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(row_cache.len(), 2);

        let group = a.borrow().relation("statusGroup").unwrap();
        assert_eq!(group.borrow().property("groupName"), Some(Value::from("Regular")));
    }

    #[test]
    fn test_different_keys_yield_different_rows() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, false));
        let meta = member_meta();
        let index_map = full_index_map();
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();

        let fml = vec![
            Value::from(1),
            Value::from("A"),
            Value::from("FML"),
            Value::from("Formalized"),
            Value::from("G1"),
            Value::from("Regular"),
        ];
        let wdl = vec![
            Value::from(2),
            Value::from("B"),
            Value::from("WDL"),
            Value::from("Withdrawal"),
            Value::from("G1"),
            Value::from("Regular"),
        ];
        let a = create(&creator, &meta, &cache, &index_map, &mut row_cache, &fml).unwrap();
        let b = create(&creator, &meta, &cache, &index_map, &mut row_cache, &wdl).unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
        // the group below both statuses is shared
        let ga = a.borrow().relation("statusGroup").unwrap();
        let gb = b.borrow().relation("statusGroup").unwrap();
        assert!(Rc::ptr_eq(&ga, &gb));
    }

    fn all_null_status_row() -> Vec<Value> {
        vec![
            Value::from(3),
            Value::from("C"),
            Value::String(None),
            Value::String(None),
            Value::String(None),
            Value::String(None),
        ]
    }

    #[test]
    fn test_all_null_relation_is_suppressed() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, false));
        let meta = member_meta();
        let index_map = full_index_map();
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();
        let row = all_null_status_row();
        assert!(create(&creator, &meta, &cache, &index_map, &mut row_cache, &row).is_none());
        assert!(row_cache.is_empty());
    }

    #[test]
    fn test_dead_link_keeps_all_null_relation() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, true));
        let meta = member_meta();
        let index_map = full_index_map();
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();
        let row = all_null_status_row();
        let status = create(&creator, &meta, &cache, &index_map, &mut row_cache, &row).unwrap();
        assert_eq!(status.borrow().property("memberStatusName"), Some(Value::String(None)));
        // keyless rows are never shared
        let again = create(&creator, &meta, &cache, &index_map, &mut row_cache, &row).unwrap();
        assert!(!Rc::ptr_eq(&status, &again));
    }

    #[test]
    fn test_relation_without_key_column_selected() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, false));
        let meta = member_meta();
        let mut index_map = SelectIndexMap::new();
        index_map.register("", "MEMBER_ID", 0);
        index_map.register("_0", "MEMBER_STATUS_NAME", 1);
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();
        let row = vec![Value::from(1), Value::from("Formalized")];
        assert!(create(&creator, &meta, &cache, &index_map, &mut row_cache, &row).is_none());

        let dead_link = RelationRowCreator::new(&MapEntityFactory, option(8, true));
        let status = create(&dead_link, &meta, &cache, &index_map, &mut row_cache, &row).unwrap();
        assert_eq!(status.borrow().property("memberStatusName"), Some(Value::from("Formalized")));
    }

    #[test]
    fn test_partially_selected_compound_key_is_not_shared() {
        let item = Arc::new(
            BeanMeta::new("SHOP_ITEM")
                .property("shopId", "SHOP_ID")
                .property("itemId", "ITEM_ID")
                .property("itemName", "ITEM_NAME"),
        );
        let meta = BeanMeta::new("PURCHASE")
            .property("purchaseId", "PURCHASE_ID")
            .relation("shopItem", item, &[("SHOP_ID", "SHOP_ID"), ("ITEM_ID", "ITEM_ID")]);
        let mut index_map = SelectIndexMap::new();
        index_map.register("", "PURCHASE_ID", 0);
        index_map.register("_0", "SHOP_ID", 1);
        index_map.register("_0", "ITEM_NAME", 2);
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, false));
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();

        let apple = vec![Value::from(1), Value::from(7), Value::from("Apple")];
        let banana = vec![Value::from(2), Value::from(7), Value::from("Banana")];
        // ITEM_ID is not selected, so the key cannot identify the item
        assert!(create(&creator, &meta, &cache, &index_map, &mut row_cache, &apple).is_none());
        assert!(create(&creator, &meta, &cache, &index_map, &mut row_cache, &banana).is_none());

        let dead_link = RelationRowCreator::new(&MapEntityFactory, option(8, true));
        let a = create(&dead_link, &meta, &cache, &index_map, &mut row_cache, &apple).unwrap();
        let b = create(&dead_link, &meta, &cache, &index_map, &mut row_cache, &banana).unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(b.borrow().property("itemName"), Some(Value::from("Banana")));
        assert!(row_cache.is_empty());
    }

    #[test]
    fn test_unselected_relation_is_none() {
        let creator = RelationRowCreator::new(&MapEntityFactory, option(8, true));
        let meta = member_meta();
        let mut index_map = SelectIndexMap::new();
        index_map.register("", "MEMBER_ID", 0);
        let cache = creator.create_property_cache(&meta, &index_map);
        let mut row_cache = RelationRowCache::new();
        let row = vec![Value::from(1)];
        assert!(create(&creator, &meta, &cache, &index_map, &mut row_cache, &row).is_none());
    }
}
