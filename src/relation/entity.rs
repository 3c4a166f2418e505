//! Entities built by the row creator.
//!
//! Rows are shared (`Rc<RefCell<..>>`): one related row may hang below many
//! base rows of the same traversal.

use crate::error::CBeanError;
use crate::relation::BeanMeta;
use sea_query::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub type EntityRef = Rc<RefCell<dyn RowEntity>>;

/// An entity the row creator can fill
pub trait RowEntity: fmt::Debug {
    fn table_db_name(&self) -> &str;

    fn set_property(&mut self, property_name: &str, value: Value) -> Result<(), CBeanError>;

    fn property(&self, property_name: &str) -> Option<Value>;

    /// Attach (or clear) a foreign relation row.
    fn set_relation(
        &mut self,
        property_name: &str,
        related: Option<EntityRef>,
    ) -> Result<(), CBeanError>;

    fn relation(&self, property_name: &str) -> Option<EntityRef>;
}

/// Creates empty entities of a table
pub trait EntityFactory {
    fn new_entity(&self, meta: &BeanMeta) -> Result<EntityRef, CBeanError>;
}

/// Entity holding its properties in maps, usable for any table
#[derive(Debug, Default)]
pub struct MapEntity {
    table_db_name: String,
    properties: BTreeMap<String, Value>,
    relations: BTreeMap<String, Option<EntityRef>>,
}

impl MapEntity {
    pub fn new(table_db_name: &str) -> Self {
        Self {
            table_db_name: table_db_name.to_string(),
            ..Default::default()
        }
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }
}

impl RowEntity for MapEntity {
    fn table_db_name(&self) -> &str {
        &self.table_db_name
    }

    fn set_property(&mut self, property_name: &str, value: Value) -> Result<(), CBeanError> {
        self.properties.insert(property_name.to_string(), value);
        Ok(())
    }

    fn property(&self, property_name: &str) -> Option<Value> {
        self.properties.get(property_name).cloned()
    }

    fn set_relation(
        &mut self,
        property_name: &str,
        related: Option<EntityRef>,
    ) -> Result<(), CBeanError> {
        self.relations.insert(property_name.to_string(), related);
        Ok(())
    }

    fn relation(&self, property_name: &str) -> Option<EntityRef> {
        self.relations.get(property_name).cloned().flatten()
    }
}

/// Builds a [`MapEntity`] for every table
#[derive(Debug, Clone, Copy, Default)]
pub struct MapEntityFactory;

impl EntityFactory for MapEntityFactory {
    fn new_entity(&self, meta: &BeanMeta) -> Result<EntityRef, CBeanError> {
        Ok(Rc::new(RefCell::new(MapEntity::new(&meta.table_db_name))))
    }
}
