//! Relation rows: assembling an entity graph out of flat joined rows.
//!
//! # Architecture
//!
//! - **Meta**: [`BeanMeta`], [`PropertyType`], [`RelationPropertyType`] describe the entities
//! - **Select Index**: [`SelectIndexMap`] tells which columns a query selected, per relation path
//! - **Key**: [`RelationKey`] identifies a related row within one traversal
//! - **Entity**: [`RowEntity`] and [`EntityFactory`] replace reflective bean creation
//! - **Cache**: [`RelationPropertyCache`] (per query shape) and [`RelationRowCache`] (identity map)
//! - **Creator**: [`RelationRowCreator`] walks the relations of one row recursively
//! - **Assembler**: [`BeanRowAssembler`] drives a whole result set
//!
//! Relation paths name a join route from the base table: the base is `""`,
//! its first relation `_0`, that relation's second relation `_0_1`.

pub mod key;
#[doc(inline)]
pub use key::RelationKey;

pub mod meta;
#[doc(inline)]
pub use meta::{relation_path_of, BeanMeta, PropertyType, RelationPropertyType};

pub mod select_index;
#[doc(inline)]
pub use select_index::SelectIndexMap;

pub mod source;
#[doc(inline)]
pub use source::RowSource;

pub mod entity;
#[doc(inline)]
pub use entity::{EntityFactory, EntityRef, MapEntity, MapEntityFactory, RowEntity};

pub mod cache;
#[doc(inline)]
pub use cache::{PropertyMapping, RelationPropertyCache, RelationRowCache};

pub mod resource;
#[doc(inline)]
pub use resource::RelationRowCreationResource;

pub mod creator;
#[doc(inline)]
pub use creator::RelationRowCreator;

pub mod assembler;
#[doc(inline)]
pub use assembler::BeanRowAssembler;

/// Options of one row-assembly session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationRowOption {
    /// Deepest relation level to create (1 = direct relations of the base row)
    pub limit_relation_nest_level: usize,
    /// Create relation rows even when all their columns are null
    pub create_dead_link: bool,
}

impl Default for RelationRowOption {
    fn default() -> Self {
        Self {
            limit_relation_nest_level: 8,
            create_dead_link: false,
        }
    }
}
