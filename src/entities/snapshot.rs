//! Snapshot entity - one persisted JSON blob per `(owner, name)` pair.
//! Each Discord user owns a full set of tracker snapshots
//! (`aahar_meals`, `aahar_water`, ...), overwritten on every save.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot database model - stores one named JSON document
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "snapshots")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Owner of the snapshot (Discord user ID)
    pub owner_id: String,
    /// Snapshot name (e.g., `"aahar_water"`)
    pub name: String,
    /// Serialized JSON document
    pub value: String,
    /// When this snapshot was last written
    pub updated_at: DateTime,
}

/// `Snapshot` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
