//! Entity module - SeaORM entity definitions for the database.
//! The tracker persists everything as named JSON snapshots, so a single
//! table is enough.

pub mod snapshot;

pub use snapshot::{Column as SnapshotColumn, Entity as Snapshot, Model as SnapshotModel};
