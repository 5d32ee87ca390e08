//! Store layout for tasks and their metadata
//!
//! Tasks live in the `tasks` table. Per-task annotations live in the
//! `metadata` table as a kind marker (`key`) plus generic value columns,
//! which each metadata kind assigns its own meaning to.

use crate::criteria::{DELETED_COLUMN, Field, Table};

/// Id used for rows that have not been persisted yet
pub const NO_ID: i64 = 0;

/// The primary task store
pub mod tasks {
    use super::*;

    pub const TABLE: Table = Table::new("tasks");

    pub const ID: Field = TABLE.field("_id");
    pub const TITLE: Field = TABLE.field("title");
    pub const DELETED: Field = TABLE.field(DELETED_COLUMN);
}

/// Generic per-task annotation rows
pub mod metadata {
    use super::*;

    pub const TABLE: Table = Table::new("metadata");

    pub const ID: Field = TABLE.field("_id");
    /// Reference to the owning task
    pub const TASK: Field = TABLE.field("task");
    /// Kind marker
    pub const KEY: Field = TABLE.field("key");
    pub const DELETED: Field = TABLE.field(DELETED_COLUMN);

    pub const VALUE1: Field = TABLE.field("value1");
    pub const VALUE2: Field = TABLE.field("value2");
    pub const VALUE3: Field = TABLE.field("value3");
    pub const VALUE4: Field = TABLE.field("value4");
    pub const VALUE5: Field = TABLE.field("value5");
    pub const VALUE6: Field = TABLE.field("value6");
    pub const VALUE7: Field = TABLE.field("value7");
}

/// Meaning of the metadata value columns for remote-list membership
pub mod list_metadata {
    use super::*;

    /// Kind marker identifying remote-list metadata rows
    pub const METADATA_KEY: &str = "gtasks";

    /// Remote id of the task itself
    pub const REMOTE_ID: Field = metadata::VALUE1;
    /// Remote id of the list the task belongs to
    pub const LIST_ID: Field = metadata::VALUE2;
    pub const PARENT_TASK: Field = metadata::VALUE3;
    pub const INDENT: Field = metadata::VALUE4;
    /// Sort position within the list
    pub const ORDER: Field = metadata::VALUE5;
    pub const LAST_SYNC: Field = metadata::VALUE7;
}
