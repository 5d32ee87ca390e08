//! Default values for tasks created inside a filter
//!
//! A filter carries the metadata a new task needs to show up in it. The
//! values are built from the empty remote-list metadata template with the
//! list linkage and the sort position layered on top.

use crate::catalog::RemoteList;
use crate::criteria::{Field, Value};
use crate::schema::{NO_ID, list_metadata, metadata};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Column name to literal value, applied to a newly created task's metadata
///
/// Every operation consumes the mapping and returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DefaultValues(BTreeMap<String, Value>);

impl DefaultValues {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata of a remote-list row that has not been saved yet
    pub fn empty_list_metadata() -> Self {
        Self::new()
            .with(metadata::KEY, Value::text(list_metadata::METADATA_KEY))
            .with(metadata::TASK, Value::Integer(NO_ID))
            .with(list_metadata::REMOTE_ID, Value::text(""))
            .with(list_metadata::LIST_ID, Value::text(""))
            .with(list_metadata::PARENT_TASK, Value::Integer(0))
            .with(list_metadata::INDENT, Value::Integer(0))
            .with(list_metadata::ORDER, Value::Integer(0))
            .with(list_metadata::LAST_SYNC, Value::Integer(0))
    }

    /// Set `field` to `value`
    pub fn with(mut self, field: Field, value: Value) -> Self {
        self.0.insert(field.column().to_string(), value);
        self
    }

    /// Remove `field`
    pub fn without(mut self, field: Field) -> Self {
        self.0.remove(field.column());
        self
    }

    /// Layer `overrides` on top of these values
    pub fn merged(mut self, overrides: DefaultValues) -> Self {
        self.0.extend(overrides.0);
        self
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.column())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(field.column())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Concrete values for a task created at `now`
    ///
    /// The deferred [`Value::Now`] token becomes `now` in epoch milliseconds.
    pub fn resolve(&self, now: DateTime<Utc>) -> BTreeMap<String, Value> {
        let millis = now.timestamp_millis();
        self.0
            .iter()
            .map(|(column, value)| {
                let value = match value {
                    Value::Now => Value::Integer(millis),
                    other => other.clone(),
                };
                (column.clone(), value)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a DefaultValues {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Defaults for a task created while `list`'s filter is active
///
/// The task reference is dropped after the merge, so the template never
/// points at a task.
pub fn build_defaults(list: &RemoteList) -> DefaultValues {
    let overrides = DefaultValues::new()
        .with(list_metadata::LIST_ID, Value::text(list.remote_id.as_str()))
        .with(list_metadata::ORDER, Value::Now);

    DefaultValues::empty_list_metadata()
        .merged(overrides)
        .without(metadata::TASK)
}
