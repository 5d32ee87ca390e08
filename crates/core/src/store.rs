//! In-memory task store that executes query templates
//!
//! Holds a `tasks` table and a `metadata` table and runs a
//! [`QueryTemplate`] against them: one join against metadata, the
//! criterion, then the ordering. Creating a task through a filter's
//! [`DefaultValues`] resolves the deferred "now" token at that moment.

use crate::criteria::{Field, Record, Value};
use crate::defaults::DefaultValues;
use crate::error::{FilterError, FilterResult};
use crate::query::{JoinKind, QueryTemplate};
use crate::schema::{metadata, tasks};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// A row of the `tasks` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: i64,
    pub title: String,
    /// Deletion time in epoch milliseconds, 0 while live
    pub deleted: i64,
}

/// A row of the `metadata` table, keyed by column name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub id: i64,
    pub values: BTreeMap<String, Value>,
}

impl MetadataRecord {
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.values.get(field.column())
    }
}

/// A task joined with at most one metadata row
struct JoinedRow<'a> {
    task: &'a TaskRecord,
    metadata: Option<&'a MetadataRecord>,
}

impl Record for JoinedRow<'_> {
    fn value(&self, field: &Field) -> Option<Value> {
        if field.table() == tasks::TABLE {
            return match *field {
                f if f == tasks::ID => Some(Value::Integer(self.task.id)),
                f if f == tasks::TITLE => Some(Value::text(self.task.title.as_str())),
                f if f == tasks::DELETED => Some(Value::Integer(self.task.deleted)),
                _ => None,
            };
        }

        let row = self.metadata?;
        if field.table() != metadata::TABLE {
            return None;
        }
        if *field == metadata::ID {
            return Some(Value::Integer(row.id));
        }
        row.values.get(field.column()).cloned()
    }
}

/// Tasks and their metadata, held in memory
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<TaskRecord>,
    metadata: Vec<MetadataRecord>,
    next_task_id: i64,
    next_metadata_id: i64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a live task with no metadata, returning its id
    pub fn insert_task(&mut self, title: impl Into<String>) -> i64 {
        self.next_task_id += 1;
        let id = self.next_task_id;
        self.tasks.push(TaskRecord {
            id,
            title: title.into(),
            deleted: 0,
        });
        id
    }

    pub fn task(&self, id: i64) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Mark a task deleted at `now`. Returns false if there is no such task.
    pub fn soft_delete(&mut self, task_id: i64, now: DateTime<Utc>) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(task) => {
                task.deleted = now.timestamp_millis();
                true
            }
            None => false,
        }
    }

    /// Attach a metadata row to `task_id`, returning the row id
    ///
    /// The task reference is always set to `task_id`; a missing delete
    /// marker defaults to live.
    pub fn attach_metadata(&mut self, task_id: i64, mut values: BTreeMap<String, Value>) -> i64 {
        self.next_metadata_id += 1;
        let id = self.next_metadata_id;
        values.insert(metadata::TASK.column().to_string(), Value::Integer(task_id));
        values
            .entry(metadata::DELETED.column().to_string())
            .or_insert(Value::Integer(0));
        self.metadata.push(MetadataRecord { id, values });
        id
    }

    /// Metadata rows owned by `task_id`
    pub fn metadata_for(&self, task_id: i64) -> Vec<&MetadataRecord> {
        self.metadata
            .iter()
            .filter(|m| m.get(metadata::TASK) == Some(&Value::Integer(task_id)))
            .collect()
    }

    /// Create a task inside a filter, applying its defaults as of `now`
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        defaults: &DefaultValues,
        now: DateTime<Utc>,
    ) -> i64 {
        let id = self.insert_task(title);
        self.attach_metadata(id, defaults.resolve(now));
        debug!(task_id = id, "created task with filter defaults");
        id
    }

    /// Run `query`, returning matching tasks in query order
    ///
    /// A task joined to several metadata rows appears once per matching row,
    /// as it would from SQL.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::UnknownTable` for a join against anything but
    /// metadata, and `FilterError::UnsupportedQuery` for more than one join.
    pub fn select(&self, query: &QueryTemplate) -> FilterResult<Vec<&TaskRecord>> {
        let join = match query.joins() {
            [] => None,
            [join] => Some(join),
            _ => {
                return Err(FilterError::UnsupportedQuery {
                    reason: "more than one join",
                });
            }
        };
        if let Some(join) = join
            && join.table != metadata::TABLE
        {
            return Err(FilterError::UnknownTable {
                table: join.table.name().to_string(),
            });
        }

        let mut rows: Vec<JoinedRow<'_>> = Vec::new();
        for task in &self.tasks {
            let Some(join) = join else {
                rows.push(JoinedRow {
                    task,
                    metadata: None,
                });
                continue;
            };

            let before = rows.len();
            rows.extend(
                self.metadata
                    .iter()
                    .map(|m| JoinedRow {
                        task,
                        metadata: Some(m),
                    })
                    .filter(|row| join.on.matches(row)),
            );
            if rows.len() == before && join.kind == JoinKind::Left {
                rows.push(JoinedRow {
                    task,
                    metadata: None,
                });
            }
        }

        if let Some(criterion) = query.criterion() {
            rows.retain(|row| criterion.matches(row));
        }

        rows.sort_by(|a, b| {
            query
                .order()
                .iter()
                .map(|order| order.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        Ok(rows.into_iter().map(|row| row.task).collect())
    }
}
