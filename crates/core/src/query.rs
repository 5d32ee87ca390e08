//! Query templates
//!
//! A [`QueryTemplate`] is the join, criterion and ordering that select a
//! filter's tasks. It is assembled with a builder and never changed after.

use crate::criteria::{Criterion, Order, Table};
use serde::{Serialize, Serializer};
use std::fmt;

/// How a joined table is combined with the primary store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Left,
    Inner,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Left => f.write_str("LEFT JOIN"),
            JoinKind::Inner => f.write_str("INNER JOIN"),
        }
    }
}

/// A join clause against another table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: Table,
    pub on: Criterion,
}

impl Join {
    /// Left outer join of `table` on `on`
    pub fn left(table: Table, on: Criterion) -> Self {
        Self {
            kind: JoinKind::Left,
            table,
            on,
        }
    }

    /// Inner join of `table` on `on`
    pub fn inner(table: Table, on: Criterion) -> Self {
        Self {
            kind: JoinKind::Inner,
            table,
            on,
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ON {}", self.kind, self.table, self.on)
    }
}

/// Joins, selection criterion and ordering for a filtered task listing
///
/// Clauses render in SQL order regardless of the order the builder methods
/// were called in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTemplate {
    joins: Vec<Join>,
    criterion: Option<Criterion>,
    order: Vec<Order>,
}

impl QueryTemplate {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a join clause
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Set the selection criterion, replacing any earlier one
    pub fn where_clause(mut self, criterion: Criterion) -> Self {
        self.criterion = Some(criterion);
        self
    }

    /// Append an ordering clause
    pub fn order_by(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn criterion(&self) -> Option<&Criterion> {
        self.criterion.as_ref()
    }

    pub fn order(&self) -> &[Order] {
        &self.order
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses: Vec<String> = self.joins.iter().map(|j| j.to_string()).collect();

        if let Some(criterion) = &self.criterion {
            clauses.push(format!("WHERE {}", criterion));
        }

        if !self.order.is_empty() {
            let orders: Vec<String> = self.order.iter().map(|o| o.to_string()).collect();
            clauses.push(format!("ORDER BY {}", orders.join(", ")));
        }

        f.write_str(&clauses.join(" "))
    }
}

impl Serialize for QueryTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
