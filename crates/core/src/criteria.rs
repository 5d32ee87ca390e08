//! Criteria algebra for filter queries
//!
//! Typed table and field references, literal values, boolean criteria and
//! ordering expressions. Every expression renders to SQL through `Display`
//! and can be evaluated in memory against a [`Record`].

use crate::error::{FilterError, FilterResult};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Column holding the soft-delete timestamp (0 while the row is live)
pub const DELETED_COLUMN: &str = "deleted";

/// SQL spelling of the deferred "current time" token
pub const NOW_TOKEN: &str = "NOW()";

/// A named store that fields belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Table {
    name: &'static str,
}

impl Table {
    /// Create a table reference
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The table name as used in SQL
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reference a column of this table
    pub const fn field(self, column: &'static str) -> Field {
        Field::new(self, column)
    }

    fn validate(&self) -> FilterResult<()> {
        if self.name.is_empty() {
            return Err(FilterError::EmptyName { what: "table" });
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A column of a specific table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    table: Table,
    column: &'static str,
}

impl Field {
    /// Create a field reference
    pub const fn new(table: Table, column: &'static str) -> Self {
        Self { table, column }
    }

    /// The table this field belongs to
    pub fn table(&self) -> Table {
        self.table
    }

    /// The bare column name
    pub fn column(&self) -> &'static str {
        self.column
    }

    fn validate(&self) -> FilterResult<()> {
        self.table.validate()?;
        if self.column.is_empty() {
            return Err(FilterError::EmptyName { what: "column" });
        }
        Ok(())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// A literal value stored in, or compared against, a column
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Text(String),
    Integer(i64),
    /// Evaluates to the current time when a row is created, not before
    Now,
}

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Whether this is the deferred "current time" token
    pub fn is_now(&self) -> bool {
        matches!(self, Value::Now)
    }

    /// Integer cast with SQLite semantics: non-numeric text becomes 0
    fn cast_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(s) => Some(s.trim().parse().unwrap_or(0)),
            Value::Now => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Integer(_) => 0,
            Value::Text(_) => 1,
            Value::Now => 2,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "'{}'", escape_sql(s)),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Now => f.write_str(NOW_TOKEN),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Text(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Now => serializer.serialize_str(NOW_TOKEN),
        }
    }
}

fn escape_sql(s: &str) -> String {
    s.replace('\'', "''")
}

/// Order values the way SQLite does: NULL, then integers, then text
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Integer(x)), Some(Value::Integer(y))) => x.cmp(y),
        (Some(Value::Text(x)), Some(Value::Text(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.rank().cmp(&y.rank()),
    }
}

/// A row that criteria and orderings can be evaluated against
pub trait Record {
    /// The value of `field` in this row, or `None` for SQL NULL
    fn value(&self, field: &Field) -> Option<Value>;
}

/// Right-hand side of an equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Value(Value),
    Field(Field),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(v) => write!(f, "{}", v),
            Operand::Field(field) => write!(f, "{}", field),
        }
    }
}

/// A composable boolean predicate
///
/// Conjunctions keep the order their members were given in, so the rendered
/// SQL is stable for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Eq { field: Field, operand: Operand },
    HasKey { key_field: Field, key: String },
    NotDeleted { field: Field },
    And(Vec<Criterion>),
}

impl Criterion {
    /// `field = value`
    pub fn equals(field: Field, value: impl Into<Value>) -> FilterResult<Self> {
        field.validate()?;
        Ok(Criterion::Eq {
            field,
            operand: Operand::Value(value.into()),
        })
    }

    /// `left = right`, comparing two columns
    pub fn equals_field(left: Field, right: Field) -> FilterResult<Self> {
        left.validate()?;
        right.validate()?;
        Ok(Criterion::Eq {
            field: left,
            operand: Operand::Field(right),
        })
    }

    /// Rows of `table` whose `key_column` marks them as kind `key`
    pub fn has_key(
        table: Table,
        key_column: &'static str,
        key: impl Into<String>,
    ) -> FilterResult<Self> {
        let key_field = Field::new(table, key_column);
        key_field.validate()?;
        let key = key.into();
        if key.is_empty() {
            return Err(FilterError::EmptyName {
                what: "metadata key",
            });
        }
        Ok(Criterion::HasKey { key_field, key })
    }

    /// Rows of `table` that have not been soft-deleted
    pub fn not_deleted(table: Table) -> FilterResult<Self> {
        let field = Field::new(table, DELETED_COLUMN);
        field.validate()?;
        Ok(Criterion::NotDeleted { field })
    }

    /// Conjunction of `criteria`, in the order given
    ///
    /// # Errors
    ///
    /// Returns `FilterError::EmptyConjunction` if `criteria` is empty.
    pub fn and(criteria: impl IntoIterator<Item = Criterion>) -> FilterResult<Self> {
        let criteria: Vec<Criterion> = criteria.into_iter().collect();
        if criteria.is_empty() {
            return Err(FilterError::EmptyConjunction);
        }
        Ok(Criterion::And(criteria))
    }

    /// Evaluate against a row using SQL NULL semantics
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Criterion::Eq {
                field,
                operand: Operand::Value(value),
            } => record.value(field).as_ref() == Some(value),
            Criterion::Eq {
                field,
                operand: Operand::Field(other),
            } => match (record.value(field), record.value(other)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            Criterion::HasKey { key_field, key } => {
                matches!(record.value(key_field), Some(Value::Text(k)) if k == *key)
            }
            Criterion::NotDeleted { field } => {
                matches!(record.value(field), Some(Value::Integer(0)))
            }
            Criterion::And(criteria) => criteria.iter().all(|c| c.matches(record)),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Eq { field, operand } => write!(f, "({}={})", field, operand),
            Criterion::HasKey { key_field, key } => {
                write!(f, "({}='{}')", key_field, escape_sql(key))
            }
            Criterion::NotDeleted { field } => write!(f, "({}=0)", field),
            Criterion::And(criteria) => {
                let parts: Vec<String> = criteria.iter().map(|c| c.to_string()).collect();
                write!(f, "({})", parts.join(" AND "))
            }
        }
    }
}

/// Target type of a cast in an ordering expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Integer => f.write_str("INTEGER"),
        }
    }
}

/// The expression an ordering sorts by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderExpr {
    Field(Field),
    Cast { field: Field, ty: SqlType },
}

impl OrderExpr {
    fn key<R: Record>(&self, record: &R) -> Option<Value> {
        match self {
            OrderExpr::Field(field) => record.value(field),
            OrderExpr::Cast {
                field,
                ty: SqlType::Integer,
            } => record
                .value(field)
                .and_then(|v| v.cast_integer())
                .map(Value::Integer),
        }
    }
}

impl fmt::Display for OrderExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderExpr::Field(field) => write!(f, "{}", field),
            OrderExpr::Cast { field, ty } => write!(f, "CAST({} AS {})", field, ty),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

/// An ordering clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    expr: OrderExpr,
    direction: Direction,
}

impl Order {
    /// Ascending by `expr`
    pub fn asc(expr: OrderExpr) -> Self {
        Self {
            expr,
            direction: Direction::Asc,
        }
    }

    /// Descending by `expr`
    pub fn desc(expr: OrderExpr) -> Self {
        Self {
            expr,
            direction: Direction::Desc,
        }
    }

    /// Ascending by `field` cast to `ty`
    pub fn ascending_by_cast(field: Field, ty: SqlType) -> FilterResult<Self> {
        field.validate()?;
        Ok(Self::asc(OrderExpr::Cast { field, ty }))
    }

    pub fn expr(&self) -> &OrderExpr {
        &self.expr
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Compare two rows under this ordering (NULL sorts first when ascending)
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        let ordering = compare_values(self.expr.key(a).as_ref(), self.expr.key(b).as_ref());
        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.expr, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ITEMS: Table = Table::new("items");
    const NAME: Field = ITEMS.field("name");
    const RANK: Field = ITEMS.field("rank");
    const KIND: Field = ITEMS.field("kind");

    /// Simple record backed by a column map
    struct Row(HashMap<&'static str, Value>);

    impl Row {
        fn new(values: &[(&'static str, Value)]) -> Self {
            Row(values.iter().cloned().collect())
        }
    }

    impl Record for Row {
        fn value(&self, field: &Field) -> Option<Value> {
            self.0.get(field.column()).cloned()
        }
    }

    // ========================================
    // Construction tests
    // ========================================

    #[test]
    fn test_eq_rejects_empty_column() {
        let result = Criterion::equals(ITEMS.field(""), "x");
        assert_eq!(result, Err(FilterError::EmptyName { what: "column" }));
    }

    #[test]
    fn test_eq_rejects_empty_table() {
        let result = Criterion::equals(Table::new("").field("name"), "x");
        assert_eq!(result, Err(FilterError::EmptyName { what: "table" }));
    }

    #[test]
    fn test_has_key_rejects_empty_key() {
        let result = Criterion::has_key(ITEMS, "kind", "");
        assert_eq!(
            result,
            Err(FilterError::EmptyName {
                what: "metadata key"
            })
        );
    }

    #[test]
    fn test_and_rejects_empty_sequence() {
        let result = Criterion::and(Vec::new());
        assert_eq!(result, Err(FilterError::EmptyConjunction));
    }

    #[test]
    fn test_and_preserves_order() {
        let a = Criterion::equals(NAME, "a").unwrap();
        let b = Criterion::not_deleted(ITEMS).unwrap();
        let c = Criterion::has_key(ITEMS, "kind", "k").unwrap();

        let and = Criterion::and([a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(and, Criterion::And(vec![a.clone(), b.clone(), c.clone()]));

        let reversed = Criterion::and([c, b, a]).unwrap();
        assert_ne!(and, reversed);
        assert_ne!(and.to_string(), reversed.to_string());
    }

    #[test]
    fn test_ascending_by_cast_rejects_empty_column() {
        let result = Order::ascending_by_cast(ITEMS.field(""), SqlType::Integer);
        assert_eq!(result, Err(FilterError::EmptyName { what: "column" }));
    }

    #[test]
    fn test_constructors_are_deterministic() {
        let first = Criterion::equals(NAME, "groceries").unwrap();
        let second = Criterion::equals(NAME, "groceries").unwrap();
        assert_eq!(first, second);
    }

    // ========================================
    // SQL rendering tests
    // ========================================

    #[test]
    fn test_render_eq_text() {
        let c = Criterion::equals(NAME, "abc").unwrap();
        assert_eq!(c.to_string(), "(items.name='abc')");
    }

    #[test]
    fn test_render_eq_escapes_quotes() {
        let c = Criterion::equals(NAME, "it's").unwrap();
        assert_eq!(c.to_string(), "(items.name='it''s')");
    }

    #[test]
    fn test_render_eq_integer_and_field() {
        let c = Criterion::equals(RANK, 5_i64).unwrap();
        assert_eq!(c.to_string(), "(items.rank=5)");

        let c = Criterion::equals_field(RANK, Table::new("other").field("rank")).unwrap();
        assert_eq!(c.to_string(), "(items.rank=other.rank)");
    }

    #[test]
    fn test_render_has_key_and_not_deleted() {
        let c = Criterion::has_key(ITEMS, "kind", "gtasks").unwrap();
        assert_eq!(c.to_string(), "(items.kind='gtasks')");

        let c = Criterion::not_deleted(ITEMS).unwrap();
        assert_eq!(c.to_string(), "(items.deleted=0)");
    }

    #[test]
    fn test_render_and() {
        let c = Criterion::and([
            Criterion::has_key(ITEMS, "kind", "k").unwrap(),
            Criterion::not_deleted(ITEMS).unwrap(),
        ])
        .unwrap();
        assert_eq!(c.to_string(), "((items.kind='k') AND (items.deleted=0))");
    }

    #[test]
    fn test_render_order() {
        let o = Order::ascending_by_cast(RANK, SqlType::Integer).unwrap();
        assert_eq!(o.to_string(), "CAST(items.rank AS INTEGER) ASC");

        let o = Order::desc(OrderExpr::Field(NAME));
        assert_eq!(o.to_string(), "items.name DESC");
    }

    #[test]
    fn test_value_display_and_serialize() {
        assert_eq!(Value::Now.to_string(), "NOW()");
        assert_eq!(Value::Integer(3).to_string(), "3");
        assert_eq!(serde_json::to_string(&Value::Now).unwrap(), "\"NOW()\"");
        assert_eq!(serde_json::to_string(&Value::Integer(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Value::text("a")).unwrap(), "\"a\"");
    }

    // ========================================
    // Evaluation tests
    // ========================================

    #[test]
    fn test_matches_eq() {
        let c = Criterion::equals(NAME, "a").unwrap();
        assert!(c.matches(&Row::new(&[("name", Value::text("a"))])));
        assert!(!c.matches(&Row::new(&[("name", Value::text("b"))])));
        assert!(!c.matches(&Row::new(&[])), "NULL never equals a value");
    }

    #[test]
    fn test_matches_eq_field_null() {
        let c = Criterion::equals_field(NAME, KIND).unwrap();
        assert!(c.matches(&Row::new(&[
            ("name", Value::text("x")),
            ("kind", Value::text("x")),
        ])));
        assert!(!c.matches(&Row::new(&[("name", Value::text("x"))])));
    }

    #[test]
    fn test_matches_has_key() {
        let c = Criterion::has_key(ITEMS, "kind", "k").unwrap();
        assert!(c.matches(&Row::new(&[("kind", Value::text("k"))])));
        assert!(!c.matches(&Row::new(&[("kind", Value::text("other"))])));
        assert!(!c.matches(&Row::new(&[])));
    }

    #[test]
    fn test_matches_not_deleted() {
        let c = Criterion::not_deleted(ITEMS).unwrap();
        assert!(c.matches(&Row::new(&[("deleted", Value::Integer(0))])));
        assert!(!c.matches(&Row::new(&[("deleted", Value::Integer(1700))])));
        assert!(!c.matches(&Row::new(&[])));
    }

    #[test]
    fn test_matches_and_requires_all() {
        let c = Criterion::and([
            Criterion::equals(NAME, "a").unwrap(),
            Criterion::not_deleted(ITEMS).unwrap(),
        ])
        .unwrap();
        assert!(c.matches(&Row::new(&[
            ("name", Value::text("a")),
            ("deleted", Value::Integer(0)),
        ])));
        assert!(!c.matches(&Row::new(&[
            ("name", Value::text("a")),
            ("deleted", Value::Integer(9)),
        ])));
    }

    #[test]
    fn test_order_compare_casts_text() {
        let o = Order::ascending_by_cast(RANK, SqlType::Integer).unwrap();
        let ten = Row::new(&[("rank", Value::text("10"))]);
        let nine = Row::new(&[("rank", Value::text("9"))]);
        // Lexically "10" < "9"; the cast compares numerically
        assert_eq!(o.compare(&nine, &ten), Ordering::Less);
    }

    #[test]
    fn test_order_compare_nulls_first() {
        let o = Order::ascending_by_cast(RANK, SqlType::Integer).unwrap();
        let null = Row::new(&[]);
        let one = Row::new(&[("rank", Value::Integer(1))]);
        assert_eq!(o.compare(&null, &one), Ordering::Less);

        let o = Order::desc(OrderExpr::Cast {
            field: RANK,
            ty: SqlType::Integer,
        });
        assert_eq!(o.compare(&null, &one), Ordering::Greater);
    }

    #[test]
    fn test_order_compare_non_numeric_text_is_zero() {
        let o = Order::ascending_by_cast(RANK, SqlType::Integer).unwrap();
        let junk = Row::new(&[("rank", Value::text("abc"))]);
        let zero = Row::new(&[("rank", Value::Integer(0))]);
        assert_eq!(o.compare(&junk, &zero), Ordering::Equal);
    }
}
