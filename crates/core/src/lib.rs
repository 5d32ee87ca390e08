//! Filters for remote task lists
//!
//! Builds one executable filter per remote task list: a query selecting the
//! list's tasks, defaults that tag newly created tasks with the list, and a
//! routing payload for the view that renders it. The list catalog and the
//! sign-in state are read through the traits in [`catalog`].

pub mod catalog;
pub mod criteria;
pub mod defaults;
pub mod error;
pub mod factory;
pub mod filter;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;

pub use catalog::{ListCatalog, RemoteList, SessionGateway, SessionState, StaticCatalog};
pub use criteria::{
    Criterion, Direction, Field, Operand, Order, OrderExpr, Record, SqlType, Table, Value,
};
pub use defaults::{DefaultValues, build_defaults};
pub use error::{FilterError, FilterResult};
pub use factory::{filter_from_list, list_query};
pub use filter::{Extras, Filter, Icon, STORE_ID_EXTRA, ViewToken};
pub use query::{Join, JoinKind, QueryTemplate};
pub use service::FilterCatalogService;
pub use store::{MetadataRecord, TaskRecord, TaskStore};
