//! Builds the filter for a single remote list

use crate::catalog::RemoteList;
use crate::criteria::{Criterion, Order, SqlType};
use crate::defaults::build_defaults;
use crate::error::FilterResult;
use crate::filter::{Extras, Filter, Icon, ViewToken};
use crate::query::{Join, QueryTemplate};
use crate::schema::{list_metadata, metadata, tasks};
use tracing::trace;

/// Query selecting the live tasks that belong to `list`, in list order
///
/// Metadata is left-joined onto tasks by task id. The criterion checks the
/// metadata kind, then the task's soft-delete marker, then the list id.
pub fn list_query(list: &RemoteList) -> FilterResult<QueryTemplate> {
    let criterion = Criterion::and([
        Criterion::has_key(
            metadata::TABLE,
            metadata::KEY.column(),
            list_metadata::METADATA_KEY,
        )?,
        Criterion::not_deleted(tasks::TABLE)?,
        Criterion::equals(list_metadata::LIST_ID, list.remote_id.as_str())?,
    ])?;

    let join = Join::left(
        metadata::TABLE,
        Criterion::equals_field(tasks::ID, metadata::TASK)?,
    );

    Ok(QueryTemplate::new()
        .join(join)
        .where_clause(criterion)
        .order_by(Order::ascending_by_cast(
            list_metadata::ORDER,
            SqlType::Integer,
        )?))
}

/// The filter showing `list`'s tasks
///
/// # Errors
///
/// Returns a `FilterError` only if one of the query expressions is
/// malformed, which indicates a broken schema constant rather than bad input.
pub fn filter_from_list(list: &RemoteList) -> FilterResult<Filter> {
    let query = list_query(list)?;
    trace!(list_id = list.id, remote_id = %list.remote_id, "built list query");

    Ok(Filter {
        name: list.name.clone(),
        query,
        defaults: build_defaults(list),
        icon: Icon::Cloud,
        view: ViewToken::remote_list(),
        extras: Extras::for_list(list.id),
    })
}
