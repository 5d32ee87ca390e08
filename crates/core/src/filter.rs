//! Filters exposed to the UI layer
//!
//! A [`Filter`] bundles a display name, the query selecting its tasks, the
//! defaults for tasks created inside it, and an opaque routing payload the
//! UI uses to open the matching view.

use crate::defaults::DefaultValues;
use crate::query::QueryTemplate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Extras key carrying the local id of the list a filter was built from
pub const STORE_ID_EXTRA: &str = "store_id";

/// Icon shown next to a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Cloud,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Cloud => "cloud",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies which view renders a filter; interpreted only by the UI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ViewToken(String);

impl ViewToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The view for a single remote task list
    pub fn remote_list() -> Self {
        Self::new("remote_list")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque payload handed to the view alongside the filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Extras(BTreeMap<String, i64>);

impl Extras {
    /// Extras pointing the view back at list `list_id`
    pub fn for_list(list_id: i64) -> Self {
        let mut extras = BTreeMap::new();
        extras.insert(STORE_ID_EXTRA.to_string(), list_id);
        Self(extras)
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }
}

/// A named, executable task filter
///
/// Built fresh for every request; two filters built from the same list
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    /// Display name
    pub name: String,
    /// Join, criterion and ordering selecting the filter's tasks
    pub query: QueryTemplate,
    /// Values applied to tasks created while the filter is active
    pub defaults: DefaultValues,
    pub icon: Icon,
    /// View that renders this filter
    pub view: ViewToken,
    pub extras: Extras,
}

impl Filter {
    /// The query rendered as SQL clauses
    pub fn sql(&self) -> String {
        self.query.to_string()
    }

    /// Local id of the list this filter was built from
    pub fn list_id(&self) -> Option<i64> {
        self.extras.get(STORE_ID_EXTRA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_as_str() {
        assert_eq!(Icon::Cloud.as_str(), "cloud");
        assert_eq!(Icon::Cloud.to_string(), "cloud");
    }

    #[test]
    fn test_view_token() {
        let token = ViewToken::remote_list();
        assert_eq!(token.as_str(), "remote_list");
        assert_eq!(token, ViewToken::new("remote_list"));
        assert_ne!(token, ViewToken::new("inbox"));
    }

    #[test]
    fn test_extras_for_list() {
        let extras = Extras::for_list(12);
        assert_eq!(extras.get(STORE_ID_EXTRA), Some(12));
        assert_eq!(extras.get("other"), None);
    }

    #[test]
    fn test_filter_list_id_and_sql() {
        let filter = Filter {
            name: "Inbox".to_string(),
            query: QueryTemplate::new(),
            defaults: DefaultValues::new(),
            icon: Icon::Cloud,
            view: ViewToken::remote_list(),
            extras: Extras::for_list(5),
        };
        assert_eq!(filter.list_id(), Some(5));
        assert_eq!(filter.sql(), "");

        let without_extras = Filter {
            extras: Extras::default(),
            ..filter
        };
        assert_eq!(without_extras.list_id(), None);
    }

    #[test]
    fn test_serialize_filter() {
        let filter = Filter {
            name: "Inbox".to_string(),
            query: QueryTemplate::new(),
            defaults: DefaultValues::new(),
            icon: Icon::Cloud,
            view: ViewToken::remote_list(),
            extras: Extras::for_list(5),
        };
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["name"], "Inbox");
        assert_eq!(json["icon"], "cloud");
        assert_eq!(json["view"], "remote_list");
        assert_eq!(json["extras"]["store_id"], 5);
    }
}
