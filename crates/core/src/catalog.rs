//! Collaborators the filter service reads from
//!
//! The list catalog and the session are owned elsewhere (sync and login
//! live outside this crate). The service only sees them through the
//! [`ListCatalog`] and [`SessionGateway`] traits. [`StaticCatalog`] and
//! [`SessionState`] are plain snapshots implementing them.

use serde::{Deserialize, Serialize};

/// An external task list that gets turned into a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteList {
    /// Local primary key
    pub id: i64,
    /// Identifier of the list on the remote account
    pub remote_id: String,
    /// Display name
    pub name: String,
}

impl RemoteList {
    pub fn new(id: i64, remote_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            remote_id: remote_id.into(),
            name: name.into(),
        }
    }
}

/// Reports whether a remote account is signed in
pub trait SessionGateway {
    fn is_authenticated(&self) -> bool;
}

/// Enumerates known remote lists
pub trait ListCatalog {
    /// All lists, in catalog order
    fn all_lists(&self) -> Vec<RemoteList>;

    /// The list with local id `id`, if any
    fn list_by_id(&self, id: i64) -> Option<RemoteList>;
}

/// Snapshot of the sign-in state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn {
        account: String,
    },
    /// Signed in without a remote task account; nothing to sync against
    LocalOnly,
}

impl SessionGateway for SessionState {
    fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::SignedIn { .. })
    }
}

/// A fixed list catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    lists: Vec<RemoteList>,
}

impl StaticCatalog {
    pub fn new(lists: Vec<RemoteList>) -> Self {
        Self { lists }
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl ListCatalog for StaticCatalog {
    fn all_lists(&self) -> Vec<RemoteList> {
        self.lists.clone()
    }

    fn list_by_id(&self, id: i64) -> Option<RemoteList> {
        self.lists.iter().find(|l| l.id == id).cloned()
    }
}

impl<T: SessionGateway + ?Sized> SessionGateway for &T {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

impl<T: ListCatalog + ?Sized> ListCatalog for &T {
    fn all_lists(&self) -> Vec<RemoteList> {
        (**self).all_lists()
    }

    fn list_by_id(&self, id: i64) -> Option<RemoteList> {
        (**self).list_by_id(id)
    }
}
