//! Defaults command for previewing new-task values
//!
//! Implements the `tlf defaults` command. Shows the metadata a task created
//! inside a list's filter would receive if it were created now.

use crate::catalog::CatalogError;
use crate::output::format_defaults;
use chrono::{DateTime, Utc};
use clap::Args;
use tasklists_core::{FilterCatalogService, ListCatalog, SessionGateway};

/// Show the values a task created in a list's filter would get now
#[derive(Debug, Args)]
pub struct DefaultsCommand {
    /// Local id of the list
    #[arg(required = true)]
    pub id: i64,
}

impl DefaultsCommand {
    /// Execute the defaults command at the current time.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the filter cannot be built.
    pub fn execute<S: SessionGateway, C: ListCatalog>(
        &self,
        service: &FilterCatalogService<S, C>,
    ) -> Result<String, CatalogError> {
        self.execute_at(service, Utc::now())
    }

    /// Execute the defaults command as if a task were created at `now`.
    fn execute_at<S: SessionGateway, C: ListCatalog>(
        &self,
        service: &FilterCatalogService<S, C>,
        now: DateTime<Utc>,
    ) -> Result<String, CatalogError> {
        match service.get_filter(self.id)? {
            Some(filter) => Ok(format_defaults(&filter.defaults.resolve(now))),
            None => Ok(format!("No filter for list {}.", self.id)),
        }
    }
}
