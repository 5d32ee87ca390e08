//! Show command for a single list filter
//!
//! Implements the `tlf show` command to display one filter with its query
//! and defaults.

use crate::catalog::CatalogError;
use crate::output::format_filter_details;
use clap::Args;
use tasklists_core::{FilterCatalogService, ListCatalog, SessionGateway};

/// Show one list's filter in detail
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Local id of the list
    #[arg(required = true)]
    pub id: i64,

    /// Print the filter as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    ///
    /// An unknown id, or a signed-out session, prints a notice rather than
    /// failing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the filter cannot be built or rendered.
    pub fn execute<S: SessionGateway, C: ListCatalog>(
        &self,
        service: &FilterCatalogService<S, C>,
    ) -> Result<String, CatalogError> {
        let Some(filter) = service.get_filter(self.id)? else {
            if self.json {
                return Ok("null".to_string());
            }
            return Ok(format!("No filter for list {}.", self.id));
        };

        if self.json {
            return serde_json::to_string_pretty(&filter).map_err(CatalogError::Render);
        }

        Ok(format_filter_details(&filter))
    }
}
