//! Filters command for listing every list filter
//!
//! Implements the `tlf filters` command.

use crate::catalog::CatalogError;
use crate::output::format_filter_table;
use clap::Args;
use tasklists_core::{FilterCatalogService, ListCatalog, SessionGateway};

/// List the filter for every remote list
#[derive(Debug, Args)]
pub struct FiltersCommand {
    /// Print filters as JSON
    #[arg(long)]
    pub json: bool,
}

impl FiltersCommand {
    /// Execute the filters command.
    ///
    /// Prints nothing but a notice when signed out or when no lists exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a filter cannot be built or rendered.
    pub fn execute<S: SessionGateway, C: ListCatalog>(
        &self,
        service: &FilterCatalogService<S, C>,
    ) -> Result<String, CatalogError> {
        let filters = service.list_filters()?;

        if self.json {
            return serde_json::to_string_pretty(&filters).map_err(CatalogError::Render);
        }

        Ok(format_filter_table(&filters))
    }
}
