//! CLI commands for tlf
//!
//! This module contains all subcommand implementations for the tlf CLI.

pub mod defaults;
pub mod filters;
pub mod show;

pub use defaults::DefaultsCommand;
pub use filters::FiltersCommand;
pub use show::ShowCommand;

use crate::catalog::CatalogError;
use clap::Subcommand;
use tasklists_core::{FilterCatalogService, ListCatalog, SessionGateway};

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the filter for every remote list
    Filters(FiltersCommand),
    /// Show one list's filter in detail
    Show(ShowCommand),
    /// Show the values a task created in a list's filter would get now
    Defaults(DefaultsCommand),
}

impl Command {
    /// Execute the command against the given filter service.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the command execution fails.
    pub fn execute<S: SessionGateway, C: ListCatalog>(
        &self,
        service: &FilterCatalogService<S, C>,
    ) -> Result<String, CatalogError> {
        match self {
            Command::Filters(cmd) => cmd.execute(service),
            Command::Show(cmd) => cmd.execute(service),
            Command::Defaults(cmd) => cmd.execute(service),
        }
    }
}
