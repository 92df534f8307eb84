pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command, LocalStorage};

pub use adapters::opendata::OpenDataClient;
pub use config::ExplorerConfig;
pub use core::{
    explorer::{ListFilter, VoteExplorer},
    export::{CatalogueExporter, OutputFormat},
};
pub use domain::manifest::SpaceManifest;
pub use domain::model::{VoteResource, VotingSummary};
pub use utils::error::{ExplorerError, Result};
