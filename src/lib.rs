//! # Modrinth Client
//!
//! A typed async client for the Modrinth content API: faceted project
//! search, project/version/user resolution, and version file selection.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`gateway`]: The transport boundary ([`Gateway`] trait, HTTP and mock implementations)
//! - [`models`]: Typed records (Project, Version, User, SearchCriteria, ...)
//! - [`search`]: Facet compilation and the search operation
//! - [`files`]: File selection over a resolved version
//! - [`config`]: Configuration management
//! - [`utils`]: Verified downloads
//!
//! ## Example
//!
//! ```rust,no_run
//! use modrinth_client::{ClientConfig, ModrinthClient, SearchCriteria, SortIndex};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ModrinthClient::new(&ClientConfig::default())?;
//!
//! let criteria = SearchCriteria::new("minimap")
//!     .version("1.20.1")
//!     .project_type("mod")
//!     .index(SortIndex::Downloads)
//!     .limit(5);
//!
//! for project in client.search(&criteria).await?.hits {
//!     println!("{} ({} downloads)", project.title, project.downloads);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
pub mod files;
pub mod gateway;
pub mod models;
mod resolver;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use client::ModrinthClient;
pub use config::ClientConfig;
pub use error::{ModrinthError, Result};
pub use files::{FileSelection, FileSelector, LegacyFileSelector};
pub use gateway::{AuthToken, Gateway, HttpGateway, MockGateway};
pub use models::{
    HashAlgorithm, Project, SearchCriteria, SearchResult, SideSupport, SortIndex, User, Version,
    VersionFile,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
