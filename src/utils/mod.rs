//! Utility modules supporting client operations.
//!
//! - [`download_file`]: Download a version file and verify it against its published sha512
//! - [`verify_sha512`]: Check bytes against a hex-encoded sha512 digest
//! - [`DownloadError`]: Errors that can occur during a download
//!
//! # Downloading the primary file of a version
//!
//! ```rust,no_run
//! use modrinth_client::{ClientConfig, FileSelection, FileSelector, HttpGateway, ModrinthClient};
//! use modrinth_client::utils::download_file;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::default();
//! let gateway = HttpGateway::new(&config.api)?;
//! let client = ModrinthClient::with_gateway(Arc::new(gateway.clone()));
//!
//! let project = client.resolve_project("sodium").await?;
//! let version = client.latest_version(&project).await?;
//! if let Some(file) = version.selected(FileSelection::PRIMARY).first() {
//!     download_file(gateway.client(), file, Path::new("./mods")).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod download;

pub use download::{download_file, verify_sha512, DownloadError};
