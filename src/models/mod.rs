//! Typed records for projects, versions, users and searches.

pub(crate) mod project;
mod search;
mod user;
pub(crate) mod version;

pub use project::{
    DependencyVersion, DonationUrl, GalleryImage, License, Project, ProjectDependencies,
    SideSupport,
};
pub(crate) use search::SearchPayload;
pub use search::{SearchCriteria, SearchResult, SortIndex};
pub use user::User;
pub(crate) use version::VersionPayload;
pub use version::{FileHashes, HashAlgorithm, Version, VersionDependency, VersionFile};
