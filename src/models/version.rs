//! Version records and the files they distribute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ModrinthError;
use crate::models::Project;

/// Hash algorithms the API publishes for every file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha512,
}

impl HashAlgorithm {
    /// Get the wire name of this algorithm
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha512 => "sha512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ModrinthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha512" => Ok(HashAlgorithm::Sha512),
            other => Err(ModrinthError::InvalidArgument(format!(
                "hash must be either sha1 or sha512, got '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content hashes of a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHashes {
    pub sha1: String,
    pub sha512: String,
}

impl FileHashes {
    /// Get the hash under `algorithm`
    pub fn get(&self, algorithm: HashAlgorithm) -> &str {
        match algorithm {
            HashAlgorithm::Sha1 => &self.sha1,
            HashAlgorithm::Sha512 => &self.sha512,
        }
    }
}

/// A distributable file of a version.
///
/// Only produced as part of a [`Version`]'s file list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct VersionFile {
    pub hashes: FileHashes,
    pub url: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub file_type: Option<String>,
}

/// A dependency declared by a version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionDependency {
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    pub dependency_type: String,
}

/// A resolved version of a project.
///
/// Constructed only by [`crate::ModrinthClient::resolve_version`], which
/// checks the identifier against the owning project's version list first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Version {
    pub id: String,
    pub project_id: String,
    /// Slug of the project this version was resolved against
    pub project_slug: String,
    pub author_id: String,
    pub name: String,
    pub version_number: String,
    pub changelog: Option<String>,
    pub changelog_url: Option<String>,
    pub date_published: Option<DateTime<Utc>>,
    pub downloads: u64,
    pub version_type: String,
    pub featured: bool,
    pub game_versions: Vec<String>,
    pub loaders: Vec<String>,
    pub dependencies: Vec<VersionDependency>,
    pub files: Vec<VersionFile>,
}

/// Version body as the API returns it
#[derive(Debug, Deserialize)]
pub(crate) struct VersionPayload {
    id: String,
    project_id: String,
    #[serde(default)]
    author_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version_number: String,
    #[serde(default)]
    changelog: Option<String>,
    #[serde(default)]
    changelog_url: Option<String>,
    #[serde(default)]
    date_published: Option<DateTime<Utc>>,
    #[serde(default)]
    downloads: u64,
    #[serde(default)]
    version_type: String,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    game_versions: Vec<String>,
    #[serde(default)]
    loaders: Vec<String>,
    #[serde(default)]
    dependencies: Vec<VersionDependency>,
    #[serde(default)]
    files: Vec<VersionFile>,
}

impl Version {
    pub(crate) fn from_payload(project: &Project, payload: VersionPayload) -> Self {
        Self {
            id: payload.id,
            project_id: payload.project_id,
            project_slug: project.slug.clone(),
            author_id: payload.author_id,
            name: payload.name,
            version_number: payload.version_number,
            changelog: payload.changelog,
            changelog_url: payload.changelog_url,
            date_published: payload.date_published,
            downloads: payload.downloads,
            version_type: payload.version_type,
            featured: payload.featured,
            game_versions: payload.game_versions,
            loaders: payload.loaders,
            dependencies: payload.dependencies,
            files: payload.files,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_algorithm_parse() {
        assert_eq!("sha1".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha1);
        assert_eq!(
            "sha512".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha512
        );

        let err = "md5".parse::<HashAlgorithm>().unwrap_err();
        assert!(matches!(err, ModrinthError::InvalidArgument(_)));
    }

    #[test]
    fn test_hash_algorithm_is_case_sensitive() {
        assert!("SHA1".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_version_from_payload() {
        let version = fixtures::version_with_files(vec![fixtures::file_json(
            true,
            "abc",
            "https://cdn.example/a.jar",
        )]);

        assert_eq!(version.id, "v1");
        assert_eq!(version.project_slug, "demo");
        assert_eq!(version.files.len(), 1);
        assert_eq!(version.files[0].filename, "a.jar");
        assert_eq!(version.files[0].hashes.get(HashAlgorithm::Sha512), "abc-512");
        assert_eq!(version.dependencies[0].dependency_type, "required");
    }
}
