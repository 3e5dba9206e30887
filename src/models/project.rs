//! Project records and their side-support predicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a project runs on one side (client or server)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideSupport {
    Required,
    Optional,
    Unsupported,
    Universal,
    /// Any value this client does not know about
    #[default]
    #[serde(other)]
    Unknown,
}

impl SideSupport {
    /// Get the wire name of this value
    pub fn as_str(&self) -> &'static str {
        match self {
            SideSupport::Required => "required",
            SideSupport::Optional => "optional",
            SideSupport::Unsupported => "unsupported",
            SideSupport::Universal => "universal",
            SideSupport::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SideSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project's license
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A donation link listed on a project page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationUrl {
    pub id: String,
    pub platform: String,
    pub url: String,
}

/// An image in a project's gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ordering: Option<i64>,
}

/// A resolved project snapshot.
///
/// `id` is stable; `slug` is a mutable alias that the API accepts wherever
/// an id is expected. `versions` lists version identifiers only: a project
/// never owns resolved versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_url: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub project_type: String,

    #[serde(default)]
    pub client_side: SideSupport,
    #[serde(default)]
    pub server_side: SideSupport,

    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub requested_status: Option<String>,
    #[serde(default)]
    pub monetization_status: Option<String>,
    #[serde(default)]
    pub moderator_message: Option<serde_json::Value>,
    #[serde(default)]
    pub thread_id: Option<String>,

    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub additional_categories: Vec<String>,

    #[serde(default)]
    pub issues_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
    #[serde(default)]
    pub discord_url: Option<String>,
    #[serde(default)]
    pub donation_urls: Vec<DonationUrl>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,

    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub followers: u64,

    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,

    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approved: Option<DateTime<Utc>>,
    #[serde(default)]
    pub queued: Option<DateTime<Utc>>,

    #[serde(default)]
    pub license: Option<License>,
}

impl Project {
    /// Whether the project runs on the server: `optional` or `required`.
    pub fn is_server_side(&self) -> bool {
        matches!(
            self.server_side,
            SideSupport::Optional | SideSupport::Required
        )
    }

    /// Whether the project runs on the client: `optional` or `required`.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self.client_side,
            SideSupport::Optional | SideSupport::Required
        )
    }

    /// Whether both sides are `universal` or `required`.
    ///
    /// Note the sets differ from the single-side predicates: `optional`
    /// does not count here, `universal` does.
    pub fn is_universal(&self) -> bool {
        let both = |side: SideSupport| matches!(side, SideSupport::Universal | SideSupport::Required);
        both(self.server_side) && both(self.client_side)
    }

    /// Whether `version_id` is one of this project's version identifiers
    pub fn has_version(&self, version_id: &str) -> bool {
        self.versions.iter().any(|v| v == version_id)
    }

    /// API path of this project, addressed by its stable id
    pub(crate) fn api_path(&self) -> String {
        format!("/v2/project/{}", urlencoding::encode(&self.id))
    }
}

/// Lightweight view of a version returned by the dependencies endpoint.
///
/// These are not checked against any project's version list, so they are
/// kept apart from [`crate::models::Version`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyVersion {
    pub id: String,
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version_number: Option<String>,
}

/// Everything a project depends on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDependencies {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub versions: Vec<DependencyVersion>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// Minimal project body as the API returns it
    pub fn project_json(id: &str, slug: &str, versions: &[&str]) -> Value {
        json!({
            "id": id,
            "slug": slug,
            "title": format!("Project {}", slug),
            "description": "A test project",
            "body": "",
            "project_type": "mod",
            "client_side": "required",
            "server_side": "optional",
            "status": "approved",
            "categories": ["optimization"],
            "downloads": 1200,
            "followers": 30,
            "versions": versions,
            "game_versions": ["1.20.1"],
            "loaders": ["fabric"],
            "published": "2023-01-15T10:00:00Z",
            "updated": "2024-02-01T08:30:00.123456Z",
            "approved": null,
            "queued": null,
            "license": {"id": "MIT", "name": "MIT License", "url": null},
            "donation_urls": [],
            "gallery": []
        })
    }
}
