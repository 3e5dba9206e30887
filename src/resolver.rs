//! Entity resolution: identifiers in, typed records out.

use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::client::ModrinthClient;
use crate::error::{ModrinthError, Result};
use crate::gateway::AuthToken;
use crate::models::{Project, ProjectDependencies, User, Version, VersionPayload};

impl ModrinthClient {
    /// Fetch a project by id or slug.
    ///
    /// The API canonicalizes either form, so the returned `id` may differ
    /// from what was asked for.
    pub async fn resolve_project(&self, id_or_slug: &str) -> Result<Project> {
        let path = entity_path("project", id_or_slug)?;
        let body = self.gateway.get_json(&path, &[]).await?;
        let project: Project = serde_json::from_value(body)?;

        tracing::debug!(id = %project.id, slug = %project.slug, "resolved project");
        Ok(project)
    }

    /// Fetch one version of `project`.
    ///
    /// Fails with `InvalidArgument`, without any request, when `version_id`
    /// is not in the project's version list.
    pub async fn resolve_version(&self, project: &Project, version_id: &str) -> Result<Version> {
        ensure_listed(project, version_id)?;

        let path = entity_path("version", version_id)?;
        let body = self.gateway.get_json(&path, &[]).await?;
        let payload: VersionPayload = serde_json::from_value(body)?;
        let version = Version::from_payload(project, payload);

        if version.project_id != project.id {
            tracing::warn!(
                version = %version.id,
                expected = %project.id,
                actual = %version.project_id,
                "version belongs to a different project than the one that lists it"
            );
        }

        tracing::debug!(id = %version.id, files = version.files.len(), "resolved version");
        Ok(version)
    }

    /// Fetch several versions of `project`, in the order given.
    ///
    /// Every identifier is checked before any request is made; the first
    /// failed fetch aborts the whole call.
    pub async fn resolve_versions<S: AsRef<str>>(
        &self,
        project: &Project,
        version_ids: &[S],
    ) -> Result<Vec<Version>> {
        for id in version_ids {
            ensure_listed(project, id.as_ref())?;
        }

        let client = self;
        stream::iter(version_ids)
            .map(move |id| client.resolve_version(project, id.as_ref()))
            .buffered(self.max_concurrent)
            .try_collect()
            .await
    }

    /// Fetch the last version in the project's version list
    pub async fn latest_version(&self, project: &Project) -> Result<Version> {
        let latest = project.versions.last().ok_or_else(|| {
            ModrinthError::NotFound(format!("project '{}' has no versions", project.slug))
        })?;

        self.resolve_version(project, latest).await
    }

    /// Fetch a user by id or username
    pub async fn resolve_user(&self, id_or_name: &str) -> Result<User> {
        let path = entity_path("user", id_or_name)?;
        let body = self.gateway.get_json(&path, &[]).await?;
        let user: User = serde_json::from_value(body)?;

        tracing::debug!(id = %user.id, username = %user.username, "resolved user");
        Ok(user)
    }

    /// Fetch the projects and versions `project` depends on
    pub async fn project_dependencies(&self, project: &Project) -> Result<ProjectDependencies> {
        let path = format!("{}/dependencies", project.api_path());
        let body = self.gateway.get_json(&path, &[]).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Follow `project` as the user owning `token`
    pub async fn follow(&self, project: &Project, token: &AuthToken) -> Result<()> {
        let path = format!("{}/follow", project.api_path());
        self.gateway.send(::http::Method::POST, &path, token).await
    }

    /// Stop following `project` as the user owning `token`
    pub async fn unfollow(&self, project: &Project, token: &AuthToken) -> Result<()> {
        let path = format!("{}/follow", project.api_path());
        self.gateway.send(::http::Method::DELETE, &path, token).await
    }
}

fn entity_path(kind: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(ModrinthError::InvalidArgument(format!(
            "{} identifier must not be empty",
            kind
        )));
    }
    Ok(format!("/v2/{}/{}", kind, urlencoding::encode(id)))
}

fn ensure_listed(project: &Project, version_id: &str) -> Result<()> {
    if project.has_version(version_id) {
        Ok(())
    } else {
        Err(ModrinthError::InvalidArgument(format!(
            "version '{}' is not a version of project '{}'",
            version_id, project.slug
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockGateway;
    use crate::models::project::fixtures::project_json;
    use crate::models::version::fixtures::{file_json, version_json};
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<MockGateway>, ModrinthClient) {
        let gateway = Arc::new(MockGateway::new());
        let client = ModrinthClient::with_gateway(gateway.clone());
        (gateway, client)
    }

    fn project(versions: &[&str]) -> Project {
        serde_json::from_value(project_json("AABBCCDD", "demo", versions)).unwrap()
    }

    #[tokio::test]
    async fn test_resolve_project_by_slug() {
        let (gateway, client) = setup();
        gateway.set_json("/v2/project/demo", project_json("AABBCCDD", "demo", &["v1"]));

        let project = client.resolve_project("demo").await.unwrap();
        assert_eq!(project.id, "AABBCCDD");
        assert_eq!(gateway.calls()[0].path, "/v2/project/demo");
    }

    #[tokio::test]
    async fn test_resolve_project_encodes_path_segment() {
        let (gateway, client) = setup();
        let err = client.resolve_project("a/b c").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(gateway.calls()[0].path, "/v2/project/a%2Fb%20c");
    }

    #[tokio::test]
    async fn test_resolve_project_not_found() {
        let (_gateway, client) = setup();
        let err = client.resolve_project("missing").await.unwrap_err();
        assert!(matches!(err, ModrinthError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_resolve_project_upstream_status() {
        let (gateway, client) = setup();
        gateway.set_status("/v2/project/demo", 502);

        let err = client.resolve_project("demo").await.unwrap_err();
        assert!(matches!(err, ModrinthError::Upstream { status: Some(502), .. }));
    }

    #[tokio::test]
    async fn test_resolve_project_malformed_body() {
        let (gateway, client) = setup();
        gateway.set_json("/v2/project/demo", json!({"unexpected": true}));

        let err = client.resolve_project("demo").await.unwrap_err();
        assert!(matches!(err, ModrinthError::Upstream { status: None, .. }));
    }

    #[tokio::test]
    async fn test_resolve_project_transport_error() {
        let (gateway, client) = setup();
        gateway.set_transport_error("/v2/project/demo", "connection refused");

        let err = client.resolve_project("demo").await.unwrap_err();
        assert!(matches!(err, ModrinthError::Transport(_)));
    }

    #[tokio::test]
    async fn test_empty_identifier_rejected_without_request() {
        let (gateway, client) = setup();
        let err = client.resolve_user("").await.unwrap_err();

        assert!(matches!(err, ModrinthError::InvalidArgument(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_version_unlisted_makes_no_request() {
        let (gateway, client) = setup();
        let project = project(&["v1", "v2"]);

        let err = client.resolve_version(&project, "v9").await.unwrap_err();
        assert!(matches!(err, ModrinthError::InvalidArgument(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_version() {
        let (gateway, client) = setup();
        gateway.set_json(
            "/v2/version/v2",
            version_json(
                "v2",
                "AABBCCDD",
                vec![file_json(true, "aaa", "https://cdn.example/demo-2.jar")],
            ),
        );

        let version = client
            .resolve_version(&project(&["v1", "v2"]), "v2")
            .await
            .unwrap();
        assert_eq!(version.id, "v2");
        assert_eq!(version.project_slug, "demo");
        assert_eq!(version.files.len(), 1);
        assert!(version.files[0].primary);
    }

    #[tokio::test]
    async fn test_resolve_versions_checks_all_ids_first() {
        let (gateway, client) = setup();
        gateway.set_json("/v2/version/v1", version_json("v1", "AABBCCDD", vec![]));

        let err = client
            .resolve_versions(&project(&["v1", "v2"]), &["v1", "nope"])
            .await
            .unwrap_err();
        assert!(matches!(err, ModrinthError::InvalidArgument(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_versions_keeps_order() {
        let (gateway, client) = setup();
        for id in ["v1", "v2", "v3"] {
            gateway.set_json(format!("/v2/version/{}", id), version_json(id, "AABBCCDD", vec![]));
        }

        let versions = client
            .resolve_versions(&project(&["v1", "v2", "v3"]), &["v3", "v1", "v2"])
            .await
            .unwrap();
        let ids: Vec<&str> = versions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v3", "v1", "v2"]);
    }

    #[tokio::test]
    async fn test_latest_version() {
        let (gateway, client) = setup();
        gateway.set_json("/v2/version/v3", version_json("v3", "AABBCCDD", vec![]));

        let version = client
            .latest_version(&project(&["v1", "v2", "v3"]))
            .await
            .unwrap();
        assert_eq!(version.id, "v3");
    }

    #[tokio::test]
    async fn test_latest_version_without_versions() {
        let (gateway, client) = setup();
        let err = client.latest_version(&project(&[])).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_user() {
        let (gateway, client) = setup();
        gateway.set_json(
            "/v2/user/alice",
            json!({"id": "U1", "username": "alice", "role": "developer", "badges": 0}),
        );

        let user = client.resolve_user("alice").await.unwrap();
        assert_eq!(user.id, "U1");
        assert_eq!(user.role, "developer");
    }

    #[tokio::test]
    async fn test_project_dependencies() {
        let (gateway, client) = setup();
        gateway.set_json(
            "/v2/project/AABBCCDD/dependencies",
            json!({
                "projects": [project_json("P7dR8mSH", "fabric-api", &["f1"])],
                "versions": [{"id": "f1", "project_id": "P7dR8mSH", "name": "Fabric API", "version_number": "0.90.0"}]
            }),
        );

        let deps = client.project_dependencies(&project(&["v1"])).await.unwrap();
        assert_eq!(deps.projects[0].slug, "fabric-api");
        assert_eq!(deps.versions[0].version_number.as_deref(), Some("0.90.0"));
    }

    #[tokio::test]
    async fn test_follow_and_unfollow() {
        let (gateway, client) = setup();
        let token = AuthToken::new("mrp_token").unwrap();
        let project = project(&[]);

        client.follow(&project, &token).await.unwrap();
        client.unfollow(&project, &token).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[0].method, ::http::Method::POST);
        assert_eq!(calls[1].method, ::http::Method::DELETE);
        assert!(calls.iter().all(|c| c.path == "/v2/project/AABBCCDD/follow" && c.authorized));
    }
}
