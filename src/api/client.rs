//! Admin Client
//!
//! Main client for the satellite admin API, combining URL assembly, the
//! injected transport and the raw authorization token.

use super::error::{AdminError, Result};
use super::http::{sanitize_for_log, HttpRequest, Method, ReqwestTransport, Transport};
use super::query::encode_query;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Main admin API client
#[derive(Clone)]
pub struct AdminClient {
    base_url: String,
    auth_token: String,
    transport: Arc<dyn Transport>,
}

/// Limits for `update_project_limits`; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectLimits {
    /// Storage, in bytes
    pub usage: Option<u64>,
    /// Bandwidth, in bytes
    pub bandwidth: Option<u64>,
    /// Requests per second
    pub rate: Option<u64>,
    /// Maximum number of buckets
    pub buckets: Option<u64>,
    /// Maximum number of segments
    pub segments: Option<u64>,
}

impl ProjectLimits {
    fn to_query(&self) -> String {
        encode_query(&[
            ("usage", self.usage),
            ("bandwidth", self.bandwidth),
            ("rate", self.rate),
            ("buckets", self.buckets),
            ("segments", self.segments),
        ])
    }
}

/// Fields for `update_user`; unset fields are omitted from the request body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(rename = "partnerID", skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewProject<'a> {
    owner_id: &'a str,
    project_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectUpdate<'a> {
    project_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct NewApiKey<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewUser<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<&'a str>,
    password: &'a str,
}

impl AdminClient {
    /// Create a new client using the default reqwest transport
    pub fn new(base_url: &str, auth_token: &str) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(base_url, auth_token, Arc::new(transport)))
    }

    /// Create a client on top of a caller provided transport
    pub fn with_transport(base_url: &str, auth_token: &str, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.strip_suffix('/').unwrap_or(base_url);

        Self {
            base_url: base_url.to_string(),
            auth_token: auth_token.to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` to the base URL with exactly one slash, appending `?query`
    /// only when the query is non-empty. The path is not escaped.
    pub fn build_url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);

        match query {
            Some(query) if !query.is_empty() => format!("{}/{}?{}", self.base_url, path, query),
            _ => format!("{}/{}", self.base_url, path),
        }
    }

    /// Perform one request and classify the response.
    ///
    /// Returns the parsed body when the server declares JSON, `None` otherwise.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let url = self.build_url(path, query);
        check_url(&url)?;
        tracing::debug!("{} {}", method, url);

        let mut headers = vec![("Authorization".to_string(), self.auth_token.clone())];
        let body = match body {
            Some(body) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(serde_json::to_vec(body)?)
            }
            None => None,
        };

        let response = self
            .transport
            .send(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await?;

        if !response.is_success() {
            tracing::debug!(
                "API error: {} - {}",
                response.status,
                sanitize_for_log(&String::from_utf8_lossy(&response.body))
            );

            let body = if response.is_json() {
                serde_json::from_slice(&response.body).ok()
            } else {
                None
            };

            return Err(AdminError::Response {
                status: response.status,
                body,
            });
        }

        if !response.is_json() {
            return Ok(None);
        }

        serde_json::from_slice(&response.body)
            .map(Some)
            .map_err(|source| AdminError::MalformedResponse {
                status: response.status,
                source,
            })
    }

    async fn request_json<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        payload: &T,
    ) -> Result<Option<Value>> {
        let body = serde_json::to_value(payload)?;
        self.request(method, path, None, Some(&body)).await
    }

    // =========================================================================
    // API keys
    // =========================================================================

    /// Delete an API key
    pub async fn delete_api_key(&self, api_key: &str) -> Result<()> {
        self.request(Method::Delete, &format!("apikeys/{}", api_key), None, None)
            .await?;
        Ok(())
    }

    // =========================================================================
    // Buckets
    // =========================================================================

    pub async fn get_bucket(&self, project_id: &str, bucket: &str) -> Result<Option<Value>> {
        self.request(Method::Get, &bucket_path(project_id, bucket), None, None)
            .await
    }

    /// Delete the geofencing configuration of a bucket (the bucket must be empty)
    pub async fn delete_bucket_geofence(&self, project_id: &str, bucket: &str) -> Result<()> {
        let path = format!("{}/geofence", bucket_path(project_id, bucket));
        self.request(Method::Delete, &path, None, None).await?;
        Ok(())
    }

    /// Set the geofencing region of a bucket (the bucket must be empty)
    pub async fn set_bucket_geofence(
        &self,
        project_id: &str,
        bucket: &str,
        region: Option<&str>,
    ) -> Result<Option<Value>> {
        let region = region.filter(|r| !r.is_empty());
        let query = encode_query(&[("region", region)]);
        if query.is_empty() {
            return Err(AdminError::validation("region cannot be empty"));
        }

        let path = format!("{}/geofence", bucket_path(project_id, bucket));
        self.request(Method::Post, &path, Some(&query), None).await
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Add a new project to a user
    pub async fn create_project(&self, owner_id: &str, project_name: &str) -> Result<Option<Value>> {
        self.request_json(
            Method::Post,
            "projects",
            &NewProject {
                owner_id,
                project_name,
            },
        )
        .await
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        self.request(Method::Delete, &project_path(project_id), None, None)
            .await?;
        Ok(())
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Option<Value>> {
        self.request(Method::Get, &project_path(project_id), None, None)
            .await
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        project_name: &str,
        description: Option<&str>,
    ) -> Result<()> {
        self.request_json(
            Method::Put,
            &project_path(project_id),
            &ProjectUpdate {
                project_name,
                description,
            },
        )
        .await?;
        Ok(())
    }

    pub async fn create_project_api_key(&self, project_id: &str, name: &str) -> Result<Option<Value>> {
        let path = format!("{}/apikeys", project_path(project_id));
        self.request_json(Method::Post, &path, &NewApiKey { name })
            .await
    }

    pub async fn delete_project_api_key(&self, project_id: &str, name: &str) -> Result<()> {
        let path = format!("{}/apikeys/{}", project_path(project_id), name);
        self.request(Method::Delete, &path, None, None).await?;
        Ok(())
    }

    pub async fn get_project_api_keys(&self, project_id: &str) -> Result<Option<Value>> {
        // The listing endpoint is camel-cased, unlike create/delete.
        let path = format!("{}/apiKeys", project_path(project_id));
        self.request(Method::Get, &path, None, None).await
    }

    pub async fn get_project_usage(&self, project_id: &str) -> Result<Option<Value>> {
        let path = format!("{}/usage", project_path(project_id));
        self.request(Method::Get, &path, None, None).await
    }

    pub async fn get_project_limits(&self, project_id: &str) -> Result<Option<Value>> {
        let path = format!("{}/limit", project_path(project_id));
        self.request(Method::Get, &path, None, None).await
    }

    /// Update the limits of a project. At least one limit must be set.
    pub async fn update_project_limits(&self, project_id: &str, limits: &ProjectLimits) -> Result<()> {
        let query = limits.to_query();
        if query.is_empty() {
            return Err(AdminError::validation(
                "nothing to update, at least one limit must be set",
            ));
        }

        let path = format!("{}/limit", project_path(project_id));
        self.request(Method::Put, &path, Some(&query), None).await?;
        Ok(())
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn create_user(
        &self,
        email: &str,
        full_name: Option<&str>,
        password: &str,
    ) -> Result<Option<Value>> {
        self.request_json(
            Method::Post,
            "users",
            &NewUser {
                email,
                full_name,
                password,
            },
        )
        .await
    }

    pub async fn delete_user(&self, email: &str) -> Result<()> {
        self.request(Method::Delete, &format!("users/{}", email), None, None)
            .await?;
        Ok(())
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<Value>> {
        self.request(Method::Get, &format!("users/{}", email), None, None)
            .await
    }

    /// Update a user's account. Unset fields are not updated.
    pub async fn update_user(&self, current_email: &str, update: &UserUpdate) -> Result<()> {
        self.request_json(Method::Put, &format!("users/{}", current_email), update)
            .await?;
        Ok(())
    }
}

/// Reject URLs no HTTP transport could send, before anything goes out
fn check_url(url: &str) -> Result<()> {
    let parsed =
        Url::parse(url).map_err(|e| AdminError::validation(format!("invalid URL {}: {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AdminError::validation(format!(
            "invalid URL {}: unsupported scheme '{}'",
            url, scheme
        ))),
    }
}

fn project_path(project_id: &str) -> String {
    format!("projects/{}", project_id)
}

fn bucket_path(project_id: &str, bucket: &str) -> String {
    format!("projects/{}/buckets/{}", project_id, bucket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::TransportError;
    use crate::api::http::HttpResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoNetwork;

    /// Counts sends and answers 204
    #[derive(Default)]
    struct Counting {
        sent: AtomicUsize,
    }

    #[async_trait]
    impl Transport for Counting {
        async fn send(&self, _request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse {
                status: 204,
                content_type: None,
                body: Vec::new(),
            })
        }
    }

    #[async_trait]
    impl Transport for NoNetwork {
        async fn send(&self, _request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            Err(TransportError::new("network disabled"))
        }
    }

    fn client(base_url: &str) -> AdminClient {
        AdminClient::with_transport(base_url, "token", Arc::new(NoNetwork))
    }

    #[test]
    fn test_build_url_deduplicates_leading_slash() {
        let client = client("http://x");
        assert_eq!(client.build_url("path", None), "http://x/path");
        assert_eq!(client.build_url("/path", None), "http://x/path");
    }

    #[test]
    fn test_build_url_omits_empty_query() {
        let client = client("http://x");
        assert_eq!(client.build_url("path", Some("")), "http://x/path");
        assert_eq!(client.build_url("path", Some("a=1")), "http://x/path?a=1");
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = client("http://x/api/");
        assert_eq!(client.base_url(), "http://x/api");
        assert_eq!(client.build_url("/users", None), "http://x/api/users");
    }

    #[test]
    fn test_path_is_not_escaped() {
        let client = client("http://x");
        assert_eq!(
            client.build_url("users/a b@example.com", None),
            "http://x/users/a b@example.com"
        );
    }

    #[test]
    fn test_project_limits_query_only_has_set_fields() {
        let limits = ProjectLimits {
            bandwidth: Some(100),
            segments: Some(7),
            ..Default::default()
        };
        assert_eq!(limits.to_query(), "bandwidth=100&segments=7");
        assert_eq!(ProjectLimits::default().to_query(), "");
    }

    #[test]
    fn test_user_update_omits_unset_fields() {
        let update = UserUpdate {
            short_name: Some("Al".to_string()),
            partner_id: Some("p-1".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"shortName": "Al", "partnerID": "p-1"}));
    }

    #[tokio::test]
    async fn test_guards_fail_before_transport() {
        let transport = Arc::new(Counting::default());
        let client = AdminClient::with_transport("http://x", "token", transport.clone());

        let err = client.set_bucket_geofence("p", "b", None).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(err.message(), "region cannot be empty");

        let err = client.set_bucket_geofence("p", "b", Some("")).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert_eq!(err.message(), "region cannot be empty");

        let err = client
            .update_project_limits("p", &ProjectLimits::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.message(),
            "nothing to update, at least one limit must be set"
        );

        assert_eq!(transport.sent.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_region_is_sent_when_set() {
        let transport = Arc::new(Counting::default());
        let client = AdminClient::with_transport("http://x", "token", transport.clone());

        client
            .set_bucket_geofence("p", "b", Some("EU"))
            .await
            .expect("set geofence should succeed");
        assert_eq!(transport.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_rejected_locally() {
        for base_url in ["not a url", "ftp://x/api"] {
            let transport = Arc::new(Counting::default());
            let client = AdminClient::with_transport(base_url, "token", transport.clone());

            let err = client.get_project("p").await.unwrap_err();
            assert!(matches!(err, AdminError::Validation(_)), "{}", base_url);
            assert!(!err.is_transport());
            assert!(err.message().starts_with("invalid URL"));
            assert_eq!(transport.sent.load(Ordering::SeqCst), 0);
        }
    }

    #[test]
    fn test_project_limits_accept_full_byte_range() {
        let limits = ProjectLimits {
            usage: Some(u64::MAX),
            ..Default::default()
        };
        assert_eq!(limits.to_query(), "usage=18446744073709551615");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let err = client("http://x").get_project("p").await.unwrap_err();
        assert!(err.is_transport());
    }
}
