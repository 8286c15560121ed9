use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;

use super::{PackageInfo, Registry};
use crate::http::HttpClient;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Client for an npm-compatible registry.
pub struct NpmRegistry {
    http_client: HttpClient,
    base_url: String,
}

impl NpmRegistry {
    #[tracing::instrument(skip(http_client, base_url))]
    pub fn new(http_client: HttpClient, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            http_client,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// `{base}/{name}/{version}`
    pub fn version_url(&self, name: &str, version: &str) -> String {
        format!("{}/{}/{}", self.base_url, name, version)
    }
}

#[async_trait]
impl Registry for NpmRegistry {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, name: &str, version: &str) -> Result<PackageInfo> {
        let url = self.version_url(name, version);
        debug!("Resolving {}@{} via {}", name, version, url);

        self.http_client
            .get_json::<PackageInfo>(&url)
            .await
            .with_context(|| format!("Failed to resolve {}@{} from {}", name, version, url))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_archive(&self, url: &str) -> Result<Vec<u8>> {
        self.http_client
            .get_bytes(url)
            .await
            .with_context(|| format!("Failed to download archive from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MAX_RETRIES;
    use reqwest::Client;
    use std::time::Duration;

    fn registry(url: String) -> NpmRegistry {
        let http_client = HttpClient::new(Client::new()).with_retry_delay(Duration::ZERO);
        NpmRegistry::new(http_client, Some(url))
    }

    #[test]
    fn test_default_base_url() {
        let registry = NpmRegistry::new(HttpClient::new(Client::new()), None);
        assert_eq!(registry.base_url(), "https://registry.npmjs.org");
        assert_eq!(
            registry.version_url("left-pad", "1.3.0"),
            "https://registry.npmjs.org/left-pad/1.3.0"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let registry = registry("http://localhost:4873/".to_string());
        assert_eq!(
            registry.version_url("a", "latest"),
            "http://localhost:4873/a/latest"
        );
    }

    #[tokio::test]
    async fn test_resolve_exact_version() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/left-pad/1.3.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"name": "left-pad", "version": "1.3.0", "dist": {{"tarball": "{}/left-pad/-/left-pad-1.3.0.tgz"}}}}"#,
                url
            ))
            .create_async()
            .await;

        let info = registry(url.clone())
            .resolve("left-pad", "1.3.0")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(info.version, "1.3.0");
        assert_eq!(
            info.tarball_url(),
            format!("{}/left-pad/-/left-pad-1.3.0.tgz", url)
        );
    }

    #[tokio::test]
    async fn test_resolve_latest_reports_concrete_version() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/a/latest")
            .with_status(200)
            .with_body(r#"{"version": "3.1.4", "dist": {"tarball": "http://x/a-3.1.4.tgz"}}"#)
            .create_async()
            .await;

        let info = registry(url).resolve("a", "latest").await.unwrap();

        mock.assert_async().await;
        assert_eq!(info.version, "3.1.4");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/nope/9.9.9")
            .with_status(404)
            .create_async()
            .await;

        let result = registry(url).resolve("nope", "9.9.9").await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to resolve nope@9.9.9"));
    }

    #[tokio::test]
    async fn test_resolve_unparsable_body_fails() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/garbled/1.0.0")
            .with_status(200)
            .with_body("<html>not json</html>")
            .expect(MAX_RETRIES)
            .create_async()
            .await;

        let result = registry(url).resolve("garbled", "1.0.0").await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to resolve garbled@1.0.0"));
    }

    #[tokio::test]
    async fn test_resolve_without_dist_fails() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/nodist/1.0.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "nodist", "version": "1.0.0"}"#)
            .create_async()
            .await;

        let result = registry(url).resolve("nodist", "1.0.0").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_archive() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/a/-/a-1.0.0.tgz")
            .with_status(200)
            .with_body(vec![0x1f, 0x8b, 0x08])
            .create_async()
            .await;

        let bytes = registry(url.clone())
            .fetch_archive(&format!("{}/a/-/a-1.0.0.tgz", url))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, vec![0x1f, 0x8b, 0x08]);
    }

    #[tokio::test]
    async fn test_fetch_archive_failure() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/a/-/a-1.0.0.tgz")
            .with_status(403)
            .create_async()
            .await;

        let result = registry(url.clone())
            .fetch_archive(&format!("{}/a/-/a-1.0.0.tgz", url))
            .await;

        assert!(result.is_err());
    }
}
