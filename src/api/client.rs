//! Authenticated HTTP client for the storefront backend
//!
//! Wraps reqwest::Client with bearer token injection from the shared
//! session store. Every request is addressed under the `/api` prefix; the
//! storefront proxy rewrites that prefix before forwarding upstream.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::config::Config;
use crate::session::SessionStore;

/// HTTP client holding the shared session.
pub struct StorefrontClient {
    http: reqwest::Client,
    base: String,
    session: Arc<SessionStore>,
}

impl StorefrontClient {
    /// Load config and build the client.
    pub fn new(session: Arc<SessionStore>) -> Result<Self> {
        let config = Config::load()?;
        Self::with_base(config.api_base(), session)
    }

    /// Build a client against an explicit base URL.
    pub fn with_base(base: &str, session: Arc<SessionStore>) -> Result<Self> {
        Url::parse(base).with_context(|| format!("Invalid storefront base URL: {}", base))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Storefront base URL (no trailing slash).
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Full URL for a backend path, routed through the `/api` proxy prefix.
    fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base, path)
    }

    /// GET request, bearer auth attached when a session token is present.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.api_url(path);
        tracing::debug!("GET {}", url);

        let mut req = self.http.get(&url);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        self.check_response(resp, &url).await
    }

    /// POST request with a JSON body, bearer auth attached when present.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> Result<reqwest::Response> {
        let url = self.api_url(path);
        tracing::debug!("POST {}", url);

        let mut req = self.http.post(&url).json(body);
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("POST {} failed", url))?;

        self.check_response(resp, &url).await
    }

    /// Check HTTP response status and return a clear error on failure.
    ///
    /// A 401 means the stored token is invalid or expired; the session is
    /// cleared so the next command starts from a clean signed-out state.
    async fn check_response(
        &self,
        resp: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.session.clear_token();
            bail!(
                "401 Unauthorized for {}. Session cleared -- run 'storefront-cli login'.",
                url
            );
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("HTTP {} for {}: {}", status.as_u16(), url, body);
        }
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn client(base: &str) -> StorefrontClient {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        StorefrontClient::with_base(base, session).unwrap()
    }

    #[test]
    fn test_api_url_prefixes_proxy_path() {
        let c = client("http://localhost:3000");
        assert_eq!(
            c.api_url("/categories/books/products"),
            "http://localhost:3000/api/categories/books/products"
        );
    }

    #[test]
    fn test_api_url_tolerates_trailing_slash_in_base() {
        let c = client("http://localhost:3000/");
        assert_eq!(c.api_url("/me"), "http://localhost:3000/api/me");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        assert!(StorefrontClient::with_base("not a url", session).is_err());
    }

    fn response_with_status(status: u16) -> reqwest::Response {
        http::Response::builder()
            .status(status)
            .body("")
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn test_unauthorized_response_clears_session() {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        session.set_token("stale-token");
        let c = StorefrontClient::with_base("http://localhost:3000", session.clone()).unwrap();

        let result = c
            .check_response(response_with_status(401), "http://localhost:3000/api/me")
            .await;

        assert!(result.is_err());
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_server_error_keeps_session() {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        session.set_token("good-token");
        let c = StorefrontClient::with_base("http://localhost:3000", session.clone()).unwrap();

        let result = c
            .check_response(response_with_status(500), "http://localhost:3000/api/me")
            .await;

        assert!(result.is_err());
        assert_eq!(session.token().as_deref(), Some("good-token"));
    }

    #[tokio::test]
    async fn test_success_response_passes_through() {
        let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        session.set_token("good-token");
        let c = StorefrontClient::with_base("http://localhost:3000", session.clone()).unwrap();

        let result = c
            .check_response(response_with_status(200), "http://localhost:3000/api/me")
            .await;

        assert!(result.is_ok());
        assert_eq!(session.token().as_deref(), Some("good-token"));
    }
}
