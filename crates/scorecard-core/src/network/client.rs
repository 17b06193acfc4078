use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("scorecard/", env!("CARGO_PKG_VERSION"));

/// Source of JSON documents addressed by path and query.
///
/// Abstracts the HTTP transport so adapters can be exercised against
/// in-memory fixtures.
pub trait JsonSource: Send + Sync {
    /// Short identifier used to namespace cache keys (e.g. "lxns")
    fn name(&self) -> &str;

    fn fetch_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: JsonSource> JsonSource for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_json(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> impl Future<Output = Result<Value>> + Send {
        (**self).fetch_json(path, query)
    }
}

/// Credential header attached to every request of a source.
#[derive(Clone)]
pub struct AuthHeader {
    name: &'static str,
    value: String,
}

impl AuthHeader {
    /// `Authorization: <token>`
    pub fn authorization(token: impl Into<String>) -> Self {
        Self {
            name: "authorization",
            value: token.into(),
        }
    }

    /// `Authorization: Bearer <token>`
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            name: "authorization",
            value: format!("Bearer {}", token.into()),
        }
    }

    /// A provider-specific header such as `Developer-Token`
    pub fn custom(name: &'static str, token: impl Into<String>) -> Self {
        Self {
            name,
            value: token.into(),
        }
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeader")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// `reqwest`-backed JSON source rooted at a provider base URL.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    name: String,
    base_url: String,
}

impl HttpSource {
    pub fn new(name: &str, base_url: &str, auth: Option<AuthHeader>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(auth) = auth {
            let header_name = HeaderName::from_static(auth.name);
            let mut value = HeaderValue::from_str(&auth.value)
                .map_err(|e| Error::NetworkError(format!("Invalid {} header: {}", auth.name, e)))?;
            value.set_sensitive(true);
            headers.insert(header_name, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl JsonSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_json(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        let value = response.json::<Value>().await?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_values() {
        assert_eq!(AuthHeader::bearer("abc").value, "Bearer abc");
        assert_eq!(AuthHeader::authorization("abc").value, "abc");
        assert_eq!(AuthHeader::custom("developer-token", "t").name, "developer-token");
    }

    #[test]
    fn test_auth_header_debug_redacts() {
        let debug = format!("{:?}", AuthHeader::bearer("secret"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let source = HttpSource::new("lxns", "https://maimai.lxns.net/", None).unwrap();
        assert_eq!(source.base_url(), "https://maimai.lxns.net");
        assert_eq!(source.name(), "lxns");
    }
}
