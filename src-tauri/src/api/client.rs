use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::AppPicksError;

pub const DEFAULT_API_BASE_URL: &str = "https://flathub.org/api/v2";

/// Authenticated HTTP client for the catalog service.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl CatalogClient {
    /// `base_url` must be an absolute http(s) URL. A trailing slash is ignored.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, AppPicksError> {
        let base = Url::parse(base_url.trim().trim_end_matches('/'))
            .map_err(|e| AppPicksError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(AppPicksError::Config(format!(
                "API base URL must be http(s): {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent("AppPicks/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppPicksError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AppPicksError> {
        let mut raw = self.base.as_str().trim_end_matches('/').to_string();
        for segment in segments {
            raw.push('/');
            raw.push_str(&urlencoding::encode(segment));
        }
        Url::parse(&raw).map_err(|e| AppPicksError::InvalidInput(format!("Bad URL '{}': {}", raw, e)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, url: &Url, request: RequestBuilder) -> Result<Response, AppPicksError> {
        debug!("{}", url);
        let response = self.authorize(request).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "timed out after 30s".to_string()
            } else {
                e.to_string()
            };
            warn!("Request to {} failed: {}", url, message);
            AppPicksError::Transport {
                url: url.to_string(),
                message,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("{} returned HTTP {}", url, status);
        Err(AppPicksError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body: truncate(&body, 200),
        })
    }

    async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, AppPicksError> {
        response.json::<T>().await.map_err(|e| AppPicksError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, AppPicksError> {
        let response = self.send(&url, self.http.get(url.clone())).await?;
        Self::decode(&url, response).await
    }

    /// Like [`get_json`](Self::get_json) but a 404 means "nothing there".
    pub async fn get_optional_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, AppPicksError> {
        match self.send(&url, self.http.get(url.clone())).await {
            Ok(response) => Self::decode(&url, response).await.map(Some),
            Err(AppPicksError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), AppPicksError> {
        self.send(&url, self.http.post(url.clone()).json(body)).await?;
        Ok(())
    }

    pub async fn post_empty(&self, url: Url) -> Result<(), AppPicksError> {
        self.send(&url, self.http.post(url.clone())).await?;
        Ok(())
    }

    pub async fn delete(&self, url: Url) -> Result<(), AppPicksError> {
        self.send(&url, self.http.delete(url.clone())).await?;
        Ok(())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}
