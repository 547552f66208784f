use crate::core::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use std::sync::Mutex;
use tracing::{debug, info};
use url::Url;

/// A fetched page: status code plus the body decoded as text.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Page>;
}

/// Shared HTTP client. The underlying `reqwest::Client` is built on first use
/// and dropped again by [`HttpClient::close`].
pub struct HttpClient {
    user_agent: String,
    accept_language: String,
    inner: Mutex<Option<reqwest::Client>>,
}

impl HttpClient {
    pub fn new(user_agent: impl Into<String>, accept_language: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept_language: accept_language.into(),
            inner: Mutex::new(None),
        }
    }

    fn client(&self) -> Result<reqwest::Client> {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.accept_language) {
            headers.insert(ACCEPT_LANGUAGE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        debug!("Created HTTP client");
        *guard = Some(client.clone());
        Ok(client)
    }

    pub fn is_open(&self) -> bool {
        self.inner
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    pub fn close(&self) {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.take().is_some() {
            info!("Closed HTTP client");
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &Url) -> Result<Page> {
        let response = self.client()?.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        debug!("GET {} -> {}", url, status);

        let body = response.text().await?;
        Ok(Page { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_is_created_lazily_and_closed() {
        let http = HttpClient::new("test-agent", "en-US,en;q=0.9");
        assert!(!http.is_open());

        http.client().unwrap();
        assert!(http.is_open());

        http.close();
        assert!(!http.is_open());
    }

    #[test]
    fn client_is_rebuilt_after_close() {
        let http = HttpClient::new("test-agent", "en-US,en;q=0.9");
        http.client().unwrap();
        http.close();

        http.client().unwrap();
        assert!(http.is_open());
    }

    #[test]
    fn page_success_range() {
        let ok = Page { status: 200, body: String::new() };
        let missing = Page { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
