use crate::core::error::Result;
use crate::core::TrackInfo;
use async_trait::async_trait;
use url::Url;

/// A lyrics website the bot can search and scrape.
#[async_trait]
pub trait LyricsSite: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `url` is a result page on this site, so searching can be skipped.
    fn suitable(&self, url: &Url) -> bool;

    /// Turn a free-text query into a result-page URL.
    async fn resolve(&self, query: &str) -> Result<Url>;

    async fn track_info(&self, url: &Url) -> Result<TrackInfo>;

    async fn lyrics(&self, url: &Url) -> Result<String>;

    /// Resolve `query`, or use it directly when it already is a page on this site.
    async fn locate(&self, query: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(query.trim()) {
            if self.suitable(&url) {
                return Ok(url);
            }
        }
        self.resolve(query).await
    }
}
