use crate::core::selector::{first_match, first_match_set};
use crate::core::{LyricsSite, Result, ScrapeError, Strategy, TrackInfo, Transport};
use crate::utils::{normalize_lyrics, render_text};
use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://genius.com";

/// Marker every song page path carries.
const LYRICS_PAGE_MARKER: &str = "-lyrics";

/// Fallback containers shorter than this are decoys.
const MIN_FALLBACK_LYRICS_LEN: usize = 50;

/// Search results and song pages scraped from Genius.
pub struct GeniusExtractor {
    transport: Arc<dyn Transport>,
    base_url: Url,
    rules: PageRules,
}

impl GeniusExtractor {
    pub fn new(transport: Arc<dyn Transport>) -> Result<Self> {
        Self::with_base_url(transport, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(transport: Arc<dyn Transport>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ScrapeError::Parse(format!("invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            transport,
            base_url,
            rules: PageRules::new()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn search_url(&self, query: &str) -> Result<Url> {
        let raw = format!(
            "{}/search?q={}",
            self.base_url.as_str().trim_end_matches('/'),
            urlencoding::encode(query)
        );
        Url::parse(&raw).map_err(|e| ScrapeError::Parse(format!("invalid search URL: {}", e)))
    }

    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let page = self.transport.get(url).await?;

        if page.is_success() {
            return Ok(page.body);
        }
        match page.status {
            404 => Err(ScrapeError::NotFound(url.to_string())),
            status => Err(ScrapeError::Http {
                status,
                url: url.to_string(),
            }),
        }
    }

    /// Result-page URL from a search page body.
    pub fn parse_search_results(&self, html: &str) -> Option<Url> {
        let doc = Html::parse_document(html);

        if let Some((strategy, results)) = first_match_set(&doc, &self.rules.search) {
            debug!(
                "Search strategy '{}' matched {} element(s)",
                strategy.name,
                results.len()
            );

            let found = results
                .iter()
                .filter_map(|el| result_href(el, &self.rules.any_link))
                .find(|href| is_path_relative(href))
                .and_then(|href| self.base_url.join(href).ok());

            if found.is_some() {
                return found;
            }
            debug!("Strategy '{}' had no usable href", strategy.name);
        }

        // Any anchor pointing at a lyrics page.
        doc.select(&self.rules.any_link)
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| href.contains(LYRICS_PAGE_MARKER))
            .filter_map(|href| self.base_url.join(href).ok())
            .find(|url| url.host_str() == self.base_url.host_str())
    }

    /// Track metadata from a song page body. Each field is looked up on its own.
    pub fn parse_track_info(&self, html: &str, url: &Url) -> TrackInfo {
        let doc = Html::parse_document(html);

        let title = field_text(&doc, &self.rules.title, "title");
        let artist = field_text(&doc, &self.rules.artist, "artist");
        let album = field_text(&doc, &self.rules.album, "album");

        TrackInfo::new(title, artist, album, url.as_str())
    }

    /// Lyrics text from a song page body.
    pub fn parse_lyrics(&self, html: &str) -> Option<String> {
        let doc = Html::parse_document(html);

        if let Some((strategy, containers)) = first_match_set(&doc, &self.rules.lyrics) {
            debug!("Lyrics strategy '{}' matched", strategy.name);

            // The dedicated attribute marks every fragment of the body;
            // the class-based layouts keep it in a single container.
            let raw = if strategy.name == DATA_CONTAINER_STRATEGY {
                containers
                    .into_iter()
                    .map(render_text)
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                render_text(containers[0])
            };

            let lyrics = normalize_lyrics(&raw);
            if !lyrics.is_empty() {
                return Some(lyrics);
            }
            debug!("Lyrics container from '{}' was empty", strategy.name);
        }

        doc.select(&self.rules.fallback_containers)
            .filter(|el| {
                el.value()
                    .attr("class")
                    .is_some_and(|class| self.rules.lyrics_class.is_match(class))
            })
            .map(|el| normalize_lyrics(&render_text(el)))
            .find(|text| text.chars().count() > MIN_FALLBACK_LYRICS_LEN)
    }
}

#[async_trait]
impl LyricsSite for GeniusExtractor {
    fn name(&self) -> &'static str {
        "Genius"
    }

    fn suitable(&self, url: &Url) -> bool {
        url.host_str() == self.base_url.host_str() && url.path().ends_with(LYRICS_PAGE_MARKER)
    }

    async fn resolve(&self, query: &str) -> Result<Url> {
        let search_url = self.search_url(query)?;
        let html = match self.fetch_page(&search_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                return Err(e);
            }
        };

        self.parse_search_results(&html)
            .ok_or_else(|| ScrapeError::NotFound(format!("no search results for '{}'", query)))
    }

    async fn track_info(&self, url: &Url) -> Result<TrackInfo> {
        let html = self.fetch_page(url).await?;
        Ok(self.parse_track_info(&html, url))
    }

    async fn lyrics(&self, url: &Url) -> Result<String> {
        let html = self.fetch_page(url).await?;
        self.parse_lyrics(&html)
            .ok_or_else(|| ScrapeError::NotFound(format!("no lyrics on {}", url)))
    }
}

const DATA_CONTAINER_STRATEGY: &str = "lyrics data attribute";

/// Selector chains for every page element the extractor looks for,
/// in priority order.
struct PageRules {
    search: Vec<Strategy>,
    title: Vec<Strategy>,
    artist: Vec<Strategy>,
    album: Vec<Strategy>,
    lyrics: Vec<Strategy>,
    any_link: Selector,
    fallback_containers: Selector,
    lyrics_class: Regex,
}

impl PageRules {
    fn new() -> Result<Self> {
        Ok(Self {
            search: vec![
                Strategy::equals("mini card", "a", "class", "mini_card")?,
                Strategy::pattern("lyrics href", "a", "href", r"/.*-lyrics$")?,
                Strategy::equals("search result", "div", "class", "search_result")?,
                Strategy::equals("song link", "a", "class", "song_link")?,
            ],
            title: vec![
                Strategy::pattern("song header", "h1", "class", r"SongHeader|song_header")?,
                Strategy::equals(
                    "cover art title",
                    "h1",
                    "class",
                    "header_with_cover_art-primary_info-title",
                )?,
                Strategy::equals("legacy title", "h1", "class", "song_title")?,
                Strategy::any("first heading", "h1")?,
            ],
            artist: vec![
                Strategy::pattern("header artist", "a", "class", r"HeaderArtist|artist_link")?,
                Strategy::pattern("artist href", "a", "href", r"/artists/")?,
                Strategy::equals("legacy artist span", "span", "class", "song_artist")?,
                Strategy::equals("legacy artist link", "a", "class", "song_artist")?,
            ],
            album: vec![Strategy::pattern("album href", "a", "href", r"/albums/")?],
            lyrics: vec![
                Strategy::equals(DATA_CONTAINER_STRATEGY, "div", "data-lyrics-container", "true")?,
                Strategy::pattern("lyrics class", "div", "class", r"(?i)lyrics")?,
                Strategy::equals("legacy lyrics", "div", "class", "lyrics")?,
                Strategy::equals("legacy song body", "div", "class", "song_body-lyrics")?,
            ],
            any_link: parse_selector("a[href]")?,
            fallback_containers: parse_selector("div, section, article, span")?,
            lyrics_class: Regex::new(r"(?i)lyrics")
                .map_err(|e| ScrapeError::Parse(e.to_string()))?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

// Result cards that are not anchors carry their link on a descendant.
fn result_href<'a>(el: &ElementRef<'a>, any_link: &Selector) -> Option<&'a str> {
    el.value().attr("href").or_else(|| {
        el.select(any_link)
            .next()
            .and_then(|link| link.value().attr("href"))
    })
}

fn is_path_relative(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

fn field_text(doc: &Html, strategies: &[Strategy], field: &str) -> Option<String> {
    match first_match(doc, strategies) {
        Some((strategy, el)) => {
            debug!("Field '{}' matched strategy '{}'", field, strategy.name);
            let text = render_text(el).trim().to_string();
            Some(text).filter(|t| !t.is_empty())
        }
        None => {
            debug!("No strategy matched field '{}'", field);
            None
        }
    }
}
