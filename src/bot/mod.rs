//! Chat command layer: turns commands into scraper calls and formats replies.

pub mod catalog;
pub mod command;
pub mod reply;

pub use command::{Command, CommandError, PlaylistAction};
pub use reply::{Embed, EmbedField, Reply};

use crate::core::{LyricsSite, ScrapeError};
use crate::playlist::{ChannelId, PlaylistStore};
use crate::utils::chunk_text;
use std::sync::Arc;
use tracing::{info, warn};

const TRACK_COLOR: u32 = 0x1DB954;
const RECOMMEND_COLOR: u32 = 0xFF6B6B;
const MOOD_COLOR: u32 = 0x9B59B6;
const PLAYLIST_COLOR: u32 = 0x3498DB;
const HELP_COLOR: u32 = 0xE74C3C;

#[derive(Debug, Clone)]
pub struct BotSettings {
    pub prefix: String,
    pub chunk_size: usize,
    pub max_chunks: usize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            prefix: "/".to_string(),
            chunk_size: 1900,
            max_chunks: 3,
        }
    }
}

pub struct KaraokeBot {
    site: Arc<dyn LyricsSite>,
    playlists: PlaylistStore,
    settings: BotSettings,
}

impl KaraokeBot {
    pub fn new(site: Arc<dyn LyricsSite>, settings: BotSettings) -> Self {
        Self {
            site,
            playlists: PlaylistStore::new(),
            settings,
        }
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    /// Replies to one chat message. Messages without the prefix get no reply.
    pub async fn handle_message(&self, channel: ChannelId, message: &str) -> Vec<Reply> {
        match Command::parse(message, &self.settings.prefix) {
            Ok(command) => self.execute(channel, command).await,
            Err(CommandError::NotACommand) => Vec::new(),
            Err(CommandError::Unknown(name)) => {
                info!("Unknown command '{}' in channel {}", name, channel);
                vec![Reply::text(format!(
                    "❌ Command not found! Use `{}help` to see available commands.",
                    self.settings.prefix
                ))]
            }
            Err(CommandError::MissingArgument(_)) => vec![Reply::text(format!(
                "❌ Missing required argument! Use `{}help` for command usage.",
                self.settings.prefix
            ))],
        }
    }

    pub async fn execute(&self, channel: ChannelId, command: Command) -> Vec<Reply> {
        match command {
            Command::Lyrics(song) => self.lyrics(&song).await,
            Command::Track(song) => self.track(&song).await,
            Command::Recommend(genre) => vec![self.recommend(genre.as_deref())],
            Command::Mood(mood) => vec![self.mood(mood.as_deref())],
            Command::Playlist(action) => vec![self.playlist(channel, action).await],
            Command::Help => vec![self.help()],
        }
    }

    async fn lyrics(&self, song: &str) -> Vec<Reply> {
        let mut replies = vec![Reply::text(format!(
            "🎵 Searching for lyrics: **{}**...",
            song
        ))];

        let url = match self.site.locate(song).await {
            Ok(url) => url,
            Err(e) if e.is_not_found() => {
                replies.push(Reply::text(format!(
                    "❌ Couldn't find lyrics for '{}'. Try a different search term!",
                    song
                )));
                return replies;
            }
            Err(e) => {
                replies.push(lyrics_error(&e));
                return replies;
            }
        };

        let lyrics = match self.site.lyrics(&url).await {
            Ok(lyrics) => lyrics,
            Err(e) if e.is_not_found() => {
                replies.push(Reply::text(format!(
                    "❌ Found the song but couldn't extract lyrics for '{}'",
                    song
                )));
                return replies;
            }
            Err(e) => {
                replies.push(lyrics_error(&e));
                return replies;
            }
        };

        if lyrics.chars().count() <= self.settings.chunk_size {
            replies.push(Reply::text(format!(
                "🎤 **Lyrics for {}:**\n```\n{}\n```",
                song, lyrics
            )));
            return replies;
        }

        replies.push(Reply::text(format!("🎤 **Lyrics for {}:**", song)));
        let chunks = chunk_text(&lyrics, self.settings.chunk_size);
        let total = chunks.len();
        for chunk in chunks.into_iter().take(self.settings.max_chunks) {
            replies.push(Reply::text(format!("```\n{}\n```", chunk)));
        }
        if total > self.settings.max_chunks {
            replies.push(Reply::text(
                "... (lyrics too long, showing first part only)",
            ));
        }

        replies
    }

    async fn track(&self, song: &str) -> Vec<Reply> {
        let mut replies = vec![Reply::text(format!(
            "🔍 Searching for track info: **{}**...",
            song
        ))];

        let url = match self.site.locate(song).await {
            Ok(url) => url,
            Err(e) if e.is_not_found() => {
                replies.push(Reply::text(format!(
                    "❌ Couldn't find track info for '{}'",
                    song
                )));
                return replies;
            }
            Err(e) => {
                replies.push(track_error(&e));
                return replies;
            }
        };

        match self.site.track_info(&url).await {
            Ok(info) => replies.push(Reply::Embed(
                Embed::new("🎵 Track Information", TRACK_COLOR)
                    .field("Title", info.title, true)
                    .field("Artist", info.artist, true)
                    .field("Album", info.album, true)
                    .field(
                        format!("{} Link", self.site.name()),
                        format!("[View on {}]({})", self.site.name(), info.url),
                        false,
                    ),
            )),
            Err(e) if e.is_not_found() => replies.push(Reply::text(format!(
                "❌ Found the song but couldn't extract info for '{}'",
                song
            ))),
            Err(e) => replies.push(track_error(&e)),
        }

        replies
    }

    fn recommend(&self, genre: Option<&str>) -> Reply {
        let Some(genre) = genre else {
            return Reply::text(format!(
                "Please specify a genre! Usage: `{p}recommend <genre>`\nExample: `{p}recommend pop`",
                p = self.settings.prefix
            ));
        };

        match catalog::genre(genre) {
            Some(songs) => Reply::Embed(
                numbered(
                    Embed::new(
                        format!("🎵 {} Recommendations", title_case(genre)),
                        RECOMMEND_COLOR,
                    ),
                    songs.iter().copied(),
                )
                .footer(self.lyrics_footer()),
            ),
            None => Reply::text(format!(
                "❌ Genre '{}' not available. Try one of: {}",
                genre,
                catalog::names(catalog::GENRES)
            )),
        }
    }

    fn mood(&self, mood: Option<&str>) -> Reply {
        let Some(mood) = mood else {
            return Reply::text(format!(
                "Tell me your mood! Usage: `{p}mood <your mood>`\nExample: `{p}mood happy`, `{p}mood sad`, `{p}mood energetic`",
                p = self.settings.prefix
            ));
        };

        match catalog::mood(mood) {
            Some((name, songs)) => Reply::Embed(
                numbered(
                    Embed::new(format!("🎭 Songs for {} Mood", title_case(name)), MOOD_COLOR),
                    songs.iter().copied(),
                )
                .footer(self.lyrics_footer()),
            ),
            None => Reply::text(format!(
                "❌ I don't have songs for '{}' mood yet. Try one of: {}",
                mood,
                catalog::names(catalog::MOODS)
            )),
        }
    }

    async fn playlist(&self, channel: ChannelId, action: PlaylistAction) -> Reply {
        match action {
            PlaylistAction::Add(song) => {
                self.playlists.add(channel, song.clone()).await;
                Reply::text(format!("✅ Added '{}' to the playlist!", song))
            }
            PlaylistAction::Remove(song) => {
                if self.playlists.remove(channel, &song).await {
                    Reply::text(format!("✅ Removed '{}' from the playlist!", song))
                } else {
                    Reply::text(format!("❌ '{}' not found in the playlist!", song))
                }
            }
            PlaylistAction::View => {
                let songs = self.playlists.view(channel).await;
                if songs.is_empty() {
                    Reply::text(format!(
                        "📭 Playlist is empty! Use `{}playlist add <song name>` to add songs.",
                        self.settings.prefix
                    ))
                } else {
                    Reply::Embed(numbered(
                        Embed::new("🎵 Current Playlist", PLAYLIST_COLOR),
                        songs.iter().map(String::as_str),
                    ))
                }
            }
            PlaylistAction::Clear => {
                self.playlists.clear(channel).await;
                Reply::text("🗑️ Playlist cleared!")
            }
            PlaylistAction::Usage => Reply::text(format!(
                "Usage: `{p}playlist [add/remove/view/clear] [song name]`\nExamples:\n`{p}playlist add Bohemian Rhapsody`\n`{p}playlist view`\n`{p}playlist remove Bohemian Rhapsody`",
                p = self.settings.prefix
            )),
        }
    }

    fn help(&self) -> Reply {
        let p = &self.settings.prefix;
        Reply::Embed(
            Embed::new("🎤 KaraokeBot Commands", HELP_COLOR)
                .description("Your virtual karaoke companion!")
                .field(format!("🎵 {}lyrics <song name>", p), "Fetch and display song lyrics", false)
                .field(
                    format!("🔍 {}track <song name>", p),
                    "Get detailed track information (artist, album, etc.)",
                    false,
                )
                .field(
                    format!("🎲 {}recommend <genre>", p),
                    format!(
                        "Get 5 popular songs in a specific genre\nGenres: {}",
                        catalog::names(catalog::GENRES)
                    ),
                    false,
                )
                .field(
                    format!("🎭 {}mood <your mood>", p),
                    format!(
                        "Get songs based on your current mood\nMoods: {}",
                        catalog::names(catalog::MOODS)
                    ),
                    false,
                )
                .field(
                    format!("📋 {}playlist [add/remove/view/clear] [song name]", p),
                    "Manage this channel's shared playlist",
                    false,
                )
                .field(format!("❓ {}help", p), "Show this help message", false)
                .footer("🎵 Happy singing! 🎵"),
        )
    }

    fn lyrics_footer(&self) -> String {
        format!(
            "Use {}lyrics <song name> to get lyrics for any of these songs!",
            self.settings.prefix
        )
    }
}

fn lyrics_error(e: &ScrapeError) -> Reply {
    warn!("Lyrics command failed: {}", e);
    Reply::text(format!("❌ An error occurred while fetching lyrics: {}", e))
}

fn track_error(e: &ScrapeError) -> Reply {
    warn!("Track command failed: {}", e);
    Reply::text(format!("❌ An error occurred while fetching track info: {}", e))
}

fn numbered<'a>(embed: Embed, items: impl Iterator<Item = &'a str>) -> Embed {
    items
        .enumerate()
        .fold(embed, |embed, (i, item)| embed.field(format!("{}.", i + 1), item, false))
}

fn title_case(s: &str) -> String {
    s.split_inclusive(|c: char| !c.is_alphanumeric())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}
