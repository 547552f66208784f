pub mod bot;
pub mod cli;
pub mod config;
pub mod core;
pub mod extractors;
pub mod playlist;
pub mod utils;

pub use bot::{KaraokeBot, Reply};
pub use core::{HttpClient, LyricsSite, ScrapeError, TrackInfo, Transport};
pub use extractors::GeniusExtractor;
pub use playlist::{ChannelId, PlaylistStore};
