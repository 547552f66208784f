//! Per-channel shared playlists, kept in memory for the life of the process.
//!
//! Each channel has its own lock, so commands for different channels never
//! contend. A single operation is atomic, but a command that reads a playlist
//! and then writes it in a second call can lose a concurrent update from the
//! same channel.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Guild or direct-message channel a playlist belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
pub struct PlaylistStore {
    channels: RwLock<HashMap<ChannelId, Arc<Mutex<Vec<String>>>>>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn playlist(&self, channel: ChannelId) -> Arc<Mutex<Vec<String>>> {
        if let Some(existing) = self.channels.read().await.get(&channel) {
            return existing.clone();
        }

        self.channels
            .write()
            .await
            .entry(channel)
            .or_default()
            .clone()
    }

    pub async fn add(&self, channel: ChannelId, song: impl Into<String>) {
        self.playlist(channel).await.lock().await.push(song.into());
    }

    /// Remove the first entry equal to `song`. Returns whether one was removed.
    pub async fn remove(&self, channel: ChannelId, song: &str) -> bool {
        let playlist = self.playlist(channel).await;
        let mut songs = playlist.lock().await;
        match songs.iter().position(|s| s == song) {
            Some(index) => {
                songs.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn view(&self, channel: ChannelId) -> Vec<String> {
        self.playlist(channel).await.lock().await.clone()
    }

    pub async fn clear(&self, channel: ChannelId) {
        self.playlist(channel).await.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANNEL: ChannelId = ChannelId(42);

    #[test]
    fn test_add_keeps_order_and_duplicates() {
        tokio_test::block_on(async {
            let store = PlaylistStore::new();
            store.add(CHANNEL, "A").await;
            store.add(CHANNEL, "B").await;
            store.add(CHANNEL, "A").await;
            assert_eq!(store.view(CHANNEL).await, vec!["A", "B", "A"]);
        });
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        tokio_test::block_on(async {
            let store = PlaylistStore::new();
            store.add(CHANNEL, "A").await;
            store.add(CHANNEL, "B").await;
            store.add(CHANNEL, "A").await;

            assert!(store.remove(CHANNEL, "A").await);
            assert_eq!(store.view(CHANNEL).await, vec!["B", "A"]);
            assert!(!store.remove(CHANNEL, "missing").await);
        });
    }

    #[test]
    fn test_channels_are_isolated() {
        tokio_test::block_on(async {
            let store = PlaylistStore::new();
            store.add(CHANNEL, "A").await;
            store.clear(ChannelId(7)).await;

            assert_eq!(store.view(CHANNEL).await, vec!["A"]);
            assert!(store.view(ChannelId(7)).await.is_empty());
        });
    }

    #[test]
    fn test_clear_empties() {
        tokio_test::block_on(async {
            let store = PlaylistStore::new();
            store.add(CHANNEL, "A").await;
            store.clear(CHANNEL).await;
            assert!(store.view(CHANNEL).await.is_empty());
        });
    }
}
