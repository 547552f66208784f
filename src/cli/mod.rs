use crate::bot::{Command, KaraokeBot};
use crate::config::Config;
use crate::core::{HttpClient, LyricsSite};
use crate::extractors::GeniusExtractor;
use crate::playlist::ChannelId;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "karaoke-bot")]
#[command(about = "Karaoke companion: lyrics, track info and shared playlists")]
#[command(version)]
pub struct Cli {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Print the result page URL for a query
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Fetch and print song lyrics
    Lyrics {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Fetch title, artist and album
    Track {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the track as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read chat commands from stdin and answer them
    Chat {
        /// Channel the messages are posted in
        #[arg(long, default_value = "0")]
        channel: u64,
    },
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        let http = Arc::new(HttpClient::new(
            config.user_agent.clone(),
            config.accept_language.clone(),
        ));
        let site = Arc::new(GeniusExtractor::with_base_url(http.clone(), &config.base_url)?);
        let bot = KaraokeBot::new(site.clone(), config.bot_settings());

        let result = self.dispatch(&site, &bot).await;

        http.close();
        result
    }

    async fn dispatch(&self, site: &GeniusExtractor, bot: &KaraokeBot) -> Result<()> {
        match &self.command {
            CliCommand::Search { query } => {
                let url = site.locate(&query.join(" ")).await?;
                println!("{}", url);
            }
            CliCommand::Lyrics { query } => {
                print_replies(bot, Command::Lyrics(query.join(" "))).await;
            }
            CliCommand::Track { query, json } => {
                if *json {
                    let url = site.locate(&query.join(" ")).await?;
                    let info = site.track_info(&url).await?;
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    print_replies(bot, Command::Track(query.join(" "))).await;
                }
            }
            CliCommand::Chat { channel } => {
                let input = BufReader::new(tokio::io::stdin());
                let mut output = tokio::io::stdout();
                chat(bot, ChannelId(*channel), input, &mut output, ctrl_c()).await?
            }
        }

        Ok(())
    }
}

async fn print_replies(bot: &KaraokeBot, command: Command) {
    for reply in bot.execute(ChannelId(0), command).await {
        print!("{}", reply);
    }
}

async fn chat<R, W, S>(
    bot: &KaraokeBot,
    channel: ChannelId,
    input: R,
    output: &mut W,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    info!("Bot is ready to serve karaoke in channel {}", channel);

    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted, shutting down");
                break;
            }
            line = lines.next_line() => match line? {
                Some(line) => {
                    for reply in bot.handle_message(channel, &line).await {
                        output.write_all(reply.to_string().as_bytes()).await?;
                    }
                    output.flush().await?;
                }
                None => {
                    info!("Input closed, shutting down");
                    break;
                }
            },
        }
    }

    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Page, ScrapeError, Transport};
    use async_trait::async_trait;
    use url::Url;

    struct Offline;

    #[async_trait]
    impl Transport for Offline {
        async fn get(&self, url: &Url) -> crate::core::Result<Page> {
            Err(ScrapeError::Network(format!("offline: {}", url)))
        }
    }

    fn bot() -> KaraokeBot {
        let site = GeniusExtractor::new(Arc::new(Offline)).unwrap();
        KaraokeBot::new(Arc::new(site), Default::default())
    }

    #[tokio::test]
    async fn test_chat_answers_until_input_closes() -> Result<()> {
        let input = BufReader::new(&b"/playlist add Hey Jude\nhello\n/playlist view\n"[..]);
        let mut output = Vec::new();

        chat(&bot(), ChannelId(5), input, &mut output, std::future::pending()).await?;

        let text = String::from_utf8(output)?;
        assert!(text.contains("Added 'Hey Jude' to the playlist!"));
        assert!(text.contains("1. Hey Jude"));
        Ok(())
    }

    #[tokio::test]
    async fn test_chat_stops_on_shutdown_signal() -> Result<()> {
        // Writer half stays open, so the input never reaches EOF.
        let (_writer, reader) = tokio::io::duplex(64);
        let mut output = Vec::new();

        chat(
            &bot(),
            ChannelId(5),
            BufReader::new(reader),
            &mut output,
            std::future::ready(()),
        )
        .await?;

        assert!(output.is_empty());
        Ok(())
    }
}
