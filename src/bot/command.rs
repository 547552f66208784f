use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lyrics(String),
    Track(String),
    Recommend(Option<String>),
    Mood(Option<String>),
    Playlist(PlaylistAction),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistAction {
    Add(String),
    Remove(String),
    View,
    Clear,
    Usage,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("message is not a command")]
    NotACommand,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),
}

impl Command {
    /// Parse a chat message such as `/playlist add Bohemian Rhapsody`.
    pub fn parse(message: &str, prefix: &str) -> Result<Self, CommandError> {
        let body = message
            .trim()
            .strip_prefix(prefix)
            .ok_or(CommandError::NotACommand)?;

        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };
        let rest = Some(rest).filter(|r| !r.is_empty());

        match name {
            "lyrics" => rest
                .map(|song| Command::Lyrics(song.to_string()))
                .ok_or(CommandError::MissingArgument("song_name")),
            "track" => rest
                .map(|song| Command::Track(song.to_string()))
                .ok_or(CommandError::MissingArgument("song_name")),
            "recommend" => Ok(Command::Recommend(
                rest.and_then(|r| r.split_whitespace().next())
                    .map(str::to_string),
            )),
            "mood" => Ok(Command::Mood(rest.map(str::to_string))),
            "playlist" => Ok(Command::Playlist(PlaylistAction::parse(rest))),
            "help" => Ok(Command::Help),
            "" => Err(CommandError::NotACommand),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl PlaylistAction {
    fn parse(args: Option<&str>) -> Self {
        let Some(args) = args else {
            return PlaylistAction::View;
        };

        let (action, song) = match args.split_once(char::is_whitespace) {
            Some((action, song)) => (action, Some(song.trim()).filter(|s| !s.is_empty())),
            None => (args, None),
        };

        match (action, song) {
            ("add", Some(song)) => PlaylistAction::Add(song.to_string()),
            ("remove", Some(song)) => PlaylistAction::Remove(song.to_string()),
            ("view", _) => PlaylistAction::View,
            ("clear", _) => PlaylistAction::Clear,
            _ => PlaylistAction::Usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lyrics_keeps_whole_query() {
        assert_eq!(
            Command::parse("/lyrics  Bohemian Rhapsody ", "/"),
            Ok(Command::Lyrics("Bohemian Rhapsody".to_string()))
        );
    }

    #[test]
    fn test_missing_song_name() {
        assert_eq!(
            Command::parse("/track", "/"),
            Err(CommandError::MissingArgument("song_name"))
        );
    }

    #[test]
    fn test_recommend_takes_single_word() {
        assert_eq!(
            Command::parse("/recommend rock please", "/"),
            Ok(Command::Recommend(Some("rock".to_string())))
        );
        assert_eq!(Command::parse("/recommend", "/"), Ok(Command::Recommend(None)));
    }

    #[test]
    fn test_playlist_actions() {
        let parse = |line: &str| match Command::parse(line, "/") {
            Ok(Command::Playlist(action)) => action,
            other => panic!("unexpected {:?}", other),
        };

        assert_eq!(parse("/playlist"), PlaylistAction::View);
        assert_eq!(parse("/playlist view"), PlaylistAction::View);
        assert_eq!(parse("/playlist clear"), PlaylistAction::Clear);
        assert_eq!(
            parse("/playlist add Hey Jude"),
            PlaylistAction::Add("Hey Jude".to_string())
        );
        assert_eq!(
            parse("/playlist remove Hey Jude"),
            PlaylistAction::Remove("Hey Jude".to_string())
        );
        assert_eq!(parse("/playlist add"), PlaylistAction::Usage);
        assert_eq!(parse("/playlist shuffle"), PlaylistAction::Usage);
    }

    #[test]
    fn test_prefix_and_unknown_commands() {
        assert_eq!(Command::parse("hello there", "/"), Err(CommandError::NotACommand));
        assert_eq!(Command::parse("!help", "!"), Ok(Command::Help));
        assert_eq!(
            Command::parse("/dance", "/"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
