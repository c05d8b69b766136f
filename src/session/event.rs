//! Decoding of the player's now-playing announcements
//!
//! The player broadcasts text payloads shaped like
//! `\0Music\0<status>\0<format>\0<title>\0<artist>\0`, where `\0` is the
//! literal two-character sequence backslash-zero, and status `1` means
//! playing while `0` means paused or stopped (the two cannot be told
//! apart). How such payloads reach the process is not this crate's concern.

/// Two-character field delimiter of the now-playing payload.
const PAYLOAD_DELIMITER: &str = "\\0";
const PAYLOAD_KIND: &str = "Music";
const STATUS_PLAYING: &str = "1";

/// A decoded playback notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    TrackChanged { artist: String, track: String },
    PlaybackStopped,
}

impl PlayerEvent {
    /// Decodes a now-playing payload. Returns `None` for anything that is
    /// not a well-formed music payload.
    pub fn parse_now_playing(payload: &str) -> Option<Self> {
        let mut fields = payload.split(PAYLOAD_DELIMITER);

        // Payload starts with the delimiter, so the first field is empty
        if !fields.next()?.is_empty() || fields.next()? != PAYLOAD_KIND {
            return None;
        }

        if fields.next()? != STATUS_PLAYING {
            // Paused and stopped look the same on the wire
            return Some(PlayerEvent::PlaybackStopped);
        }

        let _format = fields.next()?;
        let track = fields.next()?;
        let artist = fields.next()?;

        Some(PlayerEvent::TrackChanged {
            artist: artist.to_owned(),
            track: track.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::PlayerEvent;

    #[test]
    fn parses_playing_payload() {
        let event =
            PlayerEvent::parse_now_playing(r"\0Music\01\0{0}\0Heroes\0David Bowie\0").unwrap();

        assert_eq!(
            event,
            PlayerEvent::TrackChanged {
                artist: "David Bowie".into(),
                track: "Heroes".into(),
            }
        );
    }

    #[test]
    fn parses_stopped_payload() {
        let event = PlayerEvent::parse_now_playing(r"\0Music\00\0{0}\0\0\0").unwrap();

        assert_eq!(event, PlayerEvent::PlaybackStopped);
    }

    #[test]
    fn rejects_non_music_payloads() {
        assert_eq!(PlayerEvent::parse_now_playing(r"\0Games\01\0x\0y\0z\0"), None);
        assert_eq!(PlayerEvent::parse_now_playing("Music without delimiters"), None);
        assert_eq!(PlayerEvent::parse_now_playing(""), None);
    }

    #[test]
    fn rejects_truncated_playing_payload() {
        assert_eq!(PlayerEvent::parse_now_playing(r"\0Music\01\0{0}"), None);
    }
}
