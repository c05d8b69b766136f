//! The boundary to the scrobble submission service
//!
//! Transport to the actual service lives behind the [`Submitter`] trait;
//! this crate only decides what to submit and when.

use crate::session::RequestId;

/// One scrobble submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub artist: String,
    pub track: String,
    pub album: String,
    pub genre: String,
    pub duration_secs: u32,
    /// Tag identifying where the scrobble came from
    pub source: String,
}

/// Asynchronous outcome reported by the submission service for an earlier
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub request_id: RequestId,
    pub is_error: bool,
    pub message: String,
}

/// Something that can forward scrobbles to the tracking service.
pub trait Submitter {
    /// Announces that a track started playing; returns the request id the
    /// service assigned to it.
    fn start(&mut self, request: SubmitRequest) -> anyhow::Result<RequestId>;

    /// Announces that playback stopped or paused.
    fn stop(&mut self) -> anyhow::Result<RequestId>;
}

/// Submitter that only logs what would be sent, handing out increasing
/// request ids. Used by the `watch` command.
#[derive(Debug, Default)]
pub struct LogSubmitter {
    next_id: RequestId,
}

impl Submitter for LogSubmitter {
    fn start(&mut self, request: SubmitRequest) -> anyhow::Result<RequestId> {
        self.next_id += 1;
        log::info!(
            "scrobble start #{}: {} - {} [{}] {} s (source {})",
            self.next_id,
            request.artist,
            request.track,
            request.album,
            request.duration_secs,
            request.source,
        );
        Ok(self.next_id)
    }

    fn stop(&mut self) -> anyhow::Result<RequestId> {
        self.next_id += 1;
        log::info!("scrobble stop #{}", self.next_id);
        Ok(self.next_id)
    }
}
