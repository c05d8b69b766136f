//! The scrobble session controller
//!
//! Owns the single piece of mutable state in the crate: the id of the
//! scrobble currently in flight. At most one logical session is active at
//! a time; starting a new one stops the previous one first.

use crate::{
    metadata::lookup::MetadataLookup,
    session::{
        NO_REQUEST, RequestId,
        error::SessionError,
        event::PlayerEvent,
        submit::{StatusUpdate, SubmitRequest, Submitter},
    },
};

pub struct ScrobbleSession<S> {
    lookup: MetadataLookup,
    submitter: S,
    source_tag: String,
    current_request: RequestId,
}

impl<S: Submitter> ScrobbleSession<S> {
    pub fn new(lookup: MetadataLookup, submitter: S, source_tag: impl Into<String>) -> Self {
        Self {
            lookup,
            submitter,
            source_tag: source_tag.into(),
            current_request: NO_REQUEST,
        }
    }

    /// Starts scrobbling a track, stopping any active session first.
    ///
    /// The metadata lookup runs between the implicit stop and the new
    /// submission, so a lookup failure leaves the session idle even though
    /// the caller wanted playback to start.
    pub fn start(&mut self, artist: &str, track: &str) -> Result<RequestId, SessionError> {
        if self.current_request > 0 {
            self.stop()?;
        }

        let info = self.lookup.lookup(artist, track)?;

        let request_id = self.submitter.start(SubmitRequest {
            artist: artist.to_owned(),
            track: track.to_owned(),
            album: info.album,
            genre: String::new(),
            duration_secs: info.duration_secs,
            source: self.source_tag.clone(),
        })?;

        self.current_request = request_id;
        Ok(request_id)
    }

    /// Stops (or pauses) the current scrobble. Safe to call while idle.
    pub fn stop(&mut self) -> Result<RequestId, SessionError> {
        self.current_request = NO_REQUEST;
        Ok(self.submitter.stop()?)
    }

    /// Routes a decoded playback notification to start or stop.
    pub fn handle_event(&mut self, event: &PlayerEvent) -> Result<RequestId, SessionError> {
        match event {
            PlayerEvent::TrackChanged { artist, track } => self.start(artist, track),
            PlayerEvent::PlaybackStopped => self.stop(),
        }
    }

    /// Applies an asynchronous outcome reported by the submission service.
    /// Errors are fatal to the session's caller and never retried here.
    pub fn handle_status(&mut self, status: StatusUpdate) -> Result<(), SessionError> {
        if status.is_error {
            return Err(SessionError::Submission {
                request_id: status.request_id,
                message: status.message,
            });
        }
        Ok(())
    }

    pub fn current_request(&self) -> RequestId {
        self.current_request
    }

    pub fn is_active(&self) -> bool {
        self.current_request > 0
    }
}
