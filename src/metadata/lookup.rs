//! Lookup over a set of candidate metadata files
//!
//! The same engine serves both deployment shapes: scanning every account's
//! file and degrading to a default duration, or being bound to one file and
//! surfacing every miss to the caller. The difference is a policy, not a
//! second engine.

use std::path::PathBuf;

use crate::{
    domain::track::TrackInfo,
    metadata::{error::LookupError, parser},
};

/// Five minutes; longer than most tracks, used when no file knows the track.
pub const DEFAULT_FALLBACK_SECS: u32 = 5 * 60;

/// What to do when no candidate file yields a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    /// Answer with the fallback duration and an empty album. Only those
    /// two fields are defaulted; a submission built from the fallback
    /// still carries the artist, track and configured source tag.
    FallbackOnMiss,
    /// Surface the last per-file error to the caller.
    FailOnMiss,
}

/// Main structure resolving track metadata across candidate files
#[derive(Debug)]
pub struct MetadataLookup {
    files: Vec<PathBuf>,
    policy: MissPolicy,
    fallback_secs: u32,
}

impl MetadataLookup {
    pub fn new(files: Vec<PathBuf>, policy: MissPolicy) -> Self {
        Self {
            files,
            policy,
            fallback_secs: DEFAULT_FALLBACK_SECS,
        }
    }

    pub fn with_fallback_secs(mut self, fallback_secs: u32) -> Self {
        self.fallback_secs = fallback_secs;
        self
    }

    /// Tries each candidate file in order and returns the first hit. Every
    /// file is opened fresh and closed before moving on; nothing is cached
    /// between calls.
    pub fn lookup(&self, artist: &str, track: &str) -> Result<TrackInfo, LookupError> {
        let mut last_miss = None;

        for path in &self.files {
            match parser::lookup_in_file(path, artist, track) {
                Ok(info) => return Ok(info),
                Err(err) if err.is_miss() => {
                    log::debug!("no result in {}: {err}", path.to_string_lossy());
                    last_miss = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        match self.policy {
            MissPolicy::FallbackOnMiss => {
                log::info!(
                    "no metadata for '{artist}' - '{track}', falling back to {} s",
                    self.fallback_secs
                );
                Ok(TrackInfo::new(self.fallback_secs, ""))
            }
            MissPolicy::FailOnMiss => Err(last_miss.unwrap_or(LookupError::TrackNotFound {
                artist: artist.to_owned(),
                track: track.to_owned(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{DEFAULT_FALLBACK_SECS, MetadataLookup, MissPolicy};
    use crate::metadata::error::LookupError;

    const D: char = '\u{1}';

    fn hash(c: char) -> String {
        c.to_string().repeat(32)
    }

    fn metadata_with_track(dir: &TempDir, name: &str, artist: &str, track: &str) -> PathBuf {
        let a = hash('a');
        let c = hash('c');
        let long = "f".repeat(40);
        let content = format!(
            "21\n{a}{D}{artist}\n\n{c}{D}Singles\n\n{b}{D}{track}{D}{a}{D}{long}{D}371{D}1{D}{c}\n\n",
            b = hash('b'),
        );
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn first_file_with_a_hit_wins() {
        let dir = TempDir::new().unwrap();
        let miss = metadata_with_track(&dir, "m1", "Eno", "Discreet Music");
        let hit = metadata_with_track(&dir, "m2", "Bowie", "Heroes");

        let lookup = MetadataLookup::new(vec![miss, hit], MissPolicy::FailOnMiss);

        let info = lookup.lookup("Bowie", "Heroes").unwrap();
        assert_eq!(info.duration_secs, 371);
        assert_eq!(info.album, "Singles");
    }

    #[test]
    fn unreadable_candidates_are_skipped() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let hit = metadata_with_track(&dir, "m", "Bowie", "Heroes");

        let lookup = MetadataLookup::new(vec![missing, hit], MissPolicy::FailOnMiss);

        assert!(lookup.lookup("Bowie", "Heroes").is_ok());
    }

    #[test]
    fn fallback_policy_defaults_duration_and_album() {
        let dir = TempDir::new().unwrap();
        let miss = metadata_with_track(&dir, "m", "Eno", "Discreet Music");

        let lookup = MetadataLookup::new(vec![miss], MissPolicy::FallbackOnMiss);

        let info = lookup.lookup("Bowie", "Heroes").unwrap();
        assert_eq!(info.duration_secs, DEFAULT_FALLBACK_SECS);
        assert_eq!(info.album, "");
    }

    #[test]
    fn fallback_applies_with_no_candidates_at_all() {
        let lookup = MetadataLookup::new(vec![], MissPolicy::FallbackOnMiss);

        let info = lookup.lookup("Bowie", "Heroes").unwrap();
        assert_eq!(info.duration_secs, DEFAULT_FALLBACK_SECS);
    }

    #[test]
    fn strict_policy_surfaces_the_miss() {
        let dir = TempDir::new().unwrap();
        let file = metadata_with_track(&dir, "m", "Bowie", "Heroes");

        let lookup = MetadataLookup::new(vec![file], MissPolicy::FailOnMiss);

        let err = lookup.lookup("Bowie", "Ashes to Ashes").unwrap_err();
        assert!(matches!(err, LookupError::TrackNotFound { .. }));

        let err = lookup.lookup("Prince", "Kiss").unwrap_err();
        assert!(matches!(err, LookupError::ArtistNotFound { .. }));
    }

    #[test]
    fn custom_fallback_duration_is_used() {
        let lookup =
            MetadataLookup::new(vec![], MissPolicy::FallbackOnMiss).with_fallback_secs(42);

        let info = lookup.lookup("Bowie", "Heroes").unwrap();
        assert_eq!(info.duration_secs, 42);
    }
}
