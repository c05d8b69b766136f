/// Metadata resolved for a playing track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    /// Track length in seconds, always strictly positive
    pub duration_secs: u32,
    /// Album title; empty when the album record could not be resolved
    pub album: String,
}

impl TrackInfo {
    pub fn new(duration_secs: u32, album: impl Into<String>) -> Self {
        Self {
            duration_secs,
            album: album.into(),
        }
    }
}
