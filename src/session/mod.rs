pub mod controller;
pub mod error;
pub mod event;
pub mod submit;

/// Identifier the submission service assigns to an in-flight scrobble.
pub type RequestId = i32;

/// Sentinel meaning no scrobble is currently in flight.
pub const NO_REQUEST: RequestId = -1;
