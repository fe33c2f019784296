//! The access gate.
//!
//! Pure, total functions deriving access-control decisions from current
//! state. No network access, no memoization; recomputed on every state
//! change.

/// Whether a course video may be played (i.e. a signed playback URL may be
/// requested). Every video of an enrolled course is playable; locked
/// content never gets a signed URL request.
pub fn is_playable(enrolled: bool) -> bool {
    enrolled
}

/// Whether the course certificate may be requested. Requires the full
/// course to be complete.
pub fn is_certificate_eligible(progress_percent: u8) -> bool {
    progress_percent >= 100
}
