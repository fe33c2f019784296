//! Stale-response discarding.
//!
//! Asynchronous responses can arrive out of order. Each request is tagged
//! with a monotonically increasing sequence number at issue time; a
//! response is applied only if its number is higher than everything applied
//! so far. Late responses for superseded requests are detected on arrival
//! and dropped, never applied.
//!
//! This is the correctness half of the search story. Debouncing is a timing
//! concern owned by the calling layer and deliberately absent here.

/// Issue/admit counter implementing the sequence-token discard policy.
///
/// Callers hold it behind the same lock as the state it protects, so
/// `issue` and `admit` are already serialized with the state updates they
/// guard.
#[derive(Debug, Default)]
pub struct StaleGuard {
    issued: u64,
    applied: u64,
}

impl StaleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags a new outbound request. Later calls always return larger
    /// numbers.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Decides whether the response tagged `seq` may be applied. Admits
    /// only if `seq` is newer than every response applied so far, and
    /// records it as applied when admitted.
    pub fn admit(&mut self, seq: u64) -> bool {
        if seq > self.applied {
            self.applied = seq;
            true
        } else {
            false
        }
    }

    /// The most recently issued sequence number.
    pub fn current(&self) -> u64 {
        self.issued
    }
}
