//! Shared error classification.
//!
//! Every error type in this crate carries a grepable code and a retryable
//! flag so dashboard views can decide between a retry affordance and a hard
//! error state without matching on individual variants.

/// Stable classification for errors surfaced to view collaborators.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
