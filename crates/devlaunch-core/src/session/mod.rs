//! Session domain module.
//!
//! Everything about "who is logged in right now": the bearer token model,
//! the process-wide session store with its explicit transition set, and the
//! credential persistence seam.
//!
//! # Module Structure
//!
//! - `model`: session domain models (`Token`, `UserProfile`, `SessionSnapshot`)
//! - `store`: the single-writer session store (`SessionStore`)
//! - `credentials`: persistence trait for the stored token (`CredentialStore`)

mod credentials;
mod model;
mod store;

// Re-export public API
pub use credentials::CredentialStore;
pub use model::{SessionPhase, SessionSnapshot, Token, UserProfile};
pub use store::SessionStore;
