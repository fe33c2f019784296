pub mod api;
pub mod course;
pub mod error;
pub mod sequence;
pub mod session;

// Re-export common error type
pub use error::{DevlaunchError, Result};
