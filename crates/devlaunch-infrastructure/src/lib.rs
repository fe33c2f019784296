//! Storage layer for the Devlaunch client.
//!
//! Platform paths, credential persistence, and the client configuration
//! file.

pub mod config_storage;
pub mod credential_storage;
pub mod paths;

pub use config_storage::{ClientConfig, ConfigStorage};
pub use credential_storage::{FileCredentialStore, MemoryCredentialStore};
pub use paths::DevlaunchPaths;
