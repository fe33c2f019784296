//! Use-case layer of the Devlaunch client.
//!
//! Orchestrates the core domain (session store, access gate, stale-response
//! guards) against the remote API seams. Everything here is driven by
//! discrete intents and mutates state only through the serialized
//! transitions each use case owns.

pub mod catalog_usecase;
pub mod course_usecase;
pub mod session_usecase;

#[cfg(test)]
mod test_support;

pub use catalog_usecase::{CatalogState, CatalogUseCase};
pub use course_usecase::{CourseDetailState, CourseUseCase, DetailPhase};
pub use session_usecase::SessionUseCase;
