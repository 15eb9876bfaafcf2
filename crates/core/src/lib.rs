//! Reel core domain library.
//!
//! Pure types and logic shared by the CMS access layer and the HTTP
//! service: the `project` document model, its schema descriptor and
//! validator, slug derivation, and the core error type. No I/O lives here.

pub mod error;
pub mod project;
pub mod schema;
pub mod slug;
pub mod types;
