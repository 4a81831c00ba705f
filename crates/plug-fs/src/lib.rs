//! Filesystem layer for plug
//!
//! Provides atomic file writes, content checksums, and project-root
//! discovery. Everything above this crate treats the filesystem through
//! these primitives.

pub mod checksum;
pub mod error;
pub mod io;
pub mod layout;

pub use error::{Error, Result};
pub use layout::{PROJECT_MARKER, find_project_root};
