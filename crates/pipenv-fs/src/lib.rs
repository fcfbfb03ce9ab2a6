//! Filesystem primitives for the tox-pipenv engine
//!
//! Provides normalized path handling, atomic copy/write operations used when
//! cloning and promoting Pipfile artifacts, checksums, and settings loading.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::SettingsStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
