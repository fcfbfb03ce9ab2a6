//! Shared test utilities for the tox-pipenv workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for project layouts with
//!   Pipfiles, locks and host settings
//! - [`launcher`]: a scripted stand-in for `python -m pipenv` that records
//!   its invocations

pub mod launcher;
pub mod project;

pub use launcher::Invocation;
pub use project::TestProject;
