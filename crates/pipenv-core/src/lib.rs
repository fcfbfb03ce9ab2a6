//! Pipfile-driven dependency installation for test environments
//!
//! Before a test environment runs its commands, this crate decides whether
//! `pipenv` should install the environment's dependencies, which manifest
//! and lock artifacts are authoritative, and the exact command line and
//! environment to run it with.
//!
//! # Flow
//!
//! 1. [`skip`] decides whether the engine acts at all
//! 2. [`resolver`] locates the project's `Pipfile` / `Pipfile.lock`
//! 3. [`cloner`] copies them into the environment's private directory
//! 4. [`planner`] builds the [`InvocationPlan`]
//! 5. [`environment`] composes the subprocess environment
//! 6. [`orchestrator`] runs the plan and promotes fresh locks back
//!
//! Process execution and activity reporting are injected through the
//! [`ProcessRunner`] and [`ActivityReporter`] traits.

pub mod activity;
pub mod artifact;
pub mod cloner;
pub mod config;
pub mod environment;
pub mod error;
pub mod locator;
pub mod orchestrator;
pub mod planner;
pub mod provider;
pub mod resolver;
pub mod runner;
pub mod skip;

pub use activity::{ActivityReporter, RecordingReporter, TracingReporter};
pub use artifact::{ArtifactScope, LockArtifact, LockTier, Manifest, ResolutionResult};
pub use cloner::ClonedArtifacts;
pub use config::{EngineConfig, EnvSettings, HostSettings, NamingScheme};
pub use error::{Error, Result};
pub use orchestrator::{CompletedRun, HookOutcome, InstallOrchestrator, InstallState, Preview};
pub use planner::{InvocationPlan, Subcommand};
pub use provider::DependencyProvider;
pub use runner::{ProcessOutput, ProcessRunner, SystemRunner};
pub use skip::{SkipDecision, SkipReason};
