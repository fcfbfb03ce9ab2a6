//! Engine configuration
//!
//! Configuration comes from two places:
//!
//! 1. **Process-wide** - [`EngineConfig`], derived once per run from the
//!    process environment (`PIPENV_PIPFILE`, `TOX_PIPENV_INSTALL_CMD`,
//!    `TOX_PIPENV_INSTALL_OPTS`) and the host's global flags
//! 2. **Per-environment** - [`EnvSettings`], one table per test environment
//!    in the host settings file
//!
//! Components receive both by reference; none of them read ambient process
//! state on their own.

mod engine;
mod naming;
mod settings;

pub use engine::{
    DEFAULT_LAUNCHER, ENV_INSTALL_CMD, ENV_INSTALL_OPTS, ENV_PIPENV_PIPFILE, EngineConfig,
};
pub use naming::{DEFAULT_MANIFEST, LockCandidate, NamingScheme};
pub use settings::{DEFAULT_INSTALL_COMMAND, EnvSettings, HostSettings};
