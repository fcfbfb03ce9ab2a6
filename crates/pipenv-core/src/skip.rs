//! Whether the engine should act for an environment at all
//!
//! The policy returns a tagged [`SkipDecision`] instead of signalling skips
//! through errors. A skip is informational; a skip that would silently
//! swallow an explicit update or lock request becomes a failure.

use crate::artifact::ResolutionResult;
use crate::config::{EngineConfig, EnvSettings};
use crate::error::{Error, Result};
use crate::planner::split_command;
use crate::resolver::tried_names;
use std::fmt;

/// The external tool's name as it appears in install commands
pub const TOOL_NAME: &str = "pipenv";

/// Why the engine is not acting for an environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `skip_pipenv = true`
    Disabled { env: String },
    /// `pipenv_venv = false` (create hook only)
    VenvDisabled { env: String },
    /// A custom install command that never calls pipenv
    CustomCommandWithoutTool { command: Vec<String> },
    /// Dependencies declared directly on the environment
    DeclaredDependencies { env: String, deps: Vec<String> },
    /// No manifest or lock in the project
    NoArtifacts { tried: Vec<String> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled { env } => {
                write!(f, "environment '{}' has `skip_pipenv = true`", env)
            }
            Self::VenvDisabled { env } => {
                write!(f, "environment '{}' has `pipenv_venv = false`", env)
            }
            Self::CustomCommandWithoutTool { command } => write!(
                f,
                "custom 'install_command' {:?} doesn't contain `{}`",
                command, TOOL_NAME
            ),
            Self::DeclaredDependencies { env, deps } => write!(
                f,
                "environment '{}' has `deps = {:?}`, and does not define an install_command",
                env, deps
            ),
            Self::NoArtifacts { tried } => write!(f, "none of {:?} are present.", tried),
        }
    }
}

impl serde::Serialize for SkipReason {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Outcome of the skip policy
#[derive(Debug)]
pub enum SkipDecision {
    Proceed,
    Skip(SkipReason),
    Fail(Error),
}

impl SkipDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Decide whether the install hook should run.
///
/// Rules, in order:
/// 1. `skip_pipenv` disables the engine
/// 2. a custom install command without `pipenv` skips; one with `pipenv`
///    proceeds without any artifact checks
/// 3. declared dependencies skip
/// 4. no project manifest or lock skips
///
/// When an update or lock was requested, any skip becomes
/// [`Error::Configuration`].
pub fn evaluate(
    config: &EngineConfig,
    settings: &EnvSettings,
    deps: &[String],
    project: &ResolutionResult,
) -> SkipDecision {
    match skip_reason(config, settings, deps, project) {
        Err(err) => SkipDecision::Fail(err),
        Ok(None) => SkipDecision::Proceed,
        Ok(Some(reason)) if config.lock_operation_requested() => {
            SkipDecision::Fail(Error::configuration(
                &settings.name,
                format!("{} is specified, but {}", requested_flag(config), reason),
            ))
        }
        Ok(Some(reason)) => SkipDecision::Skip(reason),
    }
}

/// The install policy's skip reason, without update escalation.
///
/// Used by the report hook, which never acts on update requests.
pub fn skip_reason(
    config: &EngineConfig,
    settings: &EnvSettings,
    deps: &[String],
    project: &ResolutionResult,
) -> Result<Option<SkipReason>> {
    if settings.skip_pipenv {
        return Ok(Some(SkipReason::Disabled {
            env: settings.name.clone(),
        }));
    }

    if let Some(command) = config.install_command_for(settings) {
        let tokens = split_command(command)?;
        if !references_tool(&tokens) {
            return Ok(Some(SkipReason::CustomCommandWithoutTool { command: tokens }));
        }
        // The custom command is trusted to find its own manifest
        return Ok(None);
    }

    if !deps.is_empty() {
        return Ok(Some(SkipReason::DeclaredDependencies {
            env: settings.name.clone(),
            deps: deps.to_vec(),
        }));
    }

    Ok(missing_artifacts(config, settings, project))
}

/// Decide whether the create hook should run.
///
/// The create hook has no update escalation: creating a virtual
/// environment never produces a lock.
pub fn evaluate_create(
    config: &EngineConfig,
    settings: &EnvSettings,
    project: &ResolutionResult,
) -> SkipDecision {
    if settings.skip_pipenv {
        return SkipDecision::Skip(SkipReason::Disabled {
            env: settings.name.clone(),
        });
    }
    if !settings.pipenv_venv {
        return SkipDecision::Skip(SkipReason::VenvDisabled {
            env: settings.name.clone(),
        });
    }
    match missing_artifacts(config, settings, project) {
        Some(reason) => SkipDecision::Skip(reason),
        None => SkipDecision::Proceed,
    }
}

fn missing_artifacts(
    config: &EngineConfig,
    settings: &EnvSettings,
    project: &ResolutionResult,
) -> Option<SkipReason> {
    project.is_empty().then(|| SkipReason::NoArtifacts {
        tried: tried_names(config, &settings.name),
    })
}

/// True when any command token invokes the tool, e.g. `pipenv`,
/// `/usr/local/bin/pipenv` or `C:\tools\pipenv.exe`.
pub fn references_tool(tokens: &[String]) -> bool {
    tokens.iter().any(|token| {
        let name = token.rsplit(['/', '\\']).next().unwrap_or_default();
        let name = name
            .strip_suffix(".exe")
            .or_else(|| name.strip_suffix(".EXE"))
            .unwrap_or(name);
        name == TOOL_NAME
    })
}

fn requested_flag(config: &EngineConfig) -> &'static str {
    if config.update_requested {
        "--pipenv-update"
    } else {
        "--pipenv-lock"
    }
}
