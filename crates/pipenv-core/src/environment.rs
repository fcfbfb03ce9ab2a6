//! Subprocess environment for pipenv invocations
//!
//! The map is composed explicitly and handed to the runner. The host
//! process's own environment is never mutated.

use crate::config::{ENV_PIPENV_PIPFILE, EngineConfig};
use crate::error::{Error, Result};
use crate::resolver::resolve_environment_artifacts;
use pipenv_fs::NormalizedPath;
use std::collections::BTreeMap;

/// Non-interactive defaults, overridable from the inherited environment
pub const DEFAULT_PIPENV_ENV: [(&str, &str); 4] = [
    // answer yes when pipenv offers to recreate the virtual environment
    ("PIPENV_YES", "1"),
    ("PIPENV_VENV_IN_PROJECT", "0"),
    // suppress the existing-venv warning
    ("PIPENV_VERBOSITY", "-1"),
    ("PIPENV_NOSPIN", "1"),
];

pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";
pub const WORKON_HOME: &str = "WORKON_HOME";
pub const PIPENV_CUSTOM_VENV_NAME: &str = "PIPENV_CUSTOM_VENV_NAME";

/// Compose the environment for running pipenv against `env_dir`.
///
/// Later layers win: defaults, the inherited environment, the manifest
/// path, then the variables that pin the virtual environment location.
/// Without an explicit `manifest`, the environment directory is searched;
/// finding nothing there is [`Error::ArtifactMissing`].
pub fn compose(
    config: &EngineConfig,
    manifest: Option<&NormalizedPath>,
    env_dir: &NormalizedPath,
    env_name: &str,
) -> Result<BTreeMap<String, String>> {
    let manifest = match manifest {
        Some(path) => path.clone(),
        None => resolve_environment_artifacts(config, env_dir)
            .manifest
            .map(|m| m.path)
            .ok_or_else(|| Error::ArtifactMissing {
                env: env_name.to_string(),
                name: config.naming.canonical_manifest().to_string(),
            })?,
    };

    let mut env: BTreeMap<String, String> = DEFAULT_PIPENV_ENV
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.extend(
        config
            .inherited_env
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );

    env.insert(ENV_PIPENV_PIPFILE.to_string(), native(&manifest));
    env.insert(VIRTUAL_ENV.to_string(), native(env_dir));
    // pipenv creates `WORKON_HOME/PIPENV_CUSTOM_VENV_NAME`, which is env_dir
    let workon_home = env_dir.parent().unwrap_or_else(|| env_dir.clone());
    env.insert(WORKON_HOME.to_string(), native(&workon_home));
    env.insert(
        PIPENV_CUSTOM_VENV_NAME.to_string(),
        env_dir.file_name().unwrap_or_default().to_string(),
    );

    tracing::debug!(
        env = env_name,
        manifest = %manifest,
        virtual_env = %env_dir,
        "composed pipenv environment"
    );

    Ok(env)
}

fn native(path: &NormalizedPath) -> String {
    path.to_native().display().to_string()
}
