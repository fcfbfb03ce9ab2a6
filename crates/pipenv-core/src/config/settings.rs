//! Per-environment settings from the host settings file

use pipenv_fs::NormalizedPath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The host's own install command. Configuring exactly this counts as
/// not configuring a custom command at all.
pub const DEFAULT_INSTALL_COMMAND: &str = "python -m pip install {opts} {packages}";

/// Settings for one test environment.
///
/// # Example
///
/// ```toml
/// [env.py]
/// pip_pre = true
/// pipenv_install_opts = "--dev"
///
/// [env.lint]
/// skip_pipenv = true
/// deps = ["ruff"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSettings {
    /// Environment name, taken from the settings table key
    #[serde(skip)]
    pub name: String,
    /// Environment directory, relative to the project root unless absolute.
    /// Defaults to `.tox/{name}`.
    pub envdir: Option<NormalizedPath>,
    /// Disable the engine for this environment
    pub skip_pipenv: bool,
    /// Let pipenv create the virtual environment
    pub pipenv_venv: bool,
    /// Allow pre-release versions
    pub pip_pre: bool,
    /// Give the virtual environment access to site packages
    pub sitepackages: bool,
    /// Interpreter for the virtual environment
    pub basepython: Option<String>,
    /// Custom install command template (`{opts}`, `{packages}`)
    pub install_command: Option<String>,
    /// Extra options for the install subcommand
    pub pipenv_install_opts: Option<String>,
    /// Dependencies declared directly on the environment
    pub deps: Vec<String>,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            envdir: None,
            skip_pipenv: false,
            pipenv_venv: true,
            pip_pre: false,
            sitepackages: false,
            basepython: None,
            install_command: None,
            pipenv_install_opts: None,
            deps: Vec::new(),
        }
    }
}

impl EnvSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The environment's private directory.
    pub fn env_dir(&self, project_root: &NormalizedPath) -> NormalizedPath {
        match &self.envdir {
            Some(dir) if dir.as_str().starts_with('/') || dir.to_native().is_absolute() => {
                dir.clone()
            }
            Some(dir) => project_root.join(dir.as_str()),
            None => project_root.join(".tox").join(&self.name),
        }
    }

    /// The configured install command, unless it is the host default.
    pub fn custom_install_command(&self) -> Option<&str> {
        self.install_command
            .as_deref()
            .filter(|cmd| !cmd.trim().is_empty() && !is_default_install_command(cmd))
    }
}

fn is_default_install_command(command: &str) -> bool {
    command.split_whitespace().eq(DEFAULT_INSTALL_COMMAND.split_whitespace())
}

/// The host settings file: one `[env.<name>]` table per environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostSettings {
    #[serde(default)]
    pub env: BTreeMap<String, EnvSettings>,
}

impl HostSettings {
    /// Settings for `name`; environments without a table get defaults.
    pub fn environment(&self, name: &str) -> EnvSettings {
        let mut settings = self.env.get(name).cloned().unwrap_or_default();
        settings.name = name.to_string();
        settings
    }

    /// Names of all configured environments, sorted
    pub fn names(&self) -> Vec<&str> {
        self.env.keys().map(String::as_str).collect()
    }
}
