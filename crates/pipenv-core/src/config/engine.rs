//! Process-wide engine configuration

use super::naming::NamingScheme;
use super::settings::EnvSettings;
use pipenv_fs::NormalizedPath;
use std::collections::BTreeMap;

/// Override path to the manifest file
pub const ENV_PIPENV_PIPFILE: &str = "PIPENV_PIPFILE";
/// Custom install command, beats the per-environment `install_command`
pub const ENV_INSTALL_CMD: &str = "TOX_PIPENV_INSTALL_CMD";
/// Install options, beat the per-environment `pipenv_install_opts`
pub const ENV_INSTALL_OPTS: &str = "TOX_PIPENV_INSTALL_OPTS";
/// Interpreter used to run `python -m pipenv`
pub const DEFAULT_LAUNCHER: &str = "python";

/// Immutable configuration for one orchestrator run.
///
/// Built once before any environment is processed and shared by reference
/// afterwards. Rebuilding it is only safe between full runs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The project root (the directory holding the host settings file)
    pub project_root: NormalizedPath,
    /// Manifest and lock naming convention
    pub naming: NamingScheme,
    /// `--pipenv-update` was passed
    pub update_requested: bool,
    /// `--pipenv-lock` was passed
    pub lock_requested: bool,
    /// Value of `TOX_PIPENV_INSTALL_CMD`
    pub install_command_override: Option<String>,
    /// Value of `TOX_PIPENV_INSTALL_OPTS`
    pub install_opts_override: Option<String>,
    /// Interpreter that runs `-m pipenv`
    pub launcher: String,
    /// Process environment passed through to every invocation
    pub inherited_env: BTreeMap<String, String>,
}

impl EngineConfig {
    /// Configuration with defaults and an empty inherited environment.
    pub fn new(project_root: impl Into<NormalizedPath>) -> Self {
        Self {
            project_root: project_root.into(),
            naming: NamingScheme::default(),
            update_requested: false,
            lock_requested: false,
            install_command_override: None,
            install_opts_override: None,
            launcher: DEFAULT_LAUNCHER.to_string(),
            inherited_env: BTreeMap::new(),
        }
    }

    /// Derive configuration from the current process environment.
    pub fn from_process_env(project_root: impl Into<NormalizedPath>) -> Self {
        let cwd = std::env::current_dir()
            .map(NormalizedPath::new)
            .unwrap_or_else(|_| NormalizedPath::new("."));
        Self::from_vars(project_root, std::env::vars().collect(), &cwd)
    }

    /// Derive configuration from an explicit variable set.
    ///
    /// Empty values count as unset. The full set becomes the inherited
    /// environment for subprocesses.
    pub fn from_vars(
        project_root: impl Into<NormalizedPath>,
        vars: BTreeMap<String, String>,
        cwd: &NormalizedPath,
    ) -> Self {
        let non_empty = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let naming = NamingScheme::from_override(non_empty(ENV_PIPENV_PIPFILE).as_deref(), cwd);
        let install_command_override = non_empty(ENV_INSTALL_CMD);
        let install_opts_override = non_empty(ENV_INSTALL_OPTS);

        tracing::debug!(
            manifest = naming.base(),
            single_manifest = naming.is_single_manifest(),
            install_command_override = ?install_command_override,
            install_opts_override = ?install_opts_override,
            "derived engine configuration"
        );

        Self {
            naming,
            install_command_override,
            install_opts_override,
            inherited_env: vars,
            ..Self::new(project_root)
        }
    }

    pub fn with_update(mut self, requested: bool) -> Self {
        self.update_requested = requested;
        self
    }

    pub fn with_lock(mut self, requested: bool) -> Self {
        self.lock_requested = requested;
        self
    }

    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// True when the caller explicitly asked for a new lock to be produced.
    pub fn lock_operation_requested(&self) -> bool {
        self.update_requested || self.lock_requested
    }

    /// Directory where project artifacts live and promoted locks land.
    pub fn artifact_root(&self) -> &NormalizedPath {
        self.naming.override_parent().unwrap_or(&self.project_root)
    }

    /// The custom install command in effect for an environment, if any.
    ///
    /// `TOX_PIPENV_INSTALL_CMD` wins over the environment's own setting.
    pub fn install_command_for<'a>(&'a self, settings: &'a EnvSettings) -> Option<&'a str> {
        self.install_command_override
            .as_deref()
            .or_else(|| settings.custom_install_command())
    }

    /// Install options in effect for an environment, if any.
    pub fn install_opts_for<'a>(&'a self, settings: &'a EnvSettings) -> Option<&'a str> {
        self.install_opts_override
            .as_deref()
            .or(settings.pipenv_install_opts.as_deref())
            .filter(|opts| !opts.trim().is_empty())
    }
}
