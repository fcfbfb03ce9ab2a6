//! Project context detection
//!
//! Finds the project root and loads the host settings, so commands work
//! from anywhere below the project like `tox` does.

use std::path::{Path, PathBuf};

use pipenv_core::{EngineConfig, HostSettings};
use pipenv_fs::{NormalizedPath, SettingsStore};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Everything a command needs to drive the engine
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config: EngineConfig,
    pub host: HostSettings,
}

impl ProjectContext {
    /// Build the context from parsed arguments and the process environment.
    pub fn load(cli: &Cli, cwd: &Path) -> Result<Self> {
        let root = match &cli.project_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => cwd.join(root),
            None => find_project_root(cwd, &cli.config).unwrap_or_else(|| cwd.to_path_buf()),
        };
        if !root.is_dir() {
            return Err(CliError::user(format!(
                "Project root {} is not a directory",
                root.display()
            )));
        }

        let settings_path = NormalizedPath::new(root.join(&cli.config));
        let host = if settings_path.is_file() {
            SettingsStore::new().load::<HostSettings>(&settings_path)?
        } else {
            tracing::debug!(path = %settings_path, "no settings file, using defaults");
            HostSettings::default()
        };

        let mut config = EngineConfig::from_process_env(root)
            .with_update(cli.pipenv_update)
            .with_lock(cli.pipenv_lock);
        if let Some(python) = &cli.python {
            config = config.with_launcher(python.clone());
        }

        Ok(Self { config, host })
    }
}

/// Walk up from `cwd` to the nearest directory holding `settings_file`.
pub fn find_project_root(cwd: &Path, settings_file: &Path) -> Option<PathBuf> {
    if settings_file.is_absolute() {
        return settings_file.parent().map(Path::to_path_buf);
    }
    cwd.ancestors()
        .find(|dir| dir.join(settings_file).is_file())
        .map(Path::to_path_buf)
}
