//! Error types for pipenv-core

/// Result type for pipenv-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing an environment's dependencies
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicit update or lock request cannot be carried out
    #[error("Configuration error for environment '{env}': {message}")]
    Configuration { env: String, message: String },

    /// A manifest is required but none could be resolved
    #[error("Unable to generate environment variables, {name} not found for {env}")]
    ArtifactMissing { env: String, name: String },

    /// The external tool exited with a non-zero status
    #[error("Command failed (exit code {code:?}): {command}\n{stderr}")]
    ProcessFailure {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external tool could not be started
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A custom install command could not be split into arguments
    #[error("Invalid install command {command:?}: unbalanced quotes")]
    InvalidCommand { command: String },

    /// Filesystem error from pipenv-fs
    #[error(transparent)]
    Fs(#[from] pipenv_fs::Error),
}

impl Error {
    pub fn configuration(env: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            env: env.into(),
            message: message.into(),
        }
    }
}
