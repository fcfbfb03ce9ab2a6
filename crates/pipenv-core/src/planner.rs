//! Command lines for pipenv invocations
//!
//! Planning is pure: nothing here touches the filesystem or spawns a
//! process. The orchestrator attaches the composed environment to a plan
//! with [`InvocationPlan::with_env`] before handing it to a runner.

use crate::artifact::ResolutionResult;
use crate::config::{EngineConfig, EnvSettings};
use crate::error::{Error, Result};
use pipenv_fs::NormalizedPath;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const PACKAGES_TOKEN: &str = "{packages}";
const OPTS_TOKEN: &str = "{opts}";
const PYTHON_TOKEN: &str = "python";
const PRE_RELEASE_FLAG: &str = "--pre";

/// The pipenv subcommand a plan runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcommand {
    Install,
    Update,
    Sync,
    Lock,
    Graph,
    /// Virtual environment creation (`pipenv --python ...`)
    Create,
    /// A user-supplied install command
    Custom,
}

impl Subcommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Sync => "sync",
            Self::Lock => "lock",
            Self::Graph => "graph",
            Self::Create => "create",
            Self::Custom => "custom",
        }
    }

    /// True for operations that produce a fresh lock in the env directory
    pub fn produces_lock(&self) -> bool {
        matches!(self, Self::Update | Self::Lock)
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One external process invocation, fully decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationPlan {
    /// Complete argument vector, executable first
    pub argv: Vec<String>,
    pub subcommand: Subcommand,
    /// Option flags included in `argv`
    pub options: Vec<String>,
    /// Package names passed positionally in `argv`
    pub packages: Vec<String>,
    /// Parent of the environment directory
    pub working_dir: NormalizedPath,
    /// Composed subprocess environment (empty until attached)
    pub env: BTreeMap<String, String>,
    /// Artifact named in the activity line
    pub target: Option<NormalizedPath>,
}

impl InvocationPlan {
    /// The program to launch
    pub fn executable(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Activity detail: `<["python", "-m", "pipenv", "sync"] /env/Pipfile.lock>`
    pub fn describe(&self) -> String {
        let target = self.target.as_ref().map(|t| t.as_str()).unwrap_or_default();
        format!("<{:?} {}>", self.argv, target)
    }

    /// The argument vector as a single shell-like line, for error messages
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}

/// Split a command template the way a POSIX shell would.
pub fn split_command(command: &str) -> Result<Vec<String>> {
    shlex::split(command).ok_or_else(|| Error::InvalidCommand {
        command: command.to_string(),
    })
}

/// Install options for an environment: the configured install options,
/// then `--pre` when pre-releases are allowed.
pub fn install_options(config: &EngineConfig, settings: &EnvSettings) -> Result<Vec<String>> {
    let mut options = match config.install_opts_for(settings) {
        Some(opts) => split_command(opts)?,
        None => Vec::new(),
    };
    if settings.pip_pre {
        options.push(PRE_RELEASE_FLAG.to_string());
    }
    Ok(options)
}

/// Options for `pipenv lock`, which rejects install-only flags such as
/// `--deploy`; only pre-release resolution carries over.
pub fn lock_options(settings: &EnvSettings) -> Vec<String> {
    if settings.pip_pre {
        vec![PRE_RELEASE_FLAG.to_string()]
    } else {
        Vec::new()
    }
}

/// Expand a custom install command template.
///
/// A leading `python` becomes the launcher, `{packages}` becomes the
/// declared dependencies and `{opts}` the computed options, each as
/// discrete tokens. Everything else passes through unchanged.
pub fn expand_install_command(
    config: &EngineConfig,
    tokens: &[String],
    packages: &[String],
    options: &[String],
) -> Vec<String> {
    let mut argv = Vec::with_capacity(tokens.len() + packages.len() + options.len());
    for (index, token) in tokens.iter().enumerate() {
        match token.as_str() {
            PACKAGES_TOKEN => argv.extend(packages.iter().cloned()),
            OPTS_TOKEN => argv.extend(options.iter().cloned()),
            PYTHON_TOKEN if index == 0 => argv.push(config.launcher.clone()),
            _ => argv.push(token.clone()),
        }
    }
    argv
}

/// Plan the install hook's invocation.
///
/// A custom install command is expanded and used as is. Otherwise the
/// subcommand is chosen in order: `update` when requested, `lock` when
/// requested, `sync` when the environment has a lock, else `install`.
/// `update` and `lock` need a project manifest to work from.
pub fn plan_install(
    config: &EngineConfig,
    settings: &EnvSettings,
    deps: &[String],
    env_artifacts: &ResolutionResult,
    project: &ResolutionResult,
    env_dir: &NormalizedPath,
) -> Result<InvocationPlan> {
    let options = install_options(config, settings)?;
    let manifest_target = env_artifacts.manifest_path().cloned();

    if let Some(command) = config.install_command_for(settings) {
        let tokens = split_command(command)?;
        let has = |placeholder: &str| tokens.iter().any(|t| t == placeholder);
        let used_options = if has(OPTS_TOKEN) { options.clone() } else { Vec::new() };
        let used_packages = if has(PACKAGES_TOKEN) { deps.to_vec() } else { Vec::new() };

        return Ok(InvocationPlan {
            argv: expand_install_command(config, &tokens, deps, &options),
            subcommand: Subcommand::Custom,
            options: used_options,
            packages: used_packages,
            working_dir: working_dir(env_dir),
            env: BTreeMap::new(),
            target: manifest_target,
        });
    }

    if config.update_requested {
        require_project_manifest(config, settings, project, Subcommand::Update)?;
        return Ok(pipenv_plan(
            config,
            Subcommand::Update,
            options,
            deps.to_vec(),
            env_dir,
            manifest_target,
        ));
    }

    if config.lock_requested {
        require_project_manifest(config, settings, project, Subcommand::Lock)?;
        return Ok(pipenv_plan(
            config,
            Subcommand::Lock,
            lock_options(settings),
            Vec::new(),
            env_dir,
            manifest_target,
        ));
    }

    if let Some(lock) = env_artifacts.lock_path() {
        return Ok(pipenv_plan(
            config,
            Subcommand::Sync,
            options,
            Vec::new(),
            env_dir,
            Some(lock.clone()),
        ));
    }

    Ok(pipenv_plan(
        config,
        Subcommand::Install,
        options,
        deps.to_vec(),
        env_dir,
        manifest_target,
    ))
}

/// Plan a `sync` from the environment's cloned lock.
pub fn plan_sync(
    config: &EngineConfig,
    settings: &EnvSettings,
    env_dir: &NormalizedPath,
) -> Result<InvocationPlan> {
    let options = install_options(config, settings)?;
    let lock = env_dir.join(&config.naming.canonical_lock());
    Ok(pipenv_plan(
        config,
        Subcommand::Sync,
        options,
        Vec::new(),
        env_dir,
        Some(lock),
    ))
}

/// Plan virtual environment creation.
///
/// `[launcher, -m, pipenv, (--site-packages), --python, <interpreter>]`
/// where the interpreter is `basepython` or the launcher itself.
pub fn plan_create(
    config: &EngineConfig,
    settings: &EnvSettings,
    env_dir: &NormalizedPath,
) -> InvocationPlan {
    let mut options = Vec::new();
    if settings.sitepackages {
        options.push("--site-packages".to_string());
    }
    options.push("--python".to_string());
    options.push(
        settings
            .basepython
            .clone()
            .unwrap_or_else(|| config.launcher.clone()),
    );

    let mut argv = pipenv_prefix(config);
    argv.extend(options.iter().cloned());

    InvocationPlan {
        argv,
        subcommand: Subcommand::Create,
        options,
        packages: Vec::new(),
        working_dir: working_dir(env_dir),
        env: BTreeMap::new(),
        target: Some(env_dir.join(config.naming.canonical_manifest())),
    }
}

/// Plan the dependency graph report.
pub fn plan_report(config: &EngineConfig, env_dir: &NormalizedPath) -> InvocationPlan {
    pipenv_plan(config, Subcommand::Graph, Vec::new(), Vec::new(), env_dir, None)
}

/// Invocations run from the parent of the environment directory.
pub fn working_dir(env_dir: &NormalizedPath) -> NormalizedPath {
    env_dir.parent().unwrap_or_else(|| env_dir.clone())
}

fn pipenv_prefix(config: &EngineConfig) -> Vec<String> {
    vec![config.launcher.clone(), "-m".to_string(), "pipenv".to_string()]
}

fn pipenv_plan(
    config: &EngineConfig,
    subcommand: Subcommand,
    options: Vec<String>,
    packages: Vec<String>,
    env_dir: &NormalizedPath,
    target: Option<NormalizedPath>,
) -> InvocationPlan {
    let mut argv = pipenv_prefix(config);
    argv.push(subcommand.to_string());
    argv.extend(options.iter().cloned());
    argv.extend(packages.iter().cloned());

    InvocationPlan {
        argv,
        subcommand,
        options,
        packages,
        working_dir: working_dir(env_dir),
        env: BTreeMap::new(),
        target,
    }
}

fn require_project_manifest(
    config: &EngineConfig,
    settings: &EnvSettings,
    project: &ResolutionResult,
    subcommand: Subcommand,
) -> Result<()> {
    if project.manifest.is_some() {
        return Ok(());
    }
    let candidates = config.naming.manifest_candidates(&settings.name);
    Err(Error::configuration(
        &settings.name,
        format!(
            "unable to {}, none of {:?} found in {}",
            subcommand,
            candidates,
            config.artifact_root()
        ),
    ))
}
