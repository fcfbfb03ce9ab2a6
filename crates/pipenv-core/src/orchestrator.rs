//! Per-environment hooks driving pipenv
//!
//! [`InstallOrchestrator`] is a thin coordinator. For each hook it asks the
//! skip policy, clones artifacts, plans, composes the environment, runs the
//! process and does any post-run bookkeeping, strictly in that order.
//!
//! ```text
//! Idle -> Evaluating -> Skipped
//!                    -> Planning -> Invoking -> PostProcessing -> Done
//!                                            -> Done
//! ```

use crate::activity::ActivityReporter;
use crate::artifact::{ArtifactScope, LockArtifact, LockTier, Manifest, ResolutionResult};
use crate::cloner;
use crate::config::{EngineConfig, EnvSettings};
use crate::environment;
use crate::error::{Error, Result};
use crate::planner::{self, InvocationPlan, Subcommand};
use crate::provider::DependencyProvider;
use crate::resolver::{resolve_environment_artifacts, resolve_project_artifacts};
use crate::runner::{ProcessOutput, ProcessRunner};
use crate::skip::{self, SkipDecision, SkipReason};
use pipenv_fs::{NormalizedPath, checksum, io};
use serde::Serialize;
use std::fmt;

/// Activity label for the install hook
pub const INSTALL_ACTIVITY: &str = "pipenv";
/// Activity label for the create hook
pub const CREATE_ACTIVITY: &str = "create pipenv";
/// Activity label for the report hook
pub const REPORT_ACTIVITY: &str = "runenvreport";

/// Install hook states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Idle,
    Evaluating,
    Skipped,
    Planning,
    Invoking,
    PostProcessing,
    Done,
}

impl InstallState {
    /// Whether `self -> next` is a legal transition.
    pub fn can_advance_to(self, next: InstallState) -> bool {
        use InstallState::*;
        matches!(
            (self, next),
            (Idle, Evaluating)
                | (Evaluating, Skipped)
                | (Evaluating, Planning)
                | (Planning, Invoking)
                | (Invoking, PostProcessing)
                | (Invoking, Done)
                | (PostProcessing, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Skipped | Self::Done)
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Evaluating => "evaluating",
            Self::Skipped => "skipped",
            Self::Planning => "planning",
            Self::Invoking => "invoking",
            Self::PostProcessing => "post-processing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

struct StateTracker<'e> {
    env: &'e str,
    state: InstallState,
}

impl<'e> StateTracker<'e> {
    fn new(env: &'e str) -> Self {
        Self {
            env,
            state: InstallState::Idle,
        }
    }

    fn advance(&mut self, next: InstallState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(env = self.env, from = %self.state, to = %next, "install state");
        self.state = next;
    }
}

/// A process that ran to a successful exit
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub plan: InvocationPlan,
    pub output: ProcessOutput,
}

/// Result of a hook
#[derive(Debug, Clone)]
pub enum HookOutcome {
    /// The engine handled the environment; the host must not run its own
    /// installer.
    Installed {
        runs: Vec<CompletedRun>,
        /// Project lock written back after an update or lock operation
        promoted_lock: Option<NormalizedPath>,
    },
    /// The engine stepped aside; the host proceeds as usual.
    NotRun(SkipReason),
}

impl HookOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

/// What the install hook would do, computed without side effects
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "decision", content = "detail", rename_all = "lowercase")]
pub enum Preview {
    Skip(SkipReason),
    Plan(InvocationPlan),
}

/// Runs the engine's hooks for one environment at a time.
pub struct InstallOrchestrator<'a> {
    config: &'a EngineConfig,
    runner: &'a dyn ProcessRunner,
    reporter: &'a dyn ActivityReporter,
}

impl<'a> InstallOrchestrator<'a> {
    pub fn new(
        config: &'a EngineConfig,
        runner: &'a dyn ProcessRunner,
        reporter: &'a dyn ActivityReporter,
    ) -> Self {
        Self {
            config,
            runner,
            reporter,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Install an environment's dependencies with pipenv.
    ///
    /// Returns [`HookOutcome::NotRun`] when the skip policy steps aside.
    /// After an update or lock operation the environment's fresh lock is
    /// copied back to the project as `{base}.lock.{env}`; a `lock` run is
    /// then followed by a `sync` from that lock.
    pub fn install_deps(
        &self,
        settings: &EnvSettings,
        deps: &dyn DependencyProvider,
    ) -> Result<HookOutcome> {
        let config = self.config;
        let name = settings.name.as_str();
        let mut state = StateTracker::new(name);

        state.advance(InstallState::Evaluating);
        let deps = deps.resolved_dependencies();
        let project = resolve_project_artifacts(config, name);
        match skip::evaluate(config, settings, &deps, &project) {
            SkipDecision::Fail(err) => return Err(err),
            SkipDecision::Skip(reason) => {
                state.advance(InstallState::Skipped);
                tracing::info!(env = name, reason = %reason, "pipenv disabled");
                self.reporter
                    .report(INSTALL_ACTIVITY, &format!("<disabled '{}'>", reason));
                return Ok(HookOutcome::NotRun(reason));
            }
            SkipDecision::Proceed => {}
        }

        state.advance(InstallState::Planning);
        let env_dir = settings.env_dir(&config.project_root);
        let cloned = cloner::ensure_manifest(config, &env_dir, &project)?;
        let env_artifacts = resolve_environment_artifacts(config, &env_dir);
        let plan =
            planner::plan_install(config, settings, &deps, &env_artifacts, &project, &env_dir)?;
        tracing::info!(env = name, subcommand = %plan.subcommand, "planned pipenv invocation");
        self.reporter.report(INSTALL_ACTIVITY, &plan.describe());

        state.advance(InstallState::Invoking);
        let env = environment::compose(config, cloned.manifest.as_ref(), &env_dir, name)?;
        let subcommand = plan.subcommand;
        let mut runs = vec![self.invoke(plan.with_env(env.clone()))?];

        if !config.lock_operation_requested() {
            state.advance(InstallState::Done);
            return Ok(HookOutcome::Installed {
                runs,
                promoted_lock: None,
            });
        }

        state.advance(InstallState::PostProcessing);
        let promoted_lock = self.promote_lock(settings, &env_dir)?;
        if subcommand == Subcommand::Lock {
            let sync = planner::plan_sync(config, settings, &env_dir)?;
            self.reporter.report(INSTALL_ACTIVITY, &sync.describe());
            runs.push(self.invoke(sync.with_env(env))?);
        }

        state.advance(InstallState::Done);
        Ok(HookOutcome::Installed {
            runs,
            promoted_lock,
        })
    }

    /// Let pipenv create the environment's virtual environment.
    ///
    /// The environment directory is emptied first, then seeded with the
    /// project artifacts so pipenv finds a manifest. A directory that holds
    /// the project, or foreign content, is never emptied.
    pub fn create_env(&self, settings: &EnvSettings) -> Result<HookOutcome> {
        let config = self.config;
        let name = settings.name.as_str();

        let project = resolve_project_artifacts(config, name);
        match skip::evaluate_create(config, settings, &project) {
            SkipDecision::Fail(err) => return Err(err),
            SkipDecision::Skip(reason) => {
                self.reporter
                    .report(CREATE_ACTIVITY, &format!("<disabled '{}'>", reason));
                return Ok(HookOutcome::NotRun(reason));
            }
            SkipDecision::Proceed => {}
        }

        let env_dir = settings.env_dir(&config.project_root);
        cloner::reset_env_dir(config, name, &env_dir)?;
        let cloned = cloner::ensure_manifest(config, &env_dir, &project)?;

        let plan = planner::plan_create(config, settings, &env_dir);
        self.reporter.report(CREATE_ACTIVITY, &plan.describe());
        let env = environment::compose(config, cloned.manifest.as_ref(), &env_dir, name)?;
        let run = self.invoke(plan.with_env(env))?;

        Ok(HookOutcome::Installed {
            runs: vec![run],
            promoted_lock: None,
        })
    }

    /// Report the environment's installed dependency graph.
    ///
    /// `None` when the install policy would skip this environment.
    pub fn report(
        &self,
        settings: &EnvSettings,
        deps: &dyn DependencyProvider,
    ) -> Result<Option<Vec<String>>> {
        let config = self.config;
        let name = settings.name.as_str();

        let project = resolve_project_artifacts(config, name);
        let deps = deps.resolved_dependencies();
        if let Some(reason) = skip::skip_reason(config, settings, &deps, &project)? {
            tracing::debug!(env = name, reason = %reason, "skipping report");
            return Ok(None);
        }

        self.reporter.report(REPORT_ACTIVITY, "");
        let env_dir = settings.env_dir(&config.project_root);
        let env = environment::compose(config, None, &env_dir, name)?;
        let plan = planner::plan_report(config, &env_dir).with_env(env);
        let run = self.invoke(plan)?;

        Ok(Some(run.output.stdout.lines().map(String::from).collect()))
    }

    /// Compute what [`install_deps`](Self::install_deps) would run.
    ///
    /// Nothing is written and nothing is executed. The environment
    /// directory is assumed to hold fresh clones of the project artifacts.
    pub fn preview(
        &self,
        settings: &EnvSettings,
        deps: &dyn DependencyProvider,
    ) -> Result<Preview> {
        let config = self.config;
        let name = settings.name.as_str();

        let deps = deps.resolved_dependencies();
        let project = resolve_project_artifacts(config, name);
        match skip::evaluate(config, settings, &deps, &project) {
            SkipDecision::Fail(err) => return Err(err),
            SkipDecision::Skip(reason) => return Ok(Preview::Skip(reason)),
            SkipDecision::Proceed => {}
        }

        let env_dir = settings.env_dir(&config.project_root);
        let env_artifacts = expected_clones(config, &env_dir, &project);
        let plan =
            planner::plan_install(config, settings, &deps, &env_artifacts, &project, &env_dir)?;
        let env = environment::compose(config, env_artifacts.manifest_path(), &env_dir, name)?;

        Ok(Preview::Plan(plan.with_env(env)))
    }

    fn invoke(&self, plan: InvocationPlan) -> Result<CompletedRun> {
        io::ensure_dir(&plan.working_dir)?;
        let output = self.runner.run(&plan)?;
        if !output.success() {
            return Err(Error::ProcessFailure {
                command: plan.command_line(),
                code: output.status,
                stderr: output.stderr,
            });
        }
        Ok(CompletedRun { plan, output })
    }

    /// Copy the environment's lock back to the project.
    fn promote_lock(
        &self,
        settings: &EnvSettings,
        env_dir: &NormalizedPath,
    ) -> Result<Option<NormalizedPath>> {
        let naming = &self.config.naming;
        let source = env_dir.join(&naming.canonical_lock());
        if !source.is_file() {
            tracing::warn!(
                env = %settings.name,
                lock = %source,
                "no lock produced, nothing to promote"
            );
            return Ok(None);
        }

        let destination = self
            .config
            .artifact_root()
            .join(&naming.env_lock_name(&settings.name));
        io::copy_atomic(&source, &destination)?;
        let digest = checksum::compute_file_checksum(&destination)?;
        tracing::info!(
            env = %settings.name,
            lock = %destination,
            checksum = %digest,
            "promoted lock"
        );

        Ok(Some(destination))
    }
}

/// Environment artifacts as they will look once the project is cloned.
fn expected_clones(
    config: &EngineConfig,
    env_dir: &NormalizedPath,
    project: &ResolutionResult,
) -> ResolutionResult {
    let naming = &config.naming;
    ResolutionResult {
        manifest: Some(Manifest {
            path: env_dir.join(naming.canonical_manifest()),
            scope: ArtifactScope::Environment,
        }),
        lock: project.lock.as_ref().map(|_| LockArtifact {
            path: env_dir.join(&naming.canonical_lock()),
            tier: LockTier::EnvironmentSpecific,
        }),
    }
}
