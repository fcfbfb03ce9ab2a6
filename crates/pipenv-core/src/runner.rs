//! Process execution capability

use crate::error::{Error, Result};
use crate::planner::InvocationPlan;
use std::process::Command;

/// Captured result of one external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal
    pub status: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs an [`InvocationPlan`] to completion.
///
/// Implementations return the captured output for any exit status; only a
/// failure to launch is an error. Deciding what a non-zero exit means is
/// left to the caller.
pub trait ProcessRunner {
    fn run(&self, plan: &InvocationPlan) -> Result<ProcessOutput>;
}

/// Runs plans as real subprocesses, synchronously.
///
/// The child sees exactly the plan's environment; nothing else leaks in
/// from this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, plan: &InvocationPlan) -> Result<ProcessOutput> {
        let Some((program, args)) = plan.argv.split_first() else {
            return Err(Error::InvalidCommand {
                command: String::new(),
            });
        };

        tracing::debug!(
            program = %program,
            args = ?args,
            cwd = %plan.working_dir,
            "running subprocess"
        );

        let output = Command::new(program)
            .args(args)
            .current_dir(plan.working_dir.to_native())
            .env_clear()
            .envs(&plan.env)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status.code(),
        })
    }
}
