//! Install command implementation

use colored::Colorize;
use pipenv_core::{InstallOrchestrator, SystemRunner, TracingReporter};

use super::print_outcome;
use crate::context::ProjectContext;
use crate::error::Result;

/// Run the install hook for each environment, stopping at the first error.
pub fn run_install(ctx: &ProjectContext, envs: &[String]) -> Result<()> {
    let runner = SystemRunner;
    let reporter = TracingReporter;
    let orchestrator = InstallOrchestrator::new(&ctx.config, &runner, &reporter);

    for name in envs {
        println!(
            "{} {}: installing dependencies",
            "=>".blue().bold(),
            name.cyan()
        );
        let settings = ctx.host.environment(name);
        let outcome = orchestrator.install_deps(&settings, &settings)?;
        print_outcome(name, &outcome);
    }

    Ok(())
}
