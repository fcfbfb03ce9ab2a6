//! Report command implementation

use colored::Colorize;
use pipenv_core::{InstallOrchestrator, SystemRunner, TracingReporter};

use crate::context::ProjectContext;
use crate::error::Result;

/// Print `pipenv graph` for each environment the engine manages.
pub fn run_report(ctx: &ProjectContext, envs: &[String]) -> Result<()> {
    let runner = SystemRunner;
    let reporter = TracingReporter;
    let orchestrator = InstallOrchestrator::new(&ctx.config, &runner, &reporter);

    for name in envs {
        let settings = ctx.host.environment(name);
        match orchestrator.report(&settings, &settings)? {
            Some(lines) => {
                println!("{} {}", "=>".blue().bold(), name.cyan());
                for line in lines {
                    println!("   {}", line);
                }
            }
            None => println!(
                "{} {}: not managed by pipenv",
                "SKIP".yellow().bold(),
                name
            ),
        }
    }

    Ok(())
}
