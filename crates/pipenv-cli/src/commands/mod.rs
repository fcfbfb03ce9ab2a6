//! Command implementations for pipenv-cli

pub mod create;
pub mod install;
pub mod list;
pub mod plan;
pub mod report;

pub use create::run_create;
pub use install::run_install;
pub use list::run_list;
pub use plan::run_plan;
pub use report::run_report;

use colored::Colorize;
use pipenv_core::HookOutcome;

/// Print the result of a hook for one environment.
pub(crate) fn print_outcome(env: &str, outcome: &HookOutcome) {
    match outcome {
        HookOutcome::Installed {
            runs,
            promoted_lock,
        } => {
            for run in runs {
                println!("   {} {}", "$".dimmed(), run.plan.command_line());
                let stdout = run.output.stdout.trim_end();
                if !stdout.is_empty() {
                    println!("{}", stdout);
                }
            }
            if let Some(lock) = promoted_lock {
                println!("   {} {}", "LOCK".green().bold(), lock);
            }
            println!("{} {}", "OK".green().bold(), env);
        }
        HookOutcome::NotRun(reason) => {
            println!("{} {}: {}", "SKIP".yellow().bold(), env, reason);
        }
    }
}
