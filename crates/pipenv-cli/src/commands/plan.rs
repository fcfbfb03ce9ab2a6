//! Plan command implementation
//!
//! A dry run of the install hook: nothing is executed and nothing is
//! written to the project or the environment directories.

use std::collections::BTreeMap;

use colored::Colorize;
use pipenv_core::{InstallOrchestrator, Preview, RecordingReporter, SystemRunner};

use crate::context::ProjectContext;
use crate::error::Result;

/// Compute the install plan of each environment.
pub fn collect_previews(
    ctx: &ProjectContext,
    envs: &[String],
) -> Result<BTreeMap<String, Preview>> {
    let runner = SystemRunner;
    let reporter = RecordingReporter::new();
    let orchestrator = InstallOrchestrator::new(&ctx.config, &runner, &reporter);

    let mut previews = BTreeMap::new();
    for name in envs {
        let settings = ctx.host.environment(name);
        previews.insert(name.clone(), orchestrator.preview(&settings, &settings)?);
    }
    Ok(previews)
}

/// Run the plan command
pub fn run_plan(ctx: &ProjectContext, envs: &[String], json: bool) -> Result<()> {
    let previews = collect_previews(ctx, envs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&previews)?);
        return Ok(());
    }

    for (name, preview) in &previews {
        match preview {
            Preview::Skip(reason) => {
                println!("{} {}: {}", "SKIP".yellow().bold(), name, reason);
            }
            Preview::Plan(plan) => {
                println!(
                    "{} {} ({})",
                    "=>".blue().bold(),
                    name.cyan(),
                    plan.subcommand
                );
                println!("   {} {}", "$".dimmed(), plan.command_line());
                println!("   {} {}", "cwd".dimmed(), plan.working_dir);
                if let Some(target) = &plan.target {
                    println!("   {} {}", "target".dimmed(), target);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipenv_core::{EngineConfig, HostSettings, Subcommand};
    use std::fs;
    use tempfile::TempDir;

    fn context(root: &std::path::Path) -> ProjectContext {
        ProjectContext {
            config: EngineConfig::new(root),
            host: HostSettings::default(),
        }
    }

    #[test]
    fn test_previews_do_not_touch_env_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Pipfile"), "[packages]\n").unwrap();
        let ctx = context(temp.path());

        let previews = collect_previews(&ctx, &["py".to_string()]).unwrap();

        match &previews["py"] {
            Preview::Plan(plan) => assert_eq!(plan.subcommand, Subcommand::Install),
            other => panic!("expected plan, got {other:?}"),
        }
        assert!(!temp.path().join(".tox").exists());
    }

    #[test]
    fn test_preview_json_shape() {
        let temp = TempDir::new().unwrap();
        let ctx = context(temp.path());

        let previews = collect_previews(&ctx, &["py".to_string()]).unwrap();
        let json = serde_json::to_value(&previews).unwrap();

        assert_eq!(json["py"]["decision"], "skip");
        assert!(
            json["py"]["detail"]
                .as_str()
                .unwrap()
                .starts_with("none of")
        );
    }
}
