//! List command implementation

use colored::Colorize;

use crate::context::ProjectContext;
use crate::error::Result;

/// List configured environments with their pipenv flags.
pub fn run_list(ctx: &ProjectContext) -> Result<()> {
    let names = ctx.host.names();
    if names.is_empty() {
        println!(
            "No environments configured. Add an {} table to the settings file.",
            "[env.<name>]".cyan()
        );
        return Ok(());
    }

    for name in names {
        let settings = ctx.host.environment(name);
        let mut flags = Vec::new();
        if settings.skip_pipenv {
            flags.push("skip_pipenv");
        }
        if !settings.pipenv_venv {
            flags.push("no pipenv_venv");
        }
        if settings.pip_pre {
            flags.push("pip_pre");
        }
        if settings.custom_install_command().is_some() {
            flags.push("custom install_command");
        }

        if flags.is_empty() {
            println!("{}", name.green());
        } else {
            println!("{} ({})", name.green(), flags.join(", ").dimmed());
        }
    }

    Ok(())
}
