//! A scripted stand-in for the `python -m pipenv` launcher.
//!
//! The script appends one record per call to a log file and imitates the
//! side effects the engine relies on:
//!
//! - `update` and `lock` write [`FRESH_LOCK`] next to `$PIPENV_PIPFILE`
//! - `graph` prints [`GRAPH_OUTPUT`]
//! - a non-zero `FAKE_PIPENV_EXIT` in its environment makes it fail
//!
//! Realism level: **FAKE**. Only `/bin/sh` builtins are used, so the
//! script works with an empty `PATH`.

use crate::project::TestProject;
use std::fs;
use std::path::PathBuf;

/// Lock content produced by a fake `update` or `lock`
pub const FRESH_LOCK: &str = r#"{"_meta": {"fresh": true}, "default": {}, "develop": {}}"#;

/// Output of a fake `graph`
pub const GRAPH_OUTPUT: &str = "requests==2.31.0\n  - idna [required: >=2.5]\n";

/// Variable that makes the fake launcher exit with the given status
pub const EXIT_VAR: &str = "FAKE_PIPENV_EXIT";

const SCRIPT_PATH: &str = ".fake-bin/python";
const LOG_PATH: &str = ".fake-bin/invocations.log";

/// One recorded call to the fake launcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub cwd: String,
    pub pipfile: String,
    pub virtual_env: String,
    pub venv_name: String,
}

impl Invocation {
    /// The pipenv subcommand or first flag (`install`, `sync`, `--python`, ...)
    pub fn subcommand(&self) -> Option<&str> {
        self.args.get(2).map(String::as_str)
    }
}

impl TestProject {
    /// Install the fake launcher and return its absolute path.
    #[cfg(unix)]
    pub fn fake_launcher(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let log = self.path(LOG_PATH);
        let script = format!(
            r#"#!/bin/sh
log='{log}'
{{
  printf -- '---\n'
  printf 'args=%s\n' "$*"
  printf 'cwd=%s\n' "$PWD"
  printf 'pipfile=%s\n' "$PIPENV_PIPFILE"
  printf 'virtual_env=%s\n' "$VIRTUAL_ENV"
  printf 'venv_name=%s\n' "$PIPENV_CUSTOM_VENV_NAME"
}} >> "$log"
if [ -n "${exit_var}" ] && [ "${exit_var}" != "0" ]; then
  printf 'fake pipenv failed\n' >&2
  exit "${exit_var}"
fi
case "$3" in
  update|lock) printf '%s\n' '{fresh}' > "$PIPENV_PIPFILE.lock" ;;
  graph) printf '{graph}' ;;
esac
exit 0
"#,
            log = log.display(),
            exit_var = EXIT_VAR,
            fresh = FRESH_LOCK,
            graph = GRAPH_OUTPUT.replace('\n', "\\n"),
        );

        let path = self.write_file(SCRIPT_PATH, &script);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Calls recorded by the fake launcher, oldest first.
    pub fn invocations(&self) -> Vec<Invocation> {
        let Ok(content) = fs::read_to_string(self.path(LOG_PATH)) else {
            return Vec::new();
        };

        let mut invocations = Vec::new();
        for line in content.lines() {
            if line == "---" {
                invocations.push(Invocation::default());
                continue;
            }
            let (Some(current), Some((key, value))) = (invocations.last_mut(), line.split_once('='))
            else {
                continue;
            };
            let value = value.to_string();
            match key {
                "args" => current.args = value.split_whitespace().map(String::from).collect(),
                "cwd" => current.cwd = value,
                "pipfile" => current.pipfile = value,
                "virtual_env" => current.virtual_env = value,
                "venv_name" => current.venv_name = value,
                _ => {}
            }
        }
        invocations
    }
}
