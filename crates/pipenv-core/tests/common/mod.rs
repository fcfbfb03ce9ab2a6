use pipenv_core::{InvocationPlan, ProcessOutput, ProcessRunner, Result, Subcommand};
use std::cell::RefCell;
use std::fs;

pub const FRESH_LOCK: &str = "{\"_meta\": {\"fresh\": true}}";

/// Records every plan and imitates pipenv's lock side effect.
#[derive(Default)]
pub struct FakeRunner {
    pub plans: RefCell<Vec<InvocationPlan>>,
    pub exit_code: i32,
    pub stdout: String,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::default()
        }
    }

    pub fn with_stdout(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Self::default()
        }
    }

    pub fn subcommands(&self) -> Vec<Subcommand> {
        self.plans.borrow().iter().map(|p| p.subcommand).collect()
    }

    pub fn calls(&self) -> usize {
        self.plans.borrow().len()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, plan: &InvocationPlan) -> Result<ProcessOutput> {
        self.plans.borrow_mut().push(plan.clone());

        if self.exit_code == 0
            && plan.subcommand.produces_lock()
            && let Some(pipfile) = plan.env.get("PIPENV_PIPFILE")
        {
            fs::write(format!("{pipfile}.lock"), FRESH_LOCK).unwrap();
        }

        Ok(ProcessOutput {
            stdout: self.stdout.clone(),
            stderr: if self.exit_code == 0 {
                String::new()
            } else {
                "pipenv exploded".to_string()
            },
            status: Some(self.exit_code),
        })
    }
}
