//! Source of an environment's declared dependencies

use crate::config::EnvSettings;

/// Supplies the dependency list the host declared for an environment.
pub trait DependencyProvider {
    fn resolved_dependencies(&self) -> Vec<String>;
}

impl DependencyProvider for EnvSettings {
    fn resolved_dependencies(&self) -> Vec<String> {
        self.deps.clone()
    }
}

impl DependencyProvider for Vec<String> {
    fn resolved_dependencies(&self) -> Vec<String> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_provide_declared_deps() {
        let mut settings = EnvSettings::new("py");
        settings.deps = vec!["pytest".to_string()];
        assert_eq!(settings.resolved_dependencies(), vec!["pytest"]);
    }
}
