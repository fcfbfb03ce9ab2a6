//! [`TestProject`] builder for engine and CLI test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A minimal Pipfile declaring one package
pub const SAMPLE_PIPFILE: &str = r#"[[source]]
url = "https://pypi.org/simple"
verify_ssl = true
name = "pypi"

[packages]
requests = "*"

[dev-packages]
"#;

/// A minimal lock matching [`SAMPLE_PIPFILE`]
pub const SAMPLE_LOCK: &str = r#"{
    "_meta": {
        "hash": {"sha256": "0000"},
        "pipfile-spec": 6,
        "requires": {},
        "sources": [{"name": "pypi", "url": "https://pypi.org/simple", "verify_ssl": true}]
    },
    "default": {
        "requests": {"version": "==2.31.0"}
    },
    "develop": {}
}
"#;

/// Name of the host settings file the CLI looks for by default
pub const SETTINGS_FILE: &str = "tox-pipenv.toml";

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use pipenv_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_pipfile("Pipfile");
/// project.write_lock("Pipfile.lock.py");
/// project.assert_file_exists("Pipfile.lock.py");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Default environment directory for `env` (`.tox/{env}`).
    pub fn env_dir(&self, env: &str) -> PathBuf {
        self.root().join(".tox").join(env)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {e}", path.display()));
        path
    }

    /// Write [`SAMPLE_PIPFILE`] under `name`.
    pub fn write_pipfile(&self, name: &str) -> PathBuf {
        self.write_file(name, SAMPLE_PIPFILE)
    }

    /// Write [`SAMPLE_LOCK`] under `name`.
    pub fn write_lock(&self, name: &str) -> PathBuf {
        self.write_file(name, SAMPLE_LOCK)
    }

    /// Write the host settings file (`tox-pipenv.toml`).
    pub fn write_settings(&self, toml: &str) -> PathBuf {
        self.write_file(SETTINGS_FILE, toml)
    }

    /// Read a file inside the project as bytes.
    pub fn read(&self, relative: &str) -> Vec<u8> {
        let path = self.path(relative);
        fs::read(&path).unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = String::from_utf8_lossy(&self.read(path)).into_owned();
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }

    /// Assert that two files inside the project are byte-identical.
    pub fn assert_same_bytes(&self, left: &str, right: &str) {
        assert!(
            self.read(left) == self.read(right),
            "Expected {} and {} to be byte-identical",
            left,
            right
        );
    }
}
