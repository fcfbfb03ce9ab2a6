//! Slash-separated paths for manifests, locks and environment directories

use std::path::{Path, PathBuf};

/// Artifact location with `/` separators on every platform.
///
/// `.` segments and repeated separators are dropped and `..` segments are
/// folded into their parent where one exists. Paths are converted to the
/// platform-native form only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        Self { inner: clean(&raw) }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Native form, for handing to `std::fs` and `std::process`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Append `segment`, which may itself hold several components.
    pub fn join(&self, segment: &str) -> Self {
        if segment.is_empty() {
            return self.clone();
        }
        let segment = segment.replace('\\', "/");
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Containing directory; `None` for `/`, `.` and the empty path.
    pub fn parent(&self) -> Option<Self> {
        let body = self.inner.trim_end_matches('/');
        let inner = match body.rsplit_once('/') {
            Some(("", _)) => "/".to_string(),
            Some((dir, _)) => dir.to_string(),
            None if body.is_empty() || body == "." => return None,
            None => ".".to_string(),
        };
        Some(Self { inner })
    }

    /// Last component, unless it is `.` or `..`.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rsplit('/').next() {
            Some("") | Some(".") | Some("..") | None => None,
            Some(name) => Some(name),
        }
    }

    /// True when `self` is `base` or lies somewhere below it.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        let base = base.inner.trim_end_matches('/');
        match self.inner.strip_prefix(base) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn exists(&self) -> bool {
        Path::new(&self.inner).exists()
    }

    pub fn is_dir(&self) -> bool {
        Path::new(&self.inner).is_dir()
    }

    pub fn is_file(&self) -> bool {
        Path::new(&self.inner).is_file()
    }

    /// Settings format hint; dotfiles such as `.env` have none.
    pub fn extension(&self) -> Option<&str> {
        match self.file_name()?.rsplit_once('.')? {
            ("", _) => None,
            (_, ext) => Some(ext),
        }
    }
}

/// Collapse separators, `.` and `..` segments.
///
/// A leading `//` (UNC share) is preserved. Leading `..` segments of a
/// relative path are kept since there is nothing to fold them into.
fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let (prefix, rest) = if raw.starts_with("//") && !raw.starts_with("///") {
        ("//", &raw[2..])
    } else if raw.starts_with('/') {
        ("/", raw.trim_start_matches('/'))
    } else {
        ("", raw)
    };

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&"..") | None if prefix.is_empty() => parts.push(".."),
                Some(&"..") | None => {}
                Some(_) => {
                    parts.pop();
                }
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (prefix, body.is_empty()) {
        ("", true) => ".".to_string(),
        (p, true) => p.to_string(),
        (p, false) => format!("{}{}", p, body),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

macro_rules! normalized_from {
    ($($source:ty),*) => {
        $(
            impl From<$source> for NormalizedPath {
                fn from(value: $source) -> Self {
                    Self::new(value)
                }
            }
        )*
    };
}

normalized_from!(&str, String, PathBuf, &Path);

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> serde::Deserialize<'de> for NormalizedPath {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
