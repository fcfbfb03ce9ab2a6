use pipenv_fs::NormalizedPath;
use rstest::rstest;

#[rstest]
#[case("foo/bar/baz", "foo/bar/baz")]
#[case("foo\\bar\\baz", "foo/bar/baz")]
#[case("a/./b//c", "a/b/c")]
#[case("a/../b", "b")]
#[case("/a/b/../../c", "/c")]
#[case("//server/share/Pipfile", "//server/share/Pipfile")]
fn test_normalization(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("/project/.tox");
    assert_eq!(base.join("py").as_str(), "/project/.tox/py");
}

#[test]
fn test_join_with_parent_segment() {
    let base = NormalizedPath::new("/project/.tox/py");
    assert_eq!(base.join("../Pipfile").as_str(), "/project/.tox/Pipfile");
}

#[rstest]
#[case("/project/.tox/py", Some("/project/.tox"))]
#[case("/Pipfile", Some("/"))]
#[case("Pipfile", Some("."))]
#[case("/", None)]
fn test_parent(#[case] input: &str, #[case] expected: Option<&str>) {
    let parent = NormalizedPath::new(input).parent();
    assert_eq!(parent.as_ref().map(|p| p.as_str()), expected);
}

#[rstest]
#[case("/tmp/foo/bar/Pabstfile", Some("Pabstfile"))]
#[case("Pipfile.lock.py", Some("Pipfile.lock.py"))]
#[case("/", None)]
fn test_file_name(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(NormalizedPath::new(input).file_name(), expected);
}

#[rstest]
#[case("tox-pipenv.toml", Some("toml"))]
#[case("Pipfile.lock", Some("lock"))]
#[case("Pipfile", None)]
#[case(".hidden", None)]
fn test_extension(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(NormalizedPath::new(input).extension(), expected);
}

#[test]
fn test_serde_roundtrip_normalizes() {
    let path: NormalizedPath = serde_json::from_str("\"a\\\\b/./c\"").unwrap();
    assert_eq!(path.as_str(), "a/b/c");
    assert_eq!(serde_json::to_string(&path).unwrap(), "\"a/b/c\"");
}

#[rstest]
#[case("/project/.tox/py", "/project", true)]
#[case("/project", "/project", true)]
#[case("/project", "/project/", true)]
#[case("/project", "/", true)]
#[case("/project-other", "/project", false)]
#[case("/project", "/project/.tox", false)]
fn test_starts_with(#[case] path: &str, #[case] base: &str, #[case] expected: bool) {
    let path = NormalizedPath::new(path);
    assert_eq!(path.starts_with(&NormalizedPath::new(base)), expected);
}
