//! Canonical drive path construction.
//!
//! Drive paths are always `/`-separated regardless of the host platform, so
//! these helpers work on strings rather than `std::path::Path`.

/// Separator used by the drive namespace.
pub const SEPARATOR: char = '/';

/// The drive root.
pub const ROOT: &str = "/";

/// Lexically clean a slash-separated path.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. A `..` that would climb above the root of
/// an absolute path is discarded; on a relative path it is kept. An empty
/// input cleans to `"."`.
///
/// ```
/// use pan_session::path::clean;
///
/// assert_eq!(clean("/a//b/./c/.."), "/a/b");
/// assert_eq!(clean("/../x"), "/x");
/// assert_eq!(clean("a/../../b"), "../b");
/// ```
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with(SEPARATOR);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => continue,
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Join a user-supplied path onto a base directory.
///
/// Absolute inputs ignore `base`. The result is always an absolute,
/// cleaned path.
pub fn join(base: &str, path: &str) -> String {
    let joined = if path.starts_with(SEPARATOR) {
        clean(path)
    } else {
        clean(&format!("{}/{}", base, path))
    };

    if joined.starts_with(SEPARATOR) {
        joined
    } else {
        clean(&format!("/{}", joined))
    }
}

/// Every directory from the root down to and including `path`.
///
/// Used when creating a remote directory tree, where each parent has to
/// exist before its child.
///
/// ```
/// use pan_session::path::ancestors;
///
/// assert_eq!(ancestors("/a/b/c"), vec!["/", "/a", "/a/b", "/a/b/c"]);
/// ```
pub fn ancestors(path: &str) -> Vec<String> {
    let canonical = join(ROOT, path);
    let mut dirs = vec![ROOT.to_string()];
    let mut current = String::new();

    for segment in canonical.split(SEPARATOR).filter(|s| !s.is_empty()) {
        current.push(SEPARATOR);
        current.push_str(segment);
        dirs.push(current.clone());
    }

    dirs
}

/// Split a canonical path into its parent directory and final segment.
pub fn split(path: &str) -> (String, String) {
    let canonical = join(ROOT, path);
    match canonical.rfind(SEPARATOR) {
        Some(0) => (ROOT.to_string(), canonical[1..].to_string()),
        Some(idx) => (canonical[..idx].to_string(), canonical[idx + 1..].to_string()),
        None => (ROOT.to_string(), canonical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_table() {
        let cases = [
            ("", "."),
            ("abc", "abc"),
            ("abc/def", "abc/def"),
            (".", "."),
            ("..", ".."),
            ("../..", "../.."),
            ("/", "/"),
            ("//", "/"),
            ("/abc/", "/abc"),
            ("abc//def//ghi", "abc/def/ghi"),
            ("abc/./def", "abc/def"),
            ("/./abc/def", "/abc/def"),
            ("abc/def/ghi/../jkl", "abc/def/jkl"),
            ("abc/def/../../..", ".."),
            ("/abc/def/../../..", "/"),
            ("abc/../../../def", "../../def"),
            ("/../abc", "/abc"),
        ];

        for (input, expected) in cases {
            assert_eq!(clean(input), expected, "clean({:?})", input);
        }
    }

    #[test]
    fn test_join_relative() {
        assert_eq!(join("/work", "docs/a.txt"), "/work/docs/a.txt");
        assert_eq!(join("/work/sub", "../a.txt"), "/work/a.txt");
        assert_eq!(join("/", "."), "/");
    }

    #[test]
    fn test_join_absolute_ignores_base() {
        assert_eq!(join("/work", "/other//x/"), "/other/x");
    }

    #[test]
    fn test_join_never_escapes_root() {
        assert_eq!(join("/", "../../x"), "/x");
        assert_eq!(join("", "a"), "/a");
        assert_eq!(join("relative", "a"), "/relative/a");
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(ancestors("/a/b/c"), vec!["/", "/a", "/a/b", "/a/b/c"]);
        assert_eq!(ancestors("/"), vec!["/"]);
        assert_eq!(ancestors("/a//b/"), vec!["/", "/a", "/a/b"]);
    }

    #[test]
    fn test_split() {
        assert_eq!(split("/a/b/c.txt"), ("/a/b".to_string(), "c.txt".to_string()));
        assert_eq!(split("/c.txt"), ("/".to_string(), "c.txt".to_string()));
        assert_eq!(split("/"), ("/".to_string(), "".to_string()));
    }
}
