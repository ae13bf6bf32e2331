//! Shell-style wildcard recognition and matching for drive entry names.

use globset::GlobBuilder;

/// Characters that turn a path segment into a pattern.
const WILDCARD_CHARS: [char; 3] = ['*', '?', '['];

/// Check if a string contains wildcard characters.
pub fn is_pattern(s: &str) -> bool {
    s.contains(WILDCARD_CHARS)
}

/// Test `name` against a shell glob.
///
/// `*` and `?` never match `/`, `[!..]` and `[^..]` both negate and `\`
/// escapes the next character. A malformed pattern matches nothing.
pub fn matches(pattern: &str, name: &str) -> bool {
    let built = GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build();

    match built {
        Ok(glob) => glob.compile_matcher().is_match(name),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "ignoring malformed pattern");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pattern() {
        assert!(is_pattern("report*.csv"));
        assert!(is_pattern("file?.bin"));
        assert!(is_pattern("[abc].jpg"));
        assert!(!is_pattern("report.csv"));
        assert!(!is_pattern(""));
    }

    #[test]
    fn test_matches() {
        assert!(matches("*.txt", "notes.txt"));
        assert!(matches("file?.bin", "file1.bin"));
        assert!(matches("[ab]*.jpg", "beach.jpg"));
        assert!(!matches("*.txt", "notes.csv"));
        assert!(!matches("[ab]*.jpg", "cat.jpg"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        assert!(!matches("*.txt", "dir/notes.txt"));
        assert!(matches("*/*.txt", "dir/notes.txt"));
    }

    #[test]
    fn test_double_star_inside_segment() {
        assert!(matches("report**.csv", "report1.csv"));
    }

    #[test]
    fn test_caret_negation() {
        assert!(matches("[^a]*.log", "b.log"));
        assert!(!matches("[^a]*.log", "a.log"));
        assert!(matches("[!a]*.log", "b.log"));
    }

    #[test]
    fn test_backslash_escape() {
        assert!(matches("a\\*b", "a*b"));
        assert!(!matches("a\\*b", "axb"));
    }

    #[test]
    fn test_malformed_pattern_fails_closed() {
        assert!(!matches("[", "x"));
        assert!(!matches("[", "["));
    }
}
