//! Tests for path resolution, ancestry and wildcard helpers.

use pan_session::escape::{escape, unescape};
use pan_session::path::{ancestors, clean, join};
use pan_session::wildcard::{is_pattern, matches};
use pan_session::IdGenerator;

mod canonical_paths {
    use super::*;

    #[test]
    fn relative_against_workdir() {
        assert_eq!(join("/Photos/2024", "trip/img.jpg"), "/Photos/2024/trip/img.jpg");
    }

    #[test]
    fn dot_segments_and_duplicate_separators() {
        assert_eq!(join("/a", ".//b/./c//"), "/a/b/c");
        assert_eq!(join("/a/b", "../../../c"), "/c");
    }

    #[test]
    fn no_trailing_slash_except_root() {
        assert_eq!(clean("/a/b/"), "/a/b");
        assert_eq!(clean("/"), "/");
        assert_eq!(join("/a", ".."), "/");
    }
}

mod ancestry {
    use super::*;

    #[test]
    fn root_to_leaf_order() {
        assert_eq!(ancestors("/a/b/c"), vec!["/", "/a", "/a/b", "/a/b/c"]);
    }

    #[test]
    fn root_only() {
        assert_eq!(ancestors("/"), vec!["/"]);
    }

    #[test]
    fn input_is_cleaned_first() {
        assert_eq!(ancestors("/a/./b/../c"), vec!["/", "/a", "/a/c"]);
    }
}

mod patterns {
    use super::*;

    #[test]
    fn classification() {
        assert!(is_pattern("report*.csv"));
        assert!(!is_pattern("report.csv"));
    }

    #[test]
    fn matching() {
        assert!(matches("*.txt", "notes.txt"));
        assert!(!matches("[", "x"));
    }

    #[test]
    fn negated_class() {
        assert!(matches("[!a]*.log", "b.log"));
        assert!(!matches("[!a]*.log", "a.log"));
        assert!(matches("[^a]*.log", "b.log"));
    }

    #[test]
    fn shell_forms_users_type() {
        assert!(matches("report**.csv", "report1.csv"));
        assert!(matches("a\\*b", "a*b"));
    }
}

mod escaping {
    use super::*;

    #[test]
    fn escaped_segments_survive_round_trip() {
        for segment in ["季度 报告.xlsx", "a+b=c", "what?#frag", "%41"] {
            let escaped = escape(segment);
            assert!(!escaped.contains('/'));
            assert_eq!(escape(&unescape(&escaped)), escaped);
        }
    }

    #[test]
    fn matches_go_path_escape() {
        let cases = [
            ("a;b", "a%3Bb"),
            ("a,b", "a%2Cb"),
            ("a/b", "a%2Fb"),
            ("a?b", "a%3Fb"),
            ("a#b", "a%23b"),
            ("a b", "a%20b"),
            ("100%", "100%25"),
            ("$&+:=@", "$&+:=@"),
            ("-_.~", "-_.~"),
            ("a!b*c", "a%21b%2Ac"),
            ("k=v;x,y", "k=v%3Bx%2Cy"),
        ];

        for (input, expected) in cases {
            assert_eq!(escape(input), expected, "escape({:?})", input);
            assert_eq!(escape(&unescape(expected)), expected);
        }
    }

    #[test]
    fn malformed_input_does_not_panic() {
        assert_eq!(unescape("%"), "%");
        assert_eq!(unescape("%G1abc"), "%G1abc");
    }
}

mod random_ids {
    use super::*;

    #[test]
    fn fixed_length_from_alphabet() {
        let mut generator = IdGenerator::new();
        for _ in 0..100 {
            let id = generator.generate(8);
            assert_eq!(id.len(), 8);
            assert!(id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
