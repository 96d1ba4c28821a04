//! Short stable course identifiers derived from structured group names.

use std::sync::LazyLock;

use regex::Regex;

/// Structured registrar name: `t<digit>.y<year>.s<section>.c<letter><number>.<dept>`.
static STRUCTURED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^t\d\.y\d{4}\.s\d{3}\.c\w(\d{4})\.(\w{4})").expect("structured name pattern")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("whitespace pattern"));

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").expect("non-word pattern"));

/// Derive a short stable identifier for a course.
///
/// When the primary group's name matches the structured registrar pattern,
/// the slug is `"CU" + department + course number`, with case preserved
/// verbatim from the name. Otherwise the slug falls back to the course
/// title with whitespace converted to underscores and the remaining
/// non-word characters stripped.
pub fn derive_slug(group_name: &str, title: &str) -> String {
    if let Some(caps) = STRUCTURED_NAME.captures(group_name) {
        let number = &caps[1];
        let department = &caps[2];
        return format!("CU{department}{number}");
    }

    let underscored = WHITESPACE.replace_all(title, "_");
    NON_WORD.replace_all(&underscored, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_name_yields_registrar_slug() {
        assert_eq!(
            derive_slug("t1.y2024.s001.cA1234.ARTH", "Intro to Art History"),
            "CUARTH1234"
        );
    }

    #[test]
    fn test_department_case_is_preserved() {
        assert_eq!(derive_slug("t2.y2023.s002.cB5678.math", "Calc"), "CUmath5678");
    }

    #[test]
    fn test_unparsable_name_falls_back_to_title() {
        assert_eq!(derive_slug("spring seminar", "Intro to Art!"), "Intro_to_Art");
    }

    #[test]
    fn test_fallback_converts_all_whitespace() {
        assert_eq!(derive_slug("x", "a\tb c"), "a_b_c");
    }

    #[test]
    fn test_fallback_strips_non_word_characters() {
        assert_eq!(derive_slug("x", "C++ (advanced)"), "C_advanced");
    }
}
