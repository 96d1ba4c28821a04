//! Parser for the bulk-add text format.

/// One parsed provisioning directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionEntry {
    /// Username to resolve or create.
    pub username: String,
    /// Password to set, when one was supplied.
    pub password: Option<String>,
    /// Whether the line carried the leading `*` faculty marker.
    pub faculty: bool,
}

/// Parse a provisioning batch.
///
/// Grammar, per line: optional leading `*` marks the user for faculty
/// assignment; then a username, optionally followed by `:password` split
/// at the first colon. Blank lines and lines whose username is empty
/// after trimming are skipped. An empty password after the colon counts
/// as no password supplied.
pub fn parse_batch(input: &str) -> Vec<ProvisionEntry> {
    input.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ProvisionEntry> {
    let line = line.trim();

    let (faculty, rest) = match line.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, line),
    };

    let (username, password) = match rest.split_once(':') {
        Some((username, password)) if !password.is_empty() => {
            (username, Some(password.to_string()))
        }
        Some((username, _)) => (username, None),
        None => (rest, None),
    };

    let username = username.trim();
    if username.is_empty() {
        return None;
    }

    Some(ProvisionEntry {
        username: username.to_string(),
        password,
        faculty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, password: Option<&str>, faculty: bool) -> ProvisionEntry {
        ProvisionEntry {
            username: username.to_string(),
            password: password.map(str::to_string),
            faculty,
        }
    }

    #[test]
    fn test_parses_the_three_line_forms() {
        let entries = parse_batch("alice:secret\n*bob:hunter2\ncarol");
        assert_eq!(
            entries,
            vec![
                entry("alice", Some("secret"), false),
                entry("bob", Some("hunter2"), true),
                entry("carol", None, false),
            ]
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let entries = parse_batch("\nalice\n\n   \nbob\n");
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_empty_usernames_are_skipped() {
        assert!(parse_batch("*").is_empty());
        assert!(parse_batch(":password").is_empty());
        assert!(parse_batch("*:password").is_empty());
    }

    #[test]
    fn test_username_is_trimmed() {
        let entries = parse_batch("  dana  ");
        assert_eq!(entries, vec![entry("dana", None, false)]);
    }

    #[test]
    fn test_password_splits_at_the_first_colon() {
        let entries = parse_batch("erin:pass:word");
        assert_eq!(entries, vec![entry("erin", Some("pass:word"), false)]);
    }

    #[test]
    fn test_empty_password_counts_as_none() {
        let entries = parse_batch("frank:");
        assert_eq!(entries, vec![entry("frank", None, false)]);
    }

    #[test]
    fn test_faculty_marker_only_at_line_start() {
        let entries = parse_batch("gr*eg");
        assert_eq!(entries, vec![entry("gr*eg", None, false)]);
    }
}
