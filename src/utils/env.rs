use crate::error::{ArcError, Result};

/// Split a `KEY=VALUE` assignment. Only the first `=` separates, so values
/// may contain `=` themselves; the key is trimmed and must not be empty.
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    let Some((key, value)) = arg.split_once('=') else {
        return Err(ArcError::InvalidArgument(format!(
            "Invalid property format: '{}'. Expected KEY=VALUE, e.g. 'arc set ARC_AI_URL=https://...'",
            arg
        )));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(ArcError::InvalidArgument(format!(
            "Invalid property format: '{}'. The property name before '=' cannot be empty.",
            arg
        )));
    }

    Ok((key.to_string(), value.to_string()))
}

/// Read a process environment variable, treating empty values as unset.
pub fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_assignment() {
        let (key, value) = parse_assignment("ARC_AI_URL=https://example.com").unwrap();
        assert_eq!(key, "ARC_AI_URL");
        assert_eq!(value, "https://example.com");
    }

    #[test]
    fn test_parse_assignment_keeps_later_equals_in_value() {
        let (key, value) = parse_assignment("ARC_AI_KEY=abc==").unwrap();
        assert_eq!(key, "ARC_AI_KEY");
        assert_eq!(value, "abc==");
    }

    #[test]
    fn test_parse_assignment_allows_empty_value() {
        let (key, value) = parse_assignment("ARC_MODEL=").unwrap();
        assert_eq!(key, "ARC_MODEL");
        assert_eq!(value, "");
    }

    #[test]
    fn test_parse_assignment_invalid() {
        assert!(matches!(
            parse_assignment("ARC_AI_URL"),
            Err(ArcError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_assignment(" =value"),
            Err(ArcError::InvalidArgument(_))
        ));
    }

    #[test]
    #[serial]
    fn test_non_empty_var() {
        std::env::set_var("ARC_RUNNER_TEST_VAR", "set");
        assert_eq!(non_empty_var("ARC_RUNNER_TEST_VAR"), Some("set".to_string()));

        std::env::set_var("ARC_RUNNER_TEST_VAR", "");
        assert_eq!(non_empty_var("ARC_RUNNER_TEST_VAR"), None);

        std::env::remove_var("ARC_RUNNER_TEST_VAR");
        assert_eq!(non_empty_var("ARC_RUNNER_TEST_VAR"), None);
    }
}
