//! Validate path syntax

use super::CliError;
use crate::parse;

/// Parse `path` and return its canonical text.
pub fn execute_check(path: &str) -> Result<String, CliError> {
    Ok(parse(path)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_normalizes() {
        assert_eq!(
            execute_check("$['store'].book[?(@.price < 10)]").unwrap(),
            "$.store.book[?(@.price<10)]"
        );
    }

    #[test]
    fn test_check_reports_syntax_errors() {
        assert!(matches!(execute_check("$."), Err(CliError::Parse(_))));
    }
}
