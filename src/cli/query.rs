//! Evaluate paths against JSON input

use serde_json::Value as JsonValue;

use super::CliError;
use crate::parse;

/// Options for the query command
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// The path to evaluate
    pub path: String,
    /// JSON input string
    pub input: Option<String>,
}

/// Evaluate the path and return the selected values as one JSON array.
pub fn execute_query(options: &QueryOptions) -> Result<JsonValue, CliError> {
    // parse first so syntax errors win over missing input
    let path = parse(&options.path)?;

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: JsonValue = serde_json::from_str(json_str)?;

    Ok(JsonValue::Array(path.evaluate(&document)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_wraps_results_in_array() {
        let options = QueryOptions {
            path: "$.items[1:]".to_string(),
            input: Some(r#"{"items": [1, 2, 3]}"#.to_string()),
        };
        assert_eq!(execute_query(&options).unwrap(), json!([2, 3]));
    }

    #[test]
    fn test_query_without_input() {
        let options = QueryOptions {
            path: "$".to_string(),
            input: None,
        };
        assert!(matches!(execute_query(&options), Err(CliError::NoInput)));
    }

    #[test]
    fn test_query_invalid_json() {
        let options = QueryOptions {
            path: "$".to_string(),
            input: Some("{".to_string()),
        };
        assert!(matches!(execute_query(&options), Err(CliError::Json(_))));
    }
}
