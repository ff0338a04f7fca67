mod args;
mod prompt;

pub use args::{AwsCommand, CheckArgs, Cli, ProviderCommand};
pub use prompt::prompt_input;

/// Splits a comma-separated list, trimming items and dropping empty ones.
pub fn parse_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_list_empty() {
        assert!(parse_comma_list("").is_empty());
    }

    #[test]
    fn test_parse_comma_list_normal() {
        assert_eq!(parse_comma_list("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_comma_list_spaces() {
        assert_eq!(parse_comma_list("a, b , c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_comma_list_extra_commas() {
        assert_eq!(parse_comma_list("a,,c,"), vec!["a", "c"]);
    }
}
