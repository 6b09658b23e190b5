//! `${VAR}` expansion in the raw configuration text.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Replace every `${NAME}` with `lookup(NAME)`. An unset variable is an error.
pub fn expand_vars<F>(input: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();
    let expanded = VAR_PATTERN.replace_all(input, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        lookup(name).unwrap_or_else(|| {
            missing.push(name.to_string());
            String::new()
        })
    });

    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        return Err(Error::config(format!(
            "Unset environment variable(s): {}",
            missing.join(", ")
        )));
    }
    Ok(expanded.into_owned())
}

/// [`expand_vars`] against the process environment.
pub fn expand_env(input: &str) -> Result<String> {
    expand_vars(input, |name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "TMDB_KEY" => Some("abc".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_vars() {
        let out = expand_vars(r#"api_key = "${TMDB_KEY}" x = "${EMPTY}""#, lookup).unwrap();
        assert_eq!(out, r#"api_key = "abc" x = """#);
    }

    #[test]
    fn test_plain_dollar_untouched() {
        let out = expand_vars("price = \"$5\" and $HOME", lookup).unwrap();
        assert_eq!(out, "price = \"$5\" and $HOME");
    }

    #[test]
    fn test_unset_variable_is_error() {
        let err = expand_vars("${NOPE} ${TMDB_KEY}", lookup).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }
}
