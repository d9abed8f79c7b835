//! Environment variable expansion for configuration strings.
//!
//! - `${VAR}` expands to the value of VAR, and is an error if VAR is unset
//! - `${VAR:-default}` expands to VAR if set, otherwise to `default`

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

static BRACED_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-[^}]*)?\}").unwrap());

/// Expand variable references in `value`. `field` names the setting in errors.
///
/// Only braced references expand; a bare `$VAR` is kept as written.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    for reference in BRACED_REF_RE.find_iter(value) {
        out.push_str(&value[last..reference.start()]);
        let expanded = shellexpand::env_with_context(reference.as_str(), |var| {
            std::env::var(var).map(Some).map_err(|_| UnsetVar)
        })
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.var_name),
        })?;
        out.push_str(&expanded);
        last = reference.end();
    }
    out.push_str(&value[last..]);
    Ok(out)
}

struct UnsetVar;

/// Expand every string in a list.
pub(crate) fn expand_all(values: &mut [String], field: &str) -> Result<(), ConfigError> {
    for value in values {
        *value = expand_env(value, field)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("HELPDOCS_TEST_SIMPLE", "hello");
        }
        assert_eq!(expand_env("${HELPDOCS_TEST_SIMPLE}", "f").unwrap(), "hello");
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_UNSET");
        }
        assert_eq!(
            expand_env("v${HELPDOCS_TEST_UNSET:-1.0}", "project.version").unwrap(),
            "v1.0"
        );
    }

    #[test]
    fn test_unset_without_default_is_error() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_MISSING");
        }
        let err = expand_env("${HELPDOCS_TEST_MISSING}", "project.title").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in project.title: ${HELPDOCS_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_plain_value_untouched() {
        assert_eq!(expand_env("costs $5", "f").unwrap(), "costs $5");
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }

    #[test]
    fn test_bare_dollar_var_not_expanded() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("HELPDOCS_TEST_BARE", "/home/docs");
        }
        assert_eq!(
            expand_env("$HELPDOCS_TEST_BARE/out/${HELPDOCS_TEST_BARE}", "docs.output_dir").unwrap(),
            "$HELPDOCS_TEST_BARE/out//home/docs"
        );
        unsafe {
            std::env::remove_var("HELPDOCS_TEST_BARE");
        }
    }
}
