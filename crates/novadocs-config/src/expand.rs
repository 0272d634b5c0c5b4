//! `${VAR}` expansion for secrets and deployment-specific values.
//!
//! Only the braced form is recognised. `${VAR:-default}` falls back to the
//! default when `VAR` is unset; a bare `${VAR}` that is unset is an error
//! naming the config field it appeared in.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// `field` is the dotted config key, used in the error message.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| match std::env::var(var) {
        Ok(val) => Ok(Some(val)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

/// Name of a variable that could not be resolved.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NOVADOCS_TEST_APP_ID", "BH4D9OD16A");
        }
        let result = expand_env("${NOVADOCS_TEST_APP_ID}", "search.app_id").unwrap();
        assert_eq!(result, "BH4D9OD16A");
        unsafe {
            std::env::remove_var("NOVADOCS_TEST_APP_ID");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NOVADOCS_TEST_UNSET_INDEX");
        }
        let result =
            expand_env("${NOVADOCS_TEST_UNSET_INDEX:-nova}", "search.index_name").unwrap();
        assert_eq!(result, "nova");
    }

    #[test]
    fn test_expand_unset_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NOVADOCS_TEST_MISSING_KEY");
        }
        let err = expand_env("${NOVADOCS_TEST_MISSING_KEY}", "search.api_key").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("NOVADOCS_TEST_MISSING_KEY"));
        assert!(msg.contains("search.api_key"));
    }

    #[test]
    fn test_expand_embedded_in_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NOVADOCS_TEST_DOMAIN", "nova.example.com");
        }
        let result = expand_env("https://${NOVADOCS_TEST_DOMAIN}", "site.hostname").unwrap();
        assert_eq!(result, "https://nova.example.com");
        unsafe {
            std::env::remove_var("NOVADOCS_TEST_DOMAIN");
        }
    }

    #[test]
    fn test_bare_dollar_left_alone() {
        let result = expand_env("price$5", "site.title").unwrap();
        assert_eq!(result, "price$5");
    }

    #[test]
    fn test_expand_opt_none_is_noop() {
        let mut value = None;
        expand_opt(&mut value, "site.hostname").unwrap();
        assert!(value.is_none());
    }
}
