//! Registry credential resolution.

/// Environment variable holding an API token, sent as `__token__`.
pub const ENV_TOKEN: &str = "PYPI_TOKEN";
/// Environment variable holding a plain username.
pub const ENV_USERNAME: &str = "TWINE_USERNAME";
/// Environment variable holding the matching password.
pub const ENV_PASSWORD: &str = "TWINE_PASSWORD";

/// Username slot the index expects for token authentication.
const TOKEN_USERNAME: &str = "__token__";

/// Opaque credentials for the package index.
///
/// Only read, never persisted. The secret is redacted from Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryCredentials {
    username: String,
    secret: String,
}

impl RegistryCredentials {
    /// Credentials from an API token.
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            username: TOKEN_USERNAME.to_string(),
            secret: token.into(),
        }
    }

    /// Credentials from a username/password pair.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: password.into(),
        }
    }

    /// Returns the username to authenticate as.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the secret (token or password).
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Resolves credentials from the process environment.
    ///
    /// Precedence: `PYPI_TOKEN`, then `TWINE_USERNAME`/`TWINE_PASSWORD`.
    /// Empty values count as unset.
    #[must_use]
    pub fn resolve() -> Option<Self> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolves credentials through the given lookup.
    #[must_use]
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let present = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(token) = present(ENV_TOKEN) {
            return Some(Self::token(token));
        }

        let username = present(ENV_USERNAME)?;
        let password = present(ENV_PASSWORD)?;
        Some(Self::basic(username, password))
    }
}

impl std::fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_token_takes_precedence() {
        let creds = RegistryCredentials::resolve_with(lookup(&[
            (ENV_TOKEN, "pypi-abc"),
            (ENV_USERNAME, "alice"),
            (ENV_PASSWORD, "hunter2"),
        ]))
        .unwrap();
        assert_eq!(creds.username(), "__token__");
        assert_eq!(creds.secret(), "pypi-abc");
    }

    #[test]
    fn test_username_password_pair() {
        let creds = RegistryCredentials::resolve_with(lookup(&[
            (ENV_USERNAME, "alice"),
            (ENV_PASSWORD, "hunter2"),
        ]))
        .unwrap();
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.secret(), "hunter2");
    }

    #[test]
    fn test_username_without_password_is_unset() {
        let creds = RegistryCredentials::resolve_with(lookup(&[(ENV_USERNAME, "alice")]));
        assert!(creds.is_none());
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let creds = RegistryCredentials::resolve_with(lookup(&[
            (ENV_TOKEN, ""),
            (ENV_USERNAME, "alice"),
            (ENV_PASSWORD, "hunter2"),
        ]))
        .unwrap();
        assert_eq!(creds.username(), "alice");
    }

    #[test]
    fn test_nothing_set() {
        assert!(RegistryCredentials::resolve_with(lookup(&[])).is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = RegistryCredentials::token("pypi-abc");
        let debug = format!("{creds:?}");
        assert!(debug.contains("__token__"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("pypi-abc"));
    }
}
