//! Secret values carried through configuration.

use std::fmt;

use serde::Deserialize;

/// A password or passphrase.
///
/// Compared and hashed by value so that two configurations differing only in a
/// password are not equal, but never printed: both `Debug` and `Display`
/// render a fixed placeholder.
///
/// Zeroing the memory on drop is left to the consumer that actually unlocks
/// the key material.
#[derive(Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Creates a password from any string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The empty password, used when none is configured.
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Exposes the secret. Callers must not log the result.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if no password was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_hide_the_value() {
        let password = Password::new("hunter2");

        assert!(!format!("{password:?}").contains("hunter2"));
        assert!(!format!("{password}").contains("hunter2"));
    }

    #[test]
    fn equality_includes_the_value() {
        assert_eq!(Password::new("a"), Password::from("a"));
        assert_ne!(Password::new("a"), Password::new("b"));
    }

    #[test]
    fn empty_password_is_default() {
        assert!(Password::default().is_empty());
        assert_eq!(Password::empty(), Password::default());
    }

    #[test]
    fn deserializes_from_plain_string() {
        #[derive(Deserialize)]
        struct Holder {
            password: Password,
        }

        let holder: Holder = toml::from_str(r#"password = "s3cret""#).unwrap();
        assert_eq!(holder.password.expose(), "s3cret");
    }
}
