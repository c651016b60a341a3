use std::fmt::{Debug, Formatter};

#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct Password(String);

/// Login payload. Only ever sent, never stored.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Credentials {
    pub email: String,
    pub password: Password,
}

impl Password {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Password::new(password),
        }
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[redacted]").finish()
    }
}
