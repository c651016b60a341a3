use crate::{call::ApiReply, error::api_failure_message};
use hawkconnect_common::model::auth::{Credentials, Password};
use tracing::warn;

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct LoginScreen {
    pub email: String,
    pub password: Password,
    pub error: Option<String>,
}

impl LoginScreen {
    #[must_use]
    pub fn with_error(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }

    /// Only failures land here, a successful login replaces the screen.
    pub(crate) fn apply(&mut self, reply: ApiReply) {
        match reply {
            ApiReply::LoggedIn(Err(err)) => self.error = Some(api_failure_message(err)),
            other => warn!(reply = ?other, "Login screen ignored reply"),
        }
    }
}
