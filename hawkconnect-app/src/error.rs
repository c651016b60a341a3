use hawkconnect_client::ApiError;
use hawkconnect_common::model::ModelValidationError;
use thiserror::Error;

/// Input rejected before any request is made.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ValidationError {
    #[error("No friends selected to save")]
    NoFriendsToSave,
    #[error("No friends selected to view posts")]
    NoFriendsToView,
    #[error("You are not logged in, please log in again")]
    NotLoggedIn,
    #[error(transparent)]
    Model(#[from] ModelValidationError),
}

/// Why a user action ended without success.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl ActionError {
    /// Message shown to the user: the server's message if it sent one, then
    /// the HTTP status with its body, then the error text.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Api(err) => {
                if let Some(message) = err.server_message() {
                    message.to_owned()
                } else if let ApiError::Rejected { .. } = err {
                    "The server rejected the request".to_owned()
                } else {
                    err.to_string()
                }
            }
            other => other.to_string(),
        }
    }
}

/// Visible message for a failed remote call.
pub(crate) fn api_failure_message(err: ApiError) -> String {
    ActionError::from(err).user_message()
}

#[cfg(test)]
mod tests {
    use crate::error::{ActionError, ValidationError};
    use hawkconnect_client::{ApiError, StatusCode};
    use hawkconnect_common::model::{ModelValidationError, post::InvalidPostContentError};

    #[test]
    fn server_message_wins() {
        let err = ActionError::from(ApiError::Rejected {
            message: "Usuario no válido".into(),
        });
        assert_eq!(err.user_message(), "Usuario no válido");

        let err = ActionError::from(ApiError::Rejected {
            message: String::new(),
        });
        assert_eq!(err.user_message(), "The server rejected the request");
    }

    #[test]
    fn status_then_error_text() {
        let err = ActionError::from(ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        });
        assert_eq!(err.user_message(), "HTTP 502 Bad Gateway: upstream down");

        let err = ActionError::Unexpected("task panicked".into());
        assert_eq!(err.user_message(), "Unexpected failure: task panicked");
    }

    #[test]
    fn validation_messages_are_not_empty() {
        let errors = [
            ValidationError::NoFriendsToSave,
            ValidationError::NoFriendsToView,
            ValidationError::NotLoggedIn,
            ValidationError::Model(ModelValidationError::PostContent(InvalidPostContentError)),
        ];

        for err in errors {
            assert!(!ActionError::from(err).user_message().is_empty());
        }
    }
}
