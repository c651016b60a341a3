use crate::{
    call::{ApiCall, ApiReply},
    error::{ValidationError, api_failure_message},
    session::Greeting,
};
use hawkconnect_common::model::{
    Id, ModelValidationError,
    auth::Password,
    campus::{Campus, CampusMarker},
    user::{NewUser, StudentNumber},
};
use tracing::warn;

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RegistrationDialog {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: Password,
    pub student_number: String,
    pub selected_campus: Option<Id<CampusMarker>>,
    pub campuses: Vec<Campus>,
    pub error: Option<String>,
}

impl RegistrationDialog {
    pub(crate) fn activate(&mut self) -> Vec<ApiCall> {
        self.error = None;
        vec![ApiCall::Campuses]
    }

    pub fn new_user(&self) -> Result<NewUser, ValidationError> {
        let student_number = StudentNumber::new(self.student_number.clone())
            .map_err(ModelValidationError::from)?;

        Ok(NewUser {
            name: self.name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            student_number,
            campus: self.selected_campus,
        })
    }

    #[must_use]
    pub fn greeting(&self) -> Greeting {
        Greeting {
            name: self.name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
        }
    }

    pub(crate) fn submit(&mut self) -> Vec<ApiCall> {
        match self.new_user() {
            Ok(new_user) => vec![ApiCall::Register(new_user)],
            Err(err) => {
                self.error = Some(err.to_string());
                vec![]
            }
        }
    }

    /// Applies everything except a successful registration, which the
    /// navigation root turns into the confirmation overlay.
    pub(crate) fn apply(&mut self, reply: ApiReply) -> Vec<ApiCall> {
        match reply {
            ApiReply::Campuses(Ok(campuses)) => {
                self.campuses = campuses;
                self.error = None;
            }
            ApiReply::Campuses(Err(err)) | ApiReply::Registered(Err(err)) => {
                self.error = Some(api_failure_message(err));
            }
            other => warn!(reply = ?other, "Registration dialog ignored reply"),
        }
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        call::{ApiCall, ApiReply},
        screen::{Overlay, OverlayKind, RegistrationDialog},
    };
    use hawkconnect_client::ApiError;
    use hawkconnect_common::model::{Id, campus::Campus};

    fn filled() -> RegistrationDialog {
        RegistrationDialog {
            name: " Ana ".into(),
            last_name: "Lopez".into(),
            email: "a@b.com".into(),
            password: "x".into(),
            student_number: "0481234".into(),
            ..RegistrationDialog::default()
        }
    }

    #[test]
    fn blank_student_number_is_rejected_locally() {
        let mut dialog = filled();
        dialog.student_number = "   ".into();

        assert!(dialog.submit().is_empty());
        assert!(dialog.error.is_some());
    }

    #[test]
    fn submit_builds_new_user() {
        let mut dialog = filled();
        dialog.selected_campus = Some(Id::new(2));

        let calls = dialog.submit();
        let [ApiCall::Register(new_user)] = calls.as_slice() else {
            panic!("expected a register call, got {calls:?}");
        };
        assert_eq!(new_user.name, "Ana");
        assert_eq!(new_user.student_number.get(), "0481234");
        assert_eq!(new_user.campus, Some(Id::new(2)));
        assert_eq!(dialog.greeting().name, "Ana");
    }

    #[test]
    fn campus_failure_keeps_previous_campuses() {
        let mut dialog = filled();
        let _ = dialog.apply(ApiReply::Campuses(Ok(vec![Campus {
            id: Id::new(1),
            name: "Norte".into(),
            is_active: true,
        }])));

        let _ = dialog.apply(ApiReply::Campuses(Err(ApiError::Rejected {
            message: "down".into(),
        })));

        assert_eq!(dialog.campuses.len(), 1);
        assert_eq!(dialog.error.as_deref(), Some("down"));
    }

    #[test]
    fn typed_password_stays_out_of_debug_output() {
        let mut dialog = filled();
        dialog.password = "hunter2".into();

        let new_user = dialog.new_user().unwrap();
        assert_eq!(new_user.password.expose(), "hunter2");

        let overlay = Overlay::Registration(dialog);
        assert_eq!(overlay.kind(), OverlayKind::Registration);
        assert!(!format!("{overlay:?}").contains("hunter2"));
    }
}
