use crate::model::{Id, auth::Password, campus::CampusMarker};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct User {
    pub id: Id<UserMarker>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub student_number: u64,
    pub campus_id: Id<CampusMarker>,
    pub campus_name: String,
}

/// Registration form as submitted to the server.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: Password,
    pub student_number: StudentNumber,
    pub campus: Option<Id<CampusMarker>>,
}

/// Student number as typed by the user; registration sends it as a string.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct StudentNumber(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The student number must not be empty")]
pub struct InvalidStudentNumberError;

impl StudentNumber {
    pub fn new(student_number: String) -> Result<Self, InvalidStudentNumberError> {
        let trimmed = student_number.trim();
        if trimmed.is_empty() {
            Err(InvalidStudentNumberError)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::model::user::{InvalidStudentNumberError, StudentNumber};

    #[test]
    fn student_number_rejects_blank() {
        assert_eq!(
            StudentNumber::new(String::new()),
            Err(InvalidStudentNumberError)
        );
        assert_eq!(
            StudentNumber::new("  \t".into()),
            Err(InvalidStudentNumberError)
        );
        assert_eq!(
            StudentNumber::new(" 0481234 ".into()).unwrap().get(),
            "0481234"
        );
    }
}
