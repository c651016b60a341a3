use hawkconnect_common::model::{
    Id,
    user::{User, UserMarker},
};

/// The logged-in user, held in memory only.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Session {
    pub user_id: Id<UserMarker>,
    pub name: String,
    pub last_name: String,
}

/// Name shown on the welcome screen.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Greeting {
    pub name: String,
    pub last_name: String,
}

impl Session {
    #[must_use]
    pub fn greeting(&self) -> Greeting {
        Greeting {
            name: self.name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

impl From<&User> for Session {
    fn from(value: &User) -> Self {
        Self {
            user_id: value.id,
            name: value.name.clone(),
            last_name: value.last_name.clone(),
        }
    }
}
