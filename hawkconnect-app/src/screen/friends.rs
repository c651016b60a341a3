use crate::{
    call::{ApiCall, ApiReply},
    error::{ValidationError, api_failure_message},
};
use hawkconnect_common::model::{
    Id,
    campus::{Campus, CampusMarker},
    friend::{Friend, FriendFilter, FriendSelection},
    user::UserMarker,
};
use tracing::{info, warn};

/// Friend search and selection.
///
/// Opening the screen loads the campuses first and the unfiltered friends
/// list right after, whatever the campus request returned.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FriendsScreen {
    logged_user: Id<UserMarker>,
    pub campuses: Vec<Campus>,
    pub selected_campus: Option<Id<CampusMarker>>,
    pub name_filter: String,
    pub friends: Vec<Friend>,
    pub selection: FriendSelection,
    pub error: Option<String>,
    /// Set after a successful save until the user dismisses it.
    pub saved_notice: bool,
    loading_campuses: bool,
}

impl FriendsScreen {
    #[must_use]
    pub fn new(logged_user: Id<UserMarker>) -> Self {
        Self {
            logged_user,
            campuses: Vec::new(),
            selected_campus: None,
            name_filter: String::new(),
            friends: Vec::new(),
            selection: FriendSelection::new(),
            error: None,
            saved_notice: false,
            loading_campuses: false,
        }
    }

    #[must_use]
    pub fn logged_user(&self) -> Id<UserMarker> {
        self.logged_user
    }

    #[must_use]
    pub fn filter(&self) -> FriendFilter {
        FriendFilter::new(self.logged_user)
            .with_campus(self.selected_campus)
            .with_name(&self.name_filter)
    }

    pub(crate) fn activate(&mut self) -> Vec<ApiCall> {
        self.loading_campuses = true;
        vec![ApiCall::Campuses]
    }

    pub(crate) fn search(&self) -> Vec<ApiCall> {
        vec![ApiCall::Friends(self.filter())]
    }

    pub(crate) fn toggle(&mut self, friend: Id<UserMarker>, selected: bool) {
        self.selection.toggle(friend, selected);
    }

    pub(crate) fn save(&mut self) -> Vec<ApiCall> {
        if self.selection.is_empty() {
            self.error = Some(ValidationError::NoFriendsToSave.to_string());
            return vec![];
        }

        vec![ApiCall::SaveFriends {
            logged_user: self.logged_user,
            selection: self.selection.clone(),
        }]
    }

    pub(crate) fn apply(&mut self, reply: ApiReply) -> Vec<ApiCall> {
        match reply {
            ApiReply::Campuses(result) => {
                match result {
                    Ok(campuses) => {
                        self.campuses = campuses;
                        self.error = None;
                    }
                    Err(err) => self.error = Some(api_failure_message(err)),
                }
                if std::mem::take(&mut self.loading_campuses) {
                    return self.search();
                }
            }
            ApiReply::Friends(Ok(friends)) => {
                self.friends = friends;
                self.error = None;
            }
            ApiReply::FriendsSaved(Ok(())) => {
                info!(
                    user_id = %self.logged_user,
                    friends = %self.selection,
                    "Saved friends"
                );
                self.saved_notice = true;
                self.error = None;
            }
            ApiReply::Friends(Err(err)) | ApiReply::FriendsSaved(Err(err)) => {
                self.error = Some(api_failure_message(err));
            }
            other => warn!(reply = ?other, "Friends screen ignored reply"),
        }
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        call::{ApiCall, ApiReply},
        screen::FriendsScreen,
    };
    use hawkconnect_client::{ApiError, StatusCode};
    use hawkconnect_common::model::{Id, friend::Friend};

    fn friend(id: u32, name: &str) -> Friend {
        Friend {
            user_id: Id::new(id),
            complete_name: name.into(),
            ..Friend::default()
        }
    }

    #[test]
    fn activation_loads_campuses_then_friends() {
        let mut screen = FriendsScreen::new(Id::new(5));

        assert_eq!(screen.activate(), vec![ApiCall::Campuses]);

        let follow_up = screen.apply(ApiReply::Campuses(Err(ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        })));
        let [ApiCall::Friends(filter)] = follow_up.as_slice() else {
            panic!("expected a friends call, got {follow_up:?}");
        };
        assert_eq!(filter.logged_user, Id::new(5));
        assert_eq!(filter.campus, None);
        assert_eq!(filter.name, None);
        assert!(screen.error.is_some());

        // Later campus replies do not trigger another search.
        assert!(screen.apply(ApiReply::Campuses(Ok(vec![]))).is_empty());
    }

    #[test]
    fn search_uses_current_filters() {
        let mut screen = FriendsScreen::new(Id::new(5));
        screen.selected_campus = Some(Id::new(3));
        screen.name_filter = "  luis ".into();

        let calls = screen.search();
        let [ApiCall::Friends(filter)] = calls.as_slice() else {
            panic!("expected a friends call, got {calls:?}");
        };
        assert_eq!(filter.campus, Some(Id::new(3)));
        assert_eq!(filter.name.as_deref(), Some("luis"));
    }

    #[test]
    fn failed_search_keeps_previous_friends() {
        let mut screen = FriendsScreen::new(Id::new(5));
        let _ = screen.apply(ApiReply::Friends(Ok(vec![friend(7, "Luis Diaz")])));
        assert_eq!(screen.error, None);

        let _ = screen.apply(ApiReply::Friends(Err(ApiError::Rejected {
            message: "Sin resultados".into(),
        })));

        assert_eq!(screen.friends, vec![friend(7, "Luis Diaz")]);
        assert_eq!(screen.error.as_deref(), Some("Sin resultados"));
    }

    #[test]
    fn save_with_empty_selection_makes_no_call() {
        let mut screen = FriendsScreen::new(Id::new(5));

        assert!(screen.save().is_empty());
        assert!(
            screen
                .error
                .as_deref()
                .is_some_and(|error| error.contains("No friends selected"))
        );
        assert!(screen.friends.is_empty());
        assert!(!screen.saved_notice);
    }

    #[test]
    fn save_sends_selection_in_order() {
        let mut screen = FriendsScreen::new(Id::new(5));
        screen.toggle(Id::new(3), true);
        screen.toggle(Id::new(7), true);
        screen.toggle(Id::new(8), true);
        screen.toggle(Id::new(8), false);
        screen.toggle(Id::new(9), true);

        let calls = screen.save();
        let [ApiCall::SaveFriends { logged_user, selection }] = calls.as_slice() else {
            panic!("expected a save call, got {calls:?}");
        };
        assert_eq!(*logged_user, Id::new(5));
        assert_eq!(selection.to_wire(), "3,7,9");

        let _ = screen.apply(ApiReply::FriendsSaved(Ok(())));
        assert!(screen.saved_notice);
        assert_eq!(screen.error, None);
    }
}
