use crate::{
    model::{Id, campus::CampusMarker, user::UserMarker},
    util::join_ids,
};
use std::fmt::{Display, Formatter};

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Friend {
    pub user_id: Id<UserMarker>,
    pub complete_name: String,
    pub email: String,
    pub student_number: u64,
    pub campus_id: Id<CampusMarker>,
    pub campus_name: String,
    pub is_friend: bool,
}

/// Query for the friends list of the logged-in user.
///
/// `campus: None` is sent as campus id 0, which the server reads as "any
/// campus". A blank name filter is dropped.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct FriendFilter {
    pub logged_user: Id<UserMarker>,
    pub campus: Option<Id<CampusMarker>>,
    pub name: Option<String>,
}

impl FriendFilter {
    #[must_use]
    pub fn new(logged_user: Id<UserMarker>) -> Self {
        Self {
            logged_user,
            campus: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_campus(mut self, campus: Option<Id<CampusMarker>>) -> Self {
        self.campus = campus;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        let name = name.trim();
        self.name = (!name.is_empty()).then(|| name.to_owned());
        self
    }
}

/// Friends chosen on the friends screen, kept in the order they were checked.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct FriendSelection(Vec<Id<UserMarker>>);

impl FriendSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or removes `id` depending on the checkbox state.
    pub fn toggle(&mut self, id: Id<UserMarker>, selected: bool) {
        if selected {
            self.insert(id);
        } else {
            self.remove(id);
        }
    }

    pub fn insert(&mut self, id: Id<UserMarker>) -> bool {
        if self.contains(id) {
            false
        } else {
            self.0.push(id);
            true
        }
    }

    pub fn remove(&mut self, id: Id<UserMarker>) -> bool {
        let len = self.0.len();
        self.0.retain(|selected| *selected != id);
        self.0.len() != len
    }

    #[must_use]
    pub fn contains(&self, id: Id<UserMarker>) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn ids(&self) -> &[Id<UserMarker>] {
        &self.0
    }

    /// The selection in the server's list format, e.g. `3,7,9`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        join_ids(&self.0)
    }
}

impl Display for FriendSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromIterator<Id<UserMarker>> for FriendSelection {
    fn from_iter<T: IntoIterator<Item = Id<UserMarker>>>(iter: T) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Id,
        friend::{FriendFilter, FriendSelection},
    };

    #[test]
    fn selection_keeps_insertion_order() {
        let mut selection = FriendSelection::new();
        selection.toggle(Id::new(3), true);
        selection.toggle(Id::new(7), true);
        selection.toggle(Id::new(9), true);

        assert_eq!(selection.to_wire(), "3,7,9");

        let mut reversed = FriendSelection::new();
        for id in [9, 7, 3] {
            reversed.insert(Id::new(id));
        }
        assert_eq!(reversed.to_wire(), "9,7,3");
    }

    #[test]
    fn selection_toggle_off_and_duplicates() {
        let mut selection: FriendSelection = [4, 4, 8].into_iter().map(Id::new).collect();
        assert_eq!(selection.len(), 2);

        selection.toggle(Id::new(4), false);
        assert!(!selection.contains(Id::new(4)));
        assert_eq!(selection.to_string(), "8");

        selection.toggle(Id::new(8), false);
        assert!(selection.is_empty());
        assert_eq!(selection.to_wire(), "");

        assert!(!selection.remove(Id::new(8)));
    }

    #[test]
    fn filter_drops_blank_name() {
        let filter = FriendFilter::new(Id::new(5)).with_name("   ");
        assert_eq!(filter.name, None);
        assert_eq!(filter.campus, None);

        let filter = FriendFilter::new(Id::new(5))
            .with_campus(Some(Id::new(2)))
            .with_name("  Ana ");
        assert_eq!(filter.name.as_deref(), Some("Ana"));
        assert_eq!(filter.campus, Some(Id::new(2)));
    }
}
