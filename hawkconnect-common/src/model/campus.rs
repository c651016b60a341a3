use crate::model::Id;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CampusMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Campus {
    pub id: Id<CampusMarker>,
    pub name: String,
    pub is_active: bool,
}
