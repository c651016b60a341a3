pub mod auth;
pub mod campus;
pub mod friend;
pub mod post;
pub mod user;

use crate::model::{post::InvalidPostContentError, user::InvalidStudentNumberError};
use derive_where::derive_where;
use std::{fmt::Display, marker::PhantomData, num::ParseIntError, str::FromStr};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    PostContent(#[from] InvalidPostContentError),
    #[error(transparent)]
    StudentNumber(#[from] InvalidStudentNumberError),
}

/// Server-assigned integer id, tagged with the kind of entity it names.
#[derive_where(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(u32, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id, PhantomData)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> FromStr for Id<Marker> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u32::from_str(s.trim()).map(Self::new)
    }
}

impl<Marker> From<u32> for Id<Marker> {
    fn from(value: u32) -> Self {
        Id::new(value)
    }
}

impl<Marker> From<Id<Marker>> for u32 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}
