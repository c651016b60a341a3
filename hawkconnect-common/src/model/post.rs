use crate::model::{Id, campus::CampusMarker, user::UserMarker};
use thiserror::Error;
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author_id: Id<UserMarker>,
    pub author_name: String,
    pub campus_id: Id<CampusMarker>,
    pub campus_name: String,
    pub timestamp: PostTimestamp,
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct NewPost {
    pub author: Id<UserMarker>,
    pub content: PostContent,
}

/// Body of a post being created. Never blank.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PostContent(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post content must not be empty")]
pub struct InvalidPostContentError;

impl PostContent {
    pub fn new(content: String) -> Result<Self, InvalidPostContentError> {
        if content.trim().is_empty() {
            Err(InvalidPostContentError)
        } else {
            Ok(Self(content))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

/// Timestamp exactly as the server sent it.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostTimestamp(String);

impl PostTimestamp {
    #[must_use]
    pub fn new(raw: String) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the `/Date(1700000000000)/` form, with or without a trailing
    /// `+hhmm` offset. Other formats yield `None`.
    #[must_use]
    pub fn to_utc(&self) -> Option<UtcDateTime> {
        let inner = self
            .0
            .trim()
            .strip_prefix("/Date(")?
            .strip_suffix(")/")?;
        let millis_end = inner
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '+' || *c == '-')
            .map_or(inner.len(), |(index, _)| index);
        let millis: i64 = inner[..millis_end].parse().ok()?;

        UtcDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
    }
}
