use hawkconnect_common::model::{
    Id,
    auth::Credentials,
    campus::{Campus, CampusMarker},
    friend::{Friend, FriendFilter, FriendSelection},
    post::{NewPost, Post, PostMarker, PostTimestamp},
    user::{NewUser, User, UserMarker},
};
use serde::{Deserialize, Deserializer, Serialize};

pub(crate) const EXECUTE_RESULT_OK: &str = "OK";
pub(crate) const OPERATION_CREATE: &str = "CREATE";
pub(crate) const ANY_CAMPUS: u32 = 0;

/// ASP.NET page methods wrap every result in `{"d": ...}`.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "d")]
    pub data: T,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct ExecuteStatus {
    pub execute_result: Option<String>,
    pub message: Option<String>,
}

impl ExecuteStatus {
    pub fn is_ok(&self) -> bool {
        self.execute_result.as_deref() == Some(EXECUTE_RESULT_OK)
    }

    pub fn into_message(self) -> String {
        self.message.unwrap_or_default()
    }
}

// Requests

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LoginRequestRecord<'a> {
    pub login_data: LoginDataRecord<'a>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct LoginDataRecord<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RegisterRequestRecord<'a> {
    pub new_user: NewUserRecord<'a>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct NewUserRecord<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub student_number: &'a str,
    #[serde(rename = "CampusID", skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<Id<CampusMarker>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FriendFilterRequestRecord<'a> {
    pub friends_filter: FriendsFilterRecord<'a>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FriendsFilterRecord<'a> {
    #[serde(rename = "LoggedUserID")]
    pub logged_user_id: Id<UserMarker>,
    #[serde(rename = "CampusID")]
    pub campus_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SaveFriendsRequestRecord {
    pub friends_list: FriendsListRecord,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct FriendsListRecord {
    #[serde(rename = "LoggedUserID")]
    pub logged_user_id: Id<UserMarker>,
    pub friends: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PostFilterRequestRecord {
    pub post_filter: PostFilterRecord,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub(crate) struct PostFilterRecord {
    #[serde(rename = "LoggedUserID")]
    pub logged_user_id: Id<UserMarker>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct NewPostRequestRecord<'a> {
    pub post: NewPostRecord<'a>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct NewPostRecord<'a> {
    #[serde(rename = "LoggedUserID")]
    pub logged_user_id: Id<UserMarker>,
    pub message: &'a str,
    pub operation_type: &'static str,
}

impl<'a> From<&'a Credentials> for LoginRequestRecord<'a> {
    fn from(value: &'a Credentials) -> Self {
        Self {
            login_data: LoginDataRecord {
                email: &value.email,
                password: value.password.expose(),
            },
        }
    }
}

impl<'a> From<&'a NewUser> for RegisterRequestRecord<'a> {
    fn from(value: &'a NewUser) -> Self {
        Self {
            new_user: NewUserRecord {
                name: &value.name,
                last_name: &value.last_name,
                email: &value.email,
                password: value.password.expose(),
                student_number: value.student_number.get(),
                campus_id: value.campus,
            },
        }
    }
}

impl<'a> From<&'a FriendFilter> for FriendFilterRequestRecord<'a> {
    fn from(value: &'a FriendFilter) -> Self {
        Self {
            friends_filter: FriendsFilterRecord {
                logged_user_id: value.logged_user,
                campus_id: value.campus.map_or(ANY_CAMPUS, Id::get),
                name: value.name.as_deref(),
            },
        }
    }
}

impl SaveFriendsRequestRecord {
    pub fn new(logged_user_id: Id<UserMarker>, selection: &FriendSelection) -> Self {
        Self {
            friends_list: FriendsListRecord {
                logged_user_id,
                friends: selection.to_wire(),
            },
        }
    }
}

impl PostFilterRequestRecord {
    pub fn new(logged_user_id: Id<UserMarker>) -> Self {
        Self {
            post_filter: PostFilterRecord { logged_user_id },
        }
    }
}

impl<'a> From<&'a NewPost> for NewPostRequestRecord<'a> {
    fn from(value: &'a NewPost) -> Self {
        Self {
            post: NewPostRecord {
                logged_user_id: value.author,
                message: value.content.get(),
                operation_type: OPERATION_CREATE,
            },
        }
    }
}

// Responses

/// Reads an explicit `null` as the field's default, like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct LoginResultRecord {
    #[serde(flatten)]
    pub status: ExecuteStatus,
    pub user_logged: Option<Vec<UserRecord>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct FriendsResultRecord {
    #[serde(flatten)]
    pub status: ExecuteStatus,
    pub friends: Option<Vec<FriendRecord>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct PostsResultRecord {
    #[serde(flatten)]
    pub status: ExecuteStatus,
    pub posts: Option<Vec<PostRecord>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct CampusesRecord {
    pub campuses: Option<Vec<CampusRecord>>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct UserRecord {
    #[serde(deserialize_with = "nullable")]
    pub user_id: Id<UserMarker>,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub student_number: u64,
    #[serde(rename = "CampusID", deserialize_with = "nullable")]
    pub campus_id: Id<CampusMarker>,
    #[serde(deserialize_with = "nullable")]
    pub campus_name: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct CampusRecord {
    #[serde(rename = "CampusID", deserialize_with = "nullable")]
    pub campus_id: Id<CampusMarker>,
    #[serde(deserialize_with = "nullable")]
    pub campus_name: String,
    #[serde(deserialize_with = "nullable")]
    pub is_active: bool,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct FriendRecord {
    #[serde(rename = "UserID", deserialize_with = "nullable")]
    pub user_id: Id<UserMarker>,
    #[serde(deserialize_with = "nullable")]
    pub complete_name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub student_number: u64,
    #[serde(rename = "CampusID", deserialize_with = "nullable")]
    pub campus_id: Id<CampusMarker>,
    #[serde(deserialize_with = "nullable")]
    pub campus_name: String,
    #[serde(deserialize_with = "nullable")]
    pub is_friend: bool,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct PostRecord {
    #[serde(rename = "PostID", deserialize_with = "nullable")]
    pub post_id: Id<PostMarker>,
    #[serde(deserialize_with = "nullable")]
    pub user_id: Id<UserMarker>,
    #[serde(deserialize_with = "nullable")]
    pub complete_name: String,
    #[serde(rename = "CampusID", deserialize_with = "nullable")]
    pub campus_id: Id<CampusMarker>,
    #[serde(deserialize_with = "nullable")]
    pub campus_name: String,
    #[serde(deserialize_with = "nullable")]
    pub time_stamp: String,
    #[serde(deserialize_with = "nullable")]
    pub content: String,
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.user_id,
            name: value.name,
            last_name: value.last_name,
            email: value.email,
            student_number: value.student_number,
            campus_id: value.campus_id,
            campus_name: value.campus_name,
        }
    }
}

impl From<CampusRecord> for Campus {
    fn from(value: CampusRecord) -> Self {
        Self {
            id: value.campus_id,
            name: value.campus_name,
            is_active: value.is_active,
        }
    }
}

impl From<FriendRecord> for Friend {
    fn from(value: FriendRecord) -> Self {
        Self {
            user_id: value.user_id,
            complete_name: value.complete_name,
            email: value.email,
            student_number: value.student_number,
            campus_id: value.campus_id,
            campus_name: value.campus_name,
            is_friend: value.is_friend,
        }
    }
}

impl From<PostRecord> for Post {
    fn from(value: PostRecord) -> Self {
        Self {
            id: value.post_id,
            author_id: value.user_id,
            author_name: value.complete_name,
            campus_id: value.campus_id,
            campus_name: value.campus_name,
            timestamp: PostTimestamp::new(value.time_stamp),
            content: value.content,
        }
    }
}
