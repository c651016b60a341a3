use crate::client::Result;
use hawkconnect_common::model::{
    Id,
    auth::Credentials,
    campus::Campus,
    friend::{Friend, FriendFilter, FriendSelection},
    post::{NewPost, Post},
    user::{NewUser, User, UserMarker},
};
use std::future::Future;

/// The seven remote calls of the Hawk Connect backend.
///
/// Every call is a single attempt. A result of `Ok` means the server answered
/// with `ExecuteResult == "OK"`; every other outcome is an
/// [`ApiError`](crate::ApiError).
pub trait HawkConnectApi: Send + Sync {
    /// Logs in and returns the first user of the `UserLogged` list.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<User>> + Send;

    fn register(&self, new_user: &NewUser) -> impl Future<Output = Result<()>> + Send;

    fn fetch_friends(&self, filter: &FriendFilter)
    -> impl Future<Output = Result<Vec<Friend>>> + Send;

    fn save_friends(
        &self,
        logged_user: Id<UserMarker>,
        selection: &FriendSelection,
    ) -> impl Future<Output = Result<()>> + Send;

    fn fetch_campuses(&self) -> impl Future<Output = Result<Vec<Campus>>> + Send;

    /// Posts visible to `logged_user`, in server order.
    fn fetch_posts(
        &self,
        logged_user: Id<UserMarker>,
    ) -> impl Future<Output = Result<Vec<Post>>> + Send;

    /// Creates a post. The acknowledgement may carry posts; most often it is
    /// empty.
    fn create_post(&self, post: &NewPost) -> impl Future<Output = Result<Vec<Post>>> + Send;
}
