use hawkconnect_client::{ApiError, HawkConnectApi};
use hawkconnect_common::model::{
    Id,
    auth::Credentials,
    campus::Campus,
    friend::{Friend, FriendFilter, FriendSelection},
    post::{NewPost, Post},
    user::{NewUser, User, UserMarker},
};

/// A unit of remote work requested by a screen.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ApiCall {
    Login(Credentials),
    Register(NewUser),
    Campuses,
    Friends(FriendFilter),
    SaveFriends {
        logged_user: Id<UserMarker>,
        selection: FriendSelection,
    },
    Posts {
        logged_user: Id<UserMarker>,
    },
    /// Posts of each friend, fetched one after another in selection order.
    FriendsPosts {
        friends: Vec<Id<UserMarker>>,
    },
    CreatePost(NewPost),
}

#[derive(Debug)]
pub enum ApiReply {
    LoggedIn(Result<User, ApiError>),
    Registered(Result<(), ApiError>),
    Campuses(Result<Vec<Campus>, ApiError>),
    Friends(Result<Vec<Friend>, ApiError>),
    FriendsSaved(Result<(), ApiError>),
    Posts(Result<Vec<Post>, ApiError>),
    FriendsPosts(Vec<(Id<UserMarker>, Result<Vec<Post>, ApiError>)>),
    PostCreated(Result<Vec<Post>, ApiError>),
}

impl ApiCall {
    pub async fn execute<A: HawkConnectApi>(self, api: &A) -> ApiReply {
        match self {
            ApiCall::Login(credentials) => ApiReply::LoggedIn(api.login(&credentials).await),
            ApiCall::Register(new_user) => ApiReply::Registered(api.register(&new_user).await),
            ApiCall::Campuses => ApiReply::Campuses(api.fetch_campuses().await),
            ApiCall::Friends(filter) => ApiReply::Friends(api.fetch_friends(&filter).await),
            ApiCall::SaveFriends {
                logged_user,
                selection,
            } => ApiReply::FriendsSaved(api.save_friends(logged_user, &selection).await),
            ApiCall::Posts { logged_user } => ApiReply::Posts(api.fetch_posts(logged_user).await),
            ApiCall::FriendsPosts { friends } => {
                let mut results = Vec::with_capacity(friends.len());
                for friend in friends {
                    results.push((friend, api.fetch_posts(friend).await));
                }
                ApiReply::FriendsPosts(results)
            }
            ApiCall::CreatePost(post) => ApiReply::PostCreated(api.create_post(&post).await),
        }
    }
}
