use crate::{
    api::HawkConnectApi,
    record::{
        CampusesRecord, Envelope, ExecuteStatus, FriendFilterRequestRecord, FriendsResultRecord,
        LoginRequestRecord, LoginResultRecord, NewPostRequestRecord, PostFilterRequestRecord,
        PostsResultRecord, RegisterRequestRecord, SaveFriendsRequestRecord,
    },
};
use hawkconnect_common::model::{
    Id,
    auth::Credentials,
    campus::Campus,
    friend::{Friend, FriendFilter, FriendSelection},
    post::{NewPost, Post},
    user::{NewUser, User, UserMarker},
};
use reqwest::{Method, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://hawkconnect.azurewebsites.net/";

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{message}")]
    Rejected { message: String },
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Response body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Message the server attached to a non-OK `ExecuteResult`, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Friends,
    SaveFriends,
    Campuses,
    Posts,
    CreatePost,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::Friends,
        Endpoint::SaveFriends,
        Endpoint::Campuses,
        Endpoint::Posts,
        Endpoint::CreatePost,
    ];

    /// Path relative to the base url.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "UserLogin",
            Endpoint::Register => "UserUI",
            Endpoint::Friends => "Friends",
            Endpoint::SaveFriends => "FriendsUI",
            Endpoint::Campuses => "campus.aspx",
            Endpoint::Posts => "posts.aspx/Posts",
            Endpoint::CreatePost => "posts.aspx/PostsUI",
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Endpoint::Campuses => Method::GET,
            _ => Method::POST,
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Gateway to one backend. Cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    endpoints: Vec<Url>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };

        let mut base = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("url cannot be a base".into()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoints = Endpoint::ALL
            .iter()
            .map(|endpoint| base.join(endpoint.path()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|err| invalid(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base,
            endpoints,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint_url(&self, endpoint: Endpoint) -> &Url {
        &self.endpoints[endpoint as usize]
    }

    async fn call<B, R>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint).clone();
        debug!(%endpoint, %url, "Calling backend");

        let mut request = self.http.request(endpoint.method(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = match request.send().await {
            Ok(response) => Self::read_json(response).await,
            Err(err) => Err(ApiError::from(err)),
        };

        if let Err(err) = &result {
            warn!(%endpoint, error = %err, "Backend call failed");
        }
        result
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn check(status: ExecuteStatus) -> Result<()> {
    if status.is_ok() {
        Ok(())
    } else {
        Err(ApiError::Rejected {
            message: status.into_message(),
        })
    }
}

impl HawkConnectApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<User> {
        let Envelope { data } = self
            .call::<_, Envelope<LoginResultRecord>>(
                Endpoint::Login,
                Some(&LoginRequestRecord::from(credentials)),
            )
            .await?;
        check(data.status)?;

        data.user_logged
            .and_then(|users| users.into_iter().next())
            .map(User::from)
            .ok_or_else(|| ApiError::Rejected {
                message: "The server did not return a logged-in user".into(),
            })
    }

    async fn register(&self, new_user: &NewUser) -> Result<()> {
        let Envelope { data } = self
            .call::<_, Envelope<ExecuteStatus>>(
                Endpoint::Register,
                Some(&RegisterRequestRecord::from(new_user)),
            )
            .await?;
        check(data)
    }

    async fn fetch_friends(&self, filter: &FriendFilter) -> Result<Vec<Friend>> {
        let Envelope { data } = self
            .call::<_, Envelope<FriendsResultRecord>>(
                Endpoint::Friends,
                Some(&FriendFilterRequestRecord::from(filter)),
            )
            .await?;
        check(data.status)?;

        Ok(data
            .friends
            .unwrap_or_default()
            .into_iter()
            .map(Friend::from)
            .collect())
    }

    async fn save_friends(
        &self,
        logged_user: Id<UserMarker>,
        selection: &FriendSelection,
    ) -> Result<()> {
        let Envelope { data } = self
            .call::<_, Envelope<ExecuteStatus>>(
                Endpoint::SaveFriends,
                Some(&SaveFriendsRequestRecord::new(logged_user, selection)),
            )
            .await?;
        check(data)
    }

    async fn fetch_campuses(&self) -> Result<Vec<Campus>> {
        let record = self
            .call::<(), CampusesRecord>(Endpoint::Campuses, None)
            .await?;

        Ok(record
            .campuses
            .unwrap_or_default()
            .into_iter()
            .map(Campus::from)
            .collect())
    }

    async fn fetch_posts(&self, logged_user: Id<UserMarker>) -> Result<Vec<Post>> {
        let Envelope { data } = self
            .call::<_, Envelope<PostsResultRecord>>(
                Endpoint::Posts,
                Some(&PostFilterRequestRecord::new(logged_user)),
            )
            .await?;
        check(data.status)?;

        Ok(data
            .posts
            .unwrap_or_default()
            .into_iter()
            .map(Post::from)
            .collect())
    }

    async fn create_post(&self, post: &NewPost) -> Result<Vec<Post>> {
        let Envelope { data } = self
            .call::<_, Envelope<PostsResultRecord>>(
                Endpoint::CreatePost,
                Some(&NewPostRequestRecord::from(post)),
            )
            .await?;
        check(data.status)?;

        Ok(data
            .posts
            .unwrap_or_default()
            .into_iter()
            .map(Post::from)
            .collect())
    }
}
