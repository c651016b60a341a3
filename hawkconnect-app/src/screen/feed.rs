use crate::{
    call::{ApiCall, ApiReply},
    error::{ValidationError, api_failure_message},
};
use hawkconnect_common::model::{
    Id, ModelValidationError,
    post::{NewPost, Post, PostContent},
    user::UserMarker,
};
use tracing::{info, warn};

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FeedScreen {
    logged_user: Id<UserMarker>,
    pub posts: Vec<Post>,
    pub error: Option<String>,
    pub compose: Option<ComposeDialog>,
}

/// New-post dialog on top of the feed.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ComposeDialog {
    pub content: String,
    pub error: Option<String>,
}

impl FeedScreen {
    #[must_use]
    pub fn new(logged_user: Id<UserMarker>) -> Self {
        Self {
            logged_user,
            posts: Vec::new(),
            error: None,
            compose: None,
        }
    }

    #[must_use]
    pub fn logged_user(&self) -> Id<UserMarker> {
        self.logged_user
    }

    pub(crate) fn activate(&mut self) -> Vec<ApiCall> {
        self.reload()
    }

    fn reload(&self) -> Vec<ApiCall> {
        vec![ApiCall::Posts {
            logged_user: self.logged_user,
        }]
    }

    pub(crate) fn open_compose(&mut self) {
        self.compose.get_or_insert_with(ComposeDialog::default);
    }

    pub(crate) fn close_compose(&mut self) {
        self.compose = None;
    }

    /// Validates the dialog's content; blank content never reaches the
    /// server.
    pub(crate) fn submit_post(&mut self) -> Vec<ApiCall> {
        let compose = self.compose.get_or_insert_with(ComposeDialog::default);

        match PostContent::new(compose.content.clone()) {
            Ok(content) => vec![ApiCall::CreatePost(NewPost {
                author: self.logged_user,
                content,
            })],
            Err(err) => {
                let err = ValidationError::from(ModelValidationError::from(err));
                compose.error = Some(err.to_string());
                vec![]
            }
        }
    }

    pub(crate) fn apply(&mut self, reply: ApiReply) -> Vec<ApiCall> {
        match reply {
            ApiReply::Posts(Ok(posts)) => {
                self.posts = posts;
                self.error = None;
            }
            ApiReply::Posts(Err(err)) => self.error = Some(api_failure_message(err)),
            ApiReply::PostCreated(Ok(_)) => {
                info!(user_id = %self.logged_user, "Created post");
                self.compose = None;
                return self.reload();
            }
            ApiReply::PostCreated(Err(err)) => {
                let message = api_failure_message(err);
                match &mut self.compose {
                    Some(compose) => compose.error = Some(message),
                    None => self.error = Some(message),
                }
            }
            other => warn!(reply = ?other, "Feed screen ignored reply"),
        }
        vec![]
    }
}
