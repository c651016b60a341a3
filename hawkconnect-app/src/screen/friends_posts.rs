use crate::{
    call::{ApiCall, ApiReply},
    error::api_failure_message,
};
use hawkconnect_common::model::{Id, friend::FriendSelection, post::Post, user::UserMarker};
use tracing::warn;

/// Posts of the friends picked on the friends screen, one friend after
/// another.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FriendsPostsScreen {
    logged_user: Id<UserMarker>,
    pub friends: FriendSelection,
    pub posts: Vec<Post>,
    pub error: Option<String>,
}

impl FriendsPostsScreen {
    #[must_use]
    pub fn new(logged_user: Id<UserMarker>, friends: FriendSelection) -> Self {
        Self {
            logged_user,
            friends,
            posts: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn logged_user(&self) -> Id<UserMarker> {
        self.logged_user
    }

    pub(crate) fn activate(&mut self) -> Vec<ApiCall> {
        self.posts.clear();
        vec![ApiCall::FriendsPosts {
            friends: self.friends.ids().to_vec(),
        }]
    }

    pub(crate) fn apply(&mut self, reply: ApiReply) -> Vec<ApiCall> {
        match reply {
            ApiReply::FriendsPosts(results) => {
                let mut posts = Vec::new();
                let mut error = None;
                for (friend, result) in results {
                    match result {
                        Ok(friend_posts) => posts.extend(friend_posts),
                        Err(err) => {
                            error = Some(format!(
                                "Posts for user {friend}: {}",
                                api_failure_message(err)
                            ));
                        }
                    }
                }
                self.posts = posts;
                self.error = error;
            }
            other => warn!(reply = ?other, "Friends posts screen ignored reply"),
        }
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        call::{ApiCall, ApiReply},
        screen::FriendsPostsScreen,
    };
    use hawkconnect_client::ApiError;
    use hawkconnect_common::model::{Id, friend::FriendSelection, post::Post};

    fn post(id: u32, author: u32) -> Post {
        Post {
            id: Id::new(id),
            author_id: Id::new(author),
            ..Post::default()
        }
    }

    #[test]
    fn posts_are_concatenated_in_selection_order() {
        let friends: FriendSelection = [9, 3].into_iter().map(Id::new).collect();
        let mut screen = FriendsPostsScreen::new(Id::new(5), friends);

        assert_eq!(
            screen.activate(),
            vec![ApiCall::FriendsPosts {
                friends: vec![Id::new(9), Id::new(3)]
            }]
        );

        let _ = screen.apply(ApiReply::FriendsPosts(vec![
            (Id::new(9), Ok(vec![post(1, 9), post(2, 9)])),
            (Id::new(3), Ok(vec![post(3, 3)])),
        ]));

        let ids: Vec<u32> = screen.posts.iter().map(|post| post.id.get()).collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(screen.error, None);
    }

    #[test]
    fn one_failing_friend_does_not_hide_the_others() {
        let friends: FriendSelection = [9, 3].into_iter().map(Id::new).collect();
        let mut screen = FriendsPostsScreen::new(Id::new(5), friends);

        let _ = screen.apply(ApiReply::FriendsPosts(vec![
            (
                Id::new(9),
                Err(ApiError::Rejected {
                    message: "oops".into(),
                }),
            ),
            (Id::new(3), Ok(vec![post(3, 3)])),
        ]));

        assert_eq!(screen.posts, vec![post(3, 3)]);
        assert_eq!(screen.error.as_deref(), Some("Posts for user 9: oops"));
    }
}
