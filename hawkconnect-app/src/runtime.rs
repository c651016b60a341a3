//! Async runtime around the [`App`].
//!
//! The runtime is the only place that mutates the `App`. Requests are spawned
//! onto a [`JoinSet`] and raced against the issuing screen's cancellation
//! token; completions are applied one at a time from [`Runtime::step`].

use crate::{App, AppAction, AppEvent, Request, Ticket, call::ApiReply, view::View};
use hawkconnect_client::HawkConnectApi;
use std::{collections::HashMap, sync::Arc};
use tokio::task::{Id, JoinSet};
use tracing::{debug, warn};

pub struct Runtime<A, V> {
    app: App,
    api: Arc<A>,
    view: V,
    /// `None` when the request was cancelled before it finished.
    tasks: JoinSet<Option<(Ticket, ApiReply)>>,
    tickets: HashMap<Id, Ticket>,
}

impl<A, V> Runtime<A, V>
where
    A: HawkConnectApi + 'static,
    V: View,
{
    #[must_use]
    pub fn new(api: Arc<A>, view: V) -> Self {
        Self {
            app: App::new(),
            api,
            view,
            tasks: JoinSet::new(),
            tickets: HashMap::new(),
        }
    }

    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Requests still running, cancelled ones included until they are
    /// reaped.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Applies a user intent, e.g. `runtime.dispatch(App::show_feed)`.
    pub fn dispatch(&mut self, intent: impl FnOnce(&mut App) -> Vec<AppAction>) {
        let actions = intent(&mut self.app);
        self.process(actions);
    }

    pub fn render(&mut self) {
        self.view.render(&self.app);
    }

    fn process(&mut self, actions: Vec<AppAction>) {
        for action in actions {
            match action {
                AppAction::Render => self.view.render(&self.app),
                AppAction::Request(request) => self.spawn(request),
            }
        }
    }

    fn spawn(&mut self, request: Request) {
        let Request {
            ticket,
            call,
            cancel,
        } = request;
        debug!(?ticket, ?call, "Spawning request");

        let api = Arc::clone(&self.api);
        let handle = self.tasks.spawn(async move {
            cancel
                .run_until_cancelled(call.execute(api.as_ref()))
                .await
                .map(|reply| (ticket, reply))
        });
        self.tickets.insert(handle.id(), ticket);
    }

    /// Waits for the next request to finish and applies it.
    ///
    /// Returns `false` once nothing is in flight.
    pub async fn step(&mut self) -> bool {
        let Some(joined) = self.tasks.join_next_with_id().await else {
            return false;
        };

        let event = match joined {
            Ok((id, Some((ticket, reply)))) => {
                self.tickets.remove(&id);
                AppEvent::Completed { ticket, reply }
            }
            Ok((id, None)) => {
                let ticket = self.tickets.remove(&id);
                debug!(?ticket, "Request cancelled");
                return true;
            }
            Err(err) => {
                let Some(ticket) = self.tickets.remove(&err.id()) else {
                    warn!(%err, "Request task failed without a ticket");
                    return true;
                };
                AppEvent::Failed {
                    ticket,
                    message: err.to_string(),
                }
            }
        };

        let actions = self.app.handle(event);
        self.process(actions);
        true
    }

    /// Runs until every request, including follow-ups, has finished.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    /// Cancels everything in flight and waits for the tasks to wind down.
    pub async fn shutdown(&mut self) {
        self.app.shutdown();
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(err) = joined {
                warn!(%err, "Request task failed during shutdown");
            }
        }
        self.tickets.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::{App, Runtime, ScreenKind, View};
    use hawkconnect_client::{ApiError, HawkConnectApi};
    use hawkconnect_common::model::{
        Id,
        auth::Credentials,
        campus::Campus,
        friend::{Friend, FriendFilter, FriendSelection},
        post::{NewPost, Post},
        user::{NewUser, User, UserMarker},
    };
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeApi {
        saved: Mutex<Vec<String>>,
        created: Mutex<Vec<String>>,
        /// Parks `fetch_posts` until notified.
        gate: Option<Arc<Notify>>,
        posts_panic: bool,
    }

    fn rejected() -> ApiError {
        ApiError::Rejected {
            message: "Usuario no encontrado".into(),
        }
    }

    impl HawkConnectApi for FakeApi {
        async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
            if credentials.password.expose() != "x" {
                return Err(rejected());
            }
            Ok(User {
                id: Id::new(5),
                name: "Ana".into(),
                last_name: "Lopez".into(),
                email: credentials.email.clone(),
                ..User::default()
            })
        }

        async fn register(&self, _new_user: &NewUser) -> Result<(), ApiError> {
            Ok(())
        }

        async fn fetch_friends(&self, filter: &FriendFilter) -> Result<Vec<Friend>, ApiError> {
            Ok(vec![Friend {
                user_id: Id::new(3),
                complete_name: format!("Friend of {}", filter.logged_user),
                ..Friend::default()
            }])
        }

        async fn save_friends(
            &self,
            _logged_user: Id<UserMarker>,
            selection: &FriendSelection,
        ) -> Result<(), ApiError> {
            self.saved.lock().unwrap().push(selection.to_wire());
            Ok(())
        }

        async fn fetch_campuses(&self) -> Result<Vec<Campus>, ApiError> {
            Ok(vec![Campus {
                id: Id::new(1),
                name: "Norte".into(),
                is_active: true,
            }])
        }

        async fn fetch_posts(&self, logged_user: Id<UserMarker>) -> Result<Vec<Post>, ApiError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            assert!(!self.posts_panic, "posts backend exploded");
            if logged_user == Id::new(13) {
                return Err(rejected());
            }
            let created = self.created.lock().unwrap();
            Ok(created
                .iter()
                .map(|content| Post {
                    author_id: logged_user,
                    content: content.clone(),
                    ..Post::default()
                })
                .collect())
        }

        async fn create_post(&self, post: &NewPost) -> Result<Vec<Post>, ApiError> {
            self.created
                .lock()
                .unwrap()
                .push(post.content.get().to_owned());
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct CountingView(usize);

    impl View for CountingView {
        fn render(&mut self, _app: &App) {
            self.0 += 1;
        }
    }

    async fn logged_in(api: Arc<FakeApi>) -> Runtime<FakeApi, CountingView> {
        let mut runtime = Runtime::new(api, CountingView::default());
        runtime.dispatch(|app| {
            if let Some(login) = app.login_mut() {
                login.email = "a@b.com".into();
                login.password = "x".into();
            }
            app.submit_login()
        });
        runtime.settle().await;
        runtime
    }

    #[tokio::test]
    async fn login_then_friends_loads_everything() {
        let mut runtime = logged_in(Arc::new(FakeApi::default())).await;
        assert_eq!(runtime.app().screen().kind(), ScreenKind::Welcome);
        assert_eq!(
            runtime.app().session().map(|session| session.user_id),
            Some(Id::new(5))
        );

        runtime.dispatch(App::show_friends);
        runtime.settle().await;

        let app = runtime.app();
        let crate::Screen::Friends(friends) = app.screen() else {
            panic!("expected friends screen, got {:?}", app.screen());
        };
        assert_eq!(friends.campuses.len(), 1);
        assert_eq!(friends.friends.len(), 1);
        assert_eq!(friends.error, None);
        assert!(runtime.view().0 > 0);
    }

    #[tokio::test]
    async fn wrong_password_stays_logged_out() {
        let mut runtime = Runtime::new(Arc::new(FakeApi::default()), ());
        runtime.dispatch(|app| {
            if let Some(login) = app.login_mut() {
                login.email = "a@b.com".into();
                login.password = "nope".into();
            }
            app.submit_login()
        });
        runtime.settle().await;

        assert_eq!(runtime.app().session(), None);
        assert_eq!(runtime.app().screen().error(), Some("Usuario no encontrado"));
    }

    #[tokio::test]
    async fn post_then_reload_feed() {
        let api = Arc::new(FakeApi::default());
        let mut runtime = logged_in(Arc::clone(&api)).await;
        runtime.dispatch(App::show_feed);
        runtime.settle().await;

        runtime.dispatch(|app| {
            let _ = app.open_compose();
            if let Some(compose) = app.feed_mut().and_then(|feed| feed.compose.as_mut()) {
                compose.content = "Hola a todos".into();
            }
            app.submit_post()
        });
        runtime.settle().await;

        let crate::Screen::Feed(feed) = runtime.app().screen() else {
            panic!("expected feed screen");
        };
        assert_eq!(feed.compose, None);
        assert_eq!(feed.posts.len(), 1);
        assert_eq!(feed.posts[0].content, "Hola a todos");
    }

    #[tokio::test]
    async fn selected_friends_are_saved_in_order() {
        let api = Arc::new(FakeApi::default());
        let mut runtime = logged_in(Arc::clone(&api)).await;
        runtime.dispatch(App::show_friends);
        runtime.settle().await;

        for id in [3, 7, 9] {
            runtime.dispatch(|app| app.toggle_friend(Id::new(id), true));
        }
        runtime.dispatch(App::save_friends);
        runtime.settle().await;

        assert_eq!(*api.saved.lock().unwrap(), ["3,7,9"]);
        let crate::Screen::Friends(friends) = runtime.app().screen() else {
            panic!("expected friends screen");
        };
        assert!(friends.saved_notice);
    }

    #[tokio::test]
    async fn one_failing_friend_still_loads_the_rest() {
        let api = Arc::new(FakeApi::default());
        api.created.lock().unwrap().push("hola".into());
        let mut runtime = logged_in(Arc::clone(&api)).await;
        runtime.dispatch(App::show_friends);
        runtime.settle().await;

        runtime.dispatch(|app| {
            let _ = app.toggle_friend(Id::new(13), true);
            let _ = app.toggle_friend(Id::new(3), true);
            app.view_selected_posts()
        });
        runtime.settle().await;

        let crate::Screen::FriendsPosts(screen) = runtime.app().screen() else {
            panic!("expected friends posts screen");
        };
        assert_eq!(screen.posts.len(), 1);
        assert_eq!(screen.posts[0].author_id, Id::new(3));
        assert_eq!(
            screen.error.as_deref(),
            Some("Posts for user 13: Usuario no encontrado")
        );
    }

    #[tokio::test]
    async fn leaving_a_screen_cancels_its_request() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            gate: Some(Arc::clone(&gate)),
            ..FakeApi::default()
        });
        let mut runtime = logged_in(api).await;

        runtime.dispatch(App::show_feed);
        assert_eq!(runtime.in_flight(), 1);
        runtime.dispatch(App::back);
        runtime.settle().await;

        assert_eq!(runtime.in_flight(), 0);
        assert_eq!(runtime.app().screen().kind(), ScreenKind::Welcome);
    }

    #[tokio::test]
    async fn panicking_request_sets_screen_error() {
        let api = Arc::new(FakeApi {
            posts_panic: true,
            ..FakeApi::default()
        });
        let mut runtime = logged_in(api).await;

        runtime.dispatch(App::show_feed);
        runtime.settle().await;

        assert_eq!(runtime.in_flight(), 0);
        assert_eq!(runtime.app().screen().kind(), ScreenKind::Feed);
        let error = runtime.app().screen().error().unwrap();
        assert!(error.starts_with("Unexpected failure: "), "{error}");
        assert!(error.contains("panicked"), "{error}");
    }

    #[tokio::test]
    async fn shutdown_reaps_parked_requests() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(FakeApi {
            gate: Some(gate),
            ..FakeApi::default()
        });
        let mut runtime = logged_in(api).await;
        runtime.dispatch(App::show_feed);

        runtime.shutdown().await;
        assert_eq!(runtime.in_flight(), 0);
    }
}
