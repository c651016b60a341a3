//! Rendering seam.
//!
//! A UI toolkit implements [`View`] and receives the whole [`App`] after
//! every state change. [`TracingView`] is the headless renderer used by the
//! binary.

use crate::{
    App,
    screen::{Overlay, Screen},
};
use tracing::info;

pub trait View {
    fn render(&mut self, app: &App);
}

/// Discards every frame.
impl View for () {
    fn render(&mut self, _app: &App) {}
}

/// Logs a one-line summary of the app on every render.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct TracingView;

impl View for TracingView {
    fn render(&mut self, app: &App) {
        let screen = app.screen();
        let user_id = app.session().map(|session| session.user_id.get());
        let overlay = app.overlay().map(Overlay::kind);

        match screen {
            Screen::LoggedOut(_) | Screen::Welcome(_) => {
                info!(screen = ?screen.kind(), ?user_id, ?overlay, error = ?screen.error(), "Render");
            }
            Screen::Friends(friends) => info!(
                screen = ?screen.kind(),
                ?user_id,
                campuses = friends.campuses.len(),
                friends = friends.friends.len(),
                selected = %friends.selection,
                error = ?screen.error(),
                "Render"
            ),
            Screen::Feed(feed) => info!(
                screen = ?screen.kind(),
                ?user_id,
                posts = feed.posts.len(),
                composing = feed.compose.is_some(),
                error = ?screen.error(),
                "Render"
            ),
            Screen::FriendsPosts(posts) => info!(
                screen = ?screen.kind(),
                ?user_id,
                friends = %posts.friends,
                posts = posts.posts.len(),
                error = ?screen.error(),
                "Render"
            ),
        }
    }
}
