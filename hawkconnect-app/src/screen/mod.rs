//! Per-screen state and the transitions a reply causes on it.
//!
//! Screens never talk to the network. They return [`ApiCall`]s, which the
//! [`App`](crate::App) tags with the screen's ticket, and they are handed the
//! matching [`ApiReply`](crate::ApiReply) once it arrives.
//!
//! [`ApiCall`]: crate::ApiCall

mod feed;
mod friends;
mod friends_posts;
mod login;
mod registration;

pub use feed::{ComposeDialog, FeedScreen};
pub use friends::FriendsScreen;
pub use friends_posts::FriendsPostsScreen;
pub use login::LoginScreen;
pub use registration::RegistrationDialog;

use crate::session::Greeting;

/// The one screen currently shown.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Screen {
    LoggedOut(LoginScreen),
    Welcome(Greeting),
    Friends(FriendsScreen),
    Feed(FeedScreen),
    FriendsPosts(FriendsPostsScreen),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum ScreenKind {
    LoggedOut,
    Welcome,
    Friends,
    Feed,
    FriendsPosts,
}

/// Dialogs drawn over the logged-out screen.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Overlay {
    Registration(RegistrationDialog),
    /// Registration went through; dismissing it opens the welcome screen.
    Confirmation(Greeting),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum OverlayKind {
    Registration,
    Confirmation,
}

impl Overlay {
    #[must_use]
    pub fn kind(&self) -> OverlayKind {
        match self {
            Overlay::Registration(_) => OverlayKind::Registration,
            Overlay::Confirmation(_) => OverlayKind::Confirmation,
        }
    }
}

impl Screen {
    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::LoggedOut(_) => ScreenKind::LoggedOut,
            Screen::Welcome(_) => ScreenKind::Welcome,
            Screen::Friends(_) => ScreenKind::Friends,
            Screen::Feed(_) => ScreenKind::Feed,
            Screen::FriendsPosts(_) => ScreenKind::FriendsPosts,
        }
    }

    /// Error line of the screen, if it has one set.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Screen::LoggedOut(screen) => screen.error.as_deref(),
            Screen::Welcome(_) => None,
            Screen::Friends(screen) => screen.error.as_deref(),
            Screen::Feed(screen) => screen.error.as_deref(),
            Screen::FriendsPosts(screen) => screen.error.as_deref(),
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::LoggedOut(LoginScreen::default())
    }
}
