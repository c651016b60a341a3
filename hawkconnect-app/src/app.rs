//! Navigation root.
//!
//! [`App`] owns the one live [`Screen`], the optional [`Overlay`] and the
//! [`Session`]. It never performs I/O: user intents and completions go in,
//! [`AppAction`]s come out.
//!
//! Every screen and overlay instance gets its own [`Lifetime`]. Replacing the
//! instance drops the lifetime, which cancels its requests, and the new
//! ticket makes any completion that still slips through stale.

use crate::{
    action::{AppAction, Request},
    call::{ApiCall, ApiReply},
    error::{ActionError, ValidationError},
    event::AppEvent,
    lifetime::{Lifetime, Scope, Ticket},
    screen::{
        FeedScreen, FriendsPostsScreen, FriendsScreen, LoginScreen, Overlay, OverlayKind,
        RegistrationDialog, Screen, ScreenKind,
    },
    session::Session,
};
use hawkconnect_common::model::{Id, user::UserMarker};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub struct App {
    screen: Screen,
    screen_lifetime: Lifetime,
    overlay: Option<(Overlay, Lifetime)>,
    session: Option<Session>,
    root: CancellationToken,
    next_generation: u64,
}

impl App {
    /// Starts logged out, with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        let root = CancellationToken::new();
        let screen_lifetime = Lifetime::new(Scope::Screen, 0, &root);
        Self {
            screen: Screen::default(),
            screen_lifetime,
            overlay: None,
            session: None,
            root,
            next_generation: 1,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref().map(|(overlay, _)| overlay)
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn login_mut(&mut self) -> Option<&mut LoginScreen> {
        match &mut self.screen {
            Screen::LoggedOut(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn friends_mut(&mut self) -> Option<&mut FriendsScreen> {
        match &mut self.screen {
            Screen::Friends(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn feed_mut(&mut self) -> Option<&mut FeedScreen> {
        match &mut self.screen {
            Screen::Feed(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn registration_mut(&mut self) -> Option<&mut RegistrationDialog> {
        match &mut self.overlay {
            Some((Overlay::Registration(dialog), _)) => Some(dialog),
            _ => None,
        }
    }

    pub fn submit_login(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.login_mut() else {
            warn!("Login submitted outside the login screen");
            return vec![];
        };
        screen.error = None;
        let calls = vec![ApiCall::Login(screen.credentials())];
        self.requests(Scope::Screen, calls)
    }

    pub fn open_registration(&mut self) -> Vec<AppAction> {
        if !matches!(self.screen, Screen::LoggedOut(_)) || self.overlay.is_some() {
            return vec![];
        }

        let mut dialog = RegistrationDialog::default();
        let calls = dialog.activate();
        let lifetime = self.lifetime(Scope::Overlay);
        self.overlay = Some((Overlay::Registration(dialog), lifetime));
        self.requests(Scope::Overlay, calls)
    }

    pub fn submit_registration(&mut self) -> Vec<AppAction> {
        let Some(dialog) = self.registration_mut() else {
            return vec![];
        };
        let calls = dialog.submit();
        self.requests(Scope::Overlay, calls)
    }

    pub fn close_registration(&mut self) -> Vec<AppAction> {
        if !matches!(self.overlay, Some((Overlay::Registration(_), _))) {
            return vec![];
        }
        self.overlay = None;
        vec![AppAction::Render]
    }

    /// Leaves the confirmation for the welcome screen. Registering does not
    /// log the user in.
    pub fn dismiss_confirmation(&mut self) -> Vec<AppAction> {
        match self.overlay.take() {
            Some((Overlay::Confirmation(greeting), _)) => self.enter(Screen::Welcome(greeting)),
            other => {
                self.overlay = other;
                vec![]
            }
        }
    }

    pub fn show_friends(&mut self) -> Vec<AppAction> {
        match self.logged_user() {
            Ok(user) => self.enter(Screen::Friends(FriendsScreen::new(user))),
            Err(err) => self.expel(&err),
        }
    }

    pub fn show_feed(&mut self) -> Vec<AppAction> {
        match self.logged_user() {
            Ok(user) => self.enter(Screen::Feed(FeedScreen::new(user))),
            Err(err) => self.expel(&err),
        }
    }

    pub fn search_friends(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.friends_mut() else {
            return vec![];
        };
        screen.error = None;
        let calls = screen.search();
        self.requests(Scope::Screen, calls)
    }

    pub fn toggle_friend(&mut self, friend: Id<UserMarker>, selected: bool) -> Vec<AppAction> {
        let Some(screen) = self.friends_mut() else {
            return vec![];
        };
        screen.toggle(friend, selected);
        vec![AppAction::Render]
    }

    pub fn save_friends(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.friends_mut() else {
            return vec![];
        };
        let calls = screen.save();
        self.requests(Scope::Screen, calls)
    }

    pub fn dismiss_saved_notice(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.friends_mut() else {
            return vec![];
        };
        screen.saved_notice = false;
        vec![AppAction::Render]
    }

    /// Opens the posts of the selected friends, or flags the friends screen
    /// when nobody is selected.
    pub fn view_selected_posts(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.friends_mut() else {
            return vec![];
        };
        if screen.selection.is_empty() {
            screen.error = Some(ValidationError::NoFriendsToView.to_string());
            return vec![AppAction::Render];
        }

        let next = FriendsPostsScreen::new(screen.logged_user(), screen.selection.clone());
        self.enter(Screen::FriendsPosts(next))
    }

    pub fn open_compose(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.feed_mut() else {
            return vec![];
        };
        screen.open_compose();
        vec![AppAction::Render]
    }

    pub fn close_compose(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.feed_mut() else {
            return vec![];
        };
        screen.close_compose();
        vec![AppAction::Render]
    }

    pub fn submit_post(&mut self) -> Vec<AppAction> {
        let Some(screen) = self.feed_mut() else {
            return vec![];
        };
        let calls = screen.submit_post();
        self.requests(Scope::Screen, calls)
    }

    pub fn back(&mut self) -> Vec<AppAction> {
        match self.overlay().map(Overlay::kind) {
            Some(OverlayKind::Registration) => return self.close_registration(),
            Some(OverlayKind::Confirmation) => return self.dismiss_confirmation(),
            None => {}
        }

        match self.screen.kind() {
            ScreenKind::Friends | ScreenKind::Feed => {
                let greeting = self
                    .session
                    .as_ref()
                    .map(Session::greeting)
                    .unwrap_or_default();
                self.enter(Screen::Welcome(greeting))
            }
            ScreenKind::FriendsPosts => self.show_friends(),
            ScreenKind::LoggedOut | ScreenKind::Welcome => vec![],
        }
    }

    pub fn logout(&mut self) -> Vec<AppAction> {
        if let Some(session) = self.session.take() {
            info!(user_id = %session.user_id, "Logged out");
        }
        self.enter(Screen::LoggedOut(LoginScreen::default()))
    }

    /// Cancels everything in flight. Later completions are still discarded
    /// by ticket.
    pub fn shutdown(&mut self) {
        self.root.cancel();
    }

    #[must_use]
    pub fn is_live(&self, ticket: Ticket) -> bool {
        match ticket.scope {
            Scope::Screen => self.screen_lifetime.ticket() == ticket,
            Scope::Overlay => self
                .overlay
                .as_ref()
                .is_some_and(|(_, lifetime)| lifetime.ticket() == ticket),
        }
    }

    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        let ticket = event.ticket();
        if !self.is_live(ticket) {
            debug!(?ticket, "Discarding stale completion");
            return vec![];
        }

        match event {
            AppEvent::Completed { reply, .. } => match ticket.scope {
                Scope::Screen => self.apply_to_screen(reply),
                Scope::Overlay => self.apply_to_overlay(reply),
            },
            AppEvent::Failed { message, .. } => {
                error!(?ticket, %message, "Request task failed");
                let message = ActionError::Unexpected(message).user_message();
                self.show_error(ticket.scope, message);
                vec![AppAction::Render]
            }
        }
    }

    fn apply_to_screen(&mut self, reply: ApiReply) -> Vec<AppAction> {
        let reply = match reply {
            ApiReply::LoggedIn(Ok(user)) => {
                info!(user_id = %user.id, "Logged in");
                let session = Session::from(&user);
                let greeting = session.greeting();
                self.session = Some(session);
                return self.enter(Screen::Welcome(greeting));
            }
            reply => reply,
        };

        let calls = match &mut self.screen {
            Screen::LoggedOut(screen) => {
                screen.apply(reply);
                vec![]
            }
            Screen::Welcome(_) => {
                warn!(?reply, "Welcome screen ignored reply");
                vec![]
            }
            Screen::Friends(screen) => screen.apply(reply),
            Screen::Feed(screen) => screen.apply(reply),
            Screen::FriendsPosts(screen) => screen.apply(reply),
        };
        self.requests(Scope::Screen, calls)
    }

    fn apply_to_overlay(&mut self, reply: ApiReply) -> Vec<AppAction> {
        let Some((Overlay::Registration(dialog), _)) = &mut self.overlay else {
            warn!(?reply, "Overlay ignored reply");
            return vec![];
        };

        match reply {
            ApiReply::Registered(Ok(())) => {
                let greeting = dialog.greeting();
                info!(name = %greeting.name, "Registered user");
                let lifetime = self.lifetime(Scope::Overlay);
                self.overlay = Some((Overlay::Confirmation(greeting), lifetime));
                vec![AppAction::Render]
            }
            reply => {
                let calls = dialog.apply(reply);
                self.requests(Scope::Overlay, calls)
            }
        }
    }

    fn show_error(&mut self, scope: Scope, message: String) {
        let slot = match scope {
            Scope::Overlay => match &mut self.overlay {
                Some((Overlay::Registration(dialog), _)) => &mut dialog.error,
                _ => return,
            },
            Scope::Screen => match &mut self.screen {
                Screen::LoggedOut(screen) => &mut screen.error,
                Screen::Friends(screen) => &mut screen.error,
                Screen::Feed(screen) => &mut screen.error,
                Screen::FriendsPosts(screen) => &mut screen.error,
                Screen::Welcome(_) => return,
            },
        };
        *slot = Some(message);
    }

    fn logged_user(&self) -> Result<Id<UserMarker>, ValidationError> {
        self.session
            .as_ref()
            .map(|session| session.user_id)
            .ok_or(ValidationError::NotLoggedIn)
    }

    fn expel(&mut self, err: &ValidationError) -> Vec<AppAction> {
        warn!("No session, returning to login");
        self.enter(Screen::LoggedOut(LoginScreen::with_error(err.to_string())))
    }

    fn lifetime(&mut self, scope: Scope) -> Lifetime {
        let generation = self.next_generation;
        self.next_generation += 1;
        Lifetime::new(scope, generation, &self.root)
    }

    /// Replaces the screen. The old lifetime is dropped here, cancelling
    /// whatever it still had running.
    fn enter(&mut self, mut screen: Screen) -> Vec<AppAction> {
        self.overlay = None;
        self.screen_lifetime = self.lifetime(Scope::Screen);

        let calls = match &mut screen {
            Screen::LoggedOut(_) | Screen::Welcome(_) => vec![],
            Screen::Friends(screen) => screen.activate(),
            Screen::Feed(screen) => screen.activate(),
            Screen::FriendsPosts(screen) => screen.activate(),
        };
        debug!(screen = ?screen.kind(), "Entering screen");
        self.screen = screen;
        self.requests(Scope::Screen, calls)
    }

    fn requests(&self, scope: Scope, calls: Vec<ApiCall>) -> Vec<AppAction> {
        let lifetime = match scope {
            Scope::Screen => Some(&self.screen_lifetime),
            Scope::Overlay => self.overlay.as_ref().map(|(_, lifetime)| lifetime),
        };

        let mut actions = vec![AppAction::Render];
        if let Some(lifetime) = lifetime {
            actions.extend(calls.into_iter().map(|call| {
                AppAction::Request(Request {
                    ticket: lifetime.ticket(),
                    call,
                    cancel: lifetime.token().clone(),
                })
            }));
        }
        actions
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
