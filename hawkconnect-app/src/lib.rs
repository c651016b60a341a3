//! Client core of Hawk Connect.
//!
//! Everything here is UI-toolkit agnostic: a renderer observes [`App`] through
//! the [`View`] trait and forwards user intents to it.
//!
//! # Components
//!
//! - [`App`]: navigation root holding exactly one [`Screen`] and an optional
//!   [`Overlay`], plus the [`Session`]
//! - [`AppAction`] / [`AppEvent`]: what the `App` asks for and what it is told
//! - [`Runtime`]: runs requests off the UI loop and feeds their completions
//!   back, cancelling the ones whose screen is gone

mod action;
mod app;
mod call;
mod error;
mod event;
mod lifetime;
mod runtime;
pub mod screen;
mod session;
mod view;

pub use action::{AppAction, Request};
pub use app::App;
pub use call::{ApiCall, ApiReply};
pub use error::{ActionError, ValidationError};
pub use event::AppEvent;
pub use lifetime::{Scope, Ticket};
pub use runtime::Runtime;
pub use screen::{Overlay, OverlayKind, Screen, ScreenKind};
pub use session::{Greeting, Session};
pub use view::{TracingView, View};
