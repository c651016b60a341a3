//! Instructions the [`crate::App`] hands to the runtime.

use crate::{call::ApiCall, lifetime::Ticket};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum AppAction {
    /// State changed; redraw.
    Render,
    /// Run a remote call and report back with the same ticket.
    Request(Request),
}

#[derive(Debug)]
pub struct Request {
    pub ticket: Ticket,
    pub call: ApiCall,
    /// Cancelled when the issuing screen goes away.
    pub cancel: CancellationToken,
}
