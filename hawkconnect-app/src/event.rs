use crate::{call::ApiReply, lifetime::Ticket};

/// Completions delivered back to the [`crate::App`] on the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A request finished, successfully or not.
    Completed { ticket: Ticket, reply: ApiReply },
    /// The task running a request died before producing a reply.
    Failed { ticket: Ticket, message: String },
}

impl AppEvent {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            AppEvent::Completed { ticket, .. } | AppEvent::Failed { ticket, .. } => *ticket,
        }
    }
}
