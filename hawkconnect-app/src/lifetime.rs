use tokio_util::sync::CancellationToken;

/// Which part of the navigation root a request belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Scope {
    Screen,
    Overlay,
}

/// Identifies the screen instance that issued a request.
///
/// A reply is only applied if its ticket still matches the live screen (or
/// overlay) in its scope.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Ticket {
    pub scope: Scope,
    pub generation: u64,
}

/// Lifetime of one screen or overlay instance. Dropping it cancels every
/// request still running on its behalf.
#[derive(Debug)]
pub(crate) struct Lifetime {
    ticket: Ticket,
    token: CancellationToken,
}

impl Lifetime {
    pub fn new(scope: Scope, generation: u64, parent: &CancellationToken) -> Self {
        Self {
            ticket: Ticket { scope, generation },
            token: parent.child_token(),
        }
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
