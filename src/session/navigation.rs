//! Navigation out of the session view.

use serde::{Deserialize, Serialize};

/// Where the application shell should go next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    /// The post-session landing page.
    Landing,
}

impl Destination {
    /// Route path for the destination.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Destination::Landing => "/main",
        }
    }
}

/// Routing collaborator, provided by the application shell.
pub trait Navigator {
    /// Navigate away from the session view.
    fn navigate(&mut self, destination: Destination);
}
