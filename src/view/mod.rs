//! Session view mode and the face-chat consent gate.
//!
//! A session starts in text chat. Switching to face chat needs explicit
//! consent through a modal: accepting switches the mode, declining leaves
//! the session, and closing the modal changes nothing.
//!
//! ## Example Usage
//!
//! ```
//! use paired_session::view::{ConsentChoice, SessionView, ViewMode, ViewTransition};
//!
//! let mut view = SessionView::new();
//! assert!(view.open_consent());
//!
//! let transition = view.resolve_consent(ConsentChoice::Accept);
//! assert_eq!(transition, ViewTransition::SwitchedTo(ViewMode::FaceChat));
//! assert!(!view.is_consent_open());
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::liveness::ViewSignal;

/// How the pair is talking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    Chat,
    FaceChat,
}

/// User's answer in the consent modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentChoice {
    Accept,
    Decline,
}

/// Effect of resolving the consent modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewTransition {
    /// The mode changed.
    SwitchedTo(ViewMode),

    /// The user declined; the host must leave the session.
    Leave,

    /// Nothing to resolve.
    Ignored,
}

impl ViewTransition {
    /// Signal to forward to a running monitor, if any.
    #[must_use]
    pub const fn signal(self) -> Option<ViewSignal> {
        match self {
            ViewTransition::Leave => Some(ViewSignal::Leave),
            _ => None,
        }
    }
}

/// View state for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionView {
    mode: ViewMode,
    consent_open: bool,
}

impl SessionView {
    /// Chat mode with the modal closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn is_consent_open(&self) -> bool {
        self.consent_open
    }

    /// Open the consent modal. Returns `false` when already in face chat.
    pub fn open_consent(&mut self) -> bool {
        if self.mode == ViewMode::FaceChat {
            return false;
        }
        self.consent_open = true;
        true
    }

    /// Close the modal without answering.
    pub fn dismiss_consent(&mut self) {
        self.consent_open = false;
    }

    /// Apply the user's answer.
    pub fn resolve_consent(&mut self, choice: ConsentChoice) -> ViewTransition {
        if !self.consent_open {
            debug!("consent resolved with no modal open");
            return ViewTransition::Ignored;
        }
        self.consent_open = false;

        match choice {
            ConsentChoice::Accept => {
                info!("switching to face chat");
                self.mode = ViewMode::FaceChat;
                ViewTransition::SwitchedTo(ViewMode::FaceChat)
            }
            ConsentChoice::Decline => {
                info!("face chat declined, leaving session");
                ViewTransition::Leave
            }
        }
    }
}
