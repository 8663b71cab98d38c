//! Cached user profile.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// User profile as cached by the application shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: u64,
    pub nickname: String,
    pub game_point: u64,
}

/// Accessor for the cached point balance.
///
/// The contract is "read current balance, write new balance". Lifecycle of
/// the underlying cache belongs to the application shell.
pub trait ProfileStore {
    /// Current cached balance. `None` if no profile is cached.
    fn game_point(&self) -> Option<u64>;

    /// Overwrite the cached balance. Returns `false` if no profile is cached.
    fn set_game_point(&self, value: u64) -> bool;

    /// Add `amount` to the cached balance.
    ///
    /// Returns the new balance, or `None` if no profile is cached.
    fn credit_game_point(&self, amount: u64) -> Option<u64> {
        let updated = self.game_point()?.saturating_add(amount);
        self.set_game_point(updated).then_some(updated)
    }
}

/// Shared, single-threaded profile cache.
///
/// Clones share the same profile.
#[derive(Clone, Debug, Default)]
pub struct SharedProfile {
    inner: Rc<RefCell<Option<UserProfile>>>,
}

impl SharedProfile {
    /// Create a cache holding `profile`.
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(profile))),
        }
    }

    /// Create an empty cache (signed out, or profile not loaded yet).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy of the cached profile.
    #[must_use]
    pub fn get(&self) -> Option<UserProfile> {
        self.inner.borrow().clone()
    }

    /// Replace the cached profile.
    pub fn replace(&self, profile: Option<UserProfile>) -> Option<UserProfile> {
        self.inner.replace(profile)
    }
}

impl ProfileStore for SharedProfile {
    fn game_point(&self) -> Option<u64> {
        self.inner.borrow().as_ref().map(|p| p.game_point)
    }

    fn set_game_point(&self, value: u64) -> bool {
        match self.inner.borrow_mut().as_mut() {
            Some(profile) => {
                profile.game_point = value;
                true
            }
            None => false,
        }
    }
}
