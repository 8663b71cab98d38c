//! Unique-assignment engine for drag-and-drop ranking.
//!
//! A fixed pool of tokens is assigned to a fixed pool of slots through one
//! operation, `place(token, slot)`. After every call:
//!
//! - each slot holds at most one token
//! - each token occupies at most one slot
//! - `available == tokens \ range(placement)`
//!
//! ## Key Types
//!
//! - [`AssignmentEngine`]: Owns the assignment and enforces the invariants
//! - [`AssignmentSnapshot`]: O(1)-clone view handed to the display layer
//! - [`TokenStatus`]: Per-token available/placed status, so the token pool
//!   can keep stable positions while members are on the board

mod engine;
mod snapshot;

pub use engine::AssignmentEngine;
pub use snapshot::{AssignmentSnapshot, TokenStatus};
