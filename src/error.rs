//! Rejection reasons for submissions and key presses.
//!
//! None of these are faults: a rejected call leaves the match exactly as it
//! was, and the caller decides whether to tell the user.

use thiserror::Error;

use crate::core::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The symbol is not bound to any gesture for that side.
    #[error("input {symbol:?} is not mapped to a gesture")]
    UnmappedInput { symbol: char },

    /// The side already committed a gesture this round.
    #[error("{side} already submitted this round")]
    DuplicateSubmission { side: Side },

    /// No round is accepting input.
    #[error("no round is accepting input")]
    InactiveRound,

    /// The key is still held from a previous press.
    #[error("key {key:?} is held down")]
    KeyRepeat { key: char },

    /// Too many presses in the guard window.
    #[error("key presses throttled")]
    Throttled,
}
