//! Input-side helpers: key bindings and the anti-cheat key guard.

pub mod bindings;
pub mod guard;

pub use bindings::KeyBindings;
pub use guard::{GuardConfig, InputGuard, KeyVerdict};
