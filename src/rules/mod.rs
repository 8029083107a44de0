//! Built-in rules and the name-based rule registry.
//!
//! | Rule | Default message |
//! |------|-----------------|
//! | [`Presence`] | can't be blank |
//! | [`Uniqueness`] | has already been taken |
//! | [`Format`] | is invalid |
//! | [`Length`] | is too short / is too long / is the wrong length |
pub mod format;
pub mod length;
pub mod presence;
pub mod registry;
pub mod uniqueness;

pub use format::{Format, INVALID_MESSAGE};
pub use length::Length;
pub use presence::{is_blank, Presence, BLANK_MESSAGE};
pub use registry::{RuleFactory, RuleRegistry};
pub use uniqueness::{Uniqueness, TAKEN_MESSAGE};
