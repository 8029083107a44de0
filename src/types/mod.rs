//! Error tree and error wrapper types.
//!
//! - [`ErrorNode`] / [`Nested`] - the structured result of a validation run
//! - [`Messages`] - the ordered message list kept per key
//! - [`ComposableError`] - a failure annotated with where in the tree it happened
//!
//! # Examples
//!
//! ```
//! use validation_rail::types::ErrorNode;
//!
//! let mut errors = ErrorNode::new();
//! errors.add("name", "can't be blank");
//! errors.add_base("does not look correct");
//!
//! assert_eq!(errors.error_count(), 2);
//! assert_eq!(errors.to_string(), "base does not look correct; name can't be blank");
//! ```
use smallvec::SmallVec;

pub mod composable_error;
pub mod error_node;
pub mod messages;

pub use composable_error::*;
pub use error_node::*;
pub use messages::*;

/// SmallVec-backed collection used for accumulating messages and contexts.
///
/// Uses inline storage for one element; most fields fail at most one rule.
pub type ErrorVec<E> = SmallVec<[E; 1]>;
