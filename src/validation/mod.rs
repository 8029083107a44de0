//! Collecting declaration problems.
//!
//! Building a [`ValidatorDefinition`](crate::ValidatorDefinition) can go wrong
//! in several places at once, at any depth of the embedded tree. [`Validation`]
//! carries either the built piece or the problems found so far, so the builder
//! can keep checking and report everything in one error.
pub mod core;
pub mod iter;

pub use self::core::*;
