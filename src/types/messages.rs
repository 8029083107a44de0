use crate::types::ErrorVec;
use core::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Ordered list of error messages recorded for a single key of an [`ErrorNode`].
///
/// Messages are append-only during a validation run and keep the order in
/// which rules produced them, so two rules on the same field report in
/// declaration order.
///
/// [`ErrorNode`]: crate::types::ErrorNode
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    items: ErrorVec<String>,
}

impl Messages {
    /// Creates an empty message list.
    #[inline]
    pub fn new() -> Self {
        Self {
            items: ErrorVec::new(),
        }
    }

    /// Appends a message.
    #[inline]
    pub fn push(&mut self, message: impl Into<String>) {
        self.items.push(message.into());
    }

    /// Appends every message yielded by `iter`.
    #[inline]
    pub fn extend<I, S>(&mut self, iter: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(iter.into_iter().map(Into::into));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if any recorded message equals `message`.
    ///
    /// # Examples
    ///
    /// ```
    /// use validation_rail::types::Messages;
    ///
    /// let mut messages = Messages::new();
    /// messages.push("can't be blank");
    /// assert!(messages.includes("can't be blank"));
    /// assert!(!messages.includes("is invalid"));
    /// ```
    #[inline]
    pub fn includes(&self, message: &str) -> bool {
        self.items.iter().any(|item| item == message)
    }

    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, String> {
        self.items.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Consumes the list and returns the underlying `ErrorVec`.
    #[inline]
    pub fn into_inner(self) -> ErrorVec<String> {
        self.items
    }
}

impl Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl From<ErrorVec<String>> for Messages {
    fn from(items: ErrorVec<String>) -> Self {
        Self { items }
    }
}

impl From<&str> for Messages {
    fn from(message: &str) -> Self {
        let mut messages = Self::new();
        messages.push(message);
        messages
    }
}

impl From<String> for Messages {
    fn from(message: String) -> Self {
        let mut messages = Self::new();
        messages.push(message);
        messages
    }
}

impl<S: Into<String>> FromIterator<S> for Messages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Messages {
    type Item = String;
    type IntoIter = smallvec::IntoIter<[String; 1]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
