use core::fmt::{self, Debug, Display};

use crate::types::ErrorVec;

/// A core error together with the chain of places it travelled through.
///
/// Validation recurses through embedded records; when a store-backed rule
/// fails deep inside the tree, each level pushes a context string on the way
/// out, so the final error reads from the outermost level inward.
///
/// # Examples
///
/// ```
/// use validation_rail::types::ComposableError;
///
/// let err = ComposableError::new("connection refused")
///     .with_context("uniqueness on 'email'")
///     .with_context("tasks[0]");
///
/// assert_eq!(
///     err.error_chain(),
///     "tasks[0] -> uniqueness on 'email' -> connection refused"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposableError<E> {
    core_error: E,
    context: ErrorVec<String>,
}

impl<E> ComposableError<E> {
    #[inline]
    pub fn new(error: E) -> Self {
        Self {
            core_error: error,
            context: ErrorVec::new(),
        }
    }

    /// Pushes an outer context entry.
    #[inline]
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    #[inline]
    pub fn core_error(&self) -> &E {
        &self.core_error
    }

    #[inline]
    pub fn into_core(self) -> E {
        self.core_error
    }

    /// Context entries, outermost first.
    #[inline]
    pub fn context(&self) -> Vec<String> {
        self.context.iter().rev().cloned().collect()
    }

    #[inline]
    pub fn context_iter(&self) -> core::iter::Rev<core::slice::Iter<'_, String>> {
        self.context.iter().rev()
    }

    #[inline]
    pub fn map_core<F, T>(self, f: F) -> ComposableError<T>
    where
        F: FnOnce(E) -> T,
    {
        ComposableError {
            core_error: f(self.core_error),
            context: self.context,
        }
    }

    pub fn error_chain(&self) -> String
    where
        E: Display,
    {
        let mut chain = String::new();

        for ctx in self.context.iter().rev() {
            chain.push_str(ctx);
            chain.push_str(" -> ");
        }

        chain.push_str(&self.core_error.to_string());
        chain
    }
}

impl<E: Display> Display for ComposableError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_chain())
    }
}

impl<E: Debug + Display> std::error::Error for ComposableError<E> {}

impl<E> From<E> for ComposableError<E> {
    #[inline]
    fn from(error: E) -> Self {
        Self::new(error)
    }
}
