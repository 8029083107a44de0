use crate::types::ErrorVec;
use smallvec::smallvec;

/// Outcome of checking one piece of a declaration: the built value, or every
/// problem found while building it.
///
/// A definition tree is checked bottom-up. Each embedded definition yields
/// its own `Validation`, and the parent keeps collecting after the first
/// problem so a single `build` call lists them all.
///
/// # Examples
///
/// ```
/// use validation_rail::validation::Validation;
///
/// let named = Validation::<&str, &str>::valid("User");
/// assert_eq!(named.into_value(), Some("User"));
///
/// let unnamed = Validation::<&str, &str>::invalid("missing model name");
/// assert_eq!(unnamed.iter_errors().next(), Some(&"missing model name"));
/// ```
#[must_use]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Validation<E, A> {
    Valid(A),
    Invalid(ErrorVec<E>),
}

impl<E, A> Validation<E, A> {
    #[must_use]
    #[inline]
    pub fn valid(value: A) -> Self {
        Self::Valid(value)
    }

    #[must_use]
    #[inline]
    pub fn invalid(error: E) -> Self {
        Self::Invalid(smallvec![error])
    }

    /// Wraps `value` unless `errors` has at least one entry.
    ///
    /// ```
    /// use validation_rail::validation::Validation;
    ///
    /// let problems: Vec<&str> = Vec::new();
    /// assert!(Validation::from_errors("Task", problems).is_valid());
    ///
    /// let checked = Validation::from_errors("Task", ["duplicate embed 'tags'", "missing relation"]);
    /// assert_eq!(checked.iter_errors().count(), 2);
    /// ```
    #[must_use]
    pub fn from_errors<I>(value: A, errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let errors: ErrorVec<E> = errors.into_iter().collect();
        if errors.is_empty() {
            Self::Valid(value)
        } else {
            Self::Invalid(errors)
        }
    }

    #[must_use]
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    #[must_use]
    #[inline]
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    #[must_use]
    #[inline]
    pub fn map<B, F>(self, f: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Valid(value) => Validation::Valid(f(value)),
            Self::Invalid(errors) => Validation::Invalid(errors),
        }
    }

    /// Pairs a node's own checks with its children's.
    ///
    /// Problems from `self` come before problems from `other`, matching the
    /// order in which a definition reports its own fields ahead of its embeds.
    ///
    /// ```
    /// use validation_rail::validation::Validation;
    ///
    /// let own = Validation::<&str, ()>::invalid("unknown rule 'shout'");
    /// let embeds = Validation::<&str, Vec<&str>>::invalid("tasks: missing model name");
    ///
    /// let problems: Vec<_> = own.zip(embeds).iter_errors().copied().collect();
    /// assert_eq!(problems, ["unknown rule 'shout'", "tasks: missing model name"]);
    /// ```
    #[must_use]
    #[inline]
    pub fn zip<B>(self, other: Validation<E, B>) -> Validation<E, (A, B)> {
        match (self, other) {
            (Validation::Valid(a), Validation::Valid(b)) => Validation::Valid((a, b)),
            (Validation::Invalid(errors), Validation::Valid(_))
            | (Validation::Valid(_), Validation::Invalid(errors)) => Validation::Invalid(errors),
            (Validation::Invalid(mut first), Validation::Invalid(rest)) => {
                first.extend(rest);
                Validation::Invalid(first)
            },
        }
    }

    #[inline]
    pub fn to_result(self) -> Result<A, ErrorVec<E>> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(errors) => Err(errors),
        }
    }

    #[must_use]
    #[inline]
    pub fn into_errors(self) -> Option<ErrorVec<E>> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    #[must_use]
    #[inline]
    pub fn into_value(self) -> Option<A> {
        match self {
            Self::Valid(value) => Some(value),
            Self::Invalid(_) => None,
        }
    }
}
