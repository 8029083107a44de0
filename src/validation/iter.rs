use crate::types::ErrorVec;
use crate::validation::core::Validation;

impl<E, A> Validation<E, A> {
    pub fn iter_errors(&self) -> core::slice::Iter<'_, E> {
        match self {
            Self::Valid(_) => <&[E]>::default().iter(),
            Self::Invalid(errors) => errors.iter(),
        }
    }
}

/// Gathers sibling checks, such as one per embedded definition.
///
/// The result holds every built value when nothing failed. Otherwise it
/// holds the problems of all failing siblings, in iteration order.
///
/// ```
/// use validation_rail::validation::Validation;
///
/// let embeds = vec![
///     Validation::valid("address"),
///     Validation::invalid("tasks: missing model name"),
///     Validation::invalid("tags: unknown rule 'shout'"),
/// ];
/// let built: Validation<&str, Vec<&str>> = embeds.into_iter().collect();
/// assert_eq!(built.iter_errors().count(), 2);
/// ```
impl<E, A, C> FromIterator<Validation<E, A>> for Validation<E, C>
where
    C: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Validation<E, A>>>(iter: I) -> Self {
        let mut built = Vec::new();
        let mut problems: ErrorVec<E> = ErrorVec::new();

        for check in iter {
            match check {
                Validation::Valid(value) => built.push(value),
                Validation::Invalid(found) => problems.extend(found),
            }
        }

        if problems.is_empty() {
            Validation::Valid(built.into_iter().collect())
        } else {
            Validation::Invalid(problems)
        }
    }
}
