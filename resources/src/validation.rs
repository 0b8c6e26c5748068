//! Local checks run before a form submits anything.

use payloads::Record;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("\"{0}\" already exists")]
    Duplicate(String),
}

/// Names compare equal ignoring case and surrounding whitespace.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn require(label: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(label))
    } else {
        Ok(())
    }
}

/// Check `(label, value)` pairs in order, reporting the first blank one.
pub fn require_all(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    fields
        .iter()
        .try_for_each(|&(label, value)| require(label, value))
}

/// Reject `candidate` if another item in `items` already has that name.
/// The record being edited, if any, is not compared against itself.
pub fn ensure_unique<T: Record>(
    items: &[T],
    candidate: &str,
    editing: Option<&T::Id>,
) -> Result<(), ValidationError> {
    let clash = items
        .iter()
        .filter(|item| Some(item.id()) != editing)
        .find(|item| same_name(item.display_name(), candidate));
    match clash {
        Some(existing) => Err(ValidationError::Duplicate(
            existing.display_name().to_string(),
        )),
        None => Ok(()),
    }
}
