//! Error types for handle validation.

use core::fmt;

/// A handle did not resolve to a live element of this list.
///
/// Returned by the reordering operations when the handle was minted by a
/// different list, names an element that has since been removed, or (for
/// [`move_before`](crate::SlotList::move_before)) the anchor equals the
/// moved handle. The list is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHandle;

impl fmt::Display for InvalidHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle does not name a live element of this list")
    }
}

impl std::error::Error for InvalidHandle {}

/// A positional insert named an invalid anchor element.
///
/// Carries the value that could not be inserted, allowing recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAnchor<T>(
    /// The value that could not be inserted.
    pub T,
);

impl<T> InvalidAnchor<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for InvalidAnchor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor handle does not name a live element of this list")
    }
}

impl<T: fmt::Debug> std::error::Error for InvalidAnchor<T> {}
