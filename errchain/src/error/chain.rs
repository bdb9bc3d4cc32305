//! Chain traversal and containment checks
//!
//! A chain is the sequence of [`AnnotatedError`] nodes reached by following
//! each node's cause. It ends at the first cause that is not annotated.
//! Containment is decided on rendered text, not identity: two unrelated
//! errors that display the same are indistinguishable here.

use super::types::AnnotatedError;
use crate::code::CodeExt;
use std::error::Error as StdError;
use std::iter::FusedIterator;
use std::sync::Arc;
use tonic::Code;

/// An error argument that may be absent
///
/// Implemented for references to concrete errors, for `&dyn Error`
/// (with or without `Send + Sync`) and for `Option` of any of these.
pub trait MaybeError<'a> {
    /// The error as a trait object, `None` when absent
    fn as_error(self) -> Option<&'a (dyn StdError + 'static)>;
}

impl<'a, E> MaybeError<'a> for &'a E
where
    E: StdError + 'static,
{
    fn as_error(self) -> Option<&'a (dyn StdError + 'static)> {
        Some(self)
    }
}

impl<'a> MaybeError<'a> for &'a (dyn StdError + 'static) {
    fn as_error(self) -> Option<&'a (dyn StdError + 'static)> {
        Some(self)
    }
}

impl<'a> MaybeError<'a> for &'a (dyn StdError + Send + Sync + 'static) {
    fn as_error(self) -> Option<&'a (dyn StdError + 'static)> {
        Some(self)
    }
}

impl<'a, T> MaybeError<'a> for Option<T>
where
    T: MaybeError<'a>,
{
    fn as_error(self) -> Option<&'a (dyn StdError + 'static)> {
        self.and_then(MaybeError::as_error)
    }
}

/// Outer-to-inner iterator over the annotated nodes of a chain
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a AnnotatedError>,
}

impl<'a> Chain<'a> {
    /// Chain starting at `err`, empty when `err` is absent or not annotated
    pub fn new(err: impl MaybeError<'a>) -> Self {
        Self { next: unwrap(err) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a AnnotatedError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = unwrap(current.cause());
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

impl AnnotatedError {
    /// This node followed by every annotated node below it
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Innermost annotated node, `self` when the cause is not annotated
    #[must_use]
    pub fn root(&self) -> &AnnotatedError {
        self.chain().last().unwrap_or(self)
    }
}

/// `err` as an [`AnnotatedError`], if it is one
///
/// Sees through `Box<AnnotatedError>` and `Arc<AnnotatedError>`, which are
/// errors themselves and end up boxed again when passed to
/// [`wrap`](crate::wrap).
pub fn unwrap<'a>(err: impl MaybeError<'a>) -> Option<&'a AnnotatedError> {
    let err = err.as_error()?;
    err.downcast_ref::<AnnotatedError>()
        .or_else(|| err.downcast_ref::<Box<AnnotatedError>>().map(|boxed| &**boxed))
        .or_else(|| err.downcast_ref::<Arc<AnnotatedError>>().map(|shared| &**shared))
}

/// Innermost annotated node of the chain starting at `err`
pub fn get_root<'a>(err: impl MaybeError<'a>) -> Option<&'a AnnotatedError> {
    Chain::new(err).last()
}

/// Annotated nodes below the top-level one, outer to inner
///
/// For `plain -> A -> B -> C`, `unwrap_all(&c)` is `[B, A]`. Use
/// [`AnnotatedError::chain`] to include the top-level node.
pub fn unwrap_all<'a>(err: impl MaybeError<'a>) -> Vec<&'a AnnotatedError> {
    Chain::new(err).skip(1).collect()
}

/// Whether the chain of `left` contains an error rendering like `right`
///
/// Matches when `left` itself renders like `right`, or when any annotated
/// node of the chain or its direct cause does. Absent arguments never match.
pub fn contains_error<'a, 'b>(left: impl MaybeError<'a>, right: impl MaybeError<'b>) -> bool {
    let (Some(left), Some(right)) = (left.as_error(), right.as_error()) else {
        return false;
    };

    let needle = right.to_string();
    if left.to_string() == needle {
        return true;
    }

    Chain::new(left).any(|e| e.to_string() == needle || e.cause().to_string() == needle)
}

/// Whether the chain of `left` carries `code`
///
/// Matches when the rendered text of `left` mentions the code's name, when
/// any annotated node has exactly `code`, or when the rendered text of a
/// node's direct cause mentions the name. An absent `left` never matches.
pub fn contains_code<'a>(left: impl MaybeError<'a>, code: Code) -> bool {
    let Some(left) = left.as_error() else {
        return false;
    };

    let name = code.name();
    if left.to_string().contains(name) {
        return true;
    }

    Chain::new(left).any(|e| e.code() == code || e.cause().to_string().contains(name))
}
