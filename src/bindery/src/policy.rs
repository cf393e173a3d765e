//! Validators consulted on every resolution.

use std::any;
use std::error::Error;

use crate::container::Binding;
use crate::key::Key;
use crate::provider::Parameter;
use crate::scope::ScopeKind;

/// A check applied to each request before its object is produced.
///
/// Policies see top-level requests as well as every nested dependency, and
/// a rejection aborts the whole resolution with
/// [`InjectorError::PolicyViolation`].
///
/// Closures of `Fn(&Request) -> Result<(), E>` are policies as well.
///
/// [`InjectorError::PolicyViolation`]: crate::container::injector::InjectorError::PolicyViolation
pub trait Policy: Send + Sync + 'static {
    fn name(&self) -> &'static str {
        any::type_name::<Self>()
    }

    /// Inspects `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request must not be served.
    fn inspect(&self, request: &Request<'_>) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl<F, E> Policy for F
where
    F: Fn(&Request<'_>) -> Result<(), E> + Send + Sync + 'static,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    fn inspect(&self, request: &Request<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        self(request).map_err(Into::into)
    }
}

/// A request as seen by a [`Policy`].
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    key: &'a Key,
    binding: &'a Binding,
    depth: usize,
}

impl<'a> Request<'a> {
    pub(crate) fn new(key: &'a Key, binding: &'a Binding, depth: usize) -> Self {
        Self {
            key,
            binding,
            depth,
        }
    }

    pub fn key(&self) -> &'a Key {
        self.key
    }

    pub fn scope(&self) -> ScopeKind {
        self.binding.kind()
    }

    /// The name of the implementation serving the request.
    pub fn given(&self) -> &'static str {
        self.binding.given()
    }

    pub fn parameters(&self) -> &'a [Parameter] {
        self.binding.parameters()
    }

    /// Zero for a top-level request, one more for each level of nesting.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_top_level(&self) -> bool {
        self.depth == 0
    }
}
