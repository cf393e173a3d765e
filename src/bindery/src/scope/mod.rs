//! Creation policies attached to bindings.
//!
//! Every binding owns exactly one [`Scope`], which decides whether a request
//! builds a new object, reuses a cached one or forwards to an object living
//! elsewhere.

mod exposed;
mod instance;
mod singleton;
mod unique;

use std::any::Any;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::key::Key;
use crate::provider::{Parameter, Provider};

pub use exposed::Exposed;
pub use instance::Instance;
pub use singleton::Singleton;
pub use unique::Unique;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Unique,
    Singleton,
    Exposed,
    Instance,
}

impl ScopeKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Singleton => "singleton",
            Self::Exposed => "exposed",
            Self::Instance => "instance",
        }
    }
}

impl Display for ScopeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}

/// The strategy deciding how the object of one binding is obtained.
pub trait Scope: Debug + Send + Sync + 'static {
    fn kind(&self) -> ScopeKind;

    /// The name of the implementation behind the binding.
    fn given(&self) -> &'static str;

    /// The dependencies needed to build the object, if the scope builds one.
    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Returns the object for the request described by `provider`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object can't be built or fetched.
    fn create(&self, provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError>;

    /// The key this scope forwards to in another container, if that
    /// container has no binding for it.
    fn unserved_origin(&self) -> Option<&Key> {
        None
    }

    /// Lets the scope react to an action sent through the container. Scopes
    /// ignore actions they don't know.
    fn call(&self, action: &dyn Any) {
        let _ = action;
    }
}

/// A [`Scope`] whose objects are statically known to be `Output`.
pub trait TypedScope: Scope {
    type Output: Managed;
}
