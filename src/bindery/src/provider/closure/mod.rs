mod closure_implementation;
mod wrapper;

use std::error::Error;

use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::provider::{Parameter, Provider};

pub use wrapper::ClosureConstructor;

/// A specialized form of [`Fn`] that can be called by supplying arguments
/// retrieved from a [`Provider`].
///
/// Closures of `Fn(A1, A2, ...) -> Result<T, E> + Send + Sync + 'static`
/// where `Ai: Managed` are [`Closure`]. Note that each argument is fetched
/// without specifying a name.
///
/// Usually you don't need to use a [`Closure`] directly. The most recommended
/// way is to use `to_closure()` [`dsl`]s offered by this crate. Or wrap your
/// [`Closure`] in a [`ClosureConstructor`] if you need low-level control.
///
/// Due to the lack of support for functions of variable length parameters,
/// [`Closure`] is only implemented by any function whose arity is at most 16.
///
/// [`dsl`]: crate::module::dsl
pub trait Closure<D>
where
    Self: Send + Sync + 'static,
    D: 'static,
{
    /// The successfully constructed object.
    type Output: Managed;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// One unnamed parameter per argument, in order.
    fn parameters(&self) -> Vec<Parameter>;

    /// Retrieves the dependencies from the provider and calls `self` with
    /// these dependencies.
    ///
    /// # Errors
    ///
    /// Returns an error if all dependencies can't be fetched.
    ///
    /// Returns an inner error [`Closure::Error`] wrapped in the outer [`Ok`]
    /// if the object construction fails.
    fn run(
        &self,
        provider: &Provider<'_>,
    ) -> Result<Result<Self::Output, Self::Error>, InjectorError>;
}
