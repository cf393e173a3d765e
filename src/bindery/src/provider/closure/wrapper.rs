use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::provider::closure::Closure;
use crate::provider::{Parameter, Provider, TypedConstructor};

/// A [`Constructor`] which supplies objects from a [`Closure`].
///
/// Note that each argument of the closure is fetched without specifying a
/// name.
///
/// # Examples
///
/// ```rust
/// # use std::convert::Infallible;
/// # use bindery::provider::closure::ClosureConstructor;
/// let closure = |a: i32, b: f64| Ok::<_, Infallible>((a, b));
/// let constructor = ClosureConstructor::new(closure);
/// ```
///
/// [`Constructor`]: crate::provider::Constructor
pub struct ClosureConstructor<T, C, D>
where
    T: Managed,
    C: Closure<D, Output = T>,
    D: 'static,
{
    closure: C,
    _marker: PhantomData<fn() -> (T, D)>,
}

impl<T, C, D> ClosureConstructor<T, C, D>
where
    T: Managed,
    C: Closure<D, Output = T>,
    D: 'static,
{
    /// Creates a new [`ClosureConstructor`] from a [`Closure`].
    pub fn new(closure: C) -> Self {
        Self {
            closure,
            _marker: PhantomData,
        }
    }
}

impl<T, C, D> Debug for ClosureConstructor<T, C, D>
where
    T: Managed,
    C: Closure<D, Output = T>,
    D: 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureConstructor")
            .finish_non_exhaustive()
    }
}

impl<T, C, D> TypedConstructor for ClosureConstructor<T, C, D>
where
    T: Managed,
    C: Closure<D, Output = T>,
    D: 'static,
{
    type Output = T;

    fn parameters(&self) -> Vec<Parameter> {
        self.closure.parameters()
    }

    fn construct(&self, provider: &Provider<'_>) -> Result<Self::Output, InjectorError> {
        match self.closure.run(provider) {
            Ok(Ok(obj)) => Ok(obj),
            Ok(Err(err)) => Err(InjectorError::ObjectConstruction {
                key: *provider.key(),
                source: Arc::from(err.into()),
            }),
            Err(err) => Err(err),
        }
    }
}
