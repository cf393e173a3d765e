mod wrapper;

use std::error::Error;

use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::provider::{Parameter, Provider};

pub use wrapper::ComponentConstructor;

/// A type that has a dedicated constructor for dependency injection.
///
/// Usually, you don't need to implement the [`Component`] trait manually for
/// your components, because the [`component`] macro helps with this. In case
/// that you really want to write implementation in your own, take a look at
/// the following code snippet:
///
/// ```rust
/// # use std::sync::Arc;
/// # use std::convert::Infallible;
/// # use bindery::container::injector::InjectorError;
/// # use bindery::provider::component::Component;
/// # use bindery::provider::{Parameter, Provider};
/// #
/// trait Storage: Send + Sync + 'static {}
///
/// struct FileStorage {
///     root: String,
///     capacity: Arc<u64>,
/// }
///
/// impl Storage for FileStorage {}
///
/// impl Component for FileStorage {
///     type Output = Arc<dyn Storage>;
///
///     type Error = Infallible;
///
///     fn parameters() -> Vec<Parameter> {
///         vec![Parameter::named::<String>("root"), Parameter::of::<Arc<u64>>()]
///     }
///
///     fn construct(provider: &Provider<'_>) -> Result<Result<Self, Self::Error>, InjectorError> {
///         let root = provider.get_named("root")?;
///         let capacity = provider.get()?;
///         Ok(Ok(Self { root, capacity }))
///     }
///
///     fn post_process(self) -> Self::Output {
///         Arc::new(self)
///     }
/// }
/// ```
///
/// The parameters returned by [`Component::parameters`] must list every
/// argument fetched in [`Component::construct`], since containers validate
/// their bindings against this list when they are built.
///
/// [`component`]: crate::component
pub trait Component: Managed + Sized {
    /// The successfully constructed object. This can be not only `Self`, but
    /// also some boxed `Self`, such as `Arc<Self>` and `Arc<dyn Trait>`.
    type Output: Managed;

    /// The error occurred in object construction after all dependencies are
    /// retrieved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    fn parameters() -> Vec<Parameter>;

    /// Retrieves the dependencies from the provider and creates the object.
    ///
    /// # Errors
    ///
    /// Returns an error if all dependencies can't be fetched.
    ///
    /// Returns an inner error [`Component::Error`] wrapped in the outer [`Ok`]
    /// if the object construction fails.
    fn construct(provider: &Provider<'_>) -> Result<Result<Self, Self::Error>, InjectorError>;

    /// Converts `self` to [`Component::Output`]. Typical usages are putting
    /// `self` to an [`Arc`] and coercing it to an `Arc<dyn Trait>`.
    ///
    /// [`Arc`]: std::sync::Arc
    fn post_process(self) -> Self::Output;
}
