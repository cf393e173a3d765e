pub mod closure;
pub mod component;

use std::any;
use std::fmt::Debug;

use crate::container::injector::{
    downcast_object, AnyInjectable, CallContext, Injector, InjectorError,
};
use crate::container::Managed;
use crate::key::{self, Key, TypedKey};

/// A borrowed view of an injector while one object is being constructed.
///
/// Every argument fetched through a [`Provider`] is resolved as a dependency
/// of the object under construction, so cyclic requests are noticed and the
/// container's policies see the whole chain.
#[derive(Clone, Copy)]
pub struct Provider<'a> {
    injector: &'a dyn Injector,
    context: &'a CallContext<'a>,
}

impl<'a> Provider<'a> {
    pub fn new(injector: &'a dyn Injector, context: &'a CallContext<'a>) -> Self {
        Self { injector, context }
    }

    /// The key of the object under construction.
    pub fn key(&self) -> &Key {
        self.context.key()
    }

    pub fn context(&self) -> &'a CallContext<'a> {
        self.context
    }

    /// Resolves the unnamed binding of `T`.
    pub fn get<T: Managed>(&self) -> Result<T, InjectorError> {
        self.resolve(key::of())
    }

    /// Resolves the binding of `T` declared with `name`.
    pub fn get_named<T: Managed>(&self, name: &'static str) -> Result<T, InjectorError> {
        self.resolve(key::named(name))
    }

    pub fn resolve<T: Managed>(&self, key: TypedKey<T>) -> Result<T, InjectorError> {
        self.injector
            .dyn_get_dependency(&key.key(), self.context)
            .map(downcast_object)
    }

    /// Returns a placeholder bound to the injector itself, deferring any
    /// resolution to the constructed object.
    pub fn any(&self) -> AnyInjectable {
        self.injector.deferred()
    }
}

/// A constructor argument as seen by the container before anything is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// An argument resolved through the binding of the key.
    Typed(Key),
    /// An [`AnyInjectable`] placeholder, which needs no binding.
    Any,
}

impl Parameter {
    pub fn of<T: Managed>() -> Self {
        Self::Typed(Key::of::<T>())
    }

    pub fn named<T: Managed>(name: &'static str) -> Self {
        Self::Typed(Key::named::<T>(name))
    }

    pub fn key(&self) -> Option<&Key> {
        match self {
            Self::Typed(key) => Some(key),
            Self::Any => None,
        }
    }
}

/// A type-erased recipe for one kind of object.
///
/// A [`Constructor`] declares its parameters up front and builds a new object
/// on each call. It never caches anything; reuse is the business of the
/// [`Scope`] wrapping it.
///
/// Usually, you don't need to implement [`Constructor`] manually, since this
/// is automatically done by [`TypedConstructor`]'s blanket implementation.
///
/// [`Scope`]: crate::scope::Scope
pub trait Constructor: Debug + Send + Sync + 'static {
    fn dyn_parameters(&self) -> Vec<Parameter>;

    /// The name of the implementation being built, used in diagnostics.
    fn dyn_given(&self) -> &'static str;

    /// Builds a new type-erased object.
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn dyn_construct(&self, provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError>;
}

/// A static variant of the [`Constructor`] trait.
pub trait TypedConstructor: Constructor {
    type Output: Managed;

    fn parameters(&self) -> Vec<Parameter>;

    fn given(&self) -> &'static str {
        any::type_name::<Self::Output>()
    }

    /// Builds a new object of type [`TypedConstructor::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if a dependency can't be fetched or the object
    /// construction fails.
    fn construct(&self, provider: &Provider<'_>) -> Result<Self::Output, InjectorError>;
}

impl<T: TypedConstructor> Constructor for T {
    fn dyn_parameters(&self) -> Vec<Parameter> {
        self.parameters()
    }

    fn dyn_given(&self) -> &'static str {
        self.given()
    }

    fn dyn_construct(&self, provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError> {
        self.construct(provider)
            .map(|obj| -> Box<dyn Managed> { Box::new(obj) })
    }
}
