mod any;
mod context;

use std::error::Error;
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::Managed;
use crate::key::{self, Key, TypedKey};
use crate::util::any::Downcast;

pub use any::AnyInjectable;
pub use context::{CallContext, InjectionTrace};

/// The object-safe resolution surface of a container.
#[cfg_attr(test, mockall::automock)]
pub trait Injector: Send + Sync {
    /// Resolves a top-level request for `key`.
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError>;

    /// Resolves `key` as a dependency of the object being constructed in
    /// `context`.
    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError>;

    /// Returns a placeholder which resolves against this injector later.
    fn deferred(&self) -> AnyInjectable;
}

pub trait TypedInjector: Injector {
    fn get<T>(&self, key: TypedKey<T>) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.dyn_get(&key.key()).map(downcast_object)
    }

    fn create<T>(&self) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.get(key::of())
    }

    fn create_named<T>(&self, name: &'static str) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.get(key::named(name))
    }

    fn upcast_dyn(&self) -> &dyn Injector;
}

impl<T> TypedInjector for T
where
    T: Injector,
{
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

impl TypedInjector for dyn Injector + '_ {
    fn upcast_dyn(&self) -> &dyn Injector {
        self
    }
}

pub(crate) fn downcast_object<T: Managed>(object: Box<dyn Managed>) -> T {
    match object.downcast::<T>() {
        Ok(object) => *object,
        Err(_) => unreachable!("the object's type should be `T`"),
    }
}

#[derive(Debug, Clone, Snafu)]
#[non_exhaustive]
pub enum InjectorError {
    #[snafu(display("could not find the object identified by the given key {key}"))]
    #[non_exhaustive]
    NotFound { key: Key },
    #[snafu(display("could not construct the object {key} which depends on itself somehow"))]
    #[non_exhaustive]
    CyclicDependency { key: Key },
    #[snafu(display("could not construct the object {key}"))]
    #[non_exhaustive]
    ObjectConstruction {
        key: Key,
        source: Arc<dyn Error + Send + Sync>,
    },
    #[snafu(display("policy {policy} rejected the request for {key}"))]
    #[non_exhaustive]
    PolicyViolation {
        key: Key,
        policy: &'static str,
        source: Arc<dyn Error + Send + Sync>,
    },
    #[snafu(display("could not resolve {key} since its container has been dropped"))]
    #[non_exhaustive]
    ContainerDropped { key: Key },
    #[snafu(display("the construction of the shared object {key} was abandoned"))]
    #[non_exhaustive]
    ConstructionAbandoned { key: Key },
}

impl InjectorError {
    /// Returns the key of the request which failed.
    pub fn key(&self) -> &Key {
        match self {
            Self::NotFound { key }
            | Self::CyclicDependency { key }
            | Self::ObjectConstruction { key, .. }
            | Self::PolicyViolation { key, .. }
            | Self::ContainerDropped { key }
            | Self::ConstructionAbandoned { key } => key,
        }
    }
}
