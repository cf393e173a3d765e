use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::{Arc, Weak};

use crate::container::core::ContainerCore;
use crate::container::injector::{downcast_object, Injector, InjectorError};
use crate::container::Managed;
use crate::key::{self, Key, TypedKey};

/// A deferred handle to the container which constructed an object.
///
/// A constructor parameter of this type is not resolved to a binding.
/// Instead, the object receives a handle through which it may resolve any
/// binding of the container later on. The handle does not keep the container
/// alive.
#[derive(Clone)]
pub struct AnyInjectable {
    injector: Weak<dyn Injector>,
}

impl AnyInjectable {
    pub fn new(injector: Weak<dyn Injector>) -> Self {
        Self { injector }
    }

    /// Returns a handle which is not attached to any container.
    pub fn detached() -> Self {
        let injector: Weak<dyn Injector> = Weak::<ContainerCore>::new();
        Self::new(injector)
    }

    pub fn is_attached(&self) -> bool {
        self.injector.strong_count() > 0
    }

    pub fn get<T>(&self, key: TypedKey<T>) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        let key = key.key();
        self.upgrade(&key)?.dyn_get(&key).map(downcast_object)
    }

    pub fn create<T>(&self) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.get(key::of())
    }

    pub fn create_named<T>(&self, name: &'static str) -> Result<T, InjectorError>
    where
        T: Managed,
    {
        self.get(key::named(name))
    }

    fn upgrade(&self, key: &Key) -> Result<Arc<dyn Injector>, InjectorError> {
        self.injector
            .upgrade()
            .ok_or(InjectorError::ContainerDropped { key: *key })
    }
}

impl Debug for AnyInjectable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AnyInjectable")
            .field("attached", &self.is_attached())
            .finish()
    }
}
