use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::container::injector::{Injector, InjectorError};
use crate::container::{Container, Managed};
use crate::holder::Held;
use crate::key::{Key, TypedKey};
use crate::provider::Provider;
use crate::scope::{Instance, Scope, ScopeKind, TypedScope};

/// Forwards requests to an object materialized outside of the binding.
///
/// The object either lives in another container, which keeps applying its own
/// scopes, or is a plain value handed to the configuration directly.
pub struct Exposed<T: Managed> {
    origin: Origin,
    _marker: PhantomData<fn() -> T>,
}

enum Origin {
    Container { container: Container, key: Key },
    Value(Box<dyn Scope>),
}

impl<T: Managed> Exposed<T> {
    /// Exposes the binding of `key` in `container`.
    pub fn new(container: &Container, key: TypedKey<T>) -> Self {
        Self {
            origin: Origin::Container {
                container: container.clone(),
                key: key.key(),
            },
            _marker: PhantomData,
        }
    }
}

impl<T: Held> Exposed<T> {
    /// Exposes a value owned by the binding itself.
    pub fn from_value(value: T) -> Self {
        Self {
            origin: Origin::Value(Box::new(Instance::new(value))),
            _marker: PhantomData,
        }
    }
}

impl<T: Managed> Debug for Exposed<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut f = f.debug_struct("Exposed");
        f.field("type", &any::type_name::<T>());
        match &self.origin {
            Origin::Container { key, .. } => f.field("container_key", key),
            Origin::Value(scope) => f.field("value", scope),
        };
        f.finish()
    }
}

impl<T: Managed> Scope for Exposed<T> {
    fn kind(&self) -> ScopeKind {
        ScopeKind::Exposed
    }

    fn given(&self) -> &'static str {
        match &self.origin {
            Origin::Container { .. } => any::type_name::<T>(),
            Origin::Value(scope) => scope.given(),
        }
    }

    fn unserved_origin(&self) -> Option<&Key> {
        match &self.origin {
            Origin::Container { container, key } if !container.contains(key) => Some(key),
            _ => None,
        }
    }

    fn create(&self, provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError> {
        match &self.origin {
            Origin::Container { container, key } => container.dyn_get(key),
            Origin::Value(scope) => scope.create(provider),
        }
    }
}

impl<T: Managed> TypedScope for Exposed<T> {
    type Output = T;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::container::injector::{downcast_object, CallContext, MockInjector};

    use super::*;

    #[test]
    fn exposed_from_value_hands_out_the_value() {
        let shared = Arc::new(String::from("exposed"));
        let scope = Exposed::from_value(Arc::clone(&shared));

        let injector = MockInjector::new();
        let key = Key::of::<Arc<String>>();
        let context = CallContext::new(&key);
        let provider = Provider::new(&injector, &context);

        let object: Arc<String> = downcast_object(scope.create(&provider).unwrap());
        assert!(Arc::ptr_eq(&object, &shared));
        assert_eq!(scope.kind(), ScopeKind::Exposed);
        assert!(scope.parameters().is_empty());
        assert!(scope.unserved_origin().is_none());
    }
}
