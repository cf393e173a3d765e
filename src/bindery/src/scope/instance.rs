use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::holder::{Held, Holder};
use crate::provider::Provider;
use crate::scope::{Scope, ScopeKind, TypedScope};

/// Hands out an object supplied from outside the container.
///
/// The object is kept in a [`Holder`] with the representation matching `T`,
/// and each request receives a copy of the handle, reference or value.
pub struct Instance<T: Held> {
    holder: Holder<'static, T::Element>,
}

impl<T: Held> Instance<T> {
    pub fn new(object: T) -> Self {
        Self {
            holder: object.into_holder(),
        }
    }

    pub fn holder(&self) -> &Holder<'static, T::Element> {
        &self.holder
    }

    pub fn read(&self) -> T {
        T::read(&self.holder)
    }
}

impl<T: Held> Debug for Instance<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Instance")
            .field("type", &any::type_name::<T>())
            .field("holder", &self.holder)
            .finish()
    }
}

impl<T: Held> Scope for Instance<T> {
    fn kind(&self) -> ScopeKind {
        ScopeKind::Instance
    }

    fn given(&self) -> &'static str {
        any::type_name::<T>()
    }

    fn create(&self, _provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError> {
        Ok(Box::new(self.read()))
    }
}

impl<T: Held> TypedScope for Instance<T> {
    type Output = T;
}
