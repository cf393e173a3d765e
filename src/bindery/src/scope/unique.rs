use crate::container::injector::InjectorError;
use crate::container::Managed;
use crate::provider::{Parameter, Provider, TypedConstructor};
use crate::scope::{Scope, ScopeKind, TypedScope};

/// Builds a brand-new object on every request.
#[derive(Debug)]
pub struct Unique<C: TypedConstructor> {
    constructor: C,
}

impl<C: TypedConstructor> Unique<C> {
    pub fn new(constructor: C) -> Self {
        Self { constructor }
    }
}

impl<C: TypedConstructor> Scope for Unique<C> {
    fn kind(&self) -> ScopeKind {
        ScopeKind::Unique
    }

    fn given(&self) -> &'static str {
        self.constructor.given()
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.constructor.parameters()
    }

    fn create(&self, provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError> {
        self.constructor
            .construct(provider)
            .map(|obj| -> Box<dyn Managed> { Box::new(obj) })
    }
}

impl<C: TypedConstructor> TypedScope for Unique<C> {
    type Output = C::Output;
}
