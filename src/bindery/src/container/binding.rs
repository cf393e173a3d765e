use crate::key::Key;
use crate::provider::Parameter;
use crate::scope::{Scope, ScopeKind};

/// A key paired with the scope serving it.
#[derive(Debug)]
pub struct Binding {
    key: Key,
    scope: Box<dyn Scope>,
    parameters: Vec<Parameter>,
}

impl Binding {
    pub fn new<S: Scope>(key: Key, scope: S) -> Self {
        Self::from_boxed(key, Box::new(scope))
    }

    pub fn from_boxed(key: Key, scope: Box<dyn Scope>) -> Self {
        let parameters = scope.parameters();
        Self {
            key,
            scope,
            parameters,
        }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn kind(&self) -> ScopeKind {
        self.scope.kind()
    }

    pub fn given(&self) -> &'static str {
        self.scope.given()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn scope(&self) -> &dyn Scope {
        self.scope.as_ref()
    }
}
