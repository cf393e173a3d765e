mod configurer;

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use snafu::prelude::*;

use crate::container::{Binding, Container, Managed};
use crate::key::{Key, TypedKey};
use crate::policy::Policy;
use crate::scope::TypedScope;

pub(super) use configurer::ConfigurerImpl;

/// The receiver of bindings while a container is being configured.
pub trait Configurer: Send + Sync + 'static {
    #[doc(hidden)]
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate;

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>);
}

pub(crate) trait ConfigurerPrivate: Configurer {
    fn dyn_register(&mut self, binding: Binding);

    fn dyn_splice(&mut self, bindings: &[Arc<Binding>]);

    fn dyn_add_policy(&mut self, policy: Arc<dyn Policy>);
}

pub trait TypedConfigurer: Configurer {
    /// Registers `scope` as the binding serving `key`.
    fn register<T, S>(&mut self, key: TypedKey<T>, scope: S)
    where
        T: Managed,
        S: TypedScope<Output = T>,
    {
        self.as_private()
            .dyn_register(Binding::new(key.key(), scope));
    }

    /// Pulls in every binding and every policy of `container`. Bindings and
    /// policies already present through another route are kept once.
    fn install(&mut self, container: &Container) {
        let configurer = self.as_private();
        configurer.dyn_splice(container.pool().bindings());
        for policy in container.policies() {
            configurer.dyn_add_policy(Arc::clone(policy));
        }
    }

    fn add_policy<P: Policy>(&mut self, policy: P) {
        self.as_private().dyn_add_policy(Arc::new(policy));
    }
}

impl<T: Configurer + ?Sized> TypedConfigurer for T {}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum RegistryError {
    #[snafu(display("the key {key} already exists in the registry"))]
    #[non_exhaustive]
    KeyDuplicated { key: Key },
    #[snafu(display("could not resolve {key} required by {required_by}"))]
    #[non_exhaustive]
    Unresolvable { key: Key, required_by: Key },
    #[snafu(display("found a cyclic dependency {}", PathDisplayer::new(path)))]
    #[non_exhaustive]
    CyclicDependency { path: Vec<Key> },
    #[snafu(display("could not expose {key} since its source container does not bind it"))]
    #[non_exhaustive]
    ExposedMissing { key: Key },
    #[snafu(display("module {module} fails to setup the configuration"))]
    #[non_exhaustive]
    ModuleInner {
        module: &'static str,
        source: Box<dyn Error + Send + Sync>,
    },
    #[snafu(display("aggregated registry errors:\n{}", AggregatedDisplayer::new(errors)))]
    Aggregated { errors: Vec<RegistryError> },
}

impl RegistryError {
    /// Folds several errors into one.
    pub(crate) fn aggregate(mut errors: Vec<RegistryError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Self::Aggregated { errors }
        }
    }
}

struct PathDisplayer<'a> {
    path: &'a [Key],
}

impl<'a> PathDisplayer<'a> {
    fn new(path: &'a [Key]) -> Self {
        Self { path }
    }
}

impl Display for PathDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, key) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

struct AggregatedDisplayer<'a> {
    errors: &'a [RegistryError],
}

impl<'a> AggregatedDisplayer<'a> {
    fn new(errors: &'a [RegistryError]) -> Self {
        Self { errors }
    }
}

impl Display for AggregatedDisplayer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{:4}: {}", i + 1, error)?;
        }
        Ok(())
    }
}
