use std::any::Any;
use std::error::Error;
use std::sync::Arc;

use crate::container::core::ContainerCore;
use crate::container::injector::{AnyInjectable, CallContext, Injector, InjectorError};
use crate::container::registry::{Configurer, ConfigurerImpl, RegistryError, TypedConfigurer};
use crate::container::{validate, DependencyPool, Managed};
use crate::key::Key;
use crate::module::Module;
use crate::policy::Policy;

/// The composition root.
///
/// A [`Container`] is built once from a [`Module`], usually a
/// [`Configuration`], and never changes afterwards. Every binding is checked
/// while the container is built, so a container that exists can produce
/// every object bound in it unless a constructor or a policy refuses.
///
/// Cloning a [`Container`] is cheap and yields a handle to the same
/// bindings, including the objects cached by their singletons.
///
/// [`Configuration`]: crate::module::Configuration
#[derive(Clone)]
pub struct Container {
    core: Arc<ContainerCore>,
}

impl Container {
    /// Builds a container from `module`.
    ///
    /// # Errors
    ///
    /// Returns an error if a module fails, a key is bound twice, a binding
    /// needs a key nothing serves, an exposed binding's source container
    /// lacks its key, or the bindings depend on each other in a cycle. Several problems are reported together as
    /// [`RegistryError::Aggregated`].
    pub fn init<M: Module>(module: M) -> Result<Self, RegistryError> {
        let mut configurer = ConfigurerImpl::new();
        module.setup(&mut configurer);
        let (pool, policies) = configurer.finish().map_err(RegistryError::aggregate)?;
        Self::build(pool, policies)
    }

    /// Builds a container holding every binding of `other`.
    ///
    /// The bindings are shared, so singletons already built by `other` are
    /// visible through the new container and the other way round. The
    /// policies of `other` apply to the new container as well.
    pub fn from_container(other: &Container) -> Self {
        let pool = DependencyPool::absorb(other.pool());
        let policies = other.policies().to_vec();
        Self {
            core: ContainerCore::new(pool, policies),
        }
    }

    fn build(
        pool: DependencyPool,
        policies: Vec<Arc<dyn Policy>>,
    ) -> Result<Self, RegistryError> {
        let errors = validate::validate(&pool);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "container validation failed");
            return Err(RegistryError::aggregate(errors));
        }

        tracing::debug!(
            bindings = pool.len(),
            policies = policies.len(),
            "container built"
        );
        Ok(Self {
            core: ContainerCore::new(pool, policies),
        })
    }

    /// Sends `action` to every binding. Scopes which know the action react to
    /// it, the others ignore it.
    pub fn call<A: Any>(&self, action: &A) {
        for binding in self.pool().bindings() {
            binding.scope().call(action);
        }
    }

    /// Returns the keys of all bindings in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.pool().bindings().iter().map(|binding| binding.key())
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.pool().get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pool().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool().is_empty()
    }

    pub(crate) fn pool(&self) -> &DependencyPool {
        self.core.pool()
    }

    pub(crate) fn policies(&self) -> &[Arc<dyn Policy>] {
        self.core.policies()
    }
}

impl Injector for Container {
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get(key)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        self.core.dyn_get_dependency(key, context)
    }

    fn deferred(&self) -> AnyInjectable {
        self.core.deferred()
    }
}

/// A container used as a module contributes all of its bindings.
impl Module for Container {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        configurer.install(self);
        Ok(())
    }
}
