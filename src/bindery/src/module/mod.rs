pub mod dsl;

use std::any;
use std::error::Error;
use std::sync::Arc;

use crate::container::registry::Configurer;
use crate::container::{Binding, Container};
use crate::holder::Held;
use crate::key::Key;
use crate::policy::Policy;
use crate::scope::Exposed;

pub use dsl::{bind, bind_key};

/// A unit of configuration contributing bindings and policies.
///
/// Closures of `Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send +
/// Sync>>` are modules as well.
pub trait Module: 'static {
    fn setup(&self, configurer: &mut dyn Configurer) {
        if let Err(err) = self.configure(configurer) {
            configurer.report_module_error(any::type_name::<Self>(), err);
        }
    }

    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

impl<F> Module for F
where
    F: Fn(&mut dyn Configurer) -> Result<(), Box<dyn Error + Send + Sync>> + 'static,
{
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self(configurer)
    }
}

/// Everything a container is built from: modules, other containers, plain
/// values and policies.
///
/// Items are flattened in the order they were added. A container installed
/// twice, directly or through other containers, contributes its bindings
/// once.
#[derive(Default)]
pub struct Configuration {
    modules: Vec<Box<dyn Module>>,
    values: Vec<Arc<Binding>>,
    policies: Vec<Arc<dyn Policy>>,
}

impl Configuration {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with<M: Module>(mut self, module: M) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Adds every binding of `container`.
    pub fn install(self, container: &Container) -> Self {
        self.with(container.clone())
    }

    /// Adds `value` as the unnamed binding of `T`.
    pub fn with_value<T: Held>(mut self, value: T) -> Self {
        let binding = Binding::new(Key::of::<T>(), Exposed::from_value(value));
        self.values.push(Arc::new(binding));
        self
    }

    pub fn with_policy<P: Policy>(mut self, policy: P) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    pub fn compose(mut self, mut other: Configuration) -> Self {
        self.modules.append(&mut other.modules);
        self.values.append(&mut other.values);
        self.policies.append(&mut other.policies);
        self
    }
}

impl Module for Configuration {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.modules
            .iter()
            .for_each(|module| module.setup(configurer));
        let configurer = configurer.as_private();
        configurer.dyn_splice(&self.values);
        for policy in &self.policies {
            configurer.dyn_add_policy(Arc::clone(policy));
        }
        Ok(())
    }
}
