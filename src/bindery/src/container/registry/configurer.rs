use std::error::Error;
use std::sync::Arc;

use crate::container::registry::{Configurer, ConfigurerPrivate, RegistryError};
use crate::container::{Binding, DependencyPool, Insertion};
use crate::policy::Policy;

/// Collects the flattened bindings and the policies of a container under
/// construction.
pub struct ConfigurerImpl {
    pool: DependencyPool,
    policies: Vec<Arc<dyn Policy>>,
    errors: Vec<RegistryError>,
}

impl ConfigurerImpl {
    pub fn new() -> Self {
        Self {
            pool: DependencyPool::new(),
            policies: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(DependencyPool, Vec<Arc<dyn Policy>>), Vec<RegistryError>> {
        if self.errors.is_empty() {
            Ok((self.pool, self.policies))
        } else {
            Err(self.errors)
        }
    }

    fn insert(&mut self, binding: Arc<Binding>) {
        if let Insertion::Conflict(binding) = self.pool.insert(binding) {
            self.errors.push(RegistryError::KeyDuplicated {
                key: *binding.key(),
            });
        }
    }
}

impl Configurer for ConfigurerImpl {
    #[allow(private_interfaces)]
    fn as_private(&mut self) -> &mut dyn ConfigurerPrivate {
        self
    }

    fn report_module_error(&mut self, module: &'static str, err: Box<dyn Error + Send + Sync>) {
        self.errors.push(RegistryError::ModuleInner {
            module,
            source: err,
        });
    }
}

impl ConfigurerPrivate for ConfigurerImpl {
    fn dyn_register(&mut self, binding: Binding) {
        self.insert(Arc::new(binding));
    }

    fn dyn_splice(&mut self, bindings: &[Arc<Binding>]) {
        for binding in bindings {
            self.insert(Arc::clone(binding));
        }
    }

    fn dyn_add_policy(&mut self, policy: Arc<dyn Policy>) {
        if !self.policies.iter().any(|p| Arc::ptr_eq(p, &policy)) {
            self.policies.push(policy);
        }
    }
}
