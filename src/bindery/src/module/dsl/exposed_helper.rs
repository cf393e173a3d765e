use std::marker::PhantomData;

use crate::container::registry::{Configurer, TypedConfigurer};
use crate::container::{Container, Managed};
use crate::module::dsl::typed_key;
use crate::scope::Exposed;

pub struct ExposedBinding<KT>
where
    KT: Managed,
{
    container: Container,
    name: Option<&'static str>,
    _marker: PhantomData<fn() -> KT>,
}

impl<KT> ExposedBinding<KT>
where
    KT: Managed,
{
    pub(super) fn new(container: &Container, name: Option<&'static str>) -> Self {
        Self {
            container: container.clone(),
            name,
            _marker: PhantomData,
        }
    }

    /// Names the binding, both in the receiving and in the exposing
    /// container.
    pub fn named(self, name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..self
        }
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let key = typed_key::<KT>(self.name);
        configurer.register(key, Exposed::new(&self.container, key));
    }
}
