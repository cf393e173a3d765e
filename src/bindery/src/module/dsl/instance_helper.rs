use crate::container::registry::{Configurer, TypedConfigurer};
use crate::holder::Held;
use crate::module::dsl::typed_key;
use crate::scope::Instance;

pub struct InstanceBinding<KT>
where
    KT: Held,
{
    instance: KT,
    name: Option<&'static str>,
}

impl<KT> InstanceBinding<KT>
where
    KT: Held,
{
    pub(super) fn new(instance: KT, name: Option<&'static str>) -> Self {
        Self { instance, name }
    }

    pub fn named(self, name: &'static str) -> Self {
        InstanceBinding::new(self.instance, Some(name))
    }

    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let key = typed_key::<KT>(self.name);
        configurer.register(key, Instance::new(self.instance));
    }
}
