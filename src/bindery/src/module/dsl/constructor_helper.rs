use std::marker::PhantomData;

use crate::container::registry::{Configurer, TypedConfigurer};
use crate::container::{Managed, SharedManaged};
use crate::module::dsl::{lifetime, typed_key, ToLifetime};
use crate::provider::TypedConstructor;
use crate::scope::{Singleton, Unique};

#[allow(private_bounds)]
pub struct ConstructorBinding<KT, P, L>
where
    KT: Managed,
    P: TypedConstructor<Output = KT>,
    L: ToLifetime,
{
    constructor: P,
    name: Option<&'static str>,
    lifetime: L,
    _marker: PhantomData<fn() -> KT>,
}

#[allow(private_bounds)]
impl<KT, P, L> ConstructorBinding<KT, P, L>
where
    KT: Managed,
    P: TypedConstructor<Output = KT>,
    L: ToLifetime,
{
    pub(super) fn new(constructor: P, name: Option<&'static str>, lifetime: L) -> Self {
        Self {
            constructor,
            name,
            lifetime,
            _marker: PhantomData,
        }
    }

    pub fn named(self, name: &'static str) -> Self {
        ConstructorBinding::new(self.constructor, Some(name), self.lifetime)
    }

    pub fn in_singleton(self) -> ConstructorBinding<KT, P, lifetime::Singleton> {
        ConstructorBinding::new(self.constructor, self.name, lifetime::Singleton)
    }

    pub fn in_unique(self) -> ConstructorBinding<KT, P, lifetime::Unique> {
        ConstructorBinding::new(self.constructor, self.name, lifetime::Unique)
    }
}

impl<KT, P> ConstructorBinding<KT, P, lifetime::Unique>
where
    KT: Managed,
    P: TypedConstructor<Output = KT>,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let key = typed_key::<KT>(self.name);
        configurer.register(key, Unique::new(self.constructor));
    }
}

impl<KT, P> ConstructorBinding<KT, P, lifetime::Singleton>
where
    KT: SharedManaged,
    P: TypedConstructor<Output = KT>,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let key = typed_key::<KT>(self.name);
        configurer.register(key, Singleton::new(self.constructor));
    }
}
