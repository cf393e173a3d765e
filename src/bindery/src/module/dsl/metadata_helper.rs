use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::registry::{Configurer, TypedConfigurer};
use crate::container::{Container, Managed};
use crate::holder::Held;
use crate::module::dsl::constructor_helper::ConstructorBinding;
use crate::module::dsl::exposed_helper::ExposedBinding;
use crate::module::dsl::instance_helper::InstanceBinding;
use crate::module::dsl::{lifetime, typed_key, ToLifetime};
use crate::provider::closure::{Closure, ClosureConstructor};
use crate::provider::component::{Component, ComponentConstructor};
use crate::provider::TypedConstructor;
use crate::scope::{Singleton, Unique};

/// The first step of a binding: the requested type, its name and its scope.
#[allow(private_bounds)]
pub struct MetadataBinding<KT, L>
where
    KT: Managed,
    L: ToLifetime,
{
    name: Option<&'static str>,
    lifetime: L,
    _marker: PhantomData<fn() -> KT>,
}

#[allow(private_bounds)]
impl<KT, L> MetadataBinding<KT, L>
where
    KT: Managed,
    L: ToLifetime,
{
    pub(super) fn new(name: Option<&'static str>, lifetime: L) -> Self {
        Self {
            name,
            lifetime,
            _marker: PhantomData,
        }
    }

    pub fn named(self, name: &'static str) -> Self {
        MetadataBinding::new(Some(name), self.lifetime)
    }

    pub fn in_singleton(self) -> MetadataBinding<KT, lifetime::Singleton> {
        MetadataBinding::new(self.name, lifetime::Singleton)
    }

    pub fn in_unique(self) -> MetadataBinding<KT, lifetime::Unique> {
        MetadataBinding::new(self.name, lifetime::Unique)
    }

    pub fn to_component<C>(self) -> ConstructorBinding<KT, ComponentConstructor<C>, L>
    where
        C: Component<Output = KT>,
    {
        ConstructorBinding::new(ComponentConstructor::new(), self.name, self.lifetime)
    }

    pub fn to_closure<C, D>(
        self,
        closure: C,
    ) -> ConstructorBinding<KT, ClosureConstructor<KT, C, D>, L>
    where
        C: Closure<D, Output = KT>,
        D: 'static,
    {
        ConstructorBinding::new(ClosureConstructor::new(closure), self.name, self.lifetime)
    }

    pub fn to_constructor<P>(self, constructor: P) -> ConstructorBinding<KT, P, L>
    where
        P: TypedConstructor<Output = KT>,
    {
        ConstructorBinding::new(constructor, self.name, self.lifetime)
    }
}

impl<KT> MetadataBinding<KT, lifetime::Unique>
where
    KT: Managed,
{
    /// Binds an object supplied from outside. It is stored the way `KT`
    /// dictates: shared handles and references are shared, plain values are
    /// copied.
    pub fn to_instance(self, instance: KT) -> InstanceBinding<KT>
    where
        KT: Held,
    {
        InstanceBinding::new(instance, self.name)
    }

    /// Forwards the binding to the binding of the same key in `container`.
    pub fn to_exposed(self, container: &Container) -> ExposedBinding<KT> {
        ExposedBinding::new(container, self.name)
    }
}

impl<KT> MetadataBinding<KT, lifetime::Unique>
where
    KT: Component<Output = KT>,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let key = typed_key::<KT>(self.name);
        configurer.register(key, Unique::new(ComponentConstructor::<KT>::new()));
    }
}

impl<C> MetadataBinding<Arc<C>, lifetime::Singleton>
where
    C: Component<Output = Arc<C>>,
{
    pub fn set_on(self, configurer: &mut dyn Configurer) {
        let key = typed_key::<Arc<C>>(self.name);
        configurer.register(key, Singleton::new(ComponentConstructor::<C>::new()));
    }
}
