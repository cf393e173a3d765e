use std::any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::container::injector::InjectorError;
use crate::provider::component::Component;
use crate::provider::{Parameter, Provider, TypedConstructor};

pub struct ComponentConstructor<C>
where
    C: Component,
{
    _marker: PhantomData<fn() -> C>,
}

impl<C> ComponentConstructor<C>
where
    C: Component,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C> Debug for ComponentConstructor<C>
where
    C: Component,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ComponentConstructor")
            .field("component", &any::type_name::<C>())
            .finish()
    }
}

impl<C> TypedConstructor for ComponentConstructor<C>
where
    C: Component,
{
    type Output = C::Output;

    fn parameters(&self) -> Vec<Parameter> {
        C::parameters()
    }

    fn given(&self) -> &'static str {
        any::type_name::<C>()
    }

    fn construct(&self, provider: &Provider<'_>) -> Result<Self::Output, InjectorError> {
        match C::construct(provider) {
            Ok(Ok(obj)) => Ok(obj.post_process()),
            Ok(Err(err)) => Err(InjectorError::ObjectConstruction {
                key: *provider.key(),
                source: Arc::from(err.into()),
            }),
            Err(err) => Err(err),
        }
    }
}
