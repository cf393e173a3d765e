use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::thread::{self, ThreadId};

use oneshot::{Receiver, Sender};
use parking_lot::{RwLock, RwLockWriteGuard};

use crate::action::Release;
use crate::container::injector::InjectorError;
use crate::container::{Managed, SharedManaged};
use crate::holder::{Held, Holder};
use crate::key::Key;
use crate::provider::{Parameter, Provider, TypedConstructor};
use crate::scope::{Scope, ScopeKind, TypedScope};

/// Builds the object once and shares it with every later request.
///
/// The first request constructs the object while other threads asking for it
/// in the meantime wait for that construction instead of building their own.
/// A request coming back from the constructing thread itself means the object
/// depends on itself, which is reported as
/// [`InjectorError::CyclicDependency`].
pub struct Singleton<C>
where
    C: TypedConstructor<Output: SharedManaged>,
{
    constructor: C,
    state: RwLock<State<C::Output>>,
}

struct State<T: SharedManaged> {
    instance: Option<Holder<'static, T::Element>>,
    construction: Option<Construction<T>>,
}

struct Construction<T> {
    on_thread: ThreadId,
    waiters: Vec<Sender<Result<T, InjectorError>>>,
}

impl<T> Construction<T> {
    fn new() -> Self {
        Self {
            on_thread: thread::current().id(),
            waiters: Vec::new(),
        }
    }

    fn is_constructed_by_current_thread(&self) -> bool {
        thread::current().id() == self.on_thread
    }

    fn notify(self, response: &Result<T, InjectorError>)
    where
        T: Clone,
    {
        for sender in self.waiters {
            let _ = sender.send(response.clone());
        }
    }
}

impl<C> Singleton<C>
where
    C: TypedConstructor<Output: SharedManaged>,
{
    pub fn new(constructor: C) -> Self {
        Self {
            constructor,
            state: RwLock::new(State {
                instance: None,
                construction: None,
            }),
        }
    }

    /// Returns true if the object has already been built.
    pub fn is_constructed(&self) -> bool {
        self.state.read().instance.is_some()
    }

    fn get_or_construct(&self, provider: &Provider<'_>) -> Result<C::Output, InjectorError> {
        if let Some(instance) = self.try_get_constructed_object() {
            return Ok(instance);
        }

        let mut state = self.state.write();
        if let Some(instance) = state.instance.as_ref() {
            return Ok(C::Output::read(instance));
        }

        let key = *provider.key();
        match state.construction.as_mut() {
            Some(construction) if construction.is_constructed_by_current_thread() => {
                Err(InjectorError::CyclicDependency { key })
            }
            Some(construction) => {
                let (sender, receiver) = oneshot::channel();
                construction.waiters.push(sender);
                drop(state);
                Self::wait_for_constructed_object(receiver, key)
            }
            None => {
                state.construction = Some(Construction::new());
                self.construct_shared_object(state, provider)
            }
        }
    }

    fn try_get_constructed_object(&self) -> Option<C::Output> {
        let state = self.state.read();
        state.instance.as_ref().map(C::Output::read)
    }

    fn wait_for_constructed_object(
        receiver: Receiver<Result<C::Output, InjectorError>>,
        key: Key,
    ) -> Result<C::Output, InjectorError> {
        match receiver.recv() {
            Ok(response) => response,
            // The constructing thread unwound without answering.
            Err(_) => Err(InjectorError::ConstructionAbandoned { key }),
        }
    }

    fn construct_shared_object(
        &self,
        state: RwLockWriteGuard<'_, State<C::Output>>,
        provider: &Provider<'_>,
    ) -> Result<C::Output, InjectorError> {
        drop(state);

        let guard = AbandonGuard { state: &self.state };
        let response = self.constructor.construct(provider);
        drop(guard);

        let mut state = self.state.write();
        if let Ok(object) = &response {
            state.instance = Some(object.clone().into_holder());
        }
        let construction = state.construction.take();
        drop(state);

        if let Some(construction) = construction {
            construction.notify(&response);
        }
        response
    }

    fn release(&self) {
        let mut state = self.state.write();
        if state.instance.take().is_some() {
            tracing::debug!(given = self.constructor.given(), "released singleton");
        }
    }
}

/// Clears a pending construction if its constructor panics, so waiting
/// threads are woken up and later requests may try again.
struct AbandonGuard<'a, T: SharedManaged> {
    state: &'a RwLock<State<T>>,
}

impl<T: SharedManaged> Drop for AbandonGuard<'_, T> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.state.write().construction = None;
        }
    }
}

impl<C> Debug for Singleton<C>
where
    C: TypedConstructor<Output: SharedManaged>,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Singleton")
            .field("constructor", &self.constructor)
            .field("constructed", &self.is_constructed())
            .finish()
    }
}

impl<C> Scope for Singleton<C>
where
    C: TypedConstructor<Output: SharedManaged>,
{
    fn kind(&self) -> ScopeKind {
        ScopeKind::Singleton
    }

    fn given(&self) -> &'static str {
        self.constructor.given()
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.constructor.parameters()
    }

    fn create(&self, provider: &Provider<'_>) -> Result<Box<dyn Managed>, InjectorError> {
        self.get_or_construct(provider)
            .map(|obj| -> Box<dyn Managed> { Box::new(obj) })
    }

    fn call(&self, action: &dyn Any) {
        if action.is::<Release>() {
            self.release();
        }
    }
}

impl<C> TypedScope for Singleton<C>
where
    C: TypedConstructor<Output: SharedManaged>,
{
    type Output = C::Output;
}
