use std::sync::{Arc, Weak};

use crate::container::binder;
use crate::container::injector::{AnyInjectable, CallContext, Injector, InjectorError};
use crate::container::{Binding, DependencyPool, Managed};
use crate::key::Key;
use crate::policy::{Policy, Request};
use crate::provider::Provider;

/// The shared state behind a [`Container`] handle.
///
/// [`Container`]: crate::container::Container
pub struct ContainerCore {
    this: Weak<ContainerCore>,
    pool: DependencyPool,
    policies: Vec<Arc<dyn Policy>>,
}

impl ContainerCore {
    pub fn new(pool: DependencyPool, policies: Vec<Arc<dyn Policy>>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: Weak::clone(this),
            pool,
            policies,
        })
    }

    pub fn pool(&self) -> &DependencyPool {
        &self.pool
    }

    pub fn policies(&self) -> &[Arc<dyn Policy>] {
        &self.policies
    }

    fn get_object(&self, context: &CallContext) -> Result<Box<dyn Managed>, InjectorError> {
        let key = context.key();
        if context.trace().previous_exist_key(key) {
            return Err(InjectorError::CyclicDependency { key: *key });
        }

        let binding = binder::resolve(&self.pool, key)?;
        self.inspect(key, binding, context)?;

        tracing::trace!(
            %key,
            scope = %binding.kind(),
            given = binding.given(),
            depth = context.trace().depth(),
            "resolving object"
        );
        binding.scope().create(&Provider::new(self, context))
    }

    fn inspect(
        &self,
        key: &Key,
        binding: &Binding,
        context: &CallContext,
    ) -> Result<(), InjectorError> {
        let request = Request::new(key, binding, context.trace().depth());
        for policy in &self.policies {
            if let Err(err) = policy.inspect(&request) {
                tracing::debug!(%key, policy = policy.name(), "policy rejected the request");
                return Err(InjectorError::PolicyViolation {
                    key: *key,
                    policy: policy.name(),
                    source: Arc::from(err),
                });
            }
        }
        Ok(())
    }
}

impl Injector for ContainerCore {
    fn dyn_get(&self, key: &Key) -> Result<Box<dyn Managed>, InjectorError> {
        let context = CallContext::new(key);
        self.get_object(&context)
    }

    fn dyn_get_dependency<'a>(
        &self,
        key: &Key,
        context: &'a CallContext<'a>,
    ) -> Result<Box<dyn Managed>, InjectorError> {
        let context = context.append(key);
        self.get_object(&context)
    }

    fn deferred(&self) -> AnyInjectable {
        let this: Weak<dyn Injector> = self.this.clone();
        AnyInjectable::new(this)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::thread;

    use crate::container::injector::TypedInjector;
    use crate::container::Insertion;
    use crate::key;
    use crate::provider::closure::ClosureConstructor;
    use crate::provider::component::{Component, ComponentConstructor};
    use crate::provider::{Parameter, TypedConstructor};
    use crate::scope::{Instance, Singleton, Unique};

    use super::*;

    struct TestObject {
        id: u32,
        sub_even: Option<Arc<TestObject>>,
        sub_odd: Option<Arc<TestObject>>,
    }

    impl TestObject {
        fn binding(id: u32) -> Binding {
            let key = Key::named::<Arc<TestObject>>(NAMES[id as usize]);
            Binding::new(key, Singleton::new(TestObjectConstructor { id }))
        }
    }

    const NAMES: [&str; 8] = ["0", "1", "2", "3", "4", "5", "6", "7"];

    #[derive(Debug)]
    struct TestObjectConstructor {
        id: u32,
    }

    impl TestObjectConstructor {
        fn dependencies(&self) -> Option<(u32, u32)> {
            match self.id {
                0 | 1 => None,
                id if id % 2 == 0 => Some((id - 2, id - 1)),
                id => Some((id - 3, id - 2)),
            }
        }
    }

    impl TypedConstructor for TestObjectConstructor {
        type Output = Arc<TestObject>;

        fn parameters(&self) -> Vec<Parameter> {
            self.dependencies()
                .map(|(even, odd)| {
                    vec![
                        Parameter::named::<Arc<TestObject>>(NAMES[even as usize]),
                        Parameter::named::<Arc<TestObject>>(NAMES[odd as usize]),
                    ]
                })
                .unwrap_or_default()
        }

        fn construct(&self, provider: &Provider<'_>) -> Result<Self::Output, InjectorError> {
            let (sub_even, sub_odd) = match self.dependencies() {
                Some((even, odd)) => (
                    Some(provider.get_named(NAMES[even as usize])?),
                    Some(provider.get_named(NAMES[odd as usize])?),
                ),
                None => (None, None),
            };
            Ok(Arc::new(TestObject {
                id: self.id,
                sub_even,
                sub_odd,
            }))
        }
    }

    struct Recursive {
        _inner: Arc<Recursive>,
    }

    impl Component for Recursive {
        type Output = Arc<Self>;

        type Error = Infallible;

        fn parameters() -> Vec<Parameter> {
            vec![Parameter::of::<Arc<Recursive>>()]
        }

        fn construct(provider: &Provider<'_>) -> Result<Result<Self, Self::Error>, InjectorError> {
            Ok(Ok(Self {
                _inner: provider.get()?,
            }))
        }

        fn post_process(self) -> Self::Output {
            Arc::new(self)
        }
    }

    fn core_of(bindings: impl IntoIterator<Item = Binding>) -> Arc<ContainerCore> {
        let mut pool = DependencyPool::new();
        for binding in bindings {
            assert!(matches!(pool.insert(Arc::new(binding)), Insertion::Inserted));
        }
        ContainerCore::new(pool, Vec::new())
    }

    #[test]
    fn container_core_get_succeeds_when_it_needs_complex_structure() {
        let core = core_of((0..8).map(TestObject::binding));
        let mut handles = Vec::new();

        for id in (0..8u32).rev() {
            let core = Arc::clone(&core);
            handles.push(thread::spawn(move || {
                let object: Arc<TestObject> =
                    core.get(key::named(NAMES[id as usize])).unwrap();
                assert_eq!(object.id, id);
                if id > 1 {
                    assert!(object.sub_even.is_some() && object.sub_odd.is_some());
                }
                object
            }));
        }

        let objects: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("Each thread should not `panic!()`"))
            .collect();
        let (seven, six) = (&objects[0], &objects[1]);
        assert!(Arc::ptr_eq(
            seven.sub_even.as_ref().unwrap(),
            six.sub_even.as_ref().unwrap()
        ));
    }

    #[test]
    fn container_core_get_fails_when_there_exists_cyclic_dependency() {
        let core = core_of([Binding::new(
            Key::of::<Arc<Recursive>>(),
            Unique::new(ComponentConstructor::<Recursive>::new()),
        )]);

        assert!(matches!(
            core.create::<Arc<Recursive>>(),
            Err(InjectorError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn container_core_get_fails_when_a_singleton_depends_on_itself() {
        let core = core_of([Binding::new(
            Key::of::<Arc<Recursive>>(),
            Singleton::new(ComponentConstructor::<Recursive>::new()),
        )]);

        assert!(matches!(
            core.create::<Arc<Recursive>>(),
            Err(InjectorError::CyclicDependency { .. })
        ));
        let binding = core.pool().get(&Key::of::<Arc<Recursive>>()).unwrap();
        assert!(!format!("{:?}", binding.scope()).contains("constructed: true"));
    }

    #[test]
    fn container_core_get_fails_when_key_not_found() {
        let core = core_of(Vec::new());

        assert!(matches!(
            core.create::<i32>(),
            Err(InjectorError::NotFound { .. })
        ));
    }

    #[test]
    fn container_core_get_fails_when_policy_rejects() {
        let mut pool = DependencyPool::new();
        pool.insert(Arc::new(Binding::new(
            Key::of::<i32>(),
            Instance::new(1i32),
        )));
        pool.insert(Arc::new(Binding::new(
            Key::of::<i64>(),
            Unique::new(ClosureConstructor::new(|v: i32| {
                Ok::<_, Infallible>(i64::from(v))
            })),
        )));
        let deny_nested = |request: &Request<'_>| {
            if request.is_top_level() {
                Ok(())
            } else {
                Err(format!("{} must be requested directly", request.key()))
            }
        };
        let policy: Arc<dyn Policy> = Arc::new(deny_nested);
        let core = ContainerCore::new(pool, vec![policy]);

        assert_eq!(core.create::<i32>().unwrap(), 1);
        let err = core.create::<i64>().unwrap_err();
        assert!(matches!(err, InjectorError::PolicyViolation { .. }));
        assert_eq!(*err.key(), Key::of::<i32>());
    }

    #[test]
    fn container_core_deferred_is_attached_while_core_lives() {
        let core = core_of([Binding::new(Key::of::<u8>(), Instance::new(3u8))]);

        let any = core.deferred();
        assert_eq!(any.create::<u8>().unwrap(), 3);
        drop(core);
        assert!(!any.is_attached());
    }
}
