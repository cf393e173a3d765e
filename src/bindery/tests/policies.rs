use std::error::Error;
use std::sync::Arc;

use bindery::prelude::*;

type ModuleResult = Result<(), Box<dyn Error + Send + Sync>>;

pub struct Secret(pub &'static str);

pub struct Service {
    pub secret: Arc<Secret>,
}

#[component(Arc<Service>, Arc::new)]
impl Service {
    #[inject]
    pub fn new(secret: Arc<Secret>) -> Self {
        Self { secret }
    }
}

struct DenyTopLevelSecrets;

impl Policy for DenyTopLevelSecrets {
    fn inspect(&self, request: &Request<'_>) -> Result<(), Box<dyn Error + Send + Sync>> {
        if request.is_top_level() && *request.key() == key::of::<Arc<Secret>>().key() {
            Err("secrets may only be injected".into())
        } else {
            Ok(())
        }
    }
}

fn module(configurer: &mut dyn Configurer) -> ModuleResult {
    bind::<Arc<Service>>().in_singleton().set_on(configurer);
    Ok(())
}

fn container() -> Container {
    Container::init(
        Configuration::new()
            .with(module)
            .with_value(Arc::new(Secret("hunter2")))
            .with_policy(DenyTopLevelSecrets),
    )
    .unwrap()
}

#[test]
fn policies_veto_top_level_requests() {
    let err = container().create::<Arc<Secret>>().err().unwrap();

    let InjectorError::PolicyViolation { key, policy, .. } = &err else {
        panic!("expected a policy violation, got {err}");
    };
    assert_eq!(*key, key::of::<Arc<Secret>>().key());
    assert!(policy.ends_with("DenyTopLevelSecrets"));
}

#[test]
fn policies_allow_nested_requests() {
    let service = container().create::<Arc<Service>>().unwrap();
    assert_eq!(service.secret.0, "hunter2");
}

#[test]
fn policies_see_the_depth_of_each_request() {
    let depths = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let recorded = Arc::clone(&depths);
    let record = move |request: &Request<'_>| -> Result<(), Box<dyn Error + Send + Sync>> {
        recorded.lock().push((request.depth(), request.scope().to_string()));
        Ok(())
    };

    let container = Container::init(
        Configuration::new()
            .with(module)
            .with_value(Arc::new(Secret("hunter2")))
            .with_policy(record),
    )
    .unwrap();
    container.create::<Arc<Service>>().unwrap();

    assert_eq!(
        *depths.lock(),
        [
            (0, String::from("singleton")),
            (1, String::from("exposed")),
        ]
    );
}

#[test]
fn vetoes_of_nested_requests_abort_the_resolution() {
    let deny_nested = |request: &Request<'_>| {
        if request.is_top_level() {
            Ok(())
        } else {
            Err(format!("{} must not be nested", request.key()))
        }
    };
    let container = Container::init(
        Configuration::new()
            .with(module)
            .with_value(Arc::new(Secret("hunter2")))
            .with_policy(deny_nested),
    )
    .unwrap();

    let err = container.create::<Arc<Service>>().err().unwrap();
    assert!(matches!(err, InjectorError::PolicyViolation { .. }));
}
