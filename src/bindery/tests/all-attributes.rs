use std::convert::Infallible;
use std::error::Error;
use std::sync::Arc;

use bindery::prelude::*;

#[derive(Debug, PartialEq)]
pub struct Test {
    pub a: i32,
    pub b: &'static str,
    pub t: (i64, f64),
    pub attached: bool,
}

#[component]
impl Test {
    #[inject]
    pub fn new(
        a: i32,
        #[named("greet")] b: &'static str,
        #[named("tuple")] (c, d): (i64, f64),
        any: AnyInjectable,
    ) -> Self {
        Self {
            a,
            b,
            t: (c, d),
            attached: any.is_attached(),
        }
    }
}

#[derive(Debug)]
pub struct Checked {
    pub value: i32,
}

#[derive(Debug)]
pub struct Negative;

impl std::fmt::Display for Negative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "the value is negative")
    }
}

impl Error for Negative {}

#[component(Arc<Checked>, Arc::new)]
impl Checked {
    #[inject]
    pub fn new(#[named("checked")] value: i32) -> Result<Self, Negative> {
        if value < 0 {
            Err(Negative)
        } else {
            Ok(Self { value })
        }
    }
}

struct TestModule {
    checked: i32,
}

impl Module for TestModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        bind::<i32>().to_instance(42).set_on(configurer);

        bind::<i32>()
            .named("checked")
            .to_instance(self.checked)
            .set_on(configurer);

        bind::<i64>().to_instance(64).set_on(configurer);

        bind::<f64>().to_instance(3.1415926).set_on(configurer);

        bind::<&'static str>()
            .named("greet")
            .to_instance("hello world")
            .set_on(configurer);

        bind::<(i64, f64)>()
            .named("tuple")
            .to_closure(|c: i64, d: f64| Ok::<_, Infallible>((c, d)))
            .set_on(configurer);

        bind::<Test>().set_on(configurer);

        bind::<Arc<Checked>>().in_singleton().set_on(configurer);

        Ok(())
    }
}

#[test]
fn component_attributes_inject_every_kind_of_argument() {
    let container = Container::init(TestModule { checked: 7 }).unwrap();
    let obj: Test = container.get(key::of()).unwrap();

    assert_eq!(
        obj,
        Test {
            a: 42,
            b: "hello world",
            t: (64, 3.1415926),
            attached: true,
        }
    );

    let checked = container.create::<Arc<Checked>>().unwrap();
    assert_eq!(checked.value, 7);
    assert!(Arc::ptr_eq(
        &checked,
        &container.create::<Arc<Checked>>().unwrap()
    ));
}

#[test]
fn component_construction_errors_are_reported() {
    let container = Container::init(TestModule { checked: -1 }).unwrap();
    let err = container.create::<Arc<Checked>>().unwrap_err();

    assert!(matches!(err, InjectorError::ObjectConstruction { .. }));
    assert_eq!(*err.key(), key::of::<Arc<Checked>>().key());
    assert_eq!(
        err.source().map(ToString::to_string).as_deref(),
        Some("the value is negative")
    );
}
