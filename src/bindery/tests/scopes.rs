use std::convert::Infallible;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use bindery::action::Release;
use bindery::prelude::*;

type ModuleResult = Result<(), Box<dyn Error + Send + Sync>>;

static BUILT: AtomicUsize = AtomicUsize::new(0);

static GREETING: &str = "hello";

pub struct Counter {
    pub id: usize,
}

#[component(Arc<Counter>, Arc::new)]
impl Counter {
    #[inject]
    pub fn new(#[named("seed")] seed: usize) -> Self {
        Self {
            id: seed + BUILT.fetch_add(1, Ordering::SeqCst),
        }
    }
}

fn module(configurer: &mut dyn Configurer) -> ModuleResult {
    bind::<usize>().named("seed").to_instance(0).set_on(configurer);
    bind::<Arc<Counter>>()
        .named("shared")
        .in_singleton()
        .set_on(configurer);
    bind::<Arc<Counter>>()
        .named("fresh")
        .in_singleton()
        .in_unique()
        .to_closure(|| Ok::<_, Infallible>(Arc::new(Counter { id: usize::MAX })))
        .set_on(configurer);
    bind::<&'static str>().to_instance(GREETING).set_on(configurer);
    Ok(())
}

#[test]
fn singleton_bindings_give_identical_handles() {
    let container = Container::init(module).unwrap();

    let first = container.create_named::<Arc<Counter>>("shared").unwrap();
    let second = container.create_named::<Arc<Counter>>("shared").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn unique_bindings_give_distinct_instances() {
    let container = Container::init(module).unwrap();

    let first = container.create_named::<Arc<Counter>>("fresh").unwrap();
    let second = container.create_named::<Arc<Counter>>("fresh").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.id, second.id);
}

#[test]
fn instance_bindings_keep_references() {
    let container = Container::init(module).unwrap();

    let greeting = container.create::<&'static str>().unwrap();
    assert!(std::ptr::eq(greeting, GREETING));
}

#[test]
fn release_resets_singletons() {
    let container = Container::init(module).unwrap();

    let before = container.create_named::<Arc<Counter>>("shared").unwrap();
    container.call(&Release);
    let after = container.create_named::<Arc<Counter>>("shared").unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_ne!(before.id, after.id);

    container.call(&"unknown action");
    let kept = container.create_named::<Arc<Counter>>("shared").unwrap();
    assert!(Arc::ptr_eq(&after, &kept));
}

#[test]
fn concurrent_first_use_builds_a_singleton_once() {
    const THREADS: usize = 8;

    let container = Container::init(module).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let container = container.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                container.create_named::<Arc<Counter>>("shared").unwrap()
            })
        })
        .collect();

    let counters: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Each thread should not `panic!()`"))
        .collect();
    assert!(counters
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}
