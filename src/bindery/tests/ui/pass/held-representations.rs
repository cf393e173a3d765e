use std::convert::Infallible;
use std::sync::Arc;

use bindery::holder::Holder;
use bindery::prelude::*;

static LIMITS: [u32; 2] = [16, 64];

pub trait Greeter: Send + Sync + 'static {}

pub struct English;

impl Greeter for English {}

fn configure(configurer: &mut dyn Configurer) {
    bind::<Arc<dyn Greeter>>()
        .to_instance(Arc::new(English))
        .set_on(configurer);
    bind::<&'static [u32; 2]>().to_instance(&LIMITS).set_on(configurer);
    bind::<u16>().to_instance(8080).set_on(configurer);
    bind::<&'static str>().to_instance("bindery").set_on(configurer);
    bind::<Arc<String>>()
        .in_singleton()
        .to_closure(|| Ok::<_, Infallible>(Arc::new(String::from("shared"))))
        .set_on(configurer);
}

fn main() {
    let _ = Holder::from_value(String::from("plain"));
    let _ = Holder::from_shared(Arc::new(English) as Arc<dyn Greeter>);
    let _ = configure;
}
