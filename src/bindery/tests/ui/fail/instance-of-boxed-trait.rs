use bindery::prelude::*;

pub trait Greeter: Send + Sync + 'static {}

pub struct English;

impl Greeter for English {}

fn configure(configurer: &mut dyn Configurer) {
    bind::<Box<dyn Greeter>>()
        .to_instance(Box::new(English))
        .set_on(configurer);
}

fn main() {}
