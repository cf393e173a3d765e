use bindery::prelude::*;

pub struct Name(String);

#[component(String, Name::into_inner)]
impl Name {
    #[inject]
    pub fn new() -> Self {
        Self(String::from("bindery"))
    }

    fn into_inner(self) -> String {
        self.0
    }
}

fn configure(configurer: &mut dyn Configurer) {
    bind::<String>()
        .in_singleton()
        .to_component::<Name>()
        .set_on(configurer);
}

fn main() {}
