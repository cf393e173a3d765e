use bindery::holder::Holder;

pub struct Settings {
    pub verbose: bool,
}

fn main() {
    let _ = Holder::from_value(Settings { verbose: true });
}
