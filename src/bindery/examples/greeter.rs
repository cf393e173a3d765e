use std::sync::Arc;

use bindery::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let logging = Container::init(LoggingModule::new("greeter")).unwrap();
    let container = Container::init(
        Configuration::new()
            .install(&logging)
            .with(greeters)
            .with_value(2usize)
            .with_policy(|request: &Request<'_>| {
                if request.is_top_level() && request.key().name().is_some() {
                    Err(format!("{} is an implementation detail", request.key()))
                } else {
                    Ok(())
                }
            }),
    )
    .unwrap();

    let app = container.create::<Arc<App>>().unwrap();
    app.run();

    if let Err(err) = container.create_named::<Arc<dyn Greeter>>("english") {
        eprintln!("{err}");
    }
}

struct LoggingModule {
    app_name: &'static str,
}

impl LoggingModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for LoggingModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        bind::<&'static str>()
            .named("app_name")
            .to_instance(self.app_name)
            .set_on(configurer);

        bind::<Arc<dyn Logger>>()
            .in_singleton()
            .to_component::<ConsoleLogger>()
            .set_on(configurer);

        Ok(())
    }
}

fn greeters(configurer: &mut dyn Configurer) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    bind::<Arc<dyn Greeter>>()
        .named("english")
        .in_singleton()
        .to_component::<EnglishGreeter>()
        .set_on(configurer);

    bind::<Arc<dyn Greeter>>()
        .named("chinese")
        .in_singleton()
        .to_component::<ChineseGreeter>()
        .set_on(configurer);

    bind::<Arc<App>>().in_singleton().set_on(configurer);

    Ok(())
}

trait Logger: Send + Sync + 'static {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    app_name: &'static str,
}

#[component(Arc<dyn Logger>, Arc::new)]
impl ConsoleLogger {
    #[inject]
    pub fn new(#[named("app_name")] app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        eprintln!("[{}] {}", self.app_name, message);
    }
}

trait Greeter: Send + Sync + 'static {
    fn greet(&self);
}

struct EnglishGreeter {
    logger: Arc<dyn Logger>,
}

#[component(Arc<dyn Greeter>, Arc::new)]
impl EnglishGreeter {
    #[inject]
    fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Greeter for EnglishGreeter {
    fn greet(&self) {
        self.logger.log("Hello World!");
    }
}

struct ChineseGreeter {
    logger: Arc<dyn Logger>,
}

#[component(Arc<dyn Greeter>, Arc::new)]
impl ChineseGreeter {
    #[inject]
    fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Greeter for ChineseGreeter {
    fn greet(&self) {
        self.logger.log("你好世界!");
    }
}

struct App {
    logger: Arc<dyn Logger>,
    greeters: Vec<Arc<dyn Greeter>>,
    repeat: usize,
}

#[component(Arc<App>, Arc::new)]
impl App {
    #[inject]
    fn new(
        logger: Arc<dyn Logger>,
        #[named("english")] english: Arc<dyn Greeter>,
        #[named("chinese")] chinese: Arc<dyn Greeter>,
        repeat: usize,
    ) -> Self {
        Self {
            logger,
            greeters: vec![english, chinese],
            repeat,
        }
    }

    fn run(&self) {
        self.logger.log("Greeting from bindery managed objects:");
        for _ in 0..self.repeat {
            for greeter in &self.greeters {
                greeter.greet();
            }
        }
    }
}
