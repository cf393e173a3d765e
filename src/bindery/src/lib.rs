#![allow(clippy::new_without_default)]

extern crate self as bindery;

pub mod action;
pub mod container;
pub mod holder;
pub mod key;
pub mod module;
pub mod policy;
pub mod provider;
pub mod scope;
mod util;

pub use bindery_derive::component;

pub mod prelude {
    pub use crate::component;
    pub use crate::container::injector::{AnyInjectable, InjectorError, TypedInjector};
    pub use crate::container::registry::{Configurer, RegistryError, TypedConfigurer};
    pub use crate::container::Container;
    pub use crate::key;
    pub use crate::module::{bind, bind_key, Configuration, Module};
    pub use crate::policy::{Policy, Request};
}
