//! A fluent way of declaring bindings.
//!
//! ```rust
//! # use std::sync::Arc;
//! # use bindery::prelude::*;
//! # fn configure(configurer: &mut dyn Configurer) {
//! bind::<u16>().named("port").to_instance(8080).set_on(configurer);
//! bind::<Arc<String>>()
//!     .in_singleton()
//!     .to_closure(|port: u16| Ok::<_, String>(Arc::new(format!("localhost:{port}"))))
//!     .set_on(configurer);
//! # }
//! ```

pub mod constructor_helper;
pub mod exposed_helper;
pub mod instance_helper;
pub mod metadata_helper;

use metadata_helper::MetadataBinding;

use crate::container::Managed;
use crate::key::{self, TypedKey};

/// Marker types tracking the scope chosen for a binding under construction.
pub mod lifetime {
    /// A new object per request.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Unique;

    /// One shared object per binding.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Singleton;
}

#[allow(private_bounds)]
pub trait ToLifetime: Sealed + Copy + Send + Sync + 'static {}

impl ToLifetime for lifetime::Unique {}

impl ToLifetime for lifetime::Singleton {}

trait Sealed {}

impl Sealed for lifetime::Unique {}

impl Sealed for lifetime::Singleton {}

pub fn bind<KT>() -> MetadataBinding<KT, lifetime::Unique>
where
    KT: Managed,
{
    MetadataBinding::new(None, lifetime::Unique)
}

pub fn bind_key<KT>(key: TypedKey<KT>) -> MetadataBinding<KT, lifetime::Unique>
where
    KT: Managed,
{
    MetadataBinding::new(key.name(), lifetime::Unique)
}

fn typed_key<KT: Managed>(name: Option<&'static str>) -> TypedKey<KT> {
    match name {
        Some(name) => key::named(name),
        None => key::of(),
    }
}
