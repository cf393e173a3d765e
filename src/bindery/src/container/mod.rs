pub mod injector;
pub mod registry;

mod binder;
mod binding;
mod core;
mod handle;
mod pool;
mod validate;

use std::sync::Arc;

use crate::holder::Held;
use crate::util::any::AsAny;

pub use binding::Binding;
pub use handle::Container;
pub use pool::DependencyPool;

pub(crate) use pool::Insertion;

/// Every object handed out by a container is `Managed`.
pub trait Managed: AsAny + Send + Sync + 'static {}

impl<T> Managed for T where T: AsAny + Send + Sync + 'static {}

/// Objects which may be cached and handed out repeatedly by a singleton.
///
/// Only shared handles qualify, so every consumer of a singleton observes the
/// same instance.
#[diagnostic::on_unimplemented(
    message = "`{Self}` can't be a singleton",
    label = "not a shared handle",
    note = "singletons hand out clones of one `Arc`"
)]
pub trait SharedManaged: Held {}

impl<T> SharedManaged for Arc<T> where T: Send + Sync + ?Sized + 'static {}
