//! Actions sent to every binding of a container through [`Container::call`].
//!
//! [`Container::call`]: crate::container::Container::call

/// Drops the cached objects of singleton bindings, so the next request
/// builds them again. Objects already handed out stay alive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release;
