use std::sync::Arc;

use crate::container::injector::InjectorError;
use crate::container::{Binding, DependencyPool};
use crate::key::Key;

/// Finds the binding serving `key`.
///
/// An unnamed key only matches the unnamed binding of its type. Ambiguity
/// can't happen, since a pool holds at most one binding per key.
pub fn resolve<'a>(
    pool: &'a DependencyPool,
    key: &Key,
) -> Result<&'a Arc<Binding>, InjectorError> {
    pool.get(key).ok_or(InjectorError::NotFound { key: *key })
}

#[cfg(test)]
mod tests {
    use crate::scope::Instance;

    use super::*;

    #[test]
    fn resolve_matches_type_and_name() {
        let mut pool = DependencyPool::new();
        pool.insert(Arc::new(Binding::new(
            Key::named::<u16>("port"),
            Instance::new(8080u16),
        )));

        assert!(resolve(&pool, &Key::named::<u16>("port")).is_ok());
        assert!(matches!(
            resolve(&pool, &Key::of::<u16>()),
            Err(InjectorError::NotFound { .. })
        ));
        assert!(matches!(
            resolve(&pool, &Key::named::<u32>("port")),
            Err(InjectorError::NotFound { .. })
        ));
    }
}
