use std::collections::HashSet;

use crate::container::registry::RegistryError;
use crate::container::DependencyPool;
use crate::key::Key;
use crate::provider::Parameter;

/// Checks that every binding of `pool` can be built.
///
/// Each typed parameter must be served by a binding of the pool, every
/// exposed binding must be served by its source container, and the typed
/// parameters must not form a cycle, whatever the scopes along it.
/// [`Parameter::Any`] adds no edge, so a deferred placeholder breaks a loop.
pub(crate) fn validate(pool: &DependencyPool) -> Vec<RegistryError> {
    let mut errors = find_unresolvable(pool);
    errors.extend(find_unexposed(pool));
    errors.extend(
        find_cycles(pool)
            .into_iter()
            .map(|path| RegistryError::CyclicDependency { path }),
    );
    errors
}

fn find_unresolvable(pool: &DependencyPool) -> Vec<RegistryError> {
    let mut errors = Vec::new();
    for binding in pool.bindings() {
        for key in binding.parameters().iter().filter_map(Parameter::key) {
            if pool.get(key).is_none() {
                errors.push(RegistryError::Unresolvable {
                    key: *key,
                    required_by: *binding.key(),
                });
            }
        }
    }
    errors
}

fn find_unexposed(pool: &DependencyPool) -> impl Iterator<Item = RegistryError> + '_ {
    pool.bindings().iter().filter_map(|binding| {
        binding
            .scope()
            .unserved_origin()
            .map(|key| RegistryError::ExposedMissing { key: *key })
    })
}

fn find_cycles(pool: &DependencyPool) -> Vec<Vec<Key>> {
    let mut visited = HashSet::new();
    let mut path = Vec::new();
    let mut cycles = Vec::new();

    for position in 0..pool.len() {
        if !visited.contains(&position) {
            dfs_cycles(pool, position, &mut visited, &mut path, &mut cycles);
        }
    }

    cycles
}

fn dfs_cycles(
    pool: &DependencyPool,
    current: usize,
    visited: &mut HashSet<usize>,
    path: &mut Vec<usize>,
    cycles: &mut Vec<Vec<Key>>,
) {
    if let Some(cycle_start) = path.iter().position(|&p| p == current) {
        let cycle = path[cycle_start..]
            .iter()
            .chain(std::iter::once(&current))
            .filter_map(|&p| pool.binding_at(p).map(|binding| *binding.key()))
            .collect();
        cycles.push(cycle);
        return;
    }

    if visited.contains(&current) {
        return;
    }

    visited.insert(current);

    let Some(binding) = pool.binding_at(current) else {
        return;
    };
    path.push(current);
    for key in binding.parameters().iter().filter_map(Parameter::key) {
        if let Some(dependency) = pool.position(key) {
            dfs_cycles(pool, dependency, visited, path, cycles);
        }
    }
    path.pop();
}
