use std::collections::HashMap;
use std::sync::Arc;

use crate::container::Binding;
use crate::key::Key;

/// The flattened bindings of one container, in insertion order.
///
/// Each key appears at most once. Bindings are shared through [`Arc`], so a
/// pool absorbing another one keeps the very same bindings, including the
/// objects their scopes have cached.
#[derive(Debug, Default)]
pub struct DependencyPool {
    bindings: Vec<Arc<Binding>>,
    index: HashMap<Key, usize>,
}

/// The outcome of [`DependencyPool::insert`].
#[derive(Debug)]
pub(crate) enum Insertion {
    Inserted,
    /// The very same binding is already in the pool.
    Duplicate,
    /// Another binding already serves the key.
    Conflict(Arc<Binding>),
}

impl DependencyPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pool holding every binding of `other`.
    pub fn absorb(other: &DependencyPool) -> Self {
        let mut pool = Self::new();
        for binding in other.bindings() {
            pool.insert(Arc::clone(binding));
        }
        pool
    }

    pub(crate) fn insert(&mut self, binding: Arc<Binding>) -> Insertion {
        match self.index.get(binding.key()) {
            Some(&position) if Arc::ptr_eq(&self.bindings[position], &binding) => {
                Insertion::Duplicate
            }
            Some(_) => Insertion::Conflict(binding),
            None => {
                self.index.insert(*binding.key(), self.bindings.len());
                self.bindings.push(binding);
                Insertion::Inserted
            }
        }
    }

    pub fn get(&self, key: &Key) -> Option<&Arc<Binding>> {
        self.position(key).map(|position| &self.bindings[position])
    }

    pub fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn binding_at(&self, position: usize) -> Option<&Arc<Binding>> {
        self.bindings.get(position)
    }

    pub fn bindings(&self) -> &[Arc<Binding>] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
