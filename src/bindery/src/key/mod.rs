use std::any::{self, TypeId};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::container::Managed;

/// The identity of a binding: the requested type and an optional name.
///
/// A key without a name only matches unnamed bindings, and a named key only
/// matches bindings declared with exactly that name.
#[derive(Clone, Copy)]
pub struct Key {
    target: TypeId,
    target_name: &'static str,
    name: Option<&'static str>,
}

impl Key {
    pub fn of<T: Managed>() -> Self {
        Self {
            target: TypeId::of::<T>(),
            target_name: any::type_name::<T>(),
            name: None,
        }
    }

    pub fn named<T: Managed>(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::of::<T>()
        }
    }

    pub fn target(&self) -> TypeId {
        self.target
    }

    pub fn target_name(&self) -> &'static str {
        self.target_name
    }

    pub fn name(&self) -> Option<&'static str> {
        self.name
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.name == other.name
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.target.hash(state);
        self.name.hash(state);
    }
}

impl Debug for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(self, f)
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.name {
            Some(name) => write!(f, "{}@{:?}", self.target_name, name),
            None => write!(f, "{}", self.target_name),
        }
    }
}

/// A [`Key`] which remembers its target type, so that lookups through it
/// return `T` directly.
pub struct TypedKey<T: Managed> {
    key: Key,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Managed> TypedKey<T> {
    fn new(key: Key) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn name(&self) -> Option<&'static str> {
        self.key.name()
    }

    /// Returns a key of the same target type carrying `name` instead.
    pub fn with_name(self, name: &'static str) -> Self {
        named(name)
    }
}

impl<T: Managed> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Managed> Copy for TypedKey<T> {}

impl<T: Managed> Debug for TypedKey<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.key, f)
    }
}

impl<T: Managed> From<TypedKey<T>> for Key {
    fn from(key: TypedKey<T>) -> Self {
        key.key
    }
}

pub fn of<T: Managed>() -> TypedKey<T> {
    TypedKey::new(Key::of::<T>())
}

pub fn named<T: Managed>(name: &'static str) -> TypedKey<T> {
    TypedKey::new(Key::named::<T>(name))
}
