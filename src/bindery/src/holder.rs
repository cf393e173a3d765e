//! Storage for resolved instances.
//!
//! A [`Holder`] keeps exactly one instance in the representation it was
//! produced with. Value-classified types ([`Plain`]: arithmetic types, `bool`,
//! `char` and strings) may be held by value; every other type is held through
//! a shared reference, an exclusive reference or an [`Arc`]. The
//! representation is fixed when the holder is created.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::container::Managed;

/// Types which are cheap to copy and therefore stored by value.
#[diagnostic::on_unimplemented(
    message = "`{Self}` can't be held by value",
    label = "not a plain value",
    note = "only arithmetic types, `bool`, `char` and strings are held by value"
)]
pub trait Plain: Managed + Clone {}

macro_rules! impl_plain {
    ($($ty:ty),* $(,)?) => {
        $(impl Plain for $ty {})*
    };
}

impl_plain!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String, &'static str,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Value,
    Borrowed,
    Exclusive,
    Shared,
}

pub struct Holder<'a, T: ?Sized> {
    repr: Repr<'a, T>,
}

enum Repr<'a, T: ?Sized> {
    Value(Box<T>),
    Borrowed(&'a T),
    Exclusive(&'a mut T),
    Shared(Arc<T>),
}

impl<T: Plain> Holder<'_, T> {
    pub fn from_value(value: T) -> Self {
        Self {
            repr: Repr::Value(Box::new(value)),
        }
    }
}

impl<'a, T: ?Sized> Holder<'a, T> {
    pub fn from_ref(value: &'a T) -> Self {
        Self {
            repr: Repr::Borrowed(value),
        }
    }

    pub fn from_mut(value: &'a mut T) -> Self {
        Self {
            repr: Repr::Exclusive(value),
        }
    }

    pub fn from_shared(value: Arc<T>) -> Self {
        Self {
            repr: Repr::Shared(value),
        }
    }

    pub fn get(&self) -> &T {
        match &self.repr {
            Repr::Value(value) => value,
            Repr::Borrowed(value) => value,
            Repr::Exclusive(value) => value,
            Repr::Shared(value) => value,
        }
    }

    /// Returns a mutable view, which only an exclusive reference can give.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match &mut self.repr {
            Repr::Exclusive(value) => Some(value),
            _ => None,
        }
    }

    pub fn representation(&self) -> Representation {
        match &self.repr {
            Repr::Value(_) => Representation::Value,
            Repr::Borrowed(_) => Representation::Borrowed,
            Repr::Exclusive(_) => Representation::Exclusive,
            Repr::Shared(_) => Representation::Shared,
        }
    }

    pub fn shared(&self) -> Option<&Arc<T>> {
        match &self.repr {
            Repr::Shared(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the borrowed reference with its original lifetime.
    pub fn borrowed(&self) -> Option<&'a T> {
        match &self.repr {
            Repr::Borrowed(value) => Some(*value),
            _ => None,
        }
    }
}

impl<T: ?Sized> Debug for Holder<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Holder")
            .field("representation", &self.representation())
            .finish_non_exhaustive()
    }
}

/// A managed type that knows how it is kept inside a [`Holder`].
///
/// `Arc<U>` is kept as a shared handle, `&'static U` as a reference and
/// [`Plain`] types by value. Reading an instance back clones the handle, the
/// reference or the value respectively.
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no representation inside a holder",
    label = "not an `Arc`, a `&'static` reference or a plain value",
    note = "wrap the object in an `Arc` to share it"
)]
pub trait Held: Managed + Clone {
    type Element: ?Sized + Send + Sync + 'static;

    fn into_holder(self) -> Holder<'static, Self::Element>;

    fn read(holder: &Holder<'static, Self::Element>) -> Self;
}

impl<U> Held for Arc<U>
where
    U: ?Sized + Send + Sync + 'static,
{
    type Element = U;

    fn into_holder(self) -> Holder<'static, U> {
        Holder::from_shared(self)
    }

    fn read(holder: &Holder<'static, U>) -> Self {
        holder
            .shared()
            .map(Arc::clone)
            .unwrap_or_else(|| unreachable!("an `Arc<U>` should be held as a shared handle"))
    }
}

impl<U> Held for &'static U
where
    U: ?Sized + Send + Sync + 'static,
{
    type Element = U;

    fn into_holder(self) -> Holder<'static, U> {
        Holder::from_ref(self)
    }

    fn read(holder: &Holder<'static, U>) -> Self {
        holder
            .borrowed()
            .unwrap_or_else(|| unreachable!("a `&'static U` should be held as a reference"))
    }
}

// `&'static str` is covered by the reference implementation above.
macro_rules! impl_held_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Held for $ty {
                type Element = $ty;

                fn into_holder(self) -> Holder<'static, $ty> {
                    Holder::from_value(self)
                }

                fn read(holder: &Holder<'static, $ty>) -> Self {
                    holder.get().clone()
                }
            }
        )*
    };
}

impl_held_by_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    String,
);
