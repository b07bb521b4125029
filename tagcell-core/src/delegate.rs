//
// Copyright (c) 2023 ZettaScale Technology
//
// This program and the accompanying materials are made available under the
// terms of the Eclipse Public License 2.0 which is available at
// http://www.eclipse.org/legal/epl-2.0, or the Apache License, Version 2.0
// which is available at https://www.apache.org/licenses/LICENSE-2.0.
//
// SPDX-License-Identifier: EPL-2.0 OR Apache-2.0
//
// Contributors:
//   Pierre Avital, <pierre.avital@me.com>
//

//! Non-owning, type-erased callables.
//!
//! A [`Delegate`] is three words: a pointer to the bound object (a closure, or the instance a
//! method is bound to), a pointer to the bound function, and a monomorphized stub that knows how
//! to put the two together. Binding never allocates and never copies the callable.

use core::marker::PhantomData;

/// A function-pointer signature such as `fn(u32, &str) -> bool`, used to name a [`Delegate`]'s
/// call signature.
///
/// Implemented for `fn(A0, ..., An) -> R` up to 6 arguments.
pub trait Signature {
    /// The type-erased trampoline: `unsafe fn(object, function, A0, ..., An) -> R`.
    type Stub: Copy;
    fn stub_addr(stub: Self::Stub) -> usize;
}

/// A callable with signature `S`, borrowed for `'a`.
///
/// ```
/// # use tagcell_core::Delegate;
/// let offset = 10;
/// let add = |x: u32| x + offset;
/// let delegate = Delegate::<fn(u32) -> u32>::new(&add);
/// assert_eq!(delegate.call(5), 15);
/// assert_eq!(Delegate::<fn(u32) -> u32>::default().call_or(|x| x, 5), 5);
/// ```
pub struct Delegate<'a, S: Signature> {
    object: *const (),
    function: *const (),
    stub: Option<S::Stub>,
    marker: PhantomData<&'a ()>,
}

impl<'a, S: Signature> Delegate<'a, S> {
    /// An unbound delegate.
    pub const fn unbound() -> Self {
        Self {
            object: core::ptr::null(),
            function: core::ptr::null(),
            stub: None,
            marker: PhantomData,
        }
    }
    /// # Safety
    /// `stub` must be sound to call with `object` and `function` for as long as `'a`.
    pub unsafe fn from_raw_parts(object: *const (), function: *const (), stub: S::Stub) -> Self {
        Self {
            object,
            function,
            stub: Some(stub),
            marker: PhantomData,
        }
    }
    /// Returns `true` if something is bound.
    pub fn is_valid(&self) -> bool {
        self.stub.is_some()
    }
    /// Unbinds `self`.
    pub fn clear(&mut self) {
        *self = Self::unbound()
    }
    pub fn object(&self) -> *const () {
        self.object
    }
    pub fn function(&self) -> *const () {
        self.function
    }
    pub fn stub(&self) -> Option<S::Stub> {
        self.stub
    }
}

impl<S: Signature> Default for Delegate<'_, S> {
    fn default() -> Self {
        Self::unbound()
    }
}
impl<S: Signature> Clone for Delegate<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S: Signature> Copy for Delegate<'_, S> {}
/// Two delegates are equal if they are bound to the same object, function and stub.
impl<S: Signature> PartialEq for Delegate<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.object == other.object
            && self.function == other.function
            && self.stub.map(S::stub_addr) == other.stub.map(S::stub_addr)
    }
}
impl<S: Signature> Eq for Delegate<'_, S> {}
impl<S: Signature> core::fmt::Debug for Delegate<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.stub {
            Some(stub) => f
                .debug_struct("Delegate")
                .field("object", &self.object)
                .field("function", &self.function)
                .field("stub", &(S::stub_addr(stub) as *const ()))
                .finish(),
            None => f.write_str("Delegate(unbound)"),
        }
    }
}

tagcell_macros::gen_delegates_impl!(6);

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct Gauge {
        reading: Cell<u32>,
    }
    impl Gauge {
        fn read(&self) -> u32 {
            self.reading.get()
        }
        fn bump(&self, by: u32) -> u32 {
            self.reading.set(self.reading.get() + by);
            self.reading.get()
        }
    }
    fn triple(x: u32) -> u32 {
        x * 3
    }

    #[test]
    fn bindings() {
        let gauge = Gauge {
            reading: Cell::new(4),
        };
        let read = Delegate::<fn() -> u32>::from_method(&gauge, Gauge::read);
        let bump = Delegate::<fn(u32) -> u32>::from_method(&gauge, Gauge::bump);
        assert_eq!(read.call(), 4);
        assert_eq!(bump.call(3), 7);
        assert_eq!(read.call(), 7);

        let base = 100;
        let add = |x: u32| x + base;
        let mut delegate = Delegate::<fn(u32) -> u32>::from_fn(triple);
        assert_eq!(delegate.call(2), 6);
        delegate.set(&add);
        assert_eq!(delegate.call(1), 101);
        let copy = delegate;
        assert_eq!(copy, delegate);
        assert_ne!(copy, Delegate::<fn(u32) -> u32>::from_fn(triple));

        let sum = |a: u8, b: u16, c: u32, d: u64, e: i8, f: i16| {
            a as i64 + b as i64 + c as i64 + d as i64 + e as i64 + f as i64
        };
        let six = Delegate::<fn(u8, u16, u32, u64, i8, i16) -> i64>::new(&sum);
        assert_eq!(six.call(1, 2, 3, 4, -5, -6), -1);
    }

    #[test]
    fn unbound() {
        let mut delegate = Delegate::<fn(u32) -> u32>::from_fn(triple);
        assert!(delegate.is_valid());
        assert_eq!(delegate.call_if(1).into_value(), 3);
        delegate.clear();
        assert!(!delegate.is_valid());
        assert!(delegate.call_if(1).is_empty());
        assert_eq!(delegate.call_or(|x| x + 1, 1), 2);
        assert_eq!(format!("{delegate:?}"), "Delegate(unbound)");
        assert_eq!(delegate, Delegate::default());
    }

    #[cfg(feature = "checks")]
    #[test]
    fn calling_unbound_raises() {
        let delegate = Delegate::<fn()>::default();
        crate::tests::expect_failure(crate::Condition::DelegateUninitialised, || delegate.call());
    }
}
