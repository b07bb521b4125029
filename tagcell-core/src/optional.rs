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

//! An in-place optional value.

use core::cmp::Ordering;

use crate::candidates::Pos;
use crate::cell::TaggedCell;
use crate::failure::{raise, Condition, Failure};

type Slot = Pos<0>;

/// The "no value" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Nullopt;
/// The "no value" marker.
pub const NULLOPT: Nullopt = Nullopt;

/// A value of type `T`, or nothing, stored in place.
///
/// Accessing the value of an empty optional through [`Optional::value`] (or its `Deref`) raises
/// [`Condition::OptionalInvalid`]; [`Optional::try_value`] returns the [`Failure`] instead.
pub struct Optional<T> {
    cell: TaggedCell<(T,)>,
}

impl<T> Optional<T> {
    /// An empty optional.
    pub const fn new() -> Self {
        Self {
            cell: TaggedCell::new(),
        }
    }
    /// An empty optional.
    pub const fn none() -> Self {
        Self::new()
    }
    /// An optional holding `value`.
    pub fn some(value: T) -> Self {
        Self {
            cell: TaggedCell::with::<T, Slot>(value),
        }
    }
    /// Returns `true` if a value is held.
    pub const fn has_value(&self) -> bool {
        !self.cell.is_empty()
    }
    /// Returns `true` if no value is held.
    pub const fn is_empty(&self) -> bool {
        self.cell.is_empty()
    }
    /// Returns the held value, if any.
    pub fn as_ref(&self) -> Option<&T> {
        self.cell.access::<T, Slot>()
    }
    /// Returns the held value, if any.
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.cell.access_mut::<T, Slot>()
    }
    /// Returns the held value.
    ///
    /// # Panics
    /// Raises [`Condition::OptionalInvalid`] if `self` is empty.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => raise(Condition::OptionalInvalid),
        }
    }
    /// Returns the held value.
    ///
    /// # Panics
    /// Raises [`Condition::OptionalInvalid`] if `self` is empty.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => raise(Condition::OptionalInvalid),
        }
    }
    /// Returns the held value.
    ///
    /// # Panics
    /// Raises [`Condition::OptionalInvalid`] if `self` is empty.
    #[track_caller]
    pub fn into_value(mut self) -> T {
        match self.take() {
            Some(value) => value,
            None => raise(Condition::OptionalInvalid),
        }
    }
    /// Returns the held value, or the failure [`Optional::value`] would have raised.
    #[track_caller]
    pub fn try_value(&self) -> Result<&T, Failure> {
        match self.as_ref() {
            Some(value) => Ok(value),
            None => Err(Failure::here(Condition::OptionalInvalid)),
        }
    }
    /// # Safety
    /// `self` must hold a value. Debug builds check this.
    pub unsafe fn value_unchecked(&self) -> &T {
        self.cell.access_unchecked::<T, Slot>()
    }
    /// Returns a copy of the held value, or `default` converted to `T`.
    pub fn value_or<U: Into<T>>(&self, default: U) -> T
    where
        T: Clone,
    {
        match self.as_ref() {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }
    /// Returns the held value, or `default` converted to `T`.
    pub fn into_value_or<U: Into<T>>(mut self, default: U) -> T {
        match self.take() {
            Some(value) => value,
            None => default.into(),
        }
    }
    /// Returns the held value, or the result of `f`.
    pub fn value_or_else<F: FnOnce() -> T>(mut self, f: F) -> T {
        self.take().unwrap_or_else(f)
    }
    /// Replaces the content of `self` with `value`, returning a reference to it.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.cell.construct::<T, Slot>(value)
    }
    /// Replaces the content of `self` with the result of `f`, returning a reference to it.
    ///
    /// The previous value is dropped before `f` runs: if `f` panics, `self` is left empty.
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.cell.construct_with::<T, Slot, F>(f)
    }
    /// Drops the held value, if any.
    pub fn reset(&mut self) {
        self.cell.destroy()
    }
    /// Moves the held value out, leaving `self` empty.
    pub fn take(&mut self) -> Option<T> {
        self.cell.take::<T, Slot>()
    }
    /// Replaces the held value with `value`, returning the previous one.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let previous = self.take();
        self.emplace(value);
        previous
    }
    /// Exchanges the states of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other)
    }
    /// Applies `f` to the held value.
    pub fn map<U, F: FnOnce(T) -> U>(mut self, f: F) -> Optional<U> {
        self.take().map(f).into()
    }
    /// Equivalent to `match &self`.
    pub fn match_ref<'a, U, FnSome: FnOnce(&'a T) -> U, FnNone: FnOnce() -> U>(
        &'a self,
        some: FnSome,
        none: FnNone,
    ) -> U {
        match self.as_ref() {
            Some(value) => some(value),
            None => none(),
        }
    }
    /// Equivalent to `match self`.
    pub fn match_owned<U, FnSome: FnOnce(T) -> U, FnNone: FnOnce() -> U>(
        mut self,
        some: FnSome,
        none: FnNone,
    ) -> U {
        match self.take() {
            Some(value) => some(value),
            None => none(),
        }
    }
    /// A zero-or-one element view of the held value.
    pub fn as_slice(&self) -> &[T] {
        match self.as_ref() {
            Some(value) => core::slice::from_ref(value),
            None => &[],
        }
    }
    /// A zero-or-one element view of the held value.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.as_mut() {
            Some(value) => core::slice::from_mut(value),
            None => &mut [],
        }
    }
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
    /// Returns `true` if a value equal to `value` is held.
    pub fn eq_value<U>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        self.as_ref().is_some_and(|held| held == value)
    }
    /// Compares `self` to a bare value: empty optionals are less than any value.
    pub fn partial_cmp_value<U>(&self, value: &U) -> Option<Ordering>
    where
        T: PartialOrd<U>,
    {
        match self.as_ref() {
            Some(held) => held.partial_cmp(value),
            None => Some(Ordering::Less),
        }
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}
impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::some(value),
            None => Self::new(),
        }
    }
}
impl<T> From<Optional<T>> for Option<T> {
    fn from(mut value: Optional<T>) -> Self {
        value.take()
    }
}
impl<T> From<Nullopt> for Optional<T> {
    fn from(_: Nullopt) -> Self {
        Self::new()
    }
}

impl<T> core::ops::Deref for Optional<T> {
    type Target = T;
    #[track_caller]
    fn deref(&self) -> &T {
        self.value()
    }
}
impl<T> core::ops::DerefMut for Optional<T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        self.value_mut()
    }
}

impl<'a, T> IntoIterator for &'a Optional<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<'a, T> IntoIterator for &'a mut Optional<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
impl<T> IntoIterator for Optional<T> {
    type Item = T;
    type IntoIter = core::option::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        Option::<T>::from(self).into_iter()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.as_ref(), f)
    }
}
impl<T: core::hash::Hash> core::hash::Hash for Optional<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.as_ref(), state)
    }
}
impl<T: PartialEq<U>, U> PartialEq<Optional<U>> for Optional<T> {
    fn eq(&self, other: &Optional<U>) -> bool {
        match (self.as_ref(), other.as_ref()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}
impl<T: Eq> Eq for Optional<T> {}
impl<T: PartialOrd<U>, U> PartialOrd<Optional<U>> for Optional<T> {
    fn partial_cmp(&self, other: &Optional<U>) -> Option<Ordering> {
        match (self.as_ref(), other.as_ref()) {
            (Some(a), Some(b)) => a.partial_cmp(b),
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (None, None) => Some(Ordering::Equal),
        }
    }
}
impl<T: Ord> Ord for Optional<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_ref().cmp(&other.as_ref())
    }
}
impl<T> PartialEq<Nullopt> for Optional<T> {
    fn eq(&self, _: &Nullopt) -> bool {
        self.is_empty()
    }
}
impl<T> PartialEq<Optional<T>> for Nullopt {
    fn eq(&self, other: &Optional<T>) -> bool {
        other.is_empty()
    }
}
impl<T> PartialOrd<Nullopt> for Optional<T> {
    fn partial_cmp(&self, _: &Nullopt) -> Option<Ordering> {
        Some(if self.has_value() {
            Ordering::Greater
        } else {
            Ordering::Equal
        })
    }
}
impl<T> PartialOrd<Optional<T>> for Nullopt {
    fn partial_cmp(&self, other: &Optional<T>) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::tests::{Counters, Tracked};

    #[test]
    fn reset_is_idempotent() {
        let counters = Counters::default();
        let mut o = Optional::some(counters.tracked(1));
        o.reset();
        assert_eq!(counters.drops(), 1);
        o.reset();
        assert_eq!(counters.drops(), 1);
        assert!(o.is_empty());
    }

    #[test]
    fn emplace_drops_the_previous_value() {
        let counters = Counters::default();
        let mut o = Optional::<Tracked>::new();
        o.emplace(counters.tracked(1)).value += 1;
        assert_eq!(o.value().value, 2);
        o.emplace(counters.tracked(5));
        assert_eq!(counters.drops(), 1);
        let copy = o.clone();
        assert_eq!(copy, o);
        drop((o, copy));
        assert_eq!(counters.live(), 0);
    }

    #[cfg(feature = "checks")]
    #[test]
    fn empty_access_raises() {
        let o = Optional::<u8>::new();
        crate::tests::expect_failure(Condition::OptionalInvalid, || *o.value());
        crate::tests::expect_failure(Condition::OptionalInvalid, || *o + 1);
        assert_eq!(
            o.try_value().unwrap_err().condition(),
            Condition::OptionalInvalid
        );
    }
}
