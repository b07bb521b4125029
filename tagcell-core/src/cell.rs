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

//! The tagged storage cell every container of this crate is built on.

use core::marker::PhantomData;
use core::mem::MaybeUninit;

use crate::candidates::{At, Candidates, CloneCandidates, Member};

/// The discriminant of a [`TaggedCell`]: the index of the live candidate, or [`Tag::EMPTY`].
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(u8);
impl Tag {
    /// No candidate is live.
    pub const EMPTY: Self = Self(u8::MAX);
    /// # Panics
    /// If `index` doesn't fit below [`Tag::EMPTY`].
    pub const fn new(index: usize) -> Self {
        assert!(index < u8::MAX as usize);
        Self(index as u8)
    }
    pub const fn is_empty(self) -> bool {
        self.0 == u8::MAX
    }
    pub const fn index(self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.0 as usize)
        }
    }
}
impl core::fmt::Debug for Tag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.index() {
            Some(index) => write!(f, "Tag({index})"),
            None => f.write_str("Tag(EMPTY)"),
        }
    }
}

/// Raw storage for one candidate of `C`, plus the [`Tag`] saying which one (if any) is live.
///
/// The tag is the single source of truth: it only names a candidate once that candidate's
/// construction has completed, and is reset to [`Tag::EMPTY`] before a candidate's destructor
/// runs. A constructor or destructor that panics can therefore never cause a double drop.
pub struct TaggedCell<C: Candidates> {
    storage: MaybeUninit<C::Storage>,
    tag: Tag,
    marker: PhantomData<C>,
}

impl<C: Candidates> TaggedCell<C> {
    /// An empty cell.
    pub const fn new() -> Self {
        Self {
            storage: MaybeUninit::uninit(),
            tag: Tag::EMPTY,
            marker: PhantomData,
        }
    }
    /// A cell holding `value`.
    pub fn with<T, P>(value: T) -> Self
    where
        C: Member<T, P>,
    {
        let mut this = Self::new();
        this.construct::<T, P>(value);
        this
    }
    /// A cell holding `value` as its `I`-th candidate.
    pub fn with_at<const I: usize>(value: <C as At<I>>::Output) -> Self
    where
        C: At<I>,
    {
        let mut this = Self::new();
        this.construct_at::<I>(value);
        this
    }
    pub const fn tag(&self) -> Tag {
        self.tag
    }
    /// The index of the live candidate, if any.
    pub const fn index(&self) -> Option<usize> {
        self.tag.index()
    }
    pub const fn is_empty(&self) -> bool {
        self.tag.is_empty()
    }
    /// Returns `true` if a `T` is live.
    pub fn holds<T, P>(&self) -> bool
    where
        C: Member<T, P>,
    {
        self.index() == Some(<C as Member<T, P>>::INDEX)
    }
    /// Returns `true` if the `I`-th candidate is live.
    pub fn holds_at<const I: usize>(&self) -> bool
    where
        C: At<I>,
    {
        self.index() == Some(I)
    }

    fn storage_ptr<T>(&self) -> *const T {
        self.storage.as_ptr() as *const T
    }
    fn storage_mut_ptr<T>(&mut self) -> *mut T {
        self.storage.as_mut_ptr() as *mut T
    }
    /// # Safety
    /// The cell must be empty, and `T` must be the `index`-th candidate.
    unsafe fn write<T>(&mut self, index: usize, value: T) -> &mut T {
        let ptr = self.storage_mut_ptr::<T>();
        ptr.write(value);
        self.tag = Tag::new(index);
        &mut *ptr
    }

    /// Destroys the live candidate, if any, then moves `value` in.
    pub fn construct<T, P>(&mut self, value: T) -> &mut T
    where
        C: Member<T, P>,
    {
        self.destroy();
        unsafe { self.write(<C as Member<T, P>>::INDEX, value) }
    }
    /// Destroys the live candidate, if any, then moves `value` in as the `I`-th candidate.
    pub fn construct_at<const I: usize>(&mut self, value: <C as At<I>>::Output) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        self.destroy();
        unsafe { self.write(I, value) }
    }
    /// Destroys the live candidate, if any, then constructs a `T` from `f`.
    ///
    /// Should `f` panic, the cell is left empty.
    pub fn construct_with<T, P, F: FnOnce() -> T>(&mut self, f: F) -> &mut T
    where
        C: Member<T, P>,
    {
        self.destroy();
        let value = f();
        unsafe { self.write(<C as Member<T, P>>::INDEX, value) }
    }
    /// Destroys the `I`-th candidate constructed from `f`, see [`Self::construct_with`].
    pub fn construct_at_with<const I: usize, F: FnOnce() -> <C as At<I>>::Output>(
        &mut self,
        f: F,
    ) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        self.destroy();
        let value = f();
        unsafe { self.write(I, value) }
    }
    /// Destroys the live candidate, if any. Calling this on an empty cell does nothing.
    pub fn destroy(&mut self) {
        if let Some(index) = self.index() {
            self.tag = Tag::EMPTY;
            unsafe { C::drop_active(index, self.storage.as_mut_ptr()) }
        }
    }

    /// Returns the live `T`, if a `T` is live.
    pub fn access<T, P>(&self) -> Option<&T>
    where
        C: Member<T, P>,
    {
        self.holds::<T, P>()
            .then(|| unsafe { &*self.storage_ptr::<T>() })
    }
    /// Returns the live `T`, if a `T` is live.
    pub fn access_mut<T, P>(&mut self) -> Option<&mut T>
    where
        C: Member<T, P>,
    {
        if self.holds::<T, P>() {
            Some(unsafe { &mut *self.storage_mut_ptr::<T>() })
        } else {
            None
        }
    }
    /// # Safety
    /// A `T` must be live. Debug builds check this.
    pub unsafe fn access_unchecked<T, P>(&self) -> &T
    where
        C: Member<T, P>,
    {
        debug_assert!(self.holds::<T, P>(), "{}", crate::Condition::VariantIncorrectType);
        &*self.storage_ptr::<T>()
    }
    /// # Safety
    /// A `T` must be live. Debug builds check this.
    pub unsafe fn access_unchecked_mut<T, P>(&mut self) -> &mut T
    where
        C: Member<T, P>,
    {
        debug_assert!(self.holds::<T, P>(), "{}", crate::Condition::VariantIncorrectType);
        &mut *self.storage_mut_ptr::<T>()
    }
    /// Returns the `I`-th candidate, if it is live.
    pub fn access_at<const I: usize>(&self) -> Option<&<C as At<I>>::Output>
    where
        C: At<I>,
    {
        self.holds_at::<I>()
            .then(|| unsafe { &*self.storage_ptr::<<C as At<I>>::Output>() })
    }
    /// Returns the `I`-th candidate, if it is live.
    pub fn access_at_mut<const I: usize>(&mut self) -> Option<&mut <C as At<I>>::Output>
    where
        C: At<I>,
    {
        if self.holds_at::<I>() {
            Some(unsafe { &mut *self.storage_mut_ptr::<<C as At<I>>::Output>() })
        } else {
            None
        }
    }
    /// # Safety
    /// The `I`-th candidate must be live. Debug builds check this.
    pub unsafe fn access_at_unchecked<const I: usize>(&self) -> &<C as At<I>>::Output
    where
        C: At<I>,
    {
        debug_assert!(self.holds_at::<I>(), "{}", crate::Condition::VariantIncorrectType);
        &*self.storage_ptr::<<C as At<I>>::Output>()
    }
    /// # Safety
    /// The `I`-th candidate must be live. Debug builds check this.
    pub unsafe fn access_at_unchecked_mut<const I: usize>(&mut self) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        debug_assert!(self.holds_at::<I>(), "{}", crate::Condition::VariantIncorrectType);
        &mut *self.storage_mut_ptr::<<C as At<I>>::Output>()
    }

    /// Moves the live `T` out, leaving the cell empty. Returns `None` if no `T` was live.
    pub fn take<T, P>(&mut self) -> Option<T>
    where
        C: Member<T, P>,
    {
        if self.holds::<T, P>() {
            self.tag = Tag::EMPTY;
            Some(unsafe { self.storage_ptr::<T>().read() })
        } else {
            None
        }
    }
    /// Moves the live `I`-th candidate out, leaving the cell empty.
    pub fn take_at<const I: usize>(&mut self) -> Option<<C as At<I>>::Output>
    where
        C: At<I>,
    {
        if self.holds_at::<I>() {
            self.tag = Tag::EMPTY;
            Some(unsafe { self.storage_ptr::<<C as At<I>>::Output>().read() })
        } else {
            None
        }
    }

    /// Forgets the live candidate without dropping it, exposing its index and storage.
    ///
    /// The storage still holds the candidate: the caller becomes responsible for it.
    pub(crate) fn release(&mut self) -> Option<(usize, *mut C::Storage)> {
        let index = self.index()?;
        self.tag = Tag::EMPTY;
        Some((index, self.storage.as_mut_ptr()))
    }
    pub(crate) fn raw(&self) -> Option<(usize, *const C::Storage)> {
        Some((self.index()?, self.storage.as_ptr()))
    }
    pub(crate) fn raw_mut(&mut self) -> Option<(usize, *mut C::Storage)> {
        Some((self.index()?, self.storage.as_mut_ptr()))
    }
}

impl<C: Candidates> Default for TaggedCell<C> {
    fn default() -> Self {
        Self::new()
    }
}
impl<C: Candidates> Drop for TaggedCell<C> {
    fn drop(&mut self) {
        self.destroy()
    }
}
impl<C: CloneCandidates> Clone for TaggedCell<C> {
    fn clone(&self) -> Self {
        let mut clone = Self::new();
        if let Some((index, storage)) = self.raw() {
            unsafe { C::clone_active(index, storage, clone.storage.as_mut_ptr()) };
            clone.tag = self.tag;
        }
        clone
    }
}
impl<C: Candidates> core::fmt::Debug for TaggedCell<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.index() {
            Some(index) => write!(f, "TaggedCell<{}>", C::type_name(index)),
            None => f.write_str("TaggedCell<empty>"),
        }
    }
}
