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

//! A closed-set tagged union.

use core::cmp::Ordering;

use crate::candidates::{
    Accepts, AcceptsMut, At, Candidates, CloneCandidates, DebugCandidates, EqCandidates,
    HashCandidates, MatchMut, MatchOwned, MatchRef, Member, OrdCandidates, PartialOrdCandidates,
};
use crate::cell::TaggedCell;
use crate::failure::{raise, Condition, Failure};

/// Exactly one value out of the candidate set `C`, a tuple such as `(i32, f64, &str)`.
///
/// Candidates are addressed either by type (`get::<f64, _>()`, the position being inferred) or by
/// position (`get_at::<1>()`). A variant whose replacement value failed to construct (the
/// constructor passed to [`Variant::emplace_with`] panicked) is left *valueless*: its
/// [`Variant::index`] is [`Variant::NPOS`] until a new value is emplaced.
///
/// ```
/// # use tagcell_core::Variant;
/// let mut v = Variant::<(i32, f64)>::new(3.14f64);
/// assert_eq!(v.index(), 1);
/// assert_eq!(*v.get::<f64, _>(), 3.14);
/// assert!(v.get_if::<i32, _>().is_none());
/// v.emplace(7i32);
/// assert_eq!(v.match_ref((|i: &i32| *i as f64, |f: &f64| *f)), 7.0);
/// ```
pub struct Variant<C: Candidates> {
    cell: TaggedCell<C>,
}

impl<C: Candidates> Variant<C> {
    /// The index of a valueless variant.
    pub const NPOS: usize = usize::MAX;

    /// A variant holding `value`.
    pub fn new<T, P>(value: T) -> Self
    where
        C: Member<T, P>,
    {
        Self {
            cell: TaggedCell::with::<T, P>(value),
        }
    }
    /// A variant holding `value` as its `I`-th candidate.
    pub fn with_index<const I: usize>(value: <C as At<I>>::Output) -> Self
    where
        C: At<I>,
    {
        Self {
            cell: TaggedCell::with_at::<I>(value),
        }
    }
    /// The index of the held candidate, or [`Self::NPOS`] if valueless.
    pub fn index(&self) -> usize {
        self.cell.index().unwrap_or(Self::NPOS)
    }
    pub const fn is_valueless(&self) -> bool {
        self.cell.is_empty()
    }
    /// Returns `true` if the held candidate is a `T`.
    pub fn holds_alternative<T, P>(&self) -> bool
    where
        C: Member<T, P>,
    {
        self.cell.holds::<T, P>()
    }
    /// Returns `true` if the held candidate is the `I`-th.
    pub fn holds_index<const I: usize>(&self) -> bool
    where
        C: At<I>,
    {
        self.cell.holds_at::<I>()
    }
    fn mismatch(&self) -> Condition {
        if self.is_valueless() {
            Condition::VariantValueless
        } else {
            Condition::VariantIncorrectType
        }
    }

    /// Returns the held `T`, if a `T` is held.
    pub fn get_if<T, P>(&self) -> Option<&T>
    where
        C: Member<T, P>,
    {
        self.cell.access::<T, P>()
    }
    /// Returns the held `T`, if a `T` is held.
    pub fn get_if_mut<T, P>(&mut self) -> Option<&mut T>
    where
        C: Member<T, P>,
    {
        self.cell.access_mut::<T, P>()
    }
    /// Returns the held `T`.
    ///
    /// # Panics
    /// Raises [`Condition::VariantIncorrectType`] if another candidate is held, or
    /// [`Condition::VariantValueless`] if none is.
    #[track_caller]
    pub fn get<T, P>(&self) -> &T
    where
        C: Member<T, P>,
    {
        match self.cell.access::<T, P>() {
            Some(value) => value,
            None => raise(self.mismatch()),
        }
    }
    /// Returns the held `T`. Raises like [`Self::get`].
    #[track_caller]
    pub fn get_mut<T, P>(&mut self) -> &mut T
    where
        C: Member<T, P>,
    {
        let condition = self.mismatch();
        match self.cell.access_mut::<T, P>() {
            Some(value) => value,
            None => raise(condition),
        }
    }
    /// Returns the held `T`, or the failure [`Self::get`] would have raised.
    #[track_caller]
    pub fn try_get<T, P>(&self) -> Result<&T, Failure>
    where
        C: Member<T, P>,
    {
        match self.cell.access::<T, P>() {
            Some(value) => Ok(value),
            None => Err(Failure::here(self.mismatch())),
        }
    }
    /// # Safety
    /// A `T` must be held. Debug builds check this.
    pub unsafe fn get_unchecked<T, P>(&self) -> &T
    where
        C: Member<T, P>,
    {
        self.cell.access_unchecked::<T, P>()
    }
    /// # Safety
    /// A `T` must be held. Debug builds check this.
    pub unsafe fn get_unchecked_mut<T, P>(&mut self) -> &mut T
    where
        C: Member<T, P>,
    {
        self.cell.access_unchecked_mut::<T, P>()
    }

    /// Returns the `I`-th candidate, if it is held.
    pub fn get_at_if<const I: usize>(&self) -> Option<&<C as At<I>>::Output>
    where
        C: At<I>,
    {
        self.cell.access_at::<I>()
    }
    /// Returns the `I`-th candidate, if it is held.
    pub fn get_at_if_mut<const I: usize>(&mut self) -> Option<&mut <C as At<I>>::Output>
    where
        C: At<I>,
    {
        self.cell.access_at_mut::<I>()
    }
    /// Returns the `I`-th candidate. Raises like [`Self::get`].
    #[track_caller]
    pub fn get_at<const I: usize>(&self) -> &<C as At<I>>::Output
    where
        C: At<I>,
    {
        match self.cell.access_at::<I>() {
            Some(value) => value,
            None => raise(self.mismatch()),
        }
    }
    /// Returns the `I`-th candidate. Raises like [`Self::get`].
    #[track_caller]
    pub fn get_at_mut<const I: usize>(&mut self) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        let condition = self.mismatch();
        match self.cell.access_at_mut::<I>() {
            Some(value) => value,
            None => raise(condition),
        }
    }
    #[track_caller]
    pub fn try_get_at<const I: usize>(&self) -> Result<&<C as At<I>>::Output, Failure>
    where
        C: At<I>,
    {
        match self.cell.access_at::<I>() {
            Some(value) => Ok(value),
            None => Err(Failure::here(self.mismatch())),
        }
    }
    /// # Safety
    /// The `I`-th candidate must be held. Debug builds check this.
    pub unsafe fn get_at_unchecked<const I: usize>(&self) -> &<C as At<I>>::Output
    where
        C: At<I>,
    {
        self.cell.access_at_unchecked::<I>()
    }
    /// # Safety
    /// The `I`-th candidate must be held. Debug builds check this.
    pub unsafe fn get_at_unchecked_mut<const I: usize>(&mut self) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        self.cell.access_at_unchecked_mut::<I>()
    }

    /// Replaces the held value with `value`.
    pub fn emplace<T, P>(&mut self, value: T) -> &mut T
    where
        C: Member<T, P>,
    {
        self.cell.construct::<T, P>(value)
    }
    /// Replaces the held value with `value`, as the `I`-th candidate.
    pub fn emplace_at<const I: usize>(
        &mut self,
        value: <C as At<I>>::Output,
    ) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        self.cell.construct_at::<I>(value)
    }
    /// Replaces the held value with the result of `f`.
    ///
    /// The previous value is destroyed before `f` runs: should `f` panic, the variant is left
    /// valueless.
    pub fn emplace_with<T, P, F: FnOnce() -> T>(&mut self, f: F) -> &mut T
    where
        C: Member<T, P>,
    {
        self.cell.construct_with::<T, P, F>(f)
    }
    /// Same as [`Self::emplace_with`], addressing the candidate by position.
    pub fn emplace_at_with<const I: usize, F: FnOnce() -> <C as At<I>>::Output>(
        &mut self,
        f: F,
    ) -> &mut <C as At<I>>::Output
    where
        C: At<I>,
    {
        self.cell.construct_at_with::<I, F>(f)
    }
    /// Extracts the held `T`, or gives `self` back if it held something else.
    pub fn into_inner<T, P>(mut self) -> Result<T, Self>
    where
        C: Member<T, P>,
    {
        match self.cell.take::<T, P>() {
            Some(value) => Ok(value),
            None => Err(self),
        }
    }
    /// Moves the `I`-th candidate out if it is held, leaving `self` valueless.
    pub fn take_at<const I: usize>(&mut self) -> Option<<C as At<I>>::Output>
    where
        C: At<I>,
    {
        self.cell.take_at::<I>()
    }
    /// Exchanges the contents of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other)
    }

    /// Dispatches the held candidate to the matching [`Visit`](crate::candidates::Visit) impl of
    /// `visitor`.
    ///
    /// # Panics
    /// Raises [`Condition::VariantValueless`] if `self` is valueless.
    #[track_caller]
    pub fn visit<Vis: Accepts<C>>(&self, mut visitor: Vis) -> Vis::Output {
        match self.cell.raw() {
            Some((index, storage)) => unsafe { visitor.accept(index, storage) },
            None => raise(Condition::VariantValueless),
        }
    }
    /// Dispatches the held candidate to the matching
    /// [`VisitMut`](crate::candidates::VisitMut) impl of `visitor`.
    ///
    /// # Panics
    /// Raises [`Condition::VariantValueless`] if `self` is valueless.
    #[track_caller]
    pub fn visit_mut<Vis: AcceptsMut<C>>(&mut self, mut visitor: Vis) -> Vis::Output {
        match self.cell.raw_mut() {
            Some((index, storage)) => unsafe { visitor.accept_mut(index, storage) },
            None => raise(Condition::VariantValueless),
        }
    }
    /// Same as [`Self::visit`], returning the failure instead of raising it.
    #[track_caller]
    pub fn try_visit<Vis: Accepts<C>>(&self, mut visitor: Vis) -> Result<Vis::Output, Failure> {
        match self.cell.raw() {
            Some((index, storage)) => Ok(unsafe { visitor.accept(index, storage) }),
            None => Err(Failure::here(Condition::VariantValueless)),
        }
    }
    /// Calls the closure of `matchers` at the held candidate's position.
    ///
    /// # Panics
    /// Raises [`Condition::VariantValueless`] if `self` is valueless.
    #[track_caller]
    pub fn match_ref<'a, U, M: MatchRef<'a, C, U>>(&'a self, matchers: M) -> U {
        match self.cell.raw() {
            Some((index, storage)) => unsafe { matchers.match_ref(index, storage) },
            None => raise(Condition::VariantValueless),
        }
    }
    /// See [`Self::match_ref`].
    #[track_caller]
    pub fn match_mut<'a, U, M: MatchMut<'a, C, U>>(&'a mut self, matchers: M) -> U {
        match self.cell.raw_mut() {
            Some((index, storage)) => unsafe { matchers.match_mut(index, storage) },
            None => raise(Condition::VariantValueless),
        }
    }
    /// See [`Self::match_ref`].
    #[track_caller]
    pub fn match_owned<U, M: MatchOwned<C, U>>(mut self, matchers: M) -> U {
        match self.cell.release() {
            Some((index, storage)) => unsafe { matchers.match_owned(index, storage) },
            None => raise(Condition::VariantValueless),
        }
    }
}

impl<C: At<0>> Default for Variant<C>
where
    <C as At<0>>::Output: Default,
{
    fn default() -> Self {
        Self::with_index::<0>(Default::default())
    }
}
impl<C: CloneCandidates> Clone for Variant<C> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}
impl<C: EqCandidates> PartialEq for Variant<C> {
    fn eq(&self, other: &Self) -> bool {
        match (self.cell.raw(), other.cell.raw()) {
            (Some((i, a)), Some((j, b))) => i == j && unsafe { C::eq_active(i, a, b) },
            (None, None) => true,
            _ => false,
        }
    }
}
impl<C: EqCandidates + Eq> Eq for Variant<C> {}
impl<C: PartialOrdCandidates> PartialOrd for Variant<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.cell.raw(), other.cell.raw()) {
            (Some((i, a)), Some((j, b))) if i == j => unsafe { C::partial_cmp_active(i, a, b) },
            (Some((i, _)), Some((j, _))) => Some(i.cmp(&j)),
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (None, None) => Some(Ordering::Equal),
        }
    }
}
impl<C: OrdCandidates + Eq> Ord for Variant<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.cell.raw(), other.cell.raw()) {
            (Some((i, a)), Some((j, b))) if i == j => unsafe { C::cmp_active(i, a, b) },
            (Some((i, _)), Some((j, _))) => i.cmp(&j),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}
impl<C: HashCandidates> core::hash::Hash for Variant<C> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.index(), state);
        if let Some((index, storage)) = self.cell.raw() {
            unsafe { C::hash_active(index, storage, state) }
        }
    }
}
impl<C: DebugCandidates> core::fmt::Debug for Variant<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.cell.raw() {
            Some((index, storage)) => {
                write!(f, "Variant::<{}>(", C::type_name(index))?;
                unsafe { C::fmt_active(index, storage, f) }?;
                f.write_str(")")
            }
            None => f.write_str("Variant(valueless)"),
        }
    }
}
