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

//! Closed sets of candidate types.
//!
//! A candidate set is a tuple `(T0, T1, ...)` of up to 8 types. Every per-candidate operation
//! (destruction, cloning, comparison, visitation...) is a flat `match` over the active index,
//! generated once per arity.

use core::cmp::Ordering;
use core::fmt::{Formatter, Result as FmtResult};
use core::hash::Hasher;

/// A closed set of candidate types.
///
/// # Safety
/// `Storage` must be large and aligned enough to hold any candidate at its start, and every
/// `*_active(index, ..)` function must treat that storage as holding the `index`-th candidate.
pub unsafe trait Candidates: Sized {
    /// The number of candidates.
    const COUNT: usize;
    /// Raw storage for any single candidate.
    type Storage;
    /// Drops the `index`-th candidate in place.
    ///
    /// # Safety
    /// `storage` must hold a live instance of the `index`-th candidate, which must not be used again.
    unsafe fn drop_active(index: usize, storage: *mut Self::Storage);
    /// The name of the `index`-th candidate.
    fn type_name(index: usize) -> &'static str;
}

/// # Safety
/// See [`Candidates`].
pub unsafe trait CloneCandidates: Candidates {
    /// Clones the `index`-th candidate of `src` into the uninitialized `dst`.
    ///
    /// # Safety
    /// `src` must hold a live `index`-th candidate, `dst` must be writable.
    unsafe fn clone_active(index: usize, src: *const Self::Storage, dst: *mut Self::Storage);
}
/// # Safety
/// See [`Candidates`].
pub unsafe trait EqCandidates: Candidates {
    /// # Safety
    /// Both `a` and `b` must hold a live `index`-th candidate.
    unsafe fn eq_active(index: usize, a: *const Self::Storage, b: *const Self::Storage) -> bool;
}
/// # Safety
/// See [`Candidates`].
pub unsafe trait PartialOrdCandidates: EqCandidates {
    /// # Safety
    /// Both `a` and `b` must hold a live `index`-th candidate.
    unsafe fn partial_cmp_active(
        index: usize,
        a: *const Self::Storage,
        b: *const Self::Storage,
    ) -> Option<Ordering>;
}
/// # Safety
/// See [`Candidates`].
pub unsafe trait OrdCandidates: PartialOrdCandidates {
    /// # Safety
    /// Both `a` and `b` must hold a live `index`-th candidate.
    unsafe fn cmp_active(index: usize, a: *const Self::Storage, b: *const Self::Storage)
        -> Ordering;
}
/// # Safety
/// See [`Candidates`].
pub unsafe trait HashCandidates: Candidates {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate.
    unsafe fn hash_active<H: Hasher>(index: usize, storage: *const Self::Storage, state: &mut H);
}
/// # Safety
/// See [`Candidates`].
pub unsafe trait DebugCandidates: Candidates {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate.
    unsafe fn fmt_active(
        index: usize,
        storage: *const Self::Storage,
        f: &mut Formatter<'_>,
    ) -> FmtResult;
}

/// The `I`-th candidate of a set.
pub trait At<const I: usize>: Candidates {
    type Output;
}

/// A type-level position, used to find a candidate by its type.
///
/// It is almost always left for inference: `variant.get::<f64, _>()`.
pub struct Pos<const I: usize>;

/// `T` is a candidate of this set, found at position `P`.
///
/// A type that appears several times in the same set can't be found by type, since `P` is then
/// ambiguous: address it by position instead.
///
/// # Safety
/// `INDEX` must be the position of `T` in the set.
pub unsafe trait Member<T, P>: Candidates {
    const INDEX: usize;
}

/// The output shared by all of a visitor's [`Visit`] implementations.
pub trait Visitor {
    type Output;
}
/// Visits candidates of type `T` by reference.
pub trait Visit<T: ?Sized>: Visitor {
    fn visit(&mut self, value: &T) -> Self::Output;
}
/// Visits candidates of type `T` by mutable reference.
pub trait VisitMut<T: ?Sized>: Visitor {
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}
impl<V: Visitor> Visitor for &mut V {
    type Output = V::Output;
}
impl<T: ?Sized, V: Visit<T>> Visit<T> for &mut V {
    fn visit(&mut self, value: &T) -> Self::Output {
        (**self).visit(value)
    }
}
impl<T: ?Sized, V: VisitMut<T>> VisitMut<T> for &mut V {
    fn visit_mut(&mut self, value: &mut T) -> Self::Output {
        (**self).visit_mut(value)
    }
}

/// Implemented for any [`Visitor`] that can [`Visit`] every candidate of `C`.
///
/// # Safety
/// Only meant to be implemented by the generated dispatch tables.
pub unsafe trait Accepts<C: Candidates>: Visitor {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate.
    unsafe fn accept(&mut self, index: usize, storage: *const C::Storage) -> Self::Output;
}
/// Implemented for any [`Visitor`] that can [`VisitMut`] every candidate of `C`.
///
/// # Safety
/// Only meant to be implemented by the generated dispatch tables.
pub unsafe trait AcceptsMut<C: Candidates>: Visitor {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate.
    unsafe fn accept_mut(&mut self, index: usize, storage: *mut C::Storage) -> Self::Output;
}

/// A tuple of closures, one per candidate of `C`, each taking its candidate by reference.
///
/// # Safety
/// Only meant to be implemented by the generated dispatch tables.
pub unsafe trait MatchRef<'a, C: Candidates, U> {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate, valid for `'a`.
    unsafe fn match_ref(self, index: usize, storage: *const C::Storage) -> U;
}
/// A tuple of closures, one per candidate of `C`, each taking its candidate by mutable reference.
///
/// # Safety
/// Only meant to be implemented by the generated dispatch tables.
pub unsafe trait MatchMut<'a, C: Candidates, U> {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate, exclusively borrowed for `'a`.
    unsafe fn match_mut(self, index: usize, storage: *mut C::Storage) -> U;
}
/// A tuple of closures, one per candidate of `C`, each taking its candidate by value.
///
/// # Safety
/// Only meant to be implemented by the generated dispatch tables.
pub unsafe trait MatchOwned<C: Candidates, U> {
    /// # Safety
    /// `storage` must hold a live `index`-th candidate, which is moved out: it must be
    /// considered dead afterwards.
    unsafe fn match_owned(self, index: usize, storage: *mut C::Storage) -> U;
}

tagcell_macros::gen_candidates_impl!(8);

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{align_of, size_of};

    fn position<C: Member<T, P>, T, P>() -> usize {
        C::INDEX
    }

    #[test]
    fn storage_fits_every_candidate() {
        type Set = (u8, u64, [u16; 5]);
        assert_eq!(<Set as Candidates>::COUNT, 3);
        assert_eq!(size_of::<<Set as Candidates>::Storage>(), 16);
        assert_eq!(align_of::<<Set as Candidates>::Storage>(), align_of::<u64>());
        assert_eq!(size_of::<<(u8,) as Candidates>::Storage>(), 1);
    }

    #[test]
    fn membership() {
        type Set = (u8, &'static str, f64);
        assert_eq!(position::<Set, u8, _>(), 0);
        assert_eq!(position::<Set, &'static str, _>(), 1);
        assert_eq!(position::<Set, f64, _>(), 2);
        let _: <Set as At<2>>::Output = 1.5f64;
        assert_eq!(<Set as Candidates>::type_name(1), "&str");
        // duplicated candidates remain reachable by position
        let _: <(u8, u8) as At<1>>::Output = 3u8;
    }
}
