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

//! Value-or-error results.
//!
//! [`Result<V, E>`] holds either arm in a [`Variant`]. When one arm carries no data, the
//! [`Status`] (no value) and [`Outcome`] (no error) forms reduce the other arm to an
//! [`Optional`](crate::Optional).

use crate::failure::{raise, Condition, Failure};
use crate::optional::Optional;
use crate::variant::Variant;

mod outcome;
mod status;
pub use outcome::Outcome;
pub use status::Status;

/// Either a value of type `V`, or an error of type `E`.
///
/// Arms are addressed by position, so `V` and `E` may be the same type. Extracting the arm that
/// isn't held raises [`Condition::ResultWrongArm`].
///
/// ```
/// # use tagcell_core::Result;
/// let parsed: Result<u16, &str> = Result::Value(8080);
/// assert!(parsed.is_value());
/// let failed: Result<u16, &str> = Result::Error("not a port");
/// assert_eq!(*failed.error(), "not a port");
/// assert_eq!(failed.value_or(80u8), 80);
/// ```
pub struct Result<V, E> {
    variant: Variant<(V, E)>,
}

impl<V, E> Result<V, E> {
    /// Constructs the value arm.
    #[allow(non_snake_case)]
    pub fn Value(value: V) -> Self {
        Self {
            variant: Variant::with_index::<0>(value),
        }
    }
    /// Constructs the error arm.
    #[allow(non_snake_case)]
    pub fn Error(error: E) -> Self {
        Self {
            variant: Variant::with_index::<1>(error),
        }
    }
    /// Returns `true` if the value arm is held.
    pub fn is_value(&self) -> bool {
        self.variant.holds_index::<0>()
    }
    /// Alias of [`Self::is_value`].
    pub fn has_value(&self) -> bool {
        self.is_value()
    }
    /// Returns `true` if the error arm is held.
    pub fn is_error(&self) -> bool {
        self.variant.holds_index::<1>()
    }

    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn value(&self) -> &V {
        match self.variant.get_at_if::<0>() {
            Some(value) => value,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut V {
        match self.variant.get_at_if_mut::<0>() {
            Some(value) => value,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn into_value(mut self) -> V {
        match self.variant.take_at::<0>() {
            Some(value) => value,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn error(&self) -> &E {
        match self.variant.get_at_if::<1>() {
            Some(error) => error,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn error_mut(&mut self) -> &mut E {
        match self.variant.get_at_if_mut::<1>() {
            Some(error) => error,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn into_error(mut self) -> E {
        match self.variant.take_at::<1>() {
            Some(error) => error,
            None => raise(Condition::ResultWrongArm),
        }
    }
    #[track_caller]
    pub fn try_value(&self) -> core::result::Result<&V, Failure> {
        match self.variant.get_at_if::<0>() {
            Some(value) => Ok(value),
            None => Err(Failure::here(Condition::ResultWrongArm)),
        }
    }
    #[track_caller]
    pub fn try_error(&self) -> core::result::Result<&E, Failure> {
        match self.variant.get_at_if::<1>() {
            Some(error) => Ok(error),
            None => Err(Failure::here(Condition::ResultWrongArm)),
        }
    }
    /// # Safety
    /// The value arm must be held. Debug builds check this.
    pub unsafe fn value_unchecked(&self) -> &V {
        self.variant.get_at_unchecked::<0>()
    }
    /// # Safety
    /// The error arm must be held. Debug builds check this.
    pub unsafe fn error_unchecked(&self) -> &E {
        self.variant.get_at_unchecked::<1>()
    }

    fn take_arm(&mut self) -> (Option<V>, Option<E>) {
        (self.variant.take_at::<0>(), self.variant.take_at::<1>())
    }
    /// Switches to the value arm, dropping whatever was held.
    ///
    /// The previous arm is dropped after `value` is in place, so a panicking destructor still
    /// leaves `self` holding `value`.
    pub fn set_value(&mut self, value: V) -> &mut V {
        let previous = self.take_arm();
        let value = self.variant.emplace_at::<0>(value);
        drop(previous);
        value
    }
    /// Switches to the error arm, dropping whatever was held. See [`Self::set_value`].
    pub fn set_error(&mut self, error: E) -> &mut E {
        let previous = self.take_arm();
        let error = self.variant.emplace_at::<1>(error);
        drop(previous);
        error
    }

    /// Returns a copy of the value, or `default` converted to `V`.
    pub fn value_or<U: Into<V>>(&self, default: U) -> V
    where
        V: Clone,
    {
        match self.variant.get_at_if::<0>() {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }
    /// Returns the value, calling `f` on the error otherwise.
    pub fn unwrap_or_else<F: FnOnce(E) -> V>(self, f: F) -> V {
        self.match_owned(|value| value, f)
    }
    /// Converts to a standard [`Result`](core::result::Result) of references to the arms.
    pub fn as_ref(&self) -> core::result::Result<&V, &E> {
        self.match_ref(Ok, Err)
    }
    /// Converts to a standard [`Result`](core::result::Result) of mutable references to the arms.
    pub fn as_mut(&mut self) -> core::result::Result<&mut V, &mut E> {
        self.match_mut(Ok, Err)
    }
    /// The value, if held.
    pub fn ok(self) -> Optional<V> {
        self.match_owned(Optional::some, |_| Optional::new())
    }
    /// The error, if held.
    pub fn err(self) -> Optional<E> {
        self.match_owned(|_| Optional::new(), Optional::some)
    }
    /// Applies a computation to the value arm.
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Result<U, E> {
        self.match_owned(move |value| Result::Value(f(value)), Result::Error)
    }
    /// Applies a computation to the error arm.
    pub fn map_error<U, F: FnOnce(E) -> U>(self, f: F) -> Result<V, U> {
        self.match_owned(Result::Value, move |error| Result::Error(f(error)))
    }
    /// Applies a fallible computation to the value arm.
    pub fn and_then<U, F: FnOnce(V) -> Result<U, E>>(self, f: F) -> Result<U, E> {
        self.match_owned(f, Result::Error)
    }
    /// Attempts to recover from the error arm.
    pub fn or_else<U, F: FnOnce(E) -> Result<V, U>>(self, f: F) -> Result<V, U> {
        self.match_owned(Result::Value, f)
    }

    /// Equivalent to `match &self`.
    pub fn match_ref<'a, U, FnV: FnOnce(&'a V) -> U, FnE: FnOnce(&'a E) -> U>(
        &'a self,
        value: FnV,
        error: FnE,
    ) -> U {
        self.variant.match_ref((value, error))
    }
    /// Equivalent to `match &mut self`.
    pub fn match_mut<'a, U, FnV: FnOnce(&'a mut V) -> U, FnE: FnOnce(&'a mut E) -> U>(
        &'a mut self,
        value: FnV,
        error: FnE,
    ) -> U {
        self.variant.match_mut((value, error))
    }
    /// Equivalent to `match self`.
    pub fn match_owned<U, FnV: FnOnce(V) -> U, FnE: FnOnce(E) -> U>(
        self,
        value: FnV,
        error: FnE,
    ) -> U {
        self.variant.match_owned((value, error))
    }
}

impl<V, E> From<core::result::Result<V, E>> for Result<V, E> {
    fn from(value: core::result::Result<V, E>) -> Self {
        match value {
            Ok(value) => Self::Value(value),
            Err(error) => Self::Error(error),
        }
    }
}
impl<V, E> From<Result<V, E>> for core::result::Result<V, E> {
    fn from(value: Result<V, E>) -> Self {
        value.match_owned(Ok, Err)
    }
}

impl<V: Clone, E: Clone> Clone for Result<V, E> {
    fn clone(&self) -> Self {
        Self {
            variant: self.variant.clone(),
        }
    }
}
impl<V: PartialEq, E: PartialEq> PartialEq for Result<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.variant == other.variant
    }
}
impl<V: Eq, E: Eq> Eq for Result<V, E> {}
impl<V: core::hash::Hash, E: core::hash::Hash> core::hash::Hash for Result<V, E> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.variant, state)
    }
}
impl<V: core::fmt::Debug, E: core::fmt::Debug> core::fmt::Debug for Result<V, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.as_ref() {
            Ok(value) => f.debug_tuple("Value").field(value).finish(),
            Err(error) => f.debug_tuple("Error").field(error).finish(),
        }
    }
}
