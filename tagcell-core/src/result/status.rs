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

use crate::failure::{raise, Condition, Failure};
use crate::optional::Optional;

/// Success, or an error of type `E`: a [`Result`](super::Result) whose value arm carries no data.
///
/// ```
/// # use tagcell_core::Status;
/// let status = Status::Error(404);
/// assert!(status.is_error());
/// assert_eq!(*status.error(), 404);
/// assert!(Status::<u16>::default().is_value());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Status<E> {
    error: Optional<E>,
}

impl<E> Status<E> {
    /// Constructs the value arm.
    #[allow(non_snake_case)]
    pub const fn Success() -> Self {
        Self {
            error: Optional::new(),
        }
    }
    /// Constructs the error arm.
    #[allow(non_snake_case)]
    pub fn Error(error: E) -> Self {
        Self {
            error: Optional::some(error),
        }
    }
    pub const fn is_value(&self) -> bool {
        self.error.is_empty()
    }
    /// Alias of [`Self::is_value`].
    pub const fn has_value(&self) -> bool {
        self.is_value()
    }
    pub const fn is_error(&self) -> bool {
        self.error.has_value()
    }
    /// Checks that the value arm is held.
    ///
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn value(&self) {
        if self.is_error() {
            raise(Condition::ResultWrongArm)
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn error(&self) -> &E {
        match self.error.as_ref() {
            Some(error) => error,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn error_mut(&mut self) -> &mut E {
        match self.error.as_mut() {
            Some(error) => error,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn into_error(mut self) -> E {
        match self.error.take() {
            Some(error) => error,
            None => raise(Condition::ResultWrongArm),
        }
    }
    #[track_caller]
    pub fn try_error(&self) -> Result<&E, Failure> {
        match self.error.as_ref() {
            Some(error) => Ok(error),
            None => Err(Failure::here(Condition::ResultWrongArm)),
        }
    }
    /// Switches to the error arm. The previous error is dropped once `error` is in place.
    pub fn set_error(&mut self, error: E) -> &mut E {
        let previous = self.error.take();
        let error = self.error.emplace(error);
        drop(previous);
        error
    }
    /// Switches to the value arm, dropping the error if there was one.
    pub fn set_success(&mut self) {
        self.error.reset()
    }
    /// The error, if held.
    pub fn err(self) -> Optional<E> {
        self.error
    }
    pub fn map_error<U, F: FnOnce(E) -> U>(self, f: F) -> Status<U> {
        Status {
            error: self.error.map(f),
        }
    }
    /// Equivalent to `match &self`.
    pub fn match_ref<'a, U, FnV: FnOnce() -> U, FnE: FnOnce(&'a E) -> U>(
        &'a self,
        value: FnV,
        error: FnE,
    ) -> U {
        self.error.match_ref(error, value)
    }
}

impl<E> Default for Status<E> {
    fn default() -> Self {
        Self::Success()
    }
}
impl<E> From<Result<(), E>> for Status<E> {
    fn from(value: Result<(), E>) -> Self {
        match value {
            Ok(()) => Self::Success(),
            Err(error) => Self::Error(error),
        }
    }
}
impl<E> From<Status<E>> for Result<(), E> {
    fn from(value: Status<E>) -> Self {
        match Option::<E>::from(value.error) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
impl<E: core::fmt::Debug> core::fmt::Debug for Status<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.error.as_ref() {
            Some(error) => f.debug_tuple("Error").field(error).finish(),
            None => f.write_str("Success"),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::tests::Fuse;

    #[test]
    fn arms() {
        let mut status = Status::Error(404);
        assert!(status.is_error() && !status.is_value());
        assert_eq!(*status.error(), 404);
        *status.error_mut() += 1;
        assert_eq!(format!("{status:?}"), "Error(405)");
        status.set_success();
        assert!(status.is_value() && status.has_value());
        status.value();
        assert_eq!(
            status.try_error().unwrap_err().condition(),
            Condition::ResultWrongArm
        );
        assert_eq!(Result::from(status.clone()), Ok(()));
        status.set_error(3);
        let described = status.match_ref(|| "fine".to_string(), |e| format!("code {e}"));
        assert_eq!(described, "code 3");
        assert_eq!(Status::from(Err::<(), _>(7)).map_error(|e| e * 2).into_error(), 14);
    }

    #[test]
    fn panicking_destructor_keeps_the_new_error() {
        let mut status = Status::Error(Fuse::armed());
        assert!(!status.has_value());
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            status.set_error(Fuse::disarmed());
        }));
        assert!(outcome.is_err());
        assert!(status.is_error());
        assert!(!status.error().is_armed());
    }

    #[cfg(feature = "checks")]
    #[test]
    fn wrong_arm_raises() {
        let status = Status::<u8>::Success();
        crate::tests::expect_failure(Condition::ResultWrongArm, || *status.error());
        let status = Status::Error(1u8);
        crate::tests::expect_failure(Condition::ResultWrongArm, || status.value());
    }
}
