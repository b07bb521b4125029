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

/// A value of type `V`, or a failure: a [`Result`](super::Result) whose error arm carries no data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Outcome<V> {
    value: Optional<V>,
}

impl<V> Outcome<V> {
    /// Constructs the value arm.
    #[allow(non_snake_case)]
    pub fn Value(value: V) -> Self {
        Self {
            value: Optional::some(value),
        }
    }
    /// Constructs the error arm.
    #[allow(non_snake_case)]
    pub const fn Failed() -> Self {
        Self {
            value: Optional::new(),
        }
    }
    pub const fn is_value(&self) -> bool {
        self.value.has_value()
    }
    /// Alias of [`Self::is_value`].
    pub const fn has_value(&self) -> bool {
        self.is_value()
    }
    pub const fn is_error(&self) -> bool {
        self.value.is_empty()
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn value(&self) -> &V {
        match self.value.as_ref() {
            Some(value) => value,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut V {
        match self.value.as_mut() {
            Some(value) => value,
            None => raise(Condition::ResultWrongArm),
        }
    }
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the error arm is held.
    #[track_caller]
    pub fn into_value(mut self) -> V {
        match self.value.take() {
            Some(value) => value,
            None => raise(Condition::ResultWrongArm),
        }
    }
    #[track_caller]
    pub fn try_value(&self) -> Result<&V, Failure> {
        match self.value.as_ref() {
            Some(value) => Ok(value),
            None => Err(Failure::here(Condition::ResultWrongArm)),
        }
    }
    /// Checks that the error arm is held.
    ///
    /// # Panics
    /// Raises [`Condition::ResultWrongArm`] if the value arm is held.
    #[track_caller]
    pub fn error(&self) {
        if self.is_value() {
            raise(Condition::ResultWrongArm)
        }
    }
    /// Switches to the value arm. The previous value, if any, is dropped once `value` is in place.
    pub fn set_value(&mut self, value: V) -> &mut V {
        let previous = self.value.take();
        let value = self.value.emplace(value);
        drop(previous);
        value
    }
    /// Switches to the error arm, dropping the value if there was one.
    pub fn set_failed(&mut self) {
        self.value.reset()
    }
    /// Returns a copy of the value, or `default` converted to `V`.
    pub fn value_or<U: Into<V>>(&self, default: U) -> V
    where
        V: Clone,
    {
        self.value.value_or(default)
    }
    /// The value, if held.
    pub fn ok(self) -> Optional<V> {
        self.value
    }
    pub fn map<U, F: FnOnce(V) -> U>(self, f: F) -> Outcome<U> {
        Outcome {
            value: self.value.map(f),
        }
    }
    pub fn and_then<U, F: FnOnce(V) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        self.value.match_owned(f, Outcome::Failed)
    }
}

impl<V> Default for Outcome<V> {
    fn default() -> Self {
        Self::Failed()
    }
}
impl<V> From<Option<V>> for Outcome<V> {
    fn from(value: Option<V>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
impl<V> From<Outcome<V>> for Option<V> {
    fn from(value: Outcome<V>) -> Self {
        value.value.into()
    }
}
impl<V, E> From<Result<V, E>> for Outcome<V> {
    fn from(value: Result<V, E>) -> Self {
        value.ok().into()
    }
}
impl<V: core::fmt::Debug> core::fmt::Debug for Outcome<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.value.as_ref() {
            Some(value) => f.debug_tuple("Value").field(value).finish(),
            None => f.write_str("Failed"),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::tests::Fuse;

    #[test]
    fn arms() {
        let mut outcome = Outcome::Value(String::from("config"));
        assert!(outcome.is_value());
        outcome.value_mut().push_str(".toml");
        assert_eq!(outcome.value(), "config.toml");
        assert_eq!(format!("{outcome:?}"), "Value(\"config.toml\")");
        outcome.set_failed();
        assert!(outcome.is_error() && !outcome.has_value());
        outcome.error();
        assert_eq!(outcome.value_or("none"), "none");
        assert_eq!(format!("{outcome:?}"), "Failed");
        assert_eq!(Option::<String>::from(outcome.clone()), None);
        assert_eq!(outcome, Outcome::default());
        let parsed = Outcome::from("12".parse::<u32>()).and_then(|n| {
            if n > 10 {
                Outcome::Value(n * 2)
            } else {
                Outcome::Failed()
            }
        });
        assert_eq!(parsed.into_value(), 24);
    }

    #[test]
    fn panicking_destructor_keeps_the_new_value() {
        let mut outcome = Outcome::Value(Fuse::armed());
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            outcome.set_value(Fuse::disarmed());
        }));
        assert!(caught.is_err());
        assert!(outcome.has_value());
        assert!(!outcome.value().is_armed());
    }

    #[cfg(feature = "checks")]
    #[test]
    fn wrong_arm_raises() {
        let outcome = Outcome::<u8>::Failed();
        crate::tests::expect_failure(Condition::ResultWrongArm, || *outcome.value());
        let outcome = Outcome::Value(1u8);
        crate::tests::expect_failure(Condition::ResultWrongArm, || outcome.error());
        assert_eq!(
            Outcome::<u8>::Failed().try_value().unwrap_err().condition(),
            Condition::ResultWrongArm
        );
    }
}
