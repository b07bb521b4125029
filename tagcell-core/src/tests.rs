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

use std::cell::Cell;
use std::rc::Rc;

/// Shared construction/destruction counters.
#[derive(Default, Clone)]
pub struct Counters {
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}
impl Counters {
    pub fn tracked(&self, value: i32) -> Tracked {
        self.created.set(self.created.get() + 1);
        Tracked {
            value,
            counters: self.clone(),
        }
    }
    pub fn drops(&self) -> usize {
        self.dropped.get()
    }
    pub fn live(&self) -> usize {
        self.created.get() - self.dropped.get()
    }
}

/// A value that reports its clones and drops to its [`Counters`].
pub struct Tracked {
    pub value: i32,
    counters: Counters,
}
impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.tracked(self.value)
    }
}
impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.dropped.set(self.counters.dropped.get() + 1);
    }
}
impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl core::fmt::Debug for Tracked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

/// Panics when dropped while armed.
pub struct Fuse {
    armed: bool,
}
impl Fuse {
    pub fn armed() -> Self {
        Self { armed: true }
    }
    pub fn disarmed() -> Self {
        Self { armed: false }
    }
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
impl Drop for Fuse {
    fn drop(&mut self) {
        if self.armed {
            panic!("armed fuse dropped")
        }
    }
}

/// Runs `f`, expecting it to raise `condition`.
#[cfg(feature = "checks")]
pub fn expect_failure<R>(condition: crate::Condition, f: impl FnOnce() -> R) {
    let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f))
        .err()
        .expect("expected a precondition failure");
    let failure = payload
        .downcast::<crate::Failure>()
        .expect("the payload should be a Failure");
    assert_eq!(failure.condition(), condition);
}
