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

//! The core of `tagcell`: a fixed-size tagged storage cell, and the value containers built on it.
//!
//! Nothing in this crate allocates, and nothing synchronizes: every container owns at most one
//! live payload, in place.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(clippy::missing_safety_doc)]

/// Marks a branch that the discriminant makes impossible.
///
/// Debug builds check the claim and panic; release builds hand it to the optimizer.
#[macro_export]
macro_rules! unreachable_unchecked {
    () => {
        if cfg!(debug_assertions) {
            ::core::unreachable!("tagcell: a discriminant pointed outside of its candidate set")
        } else {
            unsafe { ::core::hint::unreachable_unchecked() }
        }
    };
}

pub mod candidates;
pub mod cell;
pub mod delegate;
pub mod failure;
pub mod optional;
pub mod result;
pub mod variant;

pub use cell::{Tag, TaggedCell};
pub use delegate::Delegate;
pub use failure::{Condition, Failure};
pub use optional::{Nullopt, Optional, NULLOPT};
pub use result::{Outcome, Result, Status};
pub use variant::Variant;

#[cfg(all(test, feature = "std"))]
mod tests;
