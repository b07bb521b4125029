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

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

/// The crate everything here is built from.
pub use tagcell_core as engine;

pub use tagcell_core::{candidates, cell, delegate, failure, optional, result, variant};
pub use tagcell_core::{
    Condition, Delegate, Failure, Nullopt, Optional, Outcome, Result, Status, Tag, TaggedCell,
    Variant, NULLOPT,
};

/// Everything needed to use the containers, without shadowing `core::result::Result`.
pub mod prelude {
    pub use tagcell_core::candidates::{Visit, VisitMut, Visitor};
    pub use tagcell_core::{
        Condition, Delegate, Failure, Nullopt, Optional, Outcome, Status, Variant, NULLOPT,
    };
}

#[cfg(all(test, feature = "std"))]
mod tests;
