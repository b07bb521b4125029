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

use std::mem::{align_of, size_of};

use crate::prelude::*;

#[test]
fn layouts() {
    assert_eq!(size_of::<Optional<u32>>(), 8);
    assert_eq!(size_of::<Optional<()>>(), 1);
    assert_eq!(size_of::<Variant<(u8, u64)>>(), 16);
    assert_eq!(align_of::<Variant<(u8, u64)>>(), align_of::<u64>());
    assert_eq!(size_of::<Variant<(u8, [u8; 3])>>(), 4);
    assert_eq!(size_of::<crate::Result<u32, u16>>(), 8);
    assert_eq!(size_of::<Status<u32>>(), size_of::<Optional<u32>>());
    assert_eq!(size_of::<Delegate<fn(u32) -> u32>>(), 3 * size_of::<usize>());
}

/// Records which of its 8 handlers ran.
#[derive(Default)]
struct Tally([usize; 8]);
impl Visitor for Tally {
    type Output = usize;
}
macro_rules! tally {
    ($($t: ty => $i: literal),*) => {
        $(impl Visit<$t> for Tally {
            fn visit(&mut self, _: &$t) -> usize {
                self.0[$i] += 1;
                $i
            }
        })*
    };
}
tally!(u8 => 0, u16 => 1, u32 => 2, u64 => 3, i8 => 4, i16 => 5, i32 => 6, i64 => 7);

#[test]
fn visitation_reaches_exactly_one_handler() {
    type Wide = Variant<(u8, u16, u32, u64, i8, i16, i32, i64)>;
    let values = [
        Wide::new(1u8),
        Wide::new(1u16),
        Wide::new(1u32),
        Wide::new(1u64),
        Wide::new(1i8),
        Wide::new(1i16),
        Wide::new(1i32),
        Wide::new(1i64),
    ];
    let mut tally = Tally::default();
    for (index, value) in values.iter().enumerate() {
        assert_eq!(value.index(), index);
        assert_eq!(value.visit(&mut tally), index);
    }
    assert_eq!(tally.0, [1; 8]);
}

#[test]
fn nullopt_compares_as_empty() {
    let empty = Optional::<u8>::from(NULLOPT);
    let full = Optional::some(0u8);
    assert!(empty == NULLOPT && NULLOPT == empty);
    assert!(full != NULLOPT);
    assert!(NULLOPT < full && full > NULLOPT);
    assert!(empty <= NULLOPT && NULLOPT >= empty);
    assert!(empty < full);
}
