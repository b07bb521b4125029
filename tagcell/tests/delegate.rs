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

use std::cell::RefCell;

use tagcell::Delegate;

struct Uart {
    sent: RefCell<Vec<u8>>,
}
impl Uart {
    fn send(&self, byte: u8) -> usize {
        let mut sent = self.sent.borrow_mut();
        sent.push(byte);
        sent.len()
    }
}

fn checksum(a: u8, b: u8) -> u8 {
    a.wrapping_add(b)
}

/// A callback slot, as a driver would hold one.
struct Driver<'a> {
    on_byte: Delegate<'a, fn(u8) -> usize>,
}
impl<'a> Driver<'a> {
    fn receive(&self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .map(|byte| self.on_byte.call_or(|_| 0, *byte))
            .sum()
    }
}

#[test]
fn every_binding_form() {
    let uart = Uart {
        sent: RefCell::new(Vec::new()),
    };
    let mut driver = Driver {
        on_byte: Delegate::default(),
    };
    assert_eq!(driver.receive(b"ignored"), 0);

    driver.on_byte.set_method(&uart, Uart::send);
    assert_eq!(driver.receive(b"ab"), 3);
    assert_eq!(uart.sent.borrow().as_slice(), b"ab");

    let counted = RefCell::new(0);
    let count = |_: u8| {
        *counted.borrow_mut() += 1;
        *counted.borrow()
    };
    driver.on_byte.set(&count);
    assert_eq!(driver.receive(b"xyz"), 1 + 2 + 3);

    let mut sum = Delegate::<fn(u8, u8) -> u8>::from_fn(checksum);
    assert_eq!(sum.call(250, 10), 4);
    assert_eq!(sum.call_if(1, 2).into_value(), 3);
    sum.clear();
    assert!(sum.call_if(1, 2).is_empty());
    sum.set_fn(checksum);
    assert!(sum.is_valid());
}

#[test]
fn equality_follows_the_binding() {
    let uart = Uart {
        sent: RefCell::new(Vec::new()),
    };
    let other = Uart {
        sent: RefCell::new(Vec::new()),
    };
    let a = Delegate::<fn(u8) -> usize>::from_method(&uart, Uart::send);
    let b = Delegate::<fn(u8) -> usize>::from_method(&uart, Uart::send);
    let c = Delegate::<fn(u8) -> usize>::from_method(&other, Uart::send);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, Delegate::default());
}

#[cfg(feature = "checks")]
#[test]
fn unbound_call_fails() {
    use tagcell::Condition;
    let delegate = Delegate::<fn(u8, u8) -> u8>::default();
    let failure = std::panic::catch_unwind(|| delegate.call(1, 2))
        .unwrap_err()
        .downcast::<tagcell::Failure>()
        .unwrap();
    assert_eq!(failure.condition(), Condition::DelegateUninitialised);
}
