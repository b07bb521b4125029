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

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use tagcell::Delegate;

struct Filter {
    gain: u32,
}
impl Filter {
    fn step(&self, sample: u32) -> u32 {
        sample.wrapping_mul(self.gain) >> 4
    }
}

fn step(sample: u32) -> u32 {
    sample.wrapping_mul(3) >> 4
}

const N: usize = 100000;
fn bench_delegates(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let samples = (0..N).map(|_| rng.gen::<u32>()).collect::<Vec<_>>();
    let filter = Filter { gain: 3 };
    let closure = |sample: u32| sample.wrapping_mul(filter.gain) >> 4;
    let dynamic: &dyn Fn(u32) -> u32 = &closure;

    let from_fn = Delegate::<fn(u32) -> u32>::from_fn(step);
    let from_method = Delegate::<fn(u32) -> u32>::from_method(&filter, Filter::step);
    let from_closure = Delegate::<fn(u32) -> u32>::new(&closure);

    c.bench_function("direct", |b| {
        b.iter(|| samples.iter().fold(0u32, |acc, s| acc ^ step(*s)))
    });
    c.bench_function("dyn_fn", |b| {
        b.iter(|| samples.iter().fold(0u32, |acc, s| acc ^ dynamic(*s)))
    });
    for (name, delegate) in [
        ("delegate_fn", from_fn),
        ("delegate_method", from_method),
        ("delegate_closure", from_closure),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                samples
                    .iter()
                    .fold(0u32, |acc, s| acc ^ black_box(delegate).call(*s))
            })
        });
    }
}

criterion_group!(benches, bench_delegates);
criterion_main!(benches);
