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

//! Code generators for `tagcell`.
//!
//! Rust has no variadic generics, so every "one of N types" capability is spelled out once per
//! arity. These macros write that table so `tagcell-core` doesn't have to.

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::quote;

pub(crate) fn tl_mod() -> proc_macro2::TokenStream {
    match proc_macro_crate::crate_name("tagcell-core") {
        Ok(proc_macro_crate::FoundCrate::Itself) => return quote!(crate),
        Ok(proc_macro_crate::FoundCrate::Name(crate_name)) => {
            let crate_name = Ident::new(&crate_name, Span::call_site());
            return quote!(#crate_name);
        }
        _ => {}
    }
    match proc_macro_crate::crate_name("tagcell")
        .expect("Couldn't find `tagcell` in your dependencies")
    {
        proc_macro_crate::FoundCrate::Itself => quote!(crate::engine),
        proc_macro_crate::FoundCrate::Name(crate_name) => {
            let crate_name = Ident::new(&crate_name, Span::call_site());
            quote!(#crate_name::engine)
        }
    }
}

/// Parses the optional arity bound passed to the generators, falling back to `default`.
fn max_arity(tokens: TokenStream, default: usize) -> usize {
    if tokens.is_empty() {
        return default;
    }
    let lit: syn::LitInt = syn::parse(tokens).expect("Expected an integer literal");
    lit.base10_parse()
        .expect("Expected the maximum arity as a base 10 integer")
}

mod gen_candidates;
/// Generates the candidate-set machinery for tuples of arity `1..=N` (default 8).
#[proc_macro]
pub fn gen_candidates_impl(tokens: TokenStream) -> TokenStream {
    let max = max_arity(tokens, 8);
    if max == 0 || max > 255 {
        panic!("A candidate set holds between 1 and 255 types, got {max}")
    }
    gen_candidates::gen_candidates(max).into()
}

mod gen_delegates;
/// Generates delegate signatures for arities `0..=N` (default 6).
#[proc_macro]
pub fn gen_delegates_impl(tokens: TokenStream) -> TokenStream {
    gen_delegates::gen_delegates(max_arity(tokens, 6)).into()
}
