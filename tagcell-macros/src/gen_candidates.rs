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

use quote::{format_ident, quote};

/// One block per arity: the storage union, the flat dispatch tables and the membership impls.
pub fn gen_candidates(max: usize) -> proc_macro2::TokenStream {
    let st = crate::tl_mod();
    let generator = (1..=max).map(|n| {
        let union = format_ident!("Union{n}");
        let tys = (0..n).map(|i| format_ident!("T{i}")).collect::<Vec<_>>();
        let fns = (0..n).map(|i| format_ident!("F{i}")).collect::<Vec<_>>();
        let fields = (0..n).map(|i| format_ident!("_{i}")).collect::<Vec<_>>();
        let idx = (0..n).collect::<Vec<_>>();
        let members = (0..n).map(syn::Index::from).collect::<Vec<_>>();
        let tuple = quote!((#(#tys,)*));
        let union_doc = format!(
            "Storage sized and aligned for any one of {n} candidate type{}.",
            if n == 1 { "" } else { "s" }
        );

        let positions = idx.iter().zip(&tys).map(|(i, ty)| {
            quote! {
                impl<#(#tys),*> #st::candidates::At<#i> for #tuple {
                    type Output = #ty;
                }
                unsafe impl<#(#tys),*> #st::candidates::Member<#ty, #st::candidates::Pos<#i>> for #tuple {
                    const INDEX: usize = #i;
                }
            }
        });

        quote! {
            #[doc = #union_doc]
            #[repr(C)]
            pub union #union<#(#tys),*> {
                #(pub #fields: core::mem::ManuallyDrop<#tys>,)*
            }

            unsafe impl<#(#tys),*> #st::candidates::Candidates for #tuple {
                const COUNT: usize = #n;
                type Storage = #union<#(#tys),*>;
                unsafe fn drop_active(index: usize, storage: *mut Self::Storage) {
                    match index {
                        #(#idx => core::ptr::drop_in_place(storage as *mut #tys),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
                fn type_name(index: usize) -> &'static str {
                    match index {
                        #(#idx => core::any::type_name::<#tys>(),)*
                        _ => "<out of range>",
                    }
                }
            }

            unsafe impl<#(#tys: Clone),*> #st::candidates::CloneCandidates for #tuple {
                unsafe fn clone_active(index: usize, src: *const Self::Storage, dst: *mut Self::Storage) {
                    match index {
                        #(#idx => core::ptr::write(dst as *mut #tys, (*(src as *const #tys)).clone()),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<#(#tys: PartialEq),*> #st::candidates::EqCandidates for #tuple {
                unsafe fn eq_active(index: usize, a: *const Self::Storage, b: *const Self::Storage) -> bool {
                    match index {
                        #(#idx => *(a as *const #tys) == *(b as *const #tys),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<#(#tys: PartialOrd),*> #st::candidates::PartialOrdCandidates for #tuple {
                unsafe fn partial_cmp_active(
                    index: usize,
                    a: *const Self::Storage,
                    b: *const Self::Storage,
                ) -> Option<core::cmp::Ordering> {
                    match index {
                        #(#idx => (*(a as *const #tys)).partial_cmp(&*(b as *const #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<#(#tys: Ord),*> #st::candidates::OrdCandidates for #tuple {
                unsafe fn cmp_active(
                    index: usize,
                    a: *const Self::Storage,
                    b: *const Self::Storage,
                ) -> core::cmp::Ordering {
                    match index {
                        #(#idx => (*(a as *const #tys)).cmp(&*(b as *const #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<#(#tys: core::hash::Hash),*> #st::candidates::HashCandidates for #tuple {
                unsafe fn hash_active<H: core::hash::Hasher>(index: usize, storage: *const Self::Storage, state: &mut H) {
                    match index {
                        #(#idx => core::hash::Hash::hash(&*(storage as *const #tys), state),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<#(#tys: core::fmt::Debug),*> #st::candidates::DebugCandidates for #tuple {
                unsafe fn fmt_active(
                    index: usize,
                    storage: *const Self::Storage,
                    f: &mut core::fmt::Formatter<'_>,
                ) -> core::fmt::Result {
                    match index {
                        #(#idx => core::fmt::Debug::fmt(&*(storage as *const #tys), f),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            #(#positions)*

            unsafe impl<Vis, #(#tys),*> #st::candidates::Accepts<#tuple> for Vis
            where
                Vis: #(#st::candidates::Visit<#tys>)+*,
            {
                unsafe fn accept(
                    &mut self,
                    index: usize,
                    storage: *const <#tuple as #st::candidates::Candidates>::Storage,
                ) -> Self::Output {
                    match index {
                        #(#idx => #st::candidates::Visit::<#tys>::visit(self, &*(storage as *const #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<Vis, #(#tys),*> #st::candidates::AcceptsMut<#tuple> for Vis
            where
                Vis: #(#st::candidates::VisitMut<#tys>)+*,
            {
                unsafe fn accept_mut(
                    &mut self,
                    index: usize,
                    storage: *mut <#tuple as #st::candidates::Candidates>::Storage,
                ) -> Self::Output {
                    match index {
                        #(#idx => #st::candidates::VisitMut::<#tys>::visit_mut(self, &mut *(storage as *mut #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<'a, U, #(#tys: 'a,)* #(#fns),*> #st::candidates::MatchRef<'a, #tuple, U> for (#(#fns,)*)
            where
                #(#fns: FnOnce(&'a #tys) -> U,)*
            {
                unsafe fn match_ref(
                    self,
                    index: usize,
                    storage: *const <#tuple as #st::candidates::Candidates>::Storage,
                ) -> U {
                    match index {
                        #(#idx => (self.#members)(&*(storage as *const #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<'a, U, #(#tys: 'a,)* #(#fns),*> #st::candidates::MatchMut<'a, #tuple, U> for (#(#fns,)*)
            where
                #(#fns: FnOnce(&'a mut #tys) -> U,)*
            {
                unsafe fn match_mut(
                    self,
                    index: usize,
                    storage: *mut <#tuple as #st::candidates::Candidates>::Storage,
                ) -> U {
                    match index {
                        #(#idx => (self.#members)(&mut *(storage as *mut #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }

            unsafe impl<U, #(#tys,)* #(#fns),*> #st::candidates::MatchOwned<#tuple, U> for (#(#fns,)*)
            where
                #(#fns: FnOnce(#tys) -> U,)*
            {
                unsafe fn match_owned(
                    self,
                    index: usize,
                    storage: *mut <#tuple as #st::candidates::Candidates>::Storage,
                ) -> U {
                    match index {
                        #(#idx => (self.#members)(core::ptr::read(storage as *mut #tys)),)*
                        _ => #st::unreachable_unchecked!(),
                    }
                }
            }
        }
    });
    quote!(#(#generator)*)
}
