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

pub fn gen_delegates(max: usize) -> proc_macro2::TokenStream {
    let st = crate::tl_mod();
    let generator = (0..=max).map(|i| {
        let argtys = (0..i).map(|i| format_ident!("A{i}")).collect::<Vec<_>>();
        let args = (0..i).map(|i| format_ident!("a{i}")).collect::<Vec<_>>();
        let sig = quote!(fn(#(#argtys),*) -> R);
        quote! {
            impl<R #(, #argtys)*> #st::delegate::Signature for #sig {
                type Stub = unsafe fn(*const (), *const () #(, #argtys)*) -> R;
                fn stub_addr(stub: Self::Stub) -> usize {
                    stub as usize
                }
            }

            impl<'a, R #(, #argtys)*> #st::delegate::Delegate<'a, #sig> {
                /// Binds a callable (closure, lambda or function item) by reference.
                pub fn new<F: Fn(#(#argtys),*) -> R + 'a>(callable: &'a F) -> Self {
                    #[allow(clippy::too_many_arguments)]
                    unsafe fn stub<F: Fn(#(#argtys),*) -> R, R #(, #argtys)*>(
                        object: *const (),
                        _: *const () #(, #args: #argtys)*
                    ) -> R {
                        (*(object as *const F))(#(#args),*)
                    }
                    unsafe {
                        Self::from_raw_parts(
                            callable as *const F as *const (),
                            core::ptr::null(),
                            stub::<F, R #(, #argtys)*>,
                        )
                    }
                }
                /// Binds a free function.
                pub fn from_fn(function: #sig) -> Self {
                    #[allow(clippy::too_many_arguments)]
                    unsafe fn stub<R #(, #argtys)*>(
                        _: *const (),
                        function: *const () #(, #args: #argtys)*
                    ) -> R {
                        let function: fn(#(#argtys),*) -> R = core::mem::transmute_copy(&function);
                        function(#(#args),*)
                    }
                    unsafe {
                        Self::from_raw_parts(
                            core::ptr::null(),
                            function as *const (),
                            stub::<R #(, #argtys)*>,
                        )
                    }
                }
                /// Binds `method` to `instance`.
                pub fn from_method<T>(instance: &'a T, method: fn(&T #(, #argtys)*) -> R) -> Self {
                    #[allow(clippy::too_many_arguments)]
                    unsafe fn stub<T, R #(, #argtys)*>(
                        object: *const (),
                        method: *const () #(, #args: #argtys)*
                    ) -> R {
                        let method: fn(&T #(, #argtys)*) -> R = core::mem::transmute_copy(&method);
                        method(&*(object as *const T) #(, #args)*)
                    }
                    unsafe {
                        Self::from_raw_parts(
                            instance as *const T as *const (),
                            method as *const (),
                            stub::<T, R #(, #argtys)*>,
                        )
                    }
                }
                /// Rebinds to `callable`.
                pub fn set<F: Fn(#(#argtys),*) -> R + 'a>(&mut self, callable: &'a F) {
                    *self = Self::new(callable)
                }
                /// Rebinds to a free function.
                pub fn set_fn(&mut self, function: #sig) {
                    *self = Self::from_fn(function)
                }
                /// Rebinds to `method` on `instance`.
                pub fn set_method<T>(&mut self, instance: &'a T, method: fn(&T #(, #argtys)*) -> R) {
                    *self = Self::from_method(instance, method)
                }
                /// Invokes the bound callable.
                ///
                /// # Panics
                /// Raises `delegate:uninitialised` if nothing is bound.
                #[track_caller]
                #[allow(clippy::too_many_arguments)]
                pub fn call(&self #(, #args: #argtys)*) -> R {
                    match self.stub() {
                        Some(stub) => unsafe { stub(self.object(), self.function() #(, #args)*) },
                        None => #st::failure::raise(#st::failure::Condition::DelegateUninitialised),
                    }
                }
                /// Invokes the bound callable if there is one.
                #[allow(clippy::too_many_arguments)]
                pub fn call_if(&self #(, #args: #argtys)*) -> #st::optional::Optional<R> {
                    match self.stub() {
                        Some(stub) => #st::optional::Optional::some(unsafe {
                            stub(self.object(), self.function() #(, #args)*)
                        }),
                        None => #st::optional::Optional::new(),
                    }
                }
                /// Invokes the bound callable, or `alternative` if nothing is bound.
                #[allow(clippy::too_many_arguments)]
                pub fn call_or<Alt: FnOnce(#(#argtys),*) -> R>(&self, alternative: Alt #(, #args: #argtys)*) -> R {
                    match self.stub() {
                        Some(stub) => unsafe { stub(self.object(), self.function() #(, #args)*) },
                        None => alternative(#(#args),*),
                    }
                }
            }
        }
    });
    quote!(#(#generator)*)
}
