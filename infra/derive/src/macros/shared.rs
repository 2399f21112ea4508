use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Fields, ItemStruct};

pub fn expand_shared(input: ItemStruct) -> TokenStream {
    if !matches!(input.fields, Fields::Named(_)) {
        return syn::Error::new_spanned(&input, "shared requires a struct with named fields")
            .to_compile_error();
    }

    let wrapper_ident = &input.ident;
    let vis = &input.vis;
    let fields = &input.fields;
    let attrs = &input.attrs;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let inner_ident = format_ident!("{wrapper_ident}Inner");

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner_ident #generics #where_clause #fields

        #vis struct #wrapper_ident #generics #where_clause {
            inner: ::std::sync::Arc<#inner_ident #ty_generics>,
        }

        impl #impl_generics #wrapper_ident #ty_generics #where_clause {
            #[must_use]
            pub fn new(inner: #inner_ident #ty_generics) -> Self {
                Self { inner: ::std::sync::Arc::new(inner) }
            }
        }

        impl #impl_generics ::std::clone::Clone for #wrapper_ident #ty_generics #where_clause {
            fn clone(&self) -> Self {
                Self { inner: ::std::sync::Arc::clone(&self.inner) }
            }
        }

        impl #impl_generics ::std::fmt::Debug for #wrapper_ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!(#wrapper_ident)).finish_non_exhaustive()
            }
        }

        impl #impl_generics ::std::ops::Deref for #wrapper_ident #ty_generics #where_clause {
            type Target = #inner_ident #ty_generics;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }
    }
}
