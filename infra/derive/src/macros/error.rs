use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, Type, Variant};

struct VariantMeta<'a> {
    ident: &'a Ident,
    source_ty: Option<&'a Type>,
    source_field: Option<&'a Ident>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand_derive(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let vis = &input.vis;
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return quote! { compile_error!("switcharoo_error can only be applied to enums"); };
    };

    let variants: Vec<VariantMeta<'_>> = match data.variants.iter().map(parse_variant).collect() {
        Ok(v) => v,
        Err(err) => return err,
    };
    if let Some(err) = missing_context_error(&variants) {
        return err;
    }

    let derived = derived_trait_names(&input);
    let mut derive_tokens = Vec::new();
    if !derived.contains("Debug") {
        derive_tokens.push(quote! { Debug });
    }
    if !derived.contains("Error") {
        derive_tokens.push(quote! { ::thiserror::Error });
    }
    let extra_derives = if derive_tokens.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derive_tokens),*)] }
    };

    let context_impl = generate_context_trait(name, &trait_name, &variants);
    let from_impls = variants.iter().filter_map(|v| generate_from_impl(name, &trait_name, v));
    let internal_impls = generate_internal_impls(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        /// Result alias bound to this module's error type.
        #[allow(dead_code, unreachable_pub)]
        #vis type Result<T, E = #name> = ::std::result::Result<T, E>;

        #context_impl
        #(#from_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn parse_variant(v: &Variant) -> Result<VariantMeta<'_>, TokenStream> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            v,
            "switcharoo_error requires named fields for source/context handling",
        )
        .to_compile_error());
    };

    let context_field = find_context_field(fields)?;
    let source_field = find_source_field(fields);
    let cfg_attrs = v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect();

    Ok(VariantMeta {
        ident: &v.ident,
        source_ty: source_field.map(|field| &field.ty),
        source_field: source_field.and_then(|field| field.ident.as_ref()),
        has_context: context_field.is_some(),
        cfg_attrs,
    })
}

fn find_context_field(fields: &syn::FieldsNamed) -> Result<Option<&syn::Field>, TokenStream> {
    let Some(field) =
        fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|ident| ident == "context"))
    else {
        return Ok(None);
    };

    if !is_context_type(&field.ty) {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "context field must be Option<Cow<'static, str>>",
        )
        .to_compile_error());
    }
    Ok(Some(field))
}

fn find_source_field(fields: &syn::FieldsNamed) -> Option<&syn::Field> {
    fields.named.iter().find(|field| {
        let is_source_name = field.ident.as_ref().is_some_and(|ident| ident == "source");
        is_source_name || field_has_attr(field, "source") || field_has_attr(field, "from")
    })
}

fn generate_context_trait(
    name: &Ident,
    trait_name: &Ident,
    variants: &[VariantMeta<'_>],
) -> TokenStream {
    let context_variants = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            /// Attaches a human-readable context to the error, if any.
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for ::std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #context_variants )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn generate_from_impl(
    name: &Ident,
    trait_name: &Ident,
    v: &VariantMeta<'_>,
) -> Option<TokenStream> {
    if v.ident == "Internal" {
        return None;
    }
    let source_ty = v.source_ty?;
    let source_field = v.source_field?;
    let v_ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#source_ty> for #name {
            #[inline]
            fn from(#source_field: #source_ty) -> Self { Self::#v_ident { #source_field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for ::std::result::Result<T, #source_ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name> {
                self.map_err(|#source_field| #name::#v_ident { #source_field, context: Some(context.into()) })
            }
        }
    })
}

fn generate_internal_impls(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == "Internal") else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn field_has_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(input: &DeriveInput) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

fn missing_context_error(variants: &[VariantMeta<'_>]) -> Option<TokenStream> {
    variants.iter().find(|v| v.source_ty.is_some() && !v.has_context).map(|v| {
        syn::Error::new_spanned(
            v.ident,
            "switcharoo_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        )
        .to_compile_error()
    })
}

/// Returns the last path segment of a type path, if the type is a path.
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last()
}

/// Matches `Option<Cow<'static, str>>` (any path prefix).
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|seg| seg.ident == "Option") else {
        return false;
    };
    let PathArguments::AngleBracketed(args) = &option.arguments else {
        return false;
    };
    let Some(GenericArgument::Type(inner)) = args.args.first() else {
        return false;
    };
    let Some(cow) = last_segment(inner).filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let PathArguments::AngleBracketed(cow_args) = &cow.arguments else {
        return false;
    };

    let mut cow_args = cow_args.args.iter();
    let is_static = matches!(cow_args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let is_str = matches!(
        cow_args.next(),
        Some(GenericArgument::Type(str_ty)) if last_segment(str_ty).is_some_and(|seg| seg.ident == "str")
    );

    is_static && is_str
}
