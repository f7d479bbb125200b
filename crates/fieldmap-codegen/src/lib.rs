// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Visibility};

/// Per-field settings read from `#[reflect(...)]`.
#[derive(Default)]
struct FieldAttrs {
    embed: bool,
    tags: Vec<(String, String)>,
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("embed") {
                attrs.embed = true;
                return Ok(());
            }
            if meta.path.is_ident("tag") {
                return meta.parse_nested_meta(|tag| {
                    let Some(key) = tag.path.get_ident() else {
                        return Err(tag.error("tag key must be an identifier"));
                    };
                    let value: LitStr = tag.value()?.parse()?;
                    attrs.tags.push((key.to_string(), value.value()));
                    Ok(())
                });
            }
            Err(meta.error("expected `embed` or `tag(key = \"value\", ...)`"))
        })?;
    }
    Ok(attrs)
}

/// `#[derive(Reflect)]` macro: generates `fieldmap::Reflect` + `fieldmap::Typed`
///
/// Supports structs with named fields. Every field is listed in declaration
/// order; only `pub` fields are exported; the rest keep their position but
/// are never mapped, and their types need not implement `Reflect`.
///
/// Field attributes:
/// - `#[reflect(embed)]`: anonymous composition, the field's own fields are
///   promoted into the enclosing record
/// - `#[reflect(tag(db = "name,opt", json = "..."))]`: metadata tags
///
/// The type must implement `Default`; exported field types must implement
/// `fieldmap::Typed`.
///
/// # Panics
///
/// Never panics; unsupported input is reported as a compile error.
///
/// Example:
/// ```ignore
/// use fieldmap::Reflect;
///
/// #[derive(Default, Reflect)]
/// pub struct Person {
///     #[reflect(tag(db = "name"))]
///     pub name: String,
///     #[reflect(embed)]
///     pub audit: Audit,
///     cache_key: u64,          // hidden
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "Generic records are not supported")
            .to_compile_error()
            .into();
    }

    let name = &input.ident;
    let type_name = name.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            Fields::Unit => {
                return expand(name, &type_name, &[]).into();
            }
            Fields::Unnamed(_) => {
                return syn::Error::new_spanned(&input, "Only named fields are supported")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Only structs are supported")
                .to_compile_error()
                .into()
        }
    };

    let mut field_infos = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            return syn::Error::new_spanned(field, "Field must have a name")
                .to_compile_error()
                .into();
        };
        let attrs = match parse_field_attrs(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };
        field_infos.push(FieldInfo {
            ident,
            ty: field.ty.clone(),
            exported: matches!(field.vis, Visibility::Public(_)),
            attrs,
        });
    }

    expand(name, &type_name, &field_infos).into()
}

struct FieldInfo {
    ident: syn::Ident,
    ty: syn::Type,
    exported: bool,
    attrs: FieldAttrs,
}

fn expand(name: &syn::Ident, type_name: &str, fields: &[FieldInfo]) -> proc_macro2::TokenStream {
    let defs: Vec<_> = fields
        .iter()
        .map(|f| {
            let name_str = f.ident.to_string();
            let ty = &f.ty;
            let type_fn = if f.exported {
                quote! { <#ty as ::fieldmap::Typed>::type_info }
            } else {
                quote! { <() as ::fieldmap::Typed>::type_info }
            };

            let mut def = quote! { ::fieldmap::FieldDef::new(#name_str, #type_fn) };
            if !f.attrs.tags.is_empty() {
                let keys = f.attrs.tags.iter().map(|(k, _)| k);
                let values = f.attrs.tags.iter().map(|(_, v)| v);
                def = quote! { #def.with_tags(&[#((#keys, #values)),*]) };
            }
            if f.attrs.embed {
                def = quote! { #def.embedded() };
            }
            if !f.exported {
                def = quote! { #def.hidden() };
            }
            def
        })
        .collect();

    let (indices, idents): (Vec<_>, Vec<_>) = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.exported)
        .map(|(i, f)| (i, &f.ident))
        .unzip();

    quote! {
        impl ::fieldmap::Reflect for #name {
            fn reflect_type(&self) -> ::fieldmap::TypeInfo {
                <Self as ::fieldmap::Typed>::type_info()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn indirect(&self) -> ::core::option::Option<&dyn ::fieldmap::Reflect> {
                ::core::option::Option::Some(self)
            }

            fn indirect_mut(&mut self) -> &mut dyn ::fieldmap::Reflect {
                self
            }

            #[allow(clippy::match_single_binding)]
            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::fieldmap::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn ::fieldmap::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(clippy::match_single_binding)]
            fn field_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::fieldmap::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn ::fieldmap::Reflect),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl ::fieldmap::Typed for #name {
            fn type_info() -> ::fieldmap::TypeInfo {
                static FIELDS: &[::fieldmap::FieldDef] = &[#(#defs),*];
                ::fieldmap::TypeInfo::record::<Self>(#type_name, FIELDS)
            }
        }
    }
}
