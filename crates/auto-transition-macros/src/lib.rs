//! Proc-macros for auto-transition.
//!
//! Currently provided:
//! - `#[derive(WithBuilders)]`: generates `with_<field>(...)` builder-style methods
//!   for each named field in a struct. Generated setters accept anything that
//!   converts `Into` the field type, so option structs can be fed plain numbers
//!   and strings.
//!
//! ## Field control
//! - `#[with_builders(skip)]`: no builder method for this field.
//! - `#[with_builders(exact)]`: the builder takes the field type itself instead of
//!   `impl Into<T>` (useful when inference through `Into` would be ambiguous).
//!
//! ### Example
//! ```ignore
//! use auto_transition_macros::WithBuilders;
//!
//! #[derive(Clone, Debug, WithBuilders)]
//! pub struct Options {
//!     pub duration: OptionValue,
//!     #[with_builders(exact)]
//!     pub retries: u32,
//!     #[with_builders(skip)]
//!     pub debug_only: bool,
//! }
//!
//! let o = Options::default().with_duration(0.5).with_retries(3);
//! // .with_debug_only(...) is NOT generated.
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields};

/// Derive that generates `with_<field>` builder methods for structs with named fields.
///
/// Generated methods take `self` by value (builder style) and return `Self`.
#[proc_macro_derive(WithBuilders, attributes(with_builders))]
pub fn derive_with_builders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = &input.ident;
    let generics = &input.generics;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(
            input.span(),
            "#[derive(WithBuilders)] only supports structs",
        )
        .to_compile_error()
        .into();
    };

    let Fields::Named(fields_named) = &data_struct.fields else {
        return syn::Error::new(
            data_struct.fields.span(),
            "#[derive(WithBuilders)] only supports structs with named fields",
        )
        .to_compile_error()
        .into();
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut methods = Vec::with_capacity(fields_named.named.len());
    for field in fields_named.named.iter() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let mode = match builder_mode(field) {
            Ok(mode) => mode,
            Err(err) => return err.to_compile_error().into(),
        };

        let field_ty = &field.ty;
        let method_ident = format_ident!("with_{}", field_ident);

        match mode {
            BuilderMode::Skip => continue,
            BuilderMode::Into => methods.push(quote! {
                #[inline]
                pub fn #method_ident(
                    mut self,
                    value: impl ::core::convert::Into<#field_ty>,
                ) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            }),
            BuilderMode::Exact => methods.push(quote! {
                #[inline]
                pub fn #method_ident(mut self, value: #field_ty) -> Self {
                    self.#field_ident = value;
                    self
                }
            }),
        }
    }

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    }
    .into()
}

enum BuilderMode {
    Into,
    Exact,
    Skip,
}

fn builder_mode(field: &syn::Field) -> syn::Result<BuilderMode> {
    let mut mode = BuilderMode::Into;

    for attr in &field.attrs {
        if !attr.path().is_ident("with_builders") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                mode = BuilderMode::Skip;
                Ok(())
            } else if meta.path.is_ident("exact") {
                mode = BuilderMode::Exact;
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `exact`"))
            }
        })?;
    }

    Ok(mode)
}
