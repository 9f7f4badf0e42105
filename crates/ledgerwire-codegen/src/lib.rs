// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 ledgerwire contributors

extern crate proc_macro;

use proc_macro::TokenStream;
use std::collections::HashSet;

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use sha2::{Digest, Sha256};
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DataEnum, DataStruct, DeriveInput, Expr,
    ExprArray, Fields, Generics, Lit, LitStr, Type,
};

/// Largest ordinal representable in the one-byte union tag, plus one.
const MAX_VARIANTS: usize = 256;

/// Record-level items generated next to the per-field ones.
const RECORD_SIZE_FILTER: &str = "record_size_filter";
const RECORD_DISCRIMINATOR_FILTER: &str = "record_discriminator_filter";

/// Where a record's 8-byte discriminator comes from.
enum DiscriminatorSource {
    /// `sha256("<namespace>:<name>")[..8]`
    Hashed { namespace: &'static str, name: String },
    /// Caller-supplied constant.
    Fixed([u8; 8]),
}

impl DiscriminatorSource {
    fn bytes(&self) -> [u8; 8] {
        match self {
            DiscriminatorSource::Hashed { namespace, name } => {
                let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(&digest[..8]);
                bytes
            }
            DiscriminatorSource::Fixed(bytes) => *bytes,
        }
    }
}

/// Per-field information collected from the struct definition.
struct FieldInfo {
    ident: syn::Ident,
    ty: Type,
    /// Width known without evaluating the value (offsets of later fields
    /// are static only while every earlier field is fixed).
    fixed: bool,
}

/// `#[derive(Layout)]`: generates the little-endian record layout for a
/// struct or a tagged union for an enum.
///
/// Structs (named fields, or unit) get:
/// - `Encode`/`Decode` impls writing fields in declaration order
/// - `<FIELD>_OFFSET` constants for every field whose offset is static
/// - `<field>_filter(&value)` offset filters for those fields
/// - `BYTES: Option<usize>` and `record_size_filter()` for fixed-width records
/// - `DISCRIMINATOR` and `record_discriminator_filter()` for discriminated
///   records
///
/// Type parameters are bounded by `Encode` / `Decode` in the matching impls.
///
/// Struct attributes selecting a discriminator prefix:
/// - `#[layout(account)]` / `#[layout(account = "Name")]`
/// - `#[layout(event)]` / `#[layout(event = "Name")]`
/// - `#[layout(instruction)]` / `#[layout(instruction = "method_name")]`
/// - `#[layout(discriminator = [b0, b1, b2, b3, b4, b5, b6, b7])]`
///
/// Field attribute `#[layout(fixed)]` marks a field of a user type (a
/// fixed record or union) as fixed-width so later offsets stay static.
///
/// Enums become tagged unions with a one-byte ordinal equal to the variant's
/// declaration index. Explicit discriminant values are rejected.
///
/// Example:
/// ```ignore
/// use ledgerwire::{Identifier, Layout};
///
/// #[derive(Layout)]
/// #[layout(account)]
/// struct BondingCurve {
///     virtual_token_reserves: i64,
///     virtual_sol_reserves: i64,
///     real_token_reserves: i64,
///     real_sol_reserves: i64,
///     token_total_supply: i64,
///     complete: bool,
/// }
///
/// assert_eq!(BondingCurve::COMPLETE_OFFSET, 48);
/// assert_eq!(BondingCurve::BYTES, Some(49));
/// ```
#[proc_macro_derive(Layout, attributes(layout))]
pub fn derive_layout(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let result = match &input.data {
        Data::Struct(data) => expand_struct(&input, data),
        Data::Enum(data) => expand_enum(&input, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Layout cannot be derived for untagged unions",
        )),
    };

    result.unwrap_or_else(syn::Error::into_compile_error).into()
}

/// Copy of `generics` with `bound` added to every type parameter.
fn with_bound(generics: &Generics, bound: &TokenStream2) -> Generics {
    let mut bounded = generics.clone();
    let params: Vec<syn::Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    let where_clause = bounded.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote!(#param: #bound));
    }
    bounded
}

// ============================================================================
// Structs
// ============================================================================

#[allow(clippy::too_many_lines)]
fn expand_struct(input: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let encode_generics = with_bound(&input.generics, &quote!(::ledgerwire::Encode));
    let (encode_impl, _, encode_where) = encode_generics.split_for_impl();
    let decode_generics = with_bound(&input.generics, &quote!(::ledgerwire::Decode));
    let (decode_impl, _, decode_where) = decode_generics.split_for_impl();
    let discriminator = parse_struct_attrs(&input.attrs, name)?;

    let fields = match &data.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field.ident.clone().ok_or_else(|| {
                    syn::Error::new_spanned(field, "Field must have a name")
                })?;
                let fixed = parse_field_fixed(&field.attrs)? || is_fixed_type(&field.ty);
                Ok(FieldInfo {
                    ident,
                    ty: field.ty.clone(),
                    fixed,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?,
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &data.fields,
                "Only named fields are supported",
            ))
        }
    };

    let disc_len = if discriminator.is_some() {
        quote! { ::ledgerwire::config::DISCRIMINATOR_LEN }
    } else {
        quote! { 0usize }
    };

    // Offsets are static up to and including the first variable field.
    let mut offset_items = Vec::new();
    let mut prefix: Vec<TokenStream2> = Vec::new();
    let mut taken: HashSet<String> = [
        RECORD_SIZE_FILTER,
        RECORD_DISCRIMINATOR_FILTER,
        "BYTES",
        "DISCRIMINATOR",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    for field in &fields {
        let ty = &field.ty;
        let const_name = format_ident!("{}_OFFSET", field.ident.unraw().to_string().to_uppercase());
        let filter_name = format_ident!("{}_filter", field.ident.unraw());
        for generated in [const_name.to_string(), filter_name.to_string()] {
            if !taken.insert(generated.clone()) {
                return Err(syn::Error::new_spanned(
                    &field.ident,
                    format!("field generates `{generated}`, which is already defined for `{name}`"),
                ));
            }
        }
        let field_doc = format!("Byte offset of `{}`.", field.ident.unraw());
        offset_items.push(quote! {
            #[doc = #field_doc]
            pub const #const_name: usize = #disc_len #(+ #prefix)*;

            /// Offset filter matching records whose field equals `value`.
            pub fn #filter_name(value: &#ty) -> ::ledgerwire::Result<::ledgerwire::Filter> {
                ::ledgerwire::Filter::memcmp_value(Self::#const_name, value)
            }
        });
        if !field.fixed {
            break;
        }
        prefix.push(quote! {
            ::ledgerwire::codec::fixed_width(<#ty as ::ledgerwire::Encode>::FIXED_LEN)
        });
    }

    let field_types: Vec<&Type> = fields.iter().map(|f| &f.ty).collect();
    let field_idents: Vec<&syn::Ident> = fields.iter().map(|f| &f.ident).collect();
    let locals: Vec<syn::Ident> = fields
        .iter()
        .map(|f| format_ident!("__f_{}", f.ident.unraw()))
        .collect();

    let disc_fixed = if discriminator.is_some() {
        quote! { ::core::option::Option::Some(::ledgerwire::config::DISCRIMINATOR_LEN) }
    } else {
        quote! { ::core::option::Option::Some(0usize) }
    };

    let record_size_filter = format_ident!("{}", RECORD_SIZE_FILTER);
    let record_discriminator_filter = format_ident!("{}", RECORD_DISCRIMINATOR_FILTER);

    // Discriminator items need no bounds on type parameters, so they live in
    // their own impl blocks.
    let (discriminator_items, encode_disc, decode_disc) = match &discriminator {
        Some(source) => {
            let bytes = source.bytes().to_vec();
            (
                quote! {
                    impl #impl_generics #name #ty_generics #where_clause {
                        /// 8-byte prefix identifying this record type.
                        pub const DISCRIMINATOR: ::ledgerwire::Discriminator =
                            ::ledgerwire::Discriminator::new([#(#bytes),*]);

                        /// Offset-0 filter selecting records of this type.
                        pub fn #record_discriminator_filter() -> ::ledgerwire::Filter {
                            Self::DISCRIMINATOR.filter()
                        }
                    }

                    impl #impl_generics ::ledgerwire::Discriminated for #name #ty_generics #where_clause {
                        const DISCRIMINATOR: ::ledgerwire::Discriminator =
                            ::ledgerwire::Discriminator::new([#(#bytes),*]);
                    }
                },
                quote! {
                    ::ledgerwire::Encode::encode(
                        &<Self as ::ledgerwire::Discriminated>::DISCRIMINATOR,
                        __out,
                    )?;
                },
                quote! {
                    ::ledgerwire::envelope::expect_discriminator(
                        __input,
                        &<Self as ::ledgerwire::Discriminated>::DISCRIMINATOR,
                    )?;
                },
            )
        }
        None => (quote! {}, quote! {}, quote! {}),
    };

    let construct = match &data.fields {
        Fields::Unit => quote! { Self },
        _ => quote! { Self { #(#field_idents: #locals),* } },
    };

    Ok(quote! {
        #discriminator_items

        impl #encode_impl #name #ty_generics #encode_where {
            #(#offset_items)*

            /// Encoded width when every field is fixed-width.
            pub const BYTES: ::core::option::Option<usize> = ::ledgerwire::codec::sum_fixed(&[
                #disc_fixed,
                #(<#field_types as ::ledgerwire::Encode>::FIXED_LEN),*
            ]);

            /// Record-size filter, available for fixed-width records only.
            pub fn #record_size_filter() -> ::core::option::Option<::ledgerwire::Filter> {
                Self::BYTES.map(::ledgerwire::Filter::data_size)
            }
        }

        impl #encode_impl ::ledgerwire::Encode for #name #ty_generics #encode_where {
            const FIXED_LEN: ::core::option::Option<usize> = Self::BYTES;

            fn encoded_len(&self) -> usize {
                #disc_len #(+ ::ledgerwire::Encode::encoded_len(&self.#field_idents))*
            }

            fn encode(&self, __out: &mut ::ledgerwire::CursorMut<'_>) -> ::ledgerwire::Result<()> {
                #encode_disc
                #(::ledgerwire::Encode::encode(&self.#field_idents, __out)?;)*
                ::core::result::Result::Ok(())
            }
        }

        impl #decode_impl ::ledgerwire::Decode for #name #ty_generics #decode_where {
            const MIN_LEN: usize = #disc_len #(+ <#field_types as ::ledgerwire::Decode>::MIN_LEN)*;

            fn decode(__input: &mut ::ledgerwire::Cursor<'_>) -> ::ledgerwire::Result<Self> {
                #decode_disc
                #(let #locals = <#field_types as ::ledgerwire::Decode>::decode(__input)?;)*
                ::core::result::Result::Ok(#construct)
            }
        }
    })
}

fn parse_struct_attrs(attrs: &[Attribute], name: &syn::Ident) -> syn::Result<Option<DiscriminatorSource>> {
    let mut source = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("layout")) {
        attr.parse_nested_meta(|meta| {
            let parsed = if meta.path.is_ident("account") {
                DiscriminatorSource::Hashed {
                    namespace: "account",
                    name: optional_name(&meta)?.unwrap_or_else(|| name.unraw().to_string()),
                }
            } else if meta.path.is_ident("event") {
                DiscriminatorSource::Hashed {
                    namespace: "event",
                    name: optional_name(&meta)?.unwrap_or_else(|| name.unraw().to_string()),
                }
            } else if meta.path.is_ident("instruction") {
                DiscriminatorSource::Hashed {
                    namespace: "global",
                    name: optional_name(&meta)?
                        .unwrap_or_else(|| to_snake_case(&name.unraw().to_string())),
                }
            } else if meta.path.is_ident("discriminator") {
                let array: ExprArray = meta.value()?.parse()?;
                DiscriminatorSource::Fixed(parse_discriminator_bytes(&array)?)
            } else {
                return Err(meta.error(
                    "expected `account`, `event`, `instruction` or `discriminator = [..]`",
                ));
            };
            if source.is_some() {
                return Err(meta.error("a record has at most one discriminator"));
            }
            source = Some(parsed);
            Ok(())
        })?;
    }
    Ok(source)
}

fn optional_name(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        Ok(Some(lit.value()))
    } else {
        Ok(None)
    }
}

fn parse_discriminator_bytes(array: &ExprArray) -> syn::Result<[u8; 8]> {
    if array.elems.len() != 8 {
        return Err(syn::Error::new_spanned(
            array,
            format!("discriminator must have 8 bytes, found {}", array.elems.len()),
        ));
    }
    let mut bytes = [0u8; 8];
    for (slot, elem) in bytes.iter_mut().zip(array.elems.iter()) {
        *slot = match elem {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Int(int) => int.base10_parse::<u8>()?,
                _ => return Err(syn::Error::new_spanned(elem, "expected a u8 literal")),
            },
            _ => return Err(syn::Error::new_spanned(elem, "expected a u8 literal")),
        };
    }
    Ok(bytes)
}

fn parse_field_fixed(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut fixed = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("layout")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("fixed") {
                fixed = true;
                Ok(())
            } else {
                Err(meta.error("expected `fixed`"))
            }
        })?;
    }
    Ok(fixed)
}

/// Types whose width is known from the type name alone.
fn is_fixed_type(ty: &Type) -> bool {
    match ty {
        Type::Array(array) => is_fixed_type(&array.elem),
        Type::Group(group) => is_fixed_type(&group.elem),
        Type::Paren(paren) => is_fixed_type(&paren.elem),
        Type::Path(path) if path.qself.is_none() => {
            let Some(segment) = path.path.segments.last() else {
                return false;
            };
            segment.arguments.is_empty()
                && matches!(
                    segment.ident.to_string().as_str(),
                    "u8" | "u16"
                        | "u32"
                        | "u64"
                        | "u128"
                        | "i8"
                        | "i16"
                        | "i32"
                        | "i64"
                        | "i128"
                        | "bool"
                        | "Identifier"
                        | "Discriminator"
                )
        }
        _ => false,
    }
}

/// `InitializeFarm` -> `initialize_farm`
fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Enums (tagged unions)
// ============================================================================

#[allow(clippy::too_many_lines)]
fn expand_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let type_name = name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let encode_generics = with_bound(&input.generics, &quote!(::ledgerwire::Encode));
    let (encode_impl, _, encode_where) = encode_generics.split_for_impl();
    let decode_generics = with_bound(&input.generics, &quote!(::ledgerwire::Decode));
    let (decode_impl, _, decode_where) = decode_generics.split_for_impl();

    if let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("layout")) {
        return Err(syn::Error::new_spanned(
            attr,
            "discriminator attributes apply to structs only",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "a tagged union needs at least one variant",
        ));
    }
    if data.variants.len() > MAX_VARIANTS {
        return Err(syn::Error::new_spanned(
            name,
            format!(
                "a tagged union supports at most {MAX_VARIANTS} variants, found {}",
                data.variants.len()
            ),
        ));
    }

    let mut ordinal_arms = Vec::new();
    let mut len_arms = Vec::new();
    let mut encode_arms = Vec::new();
    let mut decode_arms = Vec::new();
    let mut payload_fixed = Vec::new();
    let mut payload_min = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        if let Some((_, expr)) = &variant.discriminant {
            return Err(syn::Error::new_spanned(
                expr,
                "ordinals follow declaration order; explicit discriminants are not supported",
            ));
        }
        if let Some(attr) = variant.attrs.iter().find(|a| a.path().is_ident("layout")) {
            return Err(syn::Error::new_spanned(attr, "unexpected layout attribute on variant"));
        }
        let ordinal = u8::try_from(index)
            .map_err(|_| syn::Error::new_spanned(variant, "variant ordinal exceeds u8"))?;
        let v = &variant.ident;
        let types: Vec<&Type> = variant.fields.iter().map(|f| &f.ty).collect();
        let binds: Vec<syn::Ident> = (0..types.len())
            .map(|i| syn::Ident::new(&format!("__f{i}"), Span::call_site()))
            .collect();

        let pattern = match &variant.fields {
            Fields::Unit => quote! { #name::#v },
            Fields::Unnamed(_) => quote! { #name::#v(#(#binds),*) },
            Fields::Named(named) => {
                let idents = named.named.iter().filter_map(|f| f.ident.as_ref());
                quote! { #name::#v { #(#idents: #binds),* } }
            }
        };
        let construct = match &variant.fields {
            Fields::Unit => quote! { #name::#v },
            Fields::Unnamed(_) => quote! {
                #name::#v(#(<#types as ::ledgerwire::Decode>::decode(__input)?),*)
            },
            Fields::Named(named) => {
                let idents = named.named.iter().filter_map(|f| f.ident.as_ref());
                quote! {
                    #name::#v { #(#idents: <#types as ::ledgerwire::Decode>::decode(__input)?),* }
                }
            }
        };

        ordinal_arms.push(match &variant.fields {
            Fields::Unit => quote! { #name::#v => #ordinal },
            Fields::Unnamed(_) => quote! { #name::#v(..) => #ordinal },
            Fields::Named(_) => quote! { #name::#v { .. } => #ordinal },
        });
        len_arms.push(quote! {
            #pattern => 0usize #(+ ::ledgerwire::Encode::encoded_len(#binds))*
        });
        encode_arms.push(quote! {
            #pattern => ::ledgerwire::codec::write_variant(__out, #ordinal, |__out| {
                #(::ledgerwire::Encode::encode(#binds, __out)?;)*
                ::core::result::Result::Ok(())
            })
            .map(|_| ())
        });
        decode_arms.push(quote! {
            #ordinal => ::core::result::Result::Ok(#construct)
        });
        payload_fixed.push(quote! {
            ::ledgerwire::codec::sum_fixed(&[#(<#types as ::ledgerwire::Encode>::FIXED_LEN),*])
        });
        payload_min.push(quote! {
            0usize #(+ <#types as ::ledgerwire::Decode>::MIN_LEN)*
        });
    }

    let variant_count = data.variants.len();

    Ok(quote! {
        impl #impl_generics ::ledgerwire::TaggedUnion for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const VARIANT_COUNT: usize = #variant_count;

            fn ordinal(&self) -> u8 {
                match self {
                    #(#ordinal_arms,)*
                }
            }
        }

        impl #encode_impl ::ledgerwire::Encode for #name #ty_generics #encode_where {
            const FIXED_LEN: ::core::option::Option<usize> =
                ::ledgerwire::codec::union_fixed_len(&[#(#payload_fixed),*]);

            fn encoded_len(&self) -> usize {
                ::ledgerwire::config::ORDINAL_LEN + match self {
                    #(#len_arms,)*
                }
            }

            fn encode(&self, __out: &mut ::ledgerwire::CursorMut<'_>) -> ::ledgerwire::Result<()> {
                match self {
                    #(#encode_arms,)*
                }
            }
        }

        impl #decode_impl ::ledgerwire::Decode for #name #ty_generics #decode_where {
            const MIN_LEN: usize =
                ::ledgerwire::config::ORDINAL_LEN + ::ledgerwire::codec::min_of(&[#(#payload_min),*]);

            fn decode(__input: &mut ::ledgerwire::Cursor<'_>) -> ::ledgerwire::Result<Self> {
                let __ordinal = __input.read_u8()?;
                match __ordinal {
                    #(#decode_arms,)*
                    _ => ::core::result::Result::Err(
                        ::ledgerwire::codec::unknown_ordinal(#type_name, __ordinal),
                    ),
                }
            }
        }
    })
}
