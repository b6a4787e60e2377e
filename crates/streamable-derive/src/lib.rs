// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

/// `#[derive(Streamable)]` macro: checks the record contract and generates
/// the `Streamable` impl in one step.
///
/// Accepted: structs with named fields, `struct X {}` and unit structs,
/// whose field types are themselves `Streamable`.
///
/// The generated `stream`, `parse` and `from_json` resolve the record's
/// memoized schema first, so a record whose schema fails at runtime (one
/// that contains itself through another record) cannot be encoded or
/// decoded.
///
/// Rejected with a compile error pointing at the offending item:
/// - enums, unions, tuple structs and generic structs
/// - signed, floating-point and platform-sized numbers, `char`
/// - maps and sets, `Result`
/// - interior mutability (`Cell`, `RefCell`, `Mutex`, `RwLock`, atomics)
/// - references and raw arrays (use `BytesN`)
/// - any field type that mentions the record itself
///
/// Example:
/// ```ignore
/// use streamable::{Bytes32, Streamable};
///
/// #[derive(Streamable)]
/// struct Coin {
///     parent_coin_info: Bytes32,
///     puzzle_hash: Bytes32,
///     amount: u64,
/// }
/// ```
#[proc_macro_derive(Streamable)]
pub fn derive_streamable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Streamable records cannot be generic: the schema must follow from the declaration alone",
        ));
    }

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &data.fields,
                    "tuple structs are not supported; name every field",
                ))
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "enums are not supported; use Option for optional data",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "unions are not supported",
            ))
        }
    };

    let mut idents = Vec::with_capacity(fields.len());
    let mut names = Vec::with_capacity(fields.len());
    let mut tys = Vec::with_capacity(fields.len());
    for field in &fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "field must have a name"));
        };
        check_field_type(&field.ty, name)?;
        idents.push(ident);
        names.push(ident.unraw().to_string());
        tys.push(&field.ty);
    }

    Ok(quote! {
        impl ::streamable::Streamable for #name {
            const MIN_SIZE: usize = 0 #(+ <#tys as ::streamable::Streamable>::MIN_SIZE)*;

            fn type_node() -> ::core::result::Result<::streamable::TypeNode, ::streamable::SchemaError> {
                ::streamable::registry::record_schema::<Self>(|| {
                    ::streamable::RecordSchema::builder(#name_str)
                        #(
                            .field(
                                #names,
                                <#tys as ::streamable::Streamable>::type_node()
                                    .map_err(|e| e.within(#names))?,
                            )
                        )*
                        .build()
                })
                .map(::streamable::TypeNode::Record)
            }

            #[allow(unused_variables)]
            fn stream(
                &self,
                __out: &mut ::std::vec::Vec<u8>,
            ) -> ::core::result::Result<(), ::streamable::EncodeError> {
                <Self as ::streamable::Streamable>::type_node()?;
                #(
                    ::streamable::Streamable::stream(&self.#idents, __out)
                        .map_err(|e| e.within(#names))?;
                )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn parse(
                __cursor: &mut ::streamable::Cursor<'_>,
            ) -> ::core::result::Result<Self, ::streamable::ParseError> {
                <Self as ::streamable::Streamable>::type_node()?;
                #(
                    let #idents = <#tys as ::streamable::Streamable>::parse(__cursor)
                        .map_err(|e| e.within(#names))?;
                )*
                Ok(Self { #(#idents),* })
            }

            #[allow(unused_mut)]
            fn to_json(&self) -> ::streamable::serde_json::Value {
                let mut __map = ::streamable::serde_json::Map::new();
                #(
                    __map.insert(
                        ::std::string::String::from(#names),
                        ::streamable::Streamable::to_json(&self.#idents),
                    );
                )*
                ::streamable::serde_json::Value::Object(__map)
            }

            #[allow(unused_variables)]
            fn from_json(
                __json: &::streamable::serde_json::Value,
            ) -> ::core::result::Result<Self, ::streamable::ConversionError> {
                <Self as ::streamable::Streamable>::type_node()?;
                let __map = ::streamable::ser::json::expect_object(__json, #name_str, &[#(#names),*])?;
                #(
                    let #idents = <#tys as ::streamable::Streamable>::from_json(
                        ::streamable::ser::json::field(__map, #names)?,
                    )
                    .map_err(|e| e.within(#names))?;
                )*
                Ok(Self { #(#idents),* })
            }
        }
    })
}

/// Reject field types outside the codec's closed set, recursing into
/// generic arguments and tuples.
fn check_field_type(ty: &Type, record: &syn::Ident) -> syn::Result<()> {
    match ty {
        Type::Path(type_path) => {
            if type_path.qself.is_some() {
                return Err(syn::Error::new_spanned(ty, "qualified paths are not supported"));
            }
            for segment in &type_path.path.segments {
                if segment.ident == "Self" || segment.ident == *record {
                    return Err(syn::Error::new_spanned(
                        ty,
                        format!("record `{record}` cannot contain itself"),
                    ));
                }
            }
            let Some(last) = type_path.path.segments.last() else {
                return Ok(());
            };
            if let Some(reason) = rejected_reason(&last.ident.to_string()) {
                return Err(syn::Error::new_spanned(ty, reason));
            }
            if let PathArguments::AngleBracketed(args) = &last.arguments {
                for arg in &args.args {
                    if let GenericArgument::Type(inner) = arg {
                        check_field_type(inner, record)?;
                    }
                }
            }
            Ok(())
        }
        Type::Tuple(tuple) => {
            if tuple.elems.is_empty() {
                return Err(syn::Error::new_spanned(ty, "the unit type has no encoding"));
            }
            for elem in &tuple.elems {
                check_field_type(elem, record)?;
            }
            Ok(())
        }
        Type::Paren(paren) => check_field_type(&paren.elem, record),
        Type::Group(group) => check_field_type(&group.elem, record),
        Type::Reference(_) => Err(syn::Error::new_spanned(
            ty,
            "references are not supported; records own their data",
        )),
        Type::Array(_) => Err(syn::Error::new_spanned(
            ty,
            "raw arrays are not supported; use BytesN for fixed-size bytes",
        )),
        _ => Err(syn::Error::new_spanned(ty, "unsupported field type")),
    }
}

fn rejected_reason(ident: &str) -> Option<&'static str> {
    let reason = match ident {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" => {
            "signed integers are not supported; use u8, u16, u32, u64 or u128"
        }
        "usize" => "usize has no fixed width; use u32 or u64",
        "f32" | "f64" => "floating point is not supported",
        "char" => "char is not supported; use String",
        "HashMap" | "BTreeMap" | "HashSet" | "BTreeSet" | "IndexMap" | "IndexSet" => {
            "maps and sets are not supported; use Vec of tuples"
        }
        "Result" => "Result is not supported; only Option may express absence",
        "Cell" | "RefCell" | "UnsafeCell" | "OnceCell" | "Mutex" | "RwLock" => {
            "interior mutability is not allowed in an immutable record"
        }
        other if other.starts_with("Atomic") => {
            "interior mutability is not allowed in an immutable record"
        }
        _ => return None,
    };
    Some(reason)
}
