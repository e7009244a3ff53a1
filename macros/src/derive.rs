//! Implementation of `#[derive(Encoded)]` and `#[derive(EncodedRecord)]`

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Ident, Type, parse_macro_input};

pub fn derive_encoded_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand_encoded(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

pub fn derive_encoded_record_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand_encoded_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A named field: binding identifier, schema name and Rust type.
struct FieldInfo {
    ident: Ident,
    name: String,
    ty: Type,
}

fn reject_generics(input: &DeriveInput) -> syn::Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &input.generics,
            "generic types cannot derive a fixed schema",
        ))
    }
}

/// Collect named fields; unit variants and structs have none.
fn named_fields(fields: &Fields) -> syn::Result<Vec<FieldInfo>> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new_spanned(field, "Expected a named field"))?;
                Ok(FieldInfo {
                    name: ident.unraw().to_string(),
                    ident,
                    ty: field.ty.clone(),
                })
            })
            .collect(),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(unnamed) => Err(syn::Error::new_spanned(
            unnamed,
            "tuple fields have no names to put in a schema; use named fields",
        )),
    }
}

/// `type_mgr.field(..)` calls building the schema fields.
fn schema_fields(fields: &[FieldInfo]) -> Vec<TokenStream2> {
    fields
        .iter()
        .map(|FieldInfo { name, ty, .. }| {
            quote! {
                type_mgr.field(#name, <#ty as ::binschema_core::Encoded>::schema_type(type_mgr))
            }
        })
        .collect()
}

fn field_segment(name: &str) -> TokenStream2 {
    quote! { ::binschema_core::PathSegment::Field(::std::string::String::from(#name)) }
}

fn expand_encoded(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input)?;
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Encoded)] supports enums; use #[derive(EncodedRecord)] on structs",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "an encoded enum needs at least one variant",
        ));
    }

    let count = data.variants.len();
    let mut schema_variants = Vec::new();
    let mut encode_arms = Vec::new();
    let mut decode_arms = Vec::new();

    for (index, variant) in data.variants.iter().enumerate() {
        let index = index as u64;
        let ident = &variant.ident;
        let variant_name = ident.unraw().to_string();
        let fields = named_fields(&variant.fields)?;

        let schema_fields = schema_fields(&fields);
        schema_variants.push(quote! {
            type_mgr.variant(#variant_name, &[#(#schema_fields),*])
        });

        let bindings: Vec<&Ident> = fields.iter().map(|f| &f.ident).collect();
        let encode_calls = fields.iter().map(|field| {
            let binding = &field.ident;
            let segment = field_segment(&field.name);
            quote! {
                ::binschema_core::Encoded::encode(#binding, out).map_err(|e| {
                    e.within(#segment).within(::binschema_core::PathSegment::Variant(
                        ::std::string::String::from(#variant_name),
                    ))
                })?;
            }
        });
        encode_arms.push(quote! {
            Self::#ident { #(#bindings),* } => {
                ::binschema_core::encoded::encode_discriminant(#index, #count, out);
                #(#encode_calls)*
            }
        });

        let decode_fields = fields.iter().map(|field| {
            let FieldInfo { ident, ty, .. } = field;
            let segment = field_segment(&field.name);
            quote! {
                #ident: <#ty as ::binschema_core::Encoded>::decode(reader).map_err(|e| {
                    e.within(#segment).within(::binschema_core::PathSegment::Variant(
                        ::std::string::String::from(#variant_name),
                    ))
                })?,
            }
        });
        decode_arms.push(quote! {
            #index => Self::#ident { #(#decode_fields)* },
        });
    }

    Ok(quote! {
        impl ::binschema_core::Encoded for #name {
            fn schema_type<'a>(
                type_mgr: &'a ::binschema_core::TypeManager<'a>,
            ) -> &'a ::binschema_core::Type<'a> {
                type_mgr.enumeration(&[#(#schema_variants),*])
            }

            fn encode(
                &self,
                out: &mut ::std::vec::Vec<u8>,
            ) -> ::core::result::Result<(), ::binschema_core::EncodeError> {
                match self {
                    #(#encode_arms)*
                }
                ::core::result::Result::Ok(())
            }

            fn decode(
                reader: &mut ::binschema_core::ByteReader<'_>,
            ) -> ::core::result::Result<Self, ::binschema_core::DecodeError> {
                let start = reader.position();
                let discriminant = reader.read_discriminant(#count)?;
                let value = match discriminant {
                    #(#decode_arms)*
                    other => {
                        return ::core::result::Result::Err(
                            ::binschema_core::encoded::unknown_discriminant(other, #count, start),
                        );
                    }
                };
                ::core::result::Result::Ok(value)
            }
        }
    })
}

fn expand_encoded_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    reject_generics(input)?;
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(EncodedRecord)] supports structs; use #[derive(Encoded)] on enums",
        ));
    };
    let fields = named_fields(&data.fields)?;
    let schema_fields = schema_fields(&fields);

    let encode_calls = fields.iter().map(|field| {
        let ident = &field.ident;
        let segment = field_segment(&field.name);
        quote! {
            ::binschema_core::Encoded::encode(&self.#ident, out).map_err(|e| e.within(#segment))?;
        }
    });

    let decode_fields = fields.iter().map(|field| {
        let FieldInfo { ident, ty, .. } = field;
        let segment = field_segment(&field.name);
        quote! {
            #ident: <#ty as ::binschema_core::Encoded>::decode(reader).map_err(|e| e.within(#segment))?,
        }
    });

    Ok(quote! {
        impl ::binschema_core::EncodedRecord for #name {
            fn schema<'a>(
                type_mgr: &'a ::binschema_core::TypeManager<'a>,
            ) -> ::binschema_core::Schema<'a> {
                type_mgr.schema(&[#(#schema_fields),*])
            }

            fn encode(
                &self,
                out: &mut ::std::vec::Vec<u8>,
            ) -> ::core::result::Result<(), ::binschema_core::EncodeError> {
                #(#encode_calls)*
                ::core::result::Result::Ok(())
            }

            fn decode(
                reader: &mut ::binschema_core::ByteReader<'_>,
            ) -> ::core::result::Result<Self, ::binschema_core::DecodeError> {
                ::core::result::Result::Ok(Self { #(#decode_fields)* })
            }
        }
    })
}
