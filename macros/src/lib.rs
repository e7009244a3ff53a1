//! Derive macros for binschema's static encoding path
//!
//! `#[derive(Encoded)]` implements `binschema_core::Encoded` for enums and
//! `#[derive(EncodedRecord)]` implements `binschema_core::EncodedRecord`
//! for structs. The generated code writes exactly the bytes the dynamic
//! codec writes for the equivalent schema.

extern crate proc_macro;

use proc_macro::TokenStream;

mod derive;

/// Derive `Encoded` for an enum.
///
/// Each variant becomes a schema variant of the same name, in declaration
/// order; named fields become the variant's fields. Unit variants carry no
/// fields. Field types must implement `Encoded` themselves.
///
/// # Example
///
/// ```ignore
/// #[derive(Encoded)]
/// enum Shape {
///     Circle { radius: f32 },
///     Square { side: u16 },
///     Empty,
/// }
/// // Schema type: enum Circle[radius: f32], Square[side: u16], Empty[]
/// ```
///
/// Tuple variants and generic enums are rejected.
#[proc_macro_derive(Encoded)]
pub fn derive_encoded(item: TokenStream) -> TokenStream {
    derive::derive_encoded_impl(item)
}

/// Derive `EncodedRecord` for a struct with named fields.
///
/// The struct's fields, in declaration order, form the top-level schema.
///
/// # Example
///
/// ```ignore
/// #[derive(EncodedRecord)]
/// struct Reading {
///     id: u32,
///     samples: Vec<i16>,
///     shape: Shape,
/// }
/// // Schema: id: u32, samples: [i16], shape: enum ...
/// ```
#[proc_macro_derive(EncodedRecord)]
pub fn derive_encoded_record(item: TokenStream) -> TokenStream {
    derive::derive_encoded_record_impl(item)
}
