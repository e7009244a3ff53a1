pub mod manager;
#[allow(clippy::module_inception)]
mod types;

#[cfg(test)]
mod manager_test;

#[cfg(test)]
mod types_test;

pub use types::{Field, Schema, Type, Variant, Width, discriminant_width};
