mod value;

pub use value::{Record, Value};

#[cfg(test)]
mod display_test;
