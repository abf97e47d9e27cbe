//! Orca IDL
//!
//! Loosely-typed script values for the bindings boundary.
//!
//! Script-facing APIs receive untyped values (strings, numbers, buffers,
//! dictionaries) that must be converted to typed Rust structures before
//! use. This crate models those values and the conversion failures.

pub mod value;

pub use value::{ConvertError, Dict, External, Value};
