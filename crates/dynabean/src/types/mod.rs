//! Type descriptors and primitive metadata
//!
//! [`Type`] describes what a contract method declares; [`primitives`] is the
//! lookup service for boxed equivalents and resting defaults.

pub mod primitives;
pub mod ty;

pub use ty::{PrimitiveType, Type};
