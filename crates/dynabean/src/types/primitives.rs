//! Primitive type metadata
//!
//! Boxed-type equivalence and resting zero-values for primitive-shaped types.

use super::ty::{PrimitiveType, Type};
use crate::value::Value;

/// The broadened form of `ty`: primitives map to their boxed type, every
/// other type maps to itself
pub fn wrap(ty: &Type) -> Type {
    match ty {
        Type::Primitive(p) => Type::Boxed(*p),
        other => other.clone(),
    }
}

/// Zero-value of a primitive type
pub fn default_value(primitive: PrimitiveType) -> Value {
    match primitive {
        PrimitiveType::Boolean => Value::Bool(false),
        PrimitiveType::Char => Value::Char('\0'),
        PrimitiveType::Byte => Value::Byte(0),
        PrimitiveType::Short => Value::Short(0),
        PrimitiveType::Int => Value::Int(0),
        PrimitiveType::Long => Value::Long(0),
        PrimitiveType::Float => Value::Float(0.0),
        PrimitiveType::Double => Value::Double(0.0),
    }
}

/// Value a getter of type `ty` returns while its property is unset
///
/// Only primitive types have a zero-value; boxed primitives and reference
/// types rest at null.
pub fn resting_default(ty: &Type) -> Value {
    match ty {
        Type::Primitive(p) => default_value(*p),
        _ => Value::Null,
    }
}
