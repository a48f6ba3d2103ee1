//! Typed extraction from dispatch results
//!
//! Typed facades over a dynabean call [`DynaBean::call`](crate::DynaBean::call)
//! and let [`FromValue`] check and unwrap the result. Arguments go the other
//! way through the `From<T> for Value` conversions.

use crate::error::{BeanError, BeanResult};
use crate::host::HostValue;
use crate::instance::DynaBean;
use crate::types::{PrimitiveType, Type};
use crate::value::{Sequence, Value, ValueSet};

/// Convert from [`Value`] to a Rust type
///
/// Implement this trait to allow your type to be returned from a typed call.
pub trait FromValue: Sized {
    /// Convert from a value, returning an error if the type doesn't match
    fn from_value(value: Value) -> BeanResult<Self>;
}

fn mismatch(value: &Value, expected: Type) -> BeanError {
    BeanError::type_mismatch(value, &expected)
}

macro_rules! impl_from_value_primitive {
    ($($ty:ty => $variant:ident as $prim:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> BeanResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(mismatch(&other, Type::Primitive(PrimitiveType::$prim))),
                    }
                }
            }
        )*
    };
}

impl_from_value_primitive! {
    bool => Bool as Boolean,
    char => Char as Char,
    i8 => Byte as Byte,
    i16 => Short as Short,
    i32 => Int as Int,
    i64 => Long as Long,
    f32 => Float as Float,
    f64 => Double as Double,
}

impl FromValue for String {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(&other, Type::String)),
        }
    }
}

impl FromValue for Sequence {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::Sequence(seq) => Ok(seq),
            other => Err(mismatch(&other, Type::Sequence)),
        }
    }
}

impl FromValue for ValueSet {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::Set(set) => Ok(set),
            other => Err(mismatch(&other, Type::Set)),
        }
    }
}

impl FromValue for DynaBean {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::Bean(bean) => Ok(bean),
            other => Err(mismatch(&other, Type::Any)),
        }
    }
}

impl FromValue for HostValue {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::Host(host) => Ok(host),
            other => Err(mismatch(&other, Type::Any)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> BeanResult<Self> {
        Ok(value)
    }
}

/// Setters and procedures return null
impl FromValue for () {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::Null => Ok(()),
            other => Err(mismatch(&other, Type::Void)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> BeanResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert_eq!(i32::from_value(Value::Int(7)).unwrap(), 7);
        assert_eq!(f64::from_value(Value::Double(1.5)).unwrap(), 1.5);
        assert!(bool::from_value(Value::Bool(true)).unwrap());
    }

    #[test]
    fn test_no_numeric_widening() {
        let err = i64::from_value(Value::Int(7)).unwrap_err();
        assert_eq!(err.to_string(), "7 is not an instance of type: long");
    }

    #[test]
    fn test_option_maps_null() {
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::from_value(Value::from("x")).unwrap(),
            Some("x".to_string())
        );
        assert!(String::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_unit_accepts_null_only() {
        assert!(<()>::from_value(Value::Null).is_ok());
        assert!(<()>::from_value(Value::Int(0)).is_err());
    }
}
