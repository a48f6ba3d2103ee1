//! Declared types of contract parameters and return values

use std::fmt;

use crate::value::Value;

/// Primitive-shaped types
///
/// A primitive type never holds null and has a resting zero-value. Its
/// boxed form ([`Type::Boxed`]) accepts the same values plus null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `true` / `false`
    Boolean,
    /// A single Unicode scalar
    Char,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit IEEE 754 float
    Float,
    /// 64-bit IEEE 754 float
    Double,
}

impl PrimitiveType {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Char => "char",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Declared type of a contract method parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// No value (return type of setters and procedures)
    Void,

    /// Primitive type; never null
    Primitive(PrimitiveType),

    /// Boxed primitive; the primitive's values or null
    Boxed(PrimitiveType),

    /// Immutable text
    String,

    /// Ordered, shared sequence of values
    Sequence,

    /// Insertion-ordered set of values
    Set,

    /// Another contract, by name; accepts dynabeans of it or its sub-contracts
    ///
    /// Membership compares contract names, so distinct contracts that share a
    /// name accept each other's instances. Give contracts unique names, or
    /// check [`DynaBean::is_instance_of_contract`](crate::DynaBean::is_instance_of_contract)
    /// where identity matters.
    Bean(String),

    /// Opaque host value, by [`HostObject::type_name`](crate::HostObject::type_name)
    Host(String),

    /// Any non-null value
    Any,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Boxed(p) => write!(f, "{}?", p),
            Type::String => write!(f, "string"),
            Type::Sequence => write!(f, "sequence"),
            Type::Set => write!(f, "set"),
            Type::Bean(name) => write!(f, "{}", name),
            Type::Host(name) => write!(f, "{}", name),
            Type::Any => write!(f, "any"),
        }
    }
}

impl Type {
    /// Check if this is a primitive type
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    /// Check if this is the void type
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Check if this is `boolean` or its boxed form
    pub fn is_boolean_shaped(&self) -> bool {
        matches!(
            self,
            Type::Primitive(PrimitiveType::Boolean) | Type::Boxed(PrimitiveType::Boolean)
        )
    }

    /// Whether a property of this type may be set to null
    pub fn permits_absence(&self) -> bool {
        !matches!(self, Type::Primitive(_) | Type::Void)
    }

    /// Get the primitive type if this is a primitive or boxed primitive
    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Type::Primitive(p) | Type::Boxed(p) => Some(*p),
            _ => None,
        }
    }

    /// The broadened form of this type (primitives become boxed)
    pub fn wrap(&self) -> Type {
        super::primitives::wrap(self)
    }

    /// Membership test against the broadened form of this type
    ///
    /// Null is never an instance of any type; callers decide separately
    /// whether absence is allowed.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Type::Void, _) => false,
            (Type::Primitive(p), _) | (Type::Boxed(p), _) => value.primitive_type() == Some(*p),
            (Type::String, Value::String(_)) => true,
            (Type::Sequence, Value::Sequence(_)) => true,
            (Type::Set, Value::Set(_)) => true,
            (Type::Bean(name), Value::Bean(bean)) => bean.is_instance_of(name),
            (Type::Host(name), Value::Host(host)) => host.type_name() == name,
            (Type::Any, _) => true,
            _ => false,
        }
    }
}
