//! Method behaviors
//!
//! Each mapped contract method is bound to exactly one behavior. Getters and
//! setters talk to the property store; pass-through methods run the logic the
//! contract supplied, with the live instance as receiver.

use std::fmt;

use crate::contract::DefaultFn;
use crate::error::{BeanError, BeanResult};
use crate::instance::DynaBean;
use crate::store::BeanProperties;
use crate::types::{primitives, Type};
use crate::value::Value;

/// Behavior bound to a mapped method
#[derive(Clone)]
pub enum MethodBehavior {
    /// Reads a property
    Getter(GetterMethod),
    /// Writes a property
    Setter(SetterMethod),
    /// Delegates to supplied default logic
    PassThrough(PassThroughMethod),
}

impl MethodBehavior {
    /// Execute the behavior for `this`, backed by `properties`
    pub fn invoke(
        &self,
        this: &DynaBean,
        properties: &dyn BeanProperties,
        args: &[Value],
    ) -> BeanResult<Value> {
        match self {
            MethodBehavior::Getter(getter) => getter.invoke(properties, args),
            MethodBehavior::Setter(setter) => setter.invoke(properties, args),
            MethodBehavior::PassThrough(method) => method.invoke(this, args),
        }
    }

    /// Bound property name, for getters and setters
    pub fn property_name(&self) -> Option<&str> {
        match self {
            MethodBehavior::Getter(getter) => Some(&getter.property),
            MethodBehavior::Setter(setter) => Some(&setter.property),
            MethodBehavior::PassThrough(_) => None,
        }
    }

    /// Check if this is a getter
    pub fn is_getter(&self) -> bool {
        matches!(self, MethodBehavior::Getter(_))
    }

    /// Check if this is a setter
    pub fn is_setter(&self) -> bool {
        matches!(self, MethodBehavior::Setter(_))
    }

    /// Check if this is a pass-through
    pub fn is_pass_through(&self) -> bool {
        matches!(self, MethodBehavior::PassThrough(_))
    }
}

impl fmt::Debug for MethodBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodBehavior::Getter(getter) => fmt::Debug::fmt(getter, f),
            MethodBehavior::Setter(setter) => fmt::Debug::fmt(setter, f),
            MethodBehavior::PassThrough(method) => fmt::Debug::fmt(method, f),
        }
    }
}

/// Property read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetterMethod {
    property: String,
    ty: Type,
    wrapped: Type,
}

impl GetterMethod {
    /// Create a getter for `property` declared as `ty`
    pub fn new(property: impl Into<String>, ty: Type) -> Self {
        let wrapped = primitives::wrap(&ty);
        Self {
            property: property.into(),
            ty,
            wrapped,
        }
    }

    /// Bound property name
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Declared type
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Value returned while the property is unset
    pub fn resting_default(&self) -> Value {
        primitives::resting_default(&self.ty)
    }

    fn invoke(&self, properties: &dyn BeanProperties, args: &[Value]) -> BeanResult<Value> {
        check_arguments(0, args)?;
        match properties.get(&self.property) {
            None | Some(Value::Null) => Ok(self.resting_default()),
            Some(value) if self.wrapped.accepts(&value) => Ok(value),
            Some(value) => Err(BeanError::type_mismatch(&value, &self.ty)),
        }
    }
}

/// Property write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetterMethod {
    property: String,
    ty: Type,
    wrapped: Type,
}

impl SetterMethod {
    /// Create a setter for `property` declared as `ty`
    pub fn new(property: impl Into<String>, ty: Type) -> Self {
        let wrapped = primitives::wrap(&ty);
        Self {
            property: property.into(),
            ty,
            wrapped,
        }
    }

    /// Bound property name
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Declared parameter type
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    fn invoke(&self, properties: &dyn BeanProperties, args: &[Value]) -> BeanResult<Value> {
        check_arguments(1, args)?;
        let value = &args[0];
        if (value.is_null() && self.ty.permits_absence()) || self.wrapped.accepts(value) {
            properties.set(&self.property, value.clone());
            Ok(Value::Null)
        } else {
            Err(BeanError::type_mismatch(value, &self.ty))
        }
    }
}

/// Delegation to supplied default logic
#[derive(Clone)]
pub struct PassThroughMethod {
    method: String,
    body: DefaultFn,
}

impl PassThroughMethod {
    /// Bind `body` as the implementation of `method`
    pub fn new(method: impl Into<String>, body: DefaultFn) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }

    /// Method name
    pub fn method(&self) -> &str {
        &self.method
    }

    fn invoke(&self, this: &DynaBean, args: &[Value]) -> BeanResult<Value> {
        (self.body)(this, args)
    }
}

impl fmt::Debug for PassThroughMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassThroughMethod")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}

fn check_arguments(expected: usize, args: &[Value]) -> BeanResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(BeanError::argument_count(expected, args))
    }
}
