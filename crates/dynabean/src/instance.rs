//! Live dynabean instances
//!
//! A [`DynaBean`] binds one shared [`InterfaceDefinition`] to its own property
//! store. Every call goes through [`DynaBean::invoke`], which runs the mapped
//! behavior or one of the identity operations (`clone`, `equals`, `hashCode`,
//! `toString`).
//!
//! Instances are single-threaded: the handle is `Rc`-based and the store is a
//! `RefCell`. Definitions are shared freely across threads.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHasher;
use tracing::trace;

use crate::contract::{Contract, MethodKey};
use crate::convert::FromValue;
use crate::copy;
use crate::definition::InterfaceDefinition;
use crate::error::{BeanError, BeanResult};
use crate::options::BeanOptions;
use crate::store::{BeanProperties, PropertyStore};
use crate::value::Value;

struct BeanInstance {
    definition: Arc<InterfaceDefinition>,
    properties: RefCell<PropertyStore>,
    options: Arc<BeanOptions>,
}

/// Handle to a live dynabean
///
/// Cloning the handle shares the instance. Use [`DynaBean::clone_bean`] (or
/// invoke `clone`) for an independent deep copy.
#[derive(Clone)]
pub struct DynaBean(Rc<BeanInstance>);

impl DynaBean {
    /// Create an empty instance of `definition`
    pub fn new(definition: Arc<InterfaceDefinition>) -> Self {
        Self::with_options(definition, Arc::new(BeanOptions::default()))
    }

    /// Create an empty instance of `definition` with explicit options
    pub fn with_options(definition: Arc<InterfaceDefinition>, options: Arc<BeanOptions>) -> Self {
        Self::from_parts(definition, PropertyStore::new(), options)
    }

    /// Create an instance over pre-populated properties
    pub fn from_properties(definition: Arc<InterfaceDefinition>, properties: PropertyStore) -> Self {
        Self::from_parts(definition, properties, Arc::new(BeanOptions::default()))
    }

    fn from_parts(
        definition: Arc<InterfaceDefinition>,
        properties: PropertyStore,
        options: Arc<BeanOptions>,
    ) -> Self {
        DynaBean(Rc::new(BeanInstance {
            definition,
            properties: RefCell::new(properties),
            options,
        }))
    }

    /// Bound definition
    pub fn definition(&self) -> &Arc<InterfaceDefinition> {
        &self.0.definition
    }

    /// Options this instance was created with
    pub fn options(&self) -> &BeanOptions {
        &self.0.options
    }

    /// Name of the implemented contract
    pub fn contract_name(&self) -> &str {
        self.0.definition.contract_name()
    }

    /// Check whether this instance implements `contract_name` (directly or
    /// through an ancestor)
    pub fn is_instance_of(&self, contract_name: &str) -> bool {
        self.0.definition.is_subtype_of(contract_name)
    }

    /// Check whether this instance implements `contract` by identity
    pub fn is_instance_of_contract(&self, contract: &Contract) -> bool {
        self.0.definition.is_subtype_of_contract(contract.id())
    }

    /// Dispatch a call by method name
    ///
    /// Among overloads, the first whose parameter types accept `args` wins.
    /// Mapped behaviors take precedence; otherwise the identity operations
    /// are tried. Anything else is an [`BeanError::UnsupportedOperation`].
    pub fn invoke(&self, method: &str, args: &[Value]) -> BeanResult<Value> {
        match self.0.definition.resolve(method, args) {
            Some((key, behavior)) => {
                trace!(contract = %self.contract_name(), method = %key, "dispatch");
                behavior.invoke(self, &self.0.properties, args)
            }
            None => self.invoke_builtin(method, args),
        }
    }

    /// Dispatch a call by exact method signature
    pub fn invoke_method(&self, key: &MethodKey, args: &[Value]) -> BeanResult<Value> {
        match self.0.definition.lookup(key) {
            Some(behavior) => {
                trace!(contract = %self.contract_name(), method = %key, "dispatch");
                behavior.invoke(self, &self.0.properties, args)
            }
            None => self.invoke_builtin(&key.name, args),
        }
    }

    /// Dispatch a call and convert its result
    ///
    /// ```rust,ignore
    /// let age: i32 = person.call("getAge", &[])?;
    /// ```
    pub fn call<T: FromValue>(&self, method: &str, args: &[Value]) -> BeanResult<T> {
        T::from_value(self.invoke(method, args)?)
    }

    fn invoke_builtin(&self, method: &str, args: &[Value]) -> BeanResult<Value> {
        match (method, args) {
            ("clone", []) => Ok(Value::Bean(self.clone_bean()?)),
            ("equals", [other]) => Ok(Value::Bool(
                matches!(other, Value::Bean(other) if other == self),
            )),
            ("hashCode", []) => Ok(Value::Long(self.hash_code() as i64)),
            ("toString", []) => Ok(Value::String(self.to_string())),
            _ => Err(BeanError::UnsupportedOperation {
                method: format!("{}.{}/{}", self.contract_name(), method, args.len()),
            }),
        }
    }

    /// Independent copy sharing the definition, with a deep copy of the store
    pub fn clone_bean(&self) -> BeanResult<DynaBean> {
        self.clone_at_depth(0, self.0.options.max_copy_depth)
    }

    pub(crate) fn clone_at_depth(&self, depth: usize, limit: Option<usize>) -> BeanResult<DynaBean> {
        // Snapshot so that no borrow is held while copying nested values
        let source = self.0.properties.borrow().clone();
        let mut properties = PropertyStore::new();
        for (name, value) in &source {
            properties.insert(name.clone(), copy::copy_value(value, depth + 1, limit)?);
        }
        trace!(contract = %self.contract_name(), depth, "cloned instance");
        Ok(Self::from_parts(
            Arc::clone(&self.0.definition),
            properties,
            Arc::clone(&self.0.options),
        ))
    }

    /// Hash combining the definition and the store
    pub fn hash_code(&self) -> u64 {
        let definition_hash = fx_hash(&*self.0.definition);
        let store_hash = fx_hash(&*self.0.properties.borrow());
        961u64
            .wrapping_add(definition_hash.wrapping_mul(31))
            .wrapping_add(store_hash)
    }

    /// Check whether both handles refer to the same instance
    pub fn ptr_eq(&self, other: &DynaBean) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Read a property without type checks
    pub fn get_property(&self, property: &str) -> Option<Value> {
        self.0.properties.get(property)
    }

    /// Write a property without type checks; null removes it
    pub fn set_property(&self, property: &str, value: impl Into<Value>) {
        self.0.properties.set(property, value.into());
    }

    /// Snapshot of the current properties
    pub fn properties(&self) -> PropertyStore {
        self.0.properties.borrow().clone()
    }

    /// Raw access to the backing store
    pub fn access_properties(&self) -> &dyn BeanProperties {
        &self.0.properties
    }
}

fn fx_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

impl PartialEq for DynaBean {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.0.definition == other.0.definition
                && *self.0.properties.borrow() == *other.0.properties.borrow())
    }
}

impl Eq for DynaBean {}

impl Hash for DynaBean {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for DynaBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynaBean(type={})", self.contract_name())
    }
}

impl fmt::Debug for DynaBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("DynaBean");
        debug.field("contract", &self.contract_name());
        match self.0.properties.try_borrow() {
            Ok(properties) => debug.field("properties", &*properties),
            Err(_) => debug.field("properties", &"<borrowed>"),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::MethodSignature;
    use crate::types::{PrimitiveType, Type};
    use crate::value::Sequence;

    fn counter() -> Arc<InterfaceDefinition> {
        let contract = Contract::new("Counter")
            .method(MethodSignature::getter(
                "getCount",
                Type::Primitive(PrimitiveType::Int),
            ))
            .method(MethodSignature::setter(
                "setCount",
                Type::Primitive(PrimitiveType::Int),
            ))
            .method(MethodSignature::getter("getTags", Type::Sequence))
            .method(MethodSignature::setter("setTags", Type::Sequence))
            .method(
                MethodSignature::new("increment").default_body(|this, _| {
                    let count: i32 = this.call("getCount", &[])?;
                    this.invoke("setCount", &[Value::Int(count + 1)])
                }),
            );
        Arc::new(InterfaceDefinition::build(&contract))
    }

    #[test]
    fn test_getter_and_setter_dispatch() {
        let bean = DynaBean::new(counter());
        assert_eq!(bean.invoke("getCount", &[]).unwrap(), Value::Int(0));
        bean.invoke("setCount", &[Value::Int(5)]).unwrap();
        assert_eq!(bean.invoke("getCount", &[]).unwrap(), Value::Int(5));
    }

    #[test]
    fn test_pass_through_calls_back_into_instance() {
        let bean = DynaBean::new(counter());
        bean.invoke("increment", &[]).unwrap();
        bean.invoke("increment", &[]).unwrap();
        assert_eq!(bean.call::<i32>("getCount", &[]).unwrap(), 2);
    }

    #[test]
    fn test_identity_operations() {
        let bean = DynaBean::new(counter());
        bean.invoke("setCount", &[Value::Int(1)]).unwrap();

        let copy = bean.invoke("clone", &[]).unwrap();
        let copy = copy.as_bean().unwrap();
        assert!(!copy.ptr_eq(&bean));
        assert_eq!(
            bean.invoke("equals", &[Value::Bean(copy.clone())]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            bean.invoke("equals", &[Value::from("Counter")]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            bean.invoke("hashCode", &[]).unwrap(),
            copy.invoke("hashCode", &[]).unwrap()
        );
        assert_eq!(
            bean.invoke("toString", &[]).unwrap(),
            Value::from("DynaBean(type=Counter)")
        );
    }

    #[test]
    fn test_unsupported_operation() {
        let bean = DynaBean::new(counter());
        let err = bean.invoke("reset", &[]).unwrap_err();
        assert_eq!(err.to_string(), "Unimplemented dynabean method: Counter.reset/0");

        // Identity names with the wrong shape are not identity operations
        assert!(matches!(
            bean.invoke("equals", &[]),
            Err(BeanError::UnsupportedOperation { .. })
        ));
    }

    #[test]
    fn test_clone_is_deep() {
        let bean = DynaBean::new(counter());
        let tags = Sequence::from_vec(vec![Value::from("a")]);
        bean.invoke("setTags", &[Value::Sequence(tags.clone())]).unwrap();

        let copy = bean.clone_bean().unwrap();
        let copied_tags = copy.invoke("getTags", &[]).unwrap();
        let copied_tags = copied_tags.as_sequence().unwrap();
        assert!(!copied_tags.ptr_eq(&tags));

        copied_tags.push(Value::from("b"));
        assert_eq!(tags.len(), 1);
        assert_ne!(bean, copy);
    }

    #[test]
    fn test_handle_clone_shares_instance() {
        let bean = DynaBean::new(counter());
        let alias = bean.clone();
        alias.invoke("setCount", &[Value::Int(9)]).unwrap();
        assert!(alias.ptr_eq(&bean));
        assert_eq!(bean.get_property("count"), Some(Value::Int(9)));
    }

    #[test]
    fn test_raw_property_access() {
        let bean = DynaBean::new(counter());
        bean.set_property("count", Value::Int(3));
        assert_eq!(bean.call::<i32>("getCount", &[]).unwrap(), 3);
        bean.set_property("count", Value::Null);
        assert!(bean.properties().is_empty());
        assert!(bean.access_properties().get("count").is_none());
    }

    #[test]
    fn test_invoke_method_by_key() {
        let bean = DynaBean::new(counter());
        let key = MethodKey::new("setCount", vec![Type::Primitive(PrimitiveType::Int)]);
        bean.invoke_method(&key, &[Value::Int(4)]).unwrap();
        assert_eq!(bean.get_property("count"), Some(Value::Int(4)));

        let to_string = MethodKey::new("toString", vec![]);
        assert_eq!(
            bean.invoke_method(&to_string, &[]).unwrap(),
            Value::from("DynaBean(type=Counter)")
        );
    }
}
