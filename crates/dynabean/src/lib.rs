//! Dynabean
//!
//! Interface-contract objects backed by a dynamic property store.
//!
//! A [`Contract`] declares accessor methods (`getX`, `isX`, `setX`) and
//! optional default methods. Building it yields an [`InterfaceDefinition`]
//! that maps each method to a behavior: getters and setters read and write a
//! per-instance [`PropertyStore`] with type checks, default methods run the
//! supplied logic against the live [`DynaBean`]. Instances also answer the
//! identity operations `clone` (deep copy), `equals`, `hashCode` and
//! `toString`.
//!
//! ```rust,ignore
//! use dynabean::{Contract, DefinitionRegistry, MethodSignature, PrimitiveType, Type, Value};
//!
//! let person = Contract::new("Person")
//!     .method(MethodSignature::getter("getAge", Type::Primitive(PrimitiveType::Int)))
//!     .method(MethodSignature::setter("setAge", Type::Primitive(PrimitiveType::Int)));
//!
//! let bean = DefinitionRegistry::global().create(&person);
//! bean.invoke("setAge", &[Value::Int(30)])?;
//! let age: i32 = bean.call("getAge", &[])?;
//! ```

#![warn(missing_docs)]

pub mod contract;
pub mod convert;
pub mod copy;
pub mod definition;
pub mod error;
pub mod host;
pub mod instance;
pub mod naming;
pub mod options;
pub mod registry;
pub mod store;
pub mod types;
pub mod value;

pub use contract::{Contract, ContractId, DefaultFn, MethodBody, MethodKey, MethodSignature};
pub use convert::FromValue;
pub use copy::deep_copy;
pub use definition::{
    DefinitionBuilder, GetterMethod, InterfaceDefinition, MethodBehavior, PassThroughMethod,
    SetterMethod,
};
pub use error::{BeanError, BeanResult};
pub use host::{HostCopyResult, HostObject, HostValue};
pub use instance::DynaBean;
pub use options::BeanOptions;
pub use registry::DefinitionRegistry;
pub use store::{BeanProperties, PropertyStore};
pub use types::{PrimitiveType, Type};
pub use value::{Sequence, Value, ValueSet};
