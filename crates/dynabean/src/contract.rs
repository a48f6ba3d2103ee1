//! Contract descriptions
//!
//! A [`Contract`] is the caller-declared interface a dynabean implements: an
//! ordered list of method signatures plus the parent contracts it extends.
//! Contracts are plain data; the definition builder turns them into
//! dispatchable behavior.
//!
//! ```rust,ignore
//! let person = Contract::new("Person")
//!     .method(MethodSignature::getter("getName", Type::String))
//!     .method(MethodSignature::setter("setName", Type::String))
//!     .method(
//!         MethodSignature::new("greet")
//!             .returns(Type::String)
//!             .default_body(|this, _| {
//!                 let name: Option<String> = this.call("getName", &[])?;
//!                 Ok(Value::from(format!("Hello, {}", name.unwrap_or_default())))
//!             }),
//!     );
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::BeanResult;
use crate::instance::DynaBean;
use crate::types::Type;
use crate::value::Value;

/// Global counter for generating unique contract IDs
static NEXT_CONTRACT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique contract ID
fn generate_contract_id() -> ContractId {
    ContractId(NEXT_CONTRACT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Identity of a contract (its type token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContractId(u64);

impl ContractId {
    /// Raw numeric id
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId({})", self.0)
    }
}

/// Logic supplied alongside a contract for a default method
///
/// Receives the live instance so it can call back into other accessors.
pub type DefaultFn = Arc<dyn Fn(&DynaBean, &[Value]) -> BeanResult<Value> + Send + Sync>;

/// Body of a declared method
#[derive(Clone)]
pub enum MethodBody {
    /// No body; the method is mapped by naming convention or not at all
    Abstract,
    /// Default logic captured as a callable
    Default(DefaultFn),
    /// Default logic exists but its declaring scope does not grant access
    Inaccessible,
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodBody::Abstract => write!(f, "Abstract"),
            MethodBody::Default(_) => write!(f, "Default(<fn>)"),
            MethodBody::Inaccessible => write!(f, "Inaccessible"),
        }
    }
}

/// Signature-level identity of a method: name and parameter types
///
/// Return types are not part of the key, so a sub-contract re-declaring a
/// method overrides the parent's entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodKey {
    /// Method name
    pub name: String,
    /// Parameter types in order
    pub params: Vec<Type>,
}

impl MethodKey {
    /// Create a method key
    pub fn new(name: impl Into<String>, params: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

/// A declared method
#[derive(Debug, Clone)]
pub struct MethodSignature {
    /// Method name
    pub name: String,
    /// Parameter types
    pub params: Vec<Type>,
    /// Return type
    pub return_type: Type,
    /// Supplied body, if any
    pub body: MethodBody,
}

impl MethodSignature {
    /// Create an abstract method with no parameters returning void
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: Type::Void,
            body: MethodBody::Abstract,
        }
    }

    /// Abstract zero-parameter method returning `ty`
    pub fn getter(name: impl Into<String>, ty: Type) -> Self {
        Self::new(name).returns(ty)
    }

    /// Abstract one-parameter method taking `ty`
    pub fn setter(name: impl Into<String>, ty: Type) -> Self {
        Self::new(name).param(ty)
    }

    /// Add a parameter
    pub fn param(mut self, ty: Type) -> Self {
        self.params.push(ty);
        self
    }

    /// Set return type
    pub fn returns(mut self, ty: Type) -> Self {
        self.return_type = ty;
        self
    }

    /// Attach default logic
    pub fn default_body<F>(mut self, body: F) -> Self
    where
        F: Fn(&DynaBean, &[Value]) -> BeanResult<Value> + Send + Sync + 'static,
    {
        self.body = MethodBody::Default(Arc::new(body));
        self
    }

    /// Mark as having default logic that cannot be captured
    pub fn inaccessible_default(mut self) -> Self {
        self.body = MethodBody::Inaccessible;
        self
    }

    /// Whether this method carries default logic
    pub fn is_default(&self) -> bool {
        !matches!(self.body, MethodBody::Abstract)
    }

    /// Signature key of this method
    pub fn key(&self) -> MethodKey {
        MethodKey::new(self.name.clone(), self.params.clone())
    }
}

/// A caller-declared interface
#[derive(Debug, Clone)]
pub struct Contract {
    id: ContractId,
    name: String,
    methods: Vec<MethodSignature>,
    parents: Vec<Arc<Contract>>,
}

impl Contract {
    /// Create an empty contract with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_contract_id(),
            name: name.into(),
            methods: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Declare a method (declaration order is preserved)
    ///
    /// The contract gets a fresh identity, so a clone extended this way is a
    /// distinct contract from the one it was cloned from.
    pub fn method(mut self, method: MethodSignature) -> Self {
        self.methods.push(method);
        self.id = generate_contract_id();
        self
    }

    /// Extend a parent contract; like [`method`](Contract::method), this
    /// assigns a fresh identity
    pub fn extends(mut self, parent: &Arc<Contract>) -> Self {
        self.parents.push(Arc::clone(parent));
        self.id = generate_contract_id();
        self
    }

    /// Contract identity
    pub fn id(&self) -> ContractId {
        self.id
    }

    /// Contract name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Methods declared directly on this contract
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    /// Parent contracts in declaration order
    pub fn parents(&self) -> &[Arc<Contract>] {
        &self.parents
    }
}
