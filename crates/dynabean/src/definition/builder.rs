//! Definition builder
//!
//! Classifies a contract's own methods, merges inherited behaviors from parent
//! definitions and produces the immutable [`InterfaceDefinition`].

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::behavior::{GetterMethod, MethodBehavior, PassThroughMethod, SetterMethod};
use super::InterfaceDefinition;
use crate::contract::{Contract, ContractId, MethodBody, MethodKey, MethodSignature};
use crate::error::BeanError;
use crate::naming::{self, Accessor};
use crate::options::BeanOptions;

/// Builder for an [`InterfaceDefinition`]
///
/// ```rust,ignore
/// let definition = DefinitionBuilder::new(&employee)
///     .merge(&person_definition)
///     .finalize();
/// ```
#[derive(Debug)]
pub struct DefinitionBuilder {
    contract_id: ContractId,
    contract_name: String,
    supertypes: Vec<String>,
    supertype_ids: Vec<ContractId>,
    methods: Vec<(MethodKey, MethodBehavior)>,
    method_indices: FxHashMap<MethodKey, usize>,
}

impl DefinitionBuilder {
    /// Classify the methods declared directly on `contract`
    pub fn new(contract: &Contract) -> Self {
        Self::with_options(contract, &BeanOptions::default())
    }

    /// Classify the methods declared directly on `contract` under `options`
    pub fn with_options(contract: &Contract, options: &BeanOptions) -> Self {
        let mut builder = Self {
            contract_id: contract.id(),
            contract_name: contract.name().to_string(),
            supertypes: Vec::new(),
            supertype_ids: Vec::new(),
            methods: Vec::with_capacity(contract.methods().len()),
            method_indices: FxHashMap::default(),
        };
        for method in contract.methods() {
            if let Some(behavior) = define_method(contract, method, options) {
                builder.put(method.key(), behavior);
            }
        }
        debug!(
            contract = %builder.contract_name,
            declared = contract.methods().len(),
            mapped = builder.methods.len(),
            "classified contract methods"
        );
        builder
    }

    /// Copy in behaviors of a parent definition that are not already mapped
    ///
    /// Entries already present (re-declared in this contract or merged from
    /// an earlier parent) are left untouched.
    pub fn merge(mut self, parent: &InterfaceDefinition) -> Self {
        let mut inherited = 0usize;
        for (key, behavior) in parent.methods() {
            if !self.method_indices.contains_key(key) {
                self.put(key.clone(), behavior.clone());
                inherited += 1;
            }
        }
        self.add_supertype(parent.contract_id(), parent.contract_name());
        for (&id, name) in parent.supertype_ids().iter().zip(parent.supertypes()) {
            self.add_supertype(id, name);
        }
        debug!(
            contract = %self.contract_name,
            parent = %parent.contract_name(),
            inherited,
            "merged parent definition"
        );
        self
    }

    /// Produce the immutable definition
    pub fn finalize(self) -> InterfaceDefinition {
        InterfaceDefinition::from_parts(
            self.contract_id,
            self.contract_name,
            self.supertypes,
            self.supertype_ids,
            self.methods,
            self.method_indices,
        )
    }

    /// Get number of methods mapped so far
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    fn put(&mut self, key: MethodKey, behavior: MethodBehavior) {
        match self.method_indices.get(&key) {
            Some(&index) => self.methods[index].1 = behavior,
            None => {
                self.method_indices.insert(key.clone(), self.methods.len());
                self.methods.push((key, behavior));
            }
        }
    }

    fn add_supertype(&mut self, id: ContractId, name: &str) {
        if id != self.contract_id && !self.supertype_ids.contains(&id) {
            self.supertype_ids.push(id);
            self.supertypes.push(name.to_string());
        }
    }
}

/// Classify one declared method; `None` leaves it unmapped
fn define_method(
    contract: &Contract,
    method: &MethodSignature,
    options: &BeanOptions,
) -> Option<MethodBehavior> {
    match &method.body {
        MethodBody::Default(body) if options.capture_default_methods => {
            return Some(MethodBehavior::PassThrough(PassThroughMethod::new(
                method.name.clone(),
                body.clone(),
            )));
        }
        MethodBody::Default(_) => {
            report_uncapturable(contract, method, "default method capture is disabled");
            return None;
        }
        MethodBody::Inaccessible => {
            report_uncapturable(contract, method, "declaring scope does not grant access");
            return None;
        }
        MethodBody::Abstract => {}
    }

    let returns_boolean = method.return_type.is_boolean_shaped();
    match naming::classify(&method.name, method.params.len(), returns_boolean)? {
        Accessor::Getter(property) => Some(MethodBehavior::Getter(GetterMethod::new(
            property,
            method.return_type.clone(),
        ))),
        Accessor::Setter(property) => Some(MethodBehavior::Setter(SetterMethod::new(
            property,
            method.params[0].clone(),
        ))),
    }
}

// Degrade rather than fail: the rest of the contract stays usable.
fn report_uncapturable(contract: &Contract, method: &MethodSignature, reason: &str) {
    let err = BeanError::Introspection {
        contract: contract.name().to_string(),
        method: method.name.clone(),
        reason: reason.to_string(),
    };
    warn!(error = %err, "leaving default method unmapped");
}
