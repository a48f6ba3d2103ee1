//! Interface definitions
//!
//! An [`InterfaceDefinition`] is the immutable, per-contract classification of
//! methods into behaviors. It is built once by a [`DefinitionBuilder`] and
//! then shared (behind an `Arc`) by every instance of the contract, across
//! threads if needed.

mod behavior;
mod builder;

pub use behavior::{GetterMethod, MethodBehavior, PassThroughMethod, SetterMethod};
pub use builder::DefinitionBuilder;

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::contract::{Contract, ContractId, MethodKey};
use crate::value::Value;

/// Immutable method classification for one contract
pub struct InterfaceDefinition {
    /// Identity of the contract this definition was built from
    contract_id: ContractId,
    /// Contract name
    contract_name: String,
    /// Names of merged parent contracts, nearest first
    supertypes: Vec<String>,
    /// Identities of merged parent contracts, nearest first
    supertype_ids: Vec<ContractId>,
    /// Behaviors in declaration order (own methods first, then inherited)
    methods: Vec<(MethodKey, MethodBehavior)>,
    /// Method key to index into `methods`
    method_indices: FxHashMap<MethodKey, usize>,
    /// Method name to indices into `methods`, in declaration order
    name_indices: FxHashMap<String, Vec<usize>>,
}

impl InterfaceDefinition {
    /// Classify the methods of `contract` (without parent merging)
    pub fn build(contract: &Contract) -> Self {
        DefinitionBuilder::new(contract).finalize()
    }

    /// Start a builder for `contract`
    pub fn builder(contract: &Contract) -> DefinitionBuilder {
        DefinitionBuilder::new(contract)
    }

    pub(crate) fn from_parts(
        contract_id: ContractId,
        contract_name: String,
        supertypes: Vec<String>,
        supertype_ids: Vec<ContractId>,
        methods: Vec<(MethodKey, MethodBehavior)>,
        method_indices: FxHashMap<MethodKey, usize>,
    ) -> Self {
        let mut name_indices: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        for (index, (key, _)) in methods.iter().enumerate() {
            name_indices.entry(key.name.clone()).or_default().push(index);
        }
        Self {
            contract_id,
            contract_name,
            supertypes,
            supertype_ids,
            methods,
            method_indices,
            name_indices,
        }
    }

    /// Identity of the contract
    pub fn contract_id(&self) -> ContractId {
        self.contract_id
    }

    /// Contract name
    pub fn contract_name(&self) -> &str {
        &self.contract_name
    }

    /// Names of every merged ancestor contract
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Identities of every merged ancestor contract
    pub fn supertype_ids(&self) -> &[ContractId] {
        &self.supertype_ids
    }

    /// Check whether instances of this definition are instances of `contract_name`
    ///
    /// Matches by name, which is how [`Type::Bean`](crate::Type::Bean) refers
    /// to contracts. Unrelated contracts sharing a name are not told apart;
    /// use [`is_subtype_of_contract`](Self::is_subtype_of_contract) for an
    /// identity check.
    pub fn is_subtype_of(&self, contract_name: &str) -> bool {
        self.contract_name == contract_name || self.supertypes.iter().any(|s| s == contract_name)
    }

    /// Check whether this definition is, or was merged from, contract `id`
    pub fn is_subtype_of_contract(&self, id: ContractId) -> bool {
        self.contract_id == id || self.supertype_ids.contains(&id)
    }

    /// Get the behavior bound to an exact method signature
    pub fn lookup(&self, key: &MethodKey) -> Option<&MethodBehavior> {
        self.method_indices
            .get(key)
            .map(|&index| &self.methods[index].1)
    }

    /// Resolve a call by method name and arguments
    ///
    /// Picks the first declared overload whose parameter types accept `args`.
    /// Failing that, the first overload with a matching arity, then the first
    /// method with that name, so that type and arity errors are reported by
    /// the behavior itself.
    pub fn resolve(&self, name: &str, args: &[Value]) -> Option<(&MethodKey, &MethodBehavior)> {
        let indices = self.name_indices.get(name)?;
        let same_arity = || {
            indices
                .iter()
                .copied()
                .filter(|&i| self.methods[i].0.arity() == args.len())
        };
        let index = same_arity()
            .find(|&i| accepts_arguments(&self.methods[i].0, args))
            .or_else(|| same_arity().next())
            .or_else(|| indices.first().copied())?;
        let (key, behavior) = &self.methods[index];
        Some((key, behavior))
    }

    /// Iterate over mapped methods in declaration order
    pub fn methods(&self) -> impl Iterator<Item = (&MethodKey, &MethodBehavior)> {
        self.methods.iter().map(|(key, behavior)| (key, behavior))
    }

    /// Get number of mapped methods
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Check if a method signature is mapped
    pub fn has_method(&self, key: &MethodKey) -> bool {
        self.method_indices.contains_key(key)
    }

    /// Sorted names of every property that has a getter
    pub fn property_names(&self) -> BTreeSet<String> {
        self.methods
            .iter()
            .filter_map(|(_, behavior)| match behavior {
                MethodBehavior::Getter(getter) => Some(getter.property().to_string()),
                _ => None,
            })
            .collect()
    }
}

fn accepts_arguments(key: &MethodKey, args: &[Value]) -> bool {
    key.params
        .iter()
        .zip(args)
        .all(|(ty, arg)| (arg.is_null() && ty.permits_absence()) || ty.accepts(arg))
}

// Definitions are identified by their contract.
impl PartialEq for InterfaceDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.contract_id == other.contract_id
    }
}

impl Eq for InterfaceDefinition {}

impl Hash for InterfaceDefinition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contract_id.hash(state);
    }
}

impl fmt::Debug for InterfaceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceDefinition")
            .field("contract", &self.contract_name)
            .field("id", &self.contract_id)
            .field("supertypes", &self.supertypes)
            .field("supertype_ids", &self.supertype_ids)
            .field("methods", &self.methods)
            .finish()
    }
}
