//! Definition registry
//!
//! Caches one [`InterfaceDefinition`] per contract so that building is paid
//! once and every instance shares the same definition. Parents are built (or
//! fetched) first and merged in declaration order.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::contract::{Contract, ContractId};
use crate::definition::{DefinitionBuilder, InterfaceDefinition};
use crate::instance::DynaBean;
use crate::options::BeanOptions;

static GLOBAL_REGISTRY: Lazy<DefinitionRegistry> = Lazy::new(DefinitionRegistry::new);

/// Thread-safe cache of interface definitions keyed by contract
pub struct DefinitionRegistry {
    /// Options used for every definition and instance created here
    options: Arc<BeanOptions>,
    /// Contract id → built definition
    definitions: RwLock<FxHashMap<ContractId, Arc<InterfaceDefinition>>>,
}

impl DefinitionRegistry {
    /// Create an empty registry with default options
    pub fn new() -> Self {
        Self::with_options(BeanOptions::default())
    }

    /// Create an empty registry with explicit options
    pub fn with_options(options: BeanOptions) -> Self {
        Self {
            options: Arc::new(options),
            definitions: RwLock::new(FxHashMap::default()),
        }
    }

    /// Process-wide registry with default options
    pub fn global() -> &'static DefinitionRegistry {
        &GLOBAL_REGISTRY
    }

    /// Options of this registry
    pub fn options(&self) -> &BeanOptions {
        &self.options
    }

    /// Get the definition of `contract`, building it on first use
    pub fn definition_for(&self, contract: &Contract) -> Arc<InterfaceDefinition> {
        if let Some(definition) = self.get(contract.id()) {
            return definition;
        }

        debug!(contract = %contract.name(), id = %contract.id(), "definition cache miss");
        let mut builder = DefinitionBuilder::with_options(contract, &self.options);
        for parent in contract.parents() {
            let parent_definition = self.definition_for(parent);
            builder = builder.merge(&parent_definition);
        }
        let definition = Arc::new(builder.finalize());

        // Another thread may have raced us; keep whichever landed first
        let mut definitions = self.definitions.write();
        Arc::clone(definitions.entry(contract.id()).or_insert(definition))
    }

    /// Create an empty instance of `contract`
    pub fn create(&self, contract: &Contract) -> DynaBean {
        DynaBean::with_options(self.definition_for(contract), Arc::clone(&self.options))
    }

    /// Get a cached definition
    pub fn get(&self, id: ContractId) -> Option<Arc<InterfaceDefinition>> {
        self.definitions.read().get(&id).cloned()
    }

    /// Check if a definition is cached
    pub fn contains(&self, id: ContractId) -> bool {
        self.definitions.read().contains_key(&id)
    }

    /// Get number of cached definitions
    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }
}

impl Default for DefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
