// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Generator configuration and the storage port it is loaded through.
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::cost::Cost;
use crate::op::OperationCode;

/// Per-kind cost charged to generated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostTable {
    /// Cost of [`OperationCode::AddNode`].
    pub add_node: Cost,
    /// Cost of [`OperationCode::DeleteNode`].
    pub delete_node: Cost,
    /// Cost of [`OperationCode::AddEdge`].
    pub add_edge: Cost,
    /// Cost of [`OperationCode::DeleteEdge`].
    pub delete_edge: Cost,
    /// Cost of [`OperationCode::RelabelNode`].
    pub relabel_node: Cost,
}

impl Default for CostTable {
    fn default() -> Self {
        Self::uniform(Cost::UNIT)
    }
}

impl CostTable {
    /// Every kind costs `cost`.
    pub fn uniform(cost: Cost) -> Self {
        Self {
            add_node: cost,
            delete_node: cost,
            add_edge: cost,
            delete_edge: cost,
            relabel_node: cost,
        }
    }

    /// Cost charged for `code`.
    pub fn cost_of(&self, code: OperationCode) -> Cost {
        match code {
            OperationCode::AddNode => self.add_node,
            OperationCode::DeleteNode => self.delete_node,
            OperationCode::AddEdge => self.add_edge,
            OperationCode::DeleteEdge => self.delete_edge,
            OperationCode::RelabelNode => self.relabel_node,
        }
    }
}

/// Parameters of one randomized edit-list generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Exact number of operations to accept.
    pub edits: usize,
    /// PRNG seed; equal seeds reproduce equal lists.
    pub seed: u64,
    /// Labels for new and relabeled nodes. Empty disables `RelabelNode`.
    pub label_pool: Vec<String>,
    /// Label given to new nodes when the pool is empty.
    pub default_label: String,
    /// Per-kind costs.
    pub costs: CostTable,
    /// Restricts the drawable kinds; `None` draws from all of them.
    pub kinds: Option<Vec<OperationCode>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            edits: 0,
            seed: 0,
            label_pool: Vec::new(),
            default_label: String::new(),
            costs: CostTable::default(),
            kinds: None,
        }
    }
}

impl GeneratorConfig {
    /// `edits` operations from `seed`, unit costs, no label pool.
    pub fn new(edits: usize, seed: u64) -> Self {
        Self {
            edits,
            seed,
            ..Self::default()
        }
    }

    /// Same config with a label pool.
    pub fn with_label_pool<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_pool = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Same config with a cost table.
    pub fn with_costs(mut self, costs: CostTable) -> Self {
        self.costs = costs;
        self
    }

    /// Same config drawing only from `kinds`.
    pub fn with_kinds(mut self, kinds: impl Into<Vec<OperationCode>>) -> Self {
        self.kinds = Some(kinds.into());
        self
    }

    /// Kinds the generator may draw, in [`OperationCode::ALL`] order.
    ///
    /// `RelabelNode` is only drawable when a label pool is supplied.
    pub fn enabled_kinds(&self) -> Vec<OperationCode> {
        OperationCode::ALL
            .into_iter()
            .filter(|code| self.kinds.as_ref().is_none_or(|k| k.contains(code)))
            .filter(|code| *code != OperationCode::RelabelNode || !self.label_pool.is_empty())
            .collect()
    }

    /// Rejects configurations that can never produce an operation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edits > 0 && self.enabled_kinds().is_empty() {
            return Err(ConfigError::Invalid(
                "no operation kind is enabled (RelabelNode needs a label pool)".into(),
            ));
        }
        Ok(())
    }
}

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The value parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Thin service that serializes config values as JSON and delegates storage
/// to a [`ConfigStore`].
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the service and return the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize a config value for `key`. Returns `Ok(None)` if missing.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) => {
                if bytes.is_empty() {
                    return Ok(None);
                }
                let value = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist a config value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }

    /// Load a [`GeneratorConfig`] for `key` and validate it.
    pub fn load_generator(&self, key: &str) -> Result<Option<GeneratorConfig>, ConfigError> {
        let config: Option<GeneratorConfig> = self.load(key)?;
        if let Some(config) = &config {
            config.validate()?;
        }
        Ok(config)
    }
}
