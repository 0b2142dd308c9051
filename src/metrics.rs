//! Host-wide registry of metric keys.
//!
//! Every component that provides metrics announces its keys here. A key can
//! be owned by one plugin only; the registry is consulted before any plugin
//! accepts a new key so that uniqueness holds across the whole process.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// A metric announced by a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricInfo {
    /// The metric key, without parameters.
    pub key: String,
    /// Name of the plugin that serves the key.
    pub plugin: String,
    /// Human-readable description.
    pub description: String,
}

/// The key is already served by a plugin.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("metric \"{key}\" is already provided by plugin \"{plugin}\"")]
pub struct DuplicateMetric {
    pub key: String,
    pub plugin: String,
}

/// Registry of all metric keys known to the host.
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    metrics: BTreeMap<String, MetricInfo>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce a key on behalf of `plugin`.
    ///
    /// Fails without modifying the registry if the key is already taken.
    pub fn register(
        &mut self,
        key: &str,
        plugin: &str,
        description: &str,
    ) -> Result<(), DuplicateMetric> {
        if let Some(existing) = self.metrics.get(key) {
            return Err(DuplicateMetric {
                key: key.to_string(),
                plugin: existing.plugin.clone(),
            });
        }

        self.metrics.insert(
            key.to_string(),
            MetricInfo {
                key: key.to_string(),
                plugin: plugin.to_string(),
                description: description.to_string(),
            },
        );
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&MetricInfo> {
        self.metrics.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.metrics.contains_key(key)
    }

    /// All metrics, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &MetricInfo> {
        self.metrics.values()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
