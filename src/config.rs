//! Configuration types for rs2-seq

use serde::{Deserialize, Serialize};

use crate::error::{SeqError, SeqResult};

/// Upper bound for [`SubjectConfig::initial_queue_capacity`]
pub const MAX_INITIAL_QUEUE_CAPACITY: usize = 1 << 16;

/// Subject configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Label used in log output
    pub name: Option<String>,
    /// Capacity preallocated for each consumer's queue, capped at
    /// [`MAX_INITIAL_QUEUE_CAPACITY`]. Queues still grow unbounded.
    pub initial_queue_capacity: usize,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            initial_queue_capacity: 16,
        }
    }
}

impl SubjectConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> SeqResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> SeqResult<()> {
        if self.initial_queue_capacity > MAX_INITIAL_QUEUE_CAPACITY {
            return Err(SeqError::Config(format!(
                "initial_queue_capacity {} exceeds the maximum of {}",
                self.initial_queue_capacity, MAX_INITIAL_QUEUE_CAPACITY
            )));
        }
        Ok(())
    }

    /// Preallocation actually used per consumer queue
    pub(crate) fn queue_capacity(&self) -> usize {
        self.initial_queue_capacity.min(MAX_INITIAL_QUEUE_CAPACITY)
    }

    pub(crate) fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("subject")
    }
}
