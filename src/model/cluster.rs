//! Remote cluster descriptors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A remote cluster sessions can be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Cluster {
    /// Display name, unique within the configured list
    pub name: String,
    /// Base URL of the cluster's viewer
    pub url: String,
}

impl Cluster {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
