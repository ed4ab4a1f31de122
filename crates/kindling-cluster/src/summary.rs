//! Cluster summary types

use serde::Serialize;

/// Summary of a discovered cluster
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    /// Cluster name
    pub name: String,

    /// Number of node containers
    pub nodes: u32,
}

impl ClusterSummary {
    /// Create a new summary
    pub fn new(name: impl Into<String>, nodes: u32) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }
}
