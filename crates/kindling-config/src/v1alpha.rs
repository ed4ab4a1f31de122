//! Versioned public cluster schema (v1alpha1)
//!
//! This is the stable, user-facing schema: it is what config documents are
//! written in, and what the topology synthesizer builds before defaulting.
//! Schema defaulting is defined once against this representation; the
//! internal [`Cluster`](crate::cluster::Cluster) type is produced from it
//! by conversion and may evolve independently.

use serde::{Deserialize, Serialize};

/// apiVersion accepted by this schema
pub const API_VERSION: &str = "kindling.dev/v1alpha1";

/// kind accepted by this schema
pub const KIND: &str = "Cluster";

/// Default node image used when a node does not specify one
pub const DEFAULT_NODE_IMAGE: &str = "ghcr.io/kindling-dev/node:v1.33.1";

/// Default pod subnet
pub const DEFAULT_POD_SUBNET: &str = "10.244.0.0/16";

/// Default service subnet
pub const DEFAULT_SERVICE_SUBNET: &str = "10.96.0.0/12";

/// Versioned cluster configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Schema version header
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    /// Schema kind header
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Cluster nodes, in the order they will be created
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// Cluster-wide networking settings
    #[serde(default)]
    pub networking: Networking,
}

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

impl Cluster {
    /// Create an empty versioned cluster with no nodes
    pub fn new() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            nodes: Vec::new(),
            networking: Networking::default(),
        }
    }

    /// Apply schema defaults to every unset field
    ///
    /// Fills empty node images with [`DEFAULT_NODE_IMAGE`] and empty
    /// networking fields with the system defaults. Defaulting never adds
    /// or removes nodes: the node list is exactly what the caller (or the
    /// document) specified.
    pub fn set_defaults(&mut self) {
        for node in &mut self.nodes {
            if node.image.is_empty() {
                node.image = DEFAULT_NODE_IMAGE.to_string();
            }
        }
        self.networking.set_defaults();
    }
}

impl Default for Cluster {
    fn default() -> Self {
        Self::new()
    }
}

/// A single node entry in the versioned schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node role in the cluster
    pub role: NodeRole,

    /// Node container image; empty means "use the default node image"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image: String,
}

/// Node role in the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeRole {
    /// Control plane node
    ControlPlane,
    /// Worker node
    Worker,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::ControlPlane => write!(f, "control-plane"),
            NodeRole::Worker => write!(f, "worker"),
        }
    }
}

/// Cluster-wide networking settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Networking {
    /// Pod subnet CIDR; empty means "use the default"
    #[serde(default)]
    pub pod_subnet: String,

    /// Service subnet CIDR; empty means "use the default"
    #[serde(default)]
    pub service_subnet: String,

    /// Host port for the API server; 0 means "pick a random free port"
    #[serde(default)]
    pub api_server_port: u16,
}

impl Networking {
    /// Apply schema defaults to unset fields
    pub fn set_defaults(&mut self) {
        if self.pod_subnet.is_empty() {
            self.pod_subnet = DEFAULT_POD_SUBNET.to_string();
        }
        if self.service_subnet.is_empty() {
            self.service_subnet = DEFAULT_SERVICE_SUBNET.to_string();
        }
        // api_server_port 0 stays 0: the manager picks a free port at
        // creation time, not the schema.
    }
}
