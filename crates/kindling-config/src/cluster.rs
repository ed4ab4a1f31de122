//! Internal cluster configuration
//!
//! The canonical representation handed to the cluster manager. Produced
//! from the versioned schema by conversion; never constructed directly
//! from user input, so the manager can assume defaulting already ran.

use crate::v1alpha;
use serde::Serialize;

/// Internal cluster configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Cluster nodes, in creation order
    pub nodes: Vec<Node>,

    /// Cluster-wide networking settings
    pub networking: Networking,
}

impl Cluster {
    /// Count nodes with the given role
    pub fn count_role(&self, role: NodeRole) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }

    /// Iterate over control-plane nodes
    pub fn control_planes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|n| n.role == NodeRole::ControlPlane)
    }

    /// Iterate over worker nodes
    pub fn workers(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.role == NodeRole::Worker)
    }
}

/// A single cluster node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Node role; immutable once created
    pub role: NodeRole,

    /// Node container image
    pub image: String,
}

/// Node role in the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
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
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Networking {
    /// Pod subnet CIDR
    pub pod_subnet: String,

    /// Service subnet CIDR
    pub service_subnet: String,

    /// Host port for the API server; 0 means "pick a random free port"
    pub api_server_port: u16,
}

impl From<v1alpha::Cluster> for Cluster {
    fn from(versioned: v1alpha::Cluster) -> Self {
        Self {
            nodes: versioned.nodes.into_iter().map(Node::from).collect(),
            networking: versioned.networking.into(),
        }
    }
}

impl From<v1alpha::Node> for Node {
    fn from(node: v1alpha::Node) -> Self {
        Self {
            role: node.role.into(),
            image: node.image,
        }
    }
}

impl From<v1alpha::NodeRole> for NodeRole {
    fn from(role: v1alpha::NodeRole) -> Self {
        match role {
            v1alpha::NodeRole::ControlPlane => NodeRole::ControlPlane,
            v1alpha::NodeRole::Worker => NodeRole::Worker,
        }
    }
}

impl From<v1alpha::Networking> for Networking {
    fn from(networking: v1alpha::Networking) -> Self {
        Self {
            pod_subnet: networking.pod_subnet,
            service_subnet: networking.service_subnet,
            api_server_port: networking.api_server_port,
        }
    }
}
