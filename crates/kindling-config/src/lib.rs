//! # kindling-config
//!
//! Configuration core for the kindling CLI providing:
//! - Cluster intent validation (flag mutual exclusion, node counts)
//! - Topology synthesis from intent parameters
//! - Versioned schema (v1alpha1) with schema defaulting
//! - Config document loading and conversion to the internal representation

pub mod cluster;
pub mod encoding;
pub mod error;
pub mod intent;
pub mod v1alpha;

pub use cluster::{Cluster, Networking, Node, NodeRole};
pub use encoding::{load, synthesize};
pub use error::{Error, Result};
pub use intent::{
    ClusterIntent, DEFAULT_CLUSTER_NAME, DEFAULT_CONTROL_PLANE_NODES, DEFAULT_WORKER_NODES,
};
