//! Cluster intent and flag validation
//!
//! [`ClusterIntent`] carries the raw caller input for cluster creation.
//! Was-set information is modeled directly: the four fields that may
//! conflict with `--config` are `Option`s (or bool switches, which can
//! only be set to true), so "explicitly supplied" is never inferred by
//! comparing a value against its default.

use crate::error::{Error, Result};
use camino::Utf8PathBuf;

/// Default cluster name
pub const DEFAULT_CLUSTER_NAME: &str = "kindling";

/// Flag name for the control-plane node count
pub const CONTROL_PLANE_NODES_FLAG: &str = "control-plane-nodes";

/// Flag name for the worker node count
pub const WORKER_NODES_FLAG: &str = "worker-nodes";

/// Flag name for the external etcd toggle
pub const EXTERNAL_ETCD_FLAG: &str = "external-etcd";

/// Flag name for the external load balancer toggle
pub const EXTERNAL_LOAD_BALANCER_FLAG: &str = "external-load-balancer";

/// Default control-plane node count when the flag is not supplied
pub const DEFAULT_CONTROL_PLANE_NODES: i32 = 1;

/// Default worker node count when the flag is not supplied
pub const DEFAULT_WORKER_NODES: i32 = 0;

/// Raw, caller-supplied cluster creation input
///
/// Built once per invocation from parsed flags and never mutated. The
/// intent itself is never handed to the cluster manager; it is always
/// transformed into a [`Cluster`](crate::cluster::Cluster) first.
#[derive(Debug, Clone, Default)]
pub struct ClusterIntent {
    /// Cluster name
    pub name: String,

    /// Path to an external config document, if one was supplied
    pub config: Option<Utf8PathBuf>,

    /// Requested control-plane node count; `None` means "not supplied"
    pub control_plane_nodes: Option<i32>,

    /// Requested worker node count; `None` means "not supplied"
    pub worker_nodes: Option<i32>,

    /// Requested node image; `None` means "use the system default"
    pub image: Option<String>,

    /// Retain nodes for debugging when creation fails
    pub retain: bool,

    /// Create an external etcd container
    pub external_etcd: bool,

    /// Add an external load balancer
    pub external_load_balancer: bool,
}

impl ClusterIntent {
    /// Effective control-plane node count, with the default applied
    pub fn control_planes(&self) -> i32 {
        self.control_plane_nodes
            .unwrap_or(DEFAULT_CONTROL_PLANE_NODES)
    }

    /// Effective worker node count, with the default applied
    pub fn workers(&self) -> i32 {
        self.worker_nodes.unwrap_or(DEFAULT_WORKER_NODES)
    }

    /// Effective node image; empty means "use the system default"
    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or("")
    }

    /// Validate the intent before any construction work happens
    ///
    /// Rule 1: `--config` is a complete topology specification, so it
    /// cannot be combined with explicitly supplied topology flags. The
    /// error names exactly the flags that were supplied.
    ///
    /// Rule 2: node counts must not be negative, with or without a
    /// config document.
    pub fn validate(&self) -> Result<()> {
        if self.config.is_some() {
            let mut conflicting = Vec::new();
            if self.control_plane_nodes.is_some() {
                conflicting.push(CONTROL_PLANE_NODES_FLAG);
            }
            if self.worker_nodes.is_some() {
                conflicting.push(WORKER_NODES_FLAG);
            }
            if self.external_etcd {
                conflicting.push(EXTERNAL_ETCD_FLAG);
            }
            if self.external_load_balancer {
                conflicting.push(EXTERNAL_LOAD_BALANCER_FLAG);
            }
            if !conflicting.is_empty() {
                return Err(Error::conflicting_flags(&conflicting));
            }
        }

        let mut negative = Vec::new();
        if self.control_planes() < 0 {
            negative.push(CONTROL_PLANE_NODES_FLAG);
        }
        if self.workers() < 0 {
            negative.push(WORKER_NODES_FLAG);
        }
        if !negative.is_empty() {
            return Err(Error::negative_node_count(&negative));
        }

        Ok(())
    }
}
