//! Cluster creation options
//!
//! Named toggles passed alongside the cluster configuration. They are
//! orthogonal to the topology itself and are never merged into it.

use serde::Serialize;

/// Options controlling how a cluster is created
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CreateOptions {
    /// Add an external load balancer in front of the control plane
    pub external_load_balancer: bool,

    /// Create an external etcd container instead of stacked etcd
    pub external_etcd: bool,

    /// Retain node containers for debugging when creation fails
    pub retain: bool,
}

impl CreateOptions {
    /// Create options with all toggles off
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the external load balancer toggle
    pub fn with_external_load_balancer(mut self, enabled: bool) -> Self {
        self.external_load_balancer = enabled;
        self
    }

    /// Set the external etcd toggle
    pub fn with_external_etcd(mut self, enabled: bool) -> Self {
        self.external_etcd = enabled;
        self
    }

    /// Set the retain-on-failure toggle
    pub fn with_retain(mut self, enabled: bool) -> Self {
        self.retain = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CreateOptions::new();
        assert!(!options.external_load_balancer);
        assert!(!options.external_etcd);
        assert!(!options.retain);
    }

    #[test]
    fn test_builder() {
        let options = CreateOptions::new()
            .with_external_etcd(true)
            .with_retain(true);
        assert!(options.external_etcd);
        assert!(options.retain);
        assert!(!options.external_load_balancer);
    }
}
