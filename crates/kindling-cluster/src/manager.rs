//! Cluster manager trait definition
//!
//! The manager consumes a fully defaulted internal cluster configuration
//! plus creation options and performs the actual provisioning work. The
//! configuration pipeline treats it as opaque: failures come back as
//! errors and are never interpreted or retried.

use crate::options::CreateOptions;
use crate::summary::ClusterSummary;
use anyhow::Result;
use async_trait::async_trait;
use kindling_config::Cluster;

/// Trait for cluster lifecycle managers
///
/// # Example
///
/// ```ignore
/// use kindling_cluster::{ClusterManager, DockerManager, CreateOptions};
///
/// let manager = DockerManager::new();
/// let options = CreateOptions::new().with_retain(true);
/// manager.create("my-cluster", &cluster, &options).await?;
/// ```
#[async_trait]
pub trait ClusterManager: Send + Sync {
    /// Get the manager name (e.g., "docker")
    fn name(&self) -> &'static str;

    /// Create a new cluster from a configuration and options
    ///
    /// # Arguments
    ///
    /// * `name` - Cluster name, used to derive container names and labels
    /// * `cluster` - The internal cluster configuration
    /// * `options` - Creation toggles orthogonal to the configuration
    async fn create(&self, name: &str, cluster: &Cluster, options: &CreateOptions) -> Result<()>;

    /// Delete an existing cluster
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the cluster to delete
    /// * `force` - If true, deleting a missing cluster is not an error
    async fn delete(&self, name: &str, force: bool) -> Result<()>;

    /// Check if a cluster with the given name exists
    async fn exists(&self, name: &str) -> bool;

    /// List all clusters managed by this manager
    async fn list(&self) -> Result<Vec<ClusterSummary>>;

    /// Check if Docker is available and running
    fn check_docker(&self) -> bool {
        // Check if docker command exists
        if which::which("docker").is_err() {
            return false;
        }

        // Check if docker daemon is running
        std::process::Command::new("docker")
            .args(["info"])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}
