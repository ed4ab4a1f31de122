//! Docker-backed cluster manager
//!
//! Runs each cluster node as a Docker container. Containers are named
//! `{cluster}-{role}-{n}` and labeled with the cluster name so that
//! existence checks, listing, and deletion work from labels alone.
//!
//! # Auxiliary containers
//!
//! An external load balancer container is added when requested or
//! implicitly when the cluster has more than one control-plane node. An
//! external etcd container is added only when requested.

use crate::manager::ClusterManager;
use crate::options::CreateOptions;
use crate::summary::ClusterSummary;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use kindling_config::{Cluster, NodeRole};
use std::collections::BTreeMap;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Label carrying the owning cluster name
pub const CLUSTER_LABEL: &str = "io.kindling.cluster";

/// Label carrying the container role
pub const ROLE_LABEL: &str = "io.kindling.role";

/// Image used for the external load balancer container
const LOAD_BALANCER_IMAGE: &str = "ghcr.io/kindling-dev/haproxy:v2.9.6";

/// Image used for the external etcd container
const ETCD_IMAGE: &str = "ghcr.io/kindling-dev/etcd:v3.5.12";

/// Role of a single container in the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRole {
    /// Control plane node
    ControlPlane,
    /// Worker node
    Worker,
    /// External load balancer
    LoadBalancer,
    /// External etcd
    Etcd,
}

impl std::fmt::Display for ContainerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerRole::ControlPlane => write!(f, "control-plane"),
            ContainerRole::Worker => write!(f, "worker"),
            ContainerRole::LoadBalancer => write!(f, "external-load-balancer"),
            ContainerRole::Etcd => write!(f, "external-etcd"),
        }
    }
}

/// One container to be created for a cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    /// Container (and hostname) name
    pub name: String,

    /// Container image
    pub image: String,

    /// Container role
    pub role: ContainerRole,
}

/// Docker-backed cluster manager
pub struct DockerManager {
    /// Path to docker binary (if not in PATH)
    binary_path: Option<String>,
}

impl DockerManager {
    /// Create a new Docker manager
    pub fn new() -> Self {
        Self { binary_path: None }
    }

    /// Create a Docker manager with a specific binary path
    pub fn with_binary_path(path: impl Into<String>) -> Self {
        Self {
            binary_path: Some(path.into()),
        }
    }

    /// Get the docker command
    fn docker_cmd(&self) -> String {
        self.binary_path
            .clone()
            .unwrap_or_else(|| "docker".to_string())
    }

    /// Compute the containers to create for a cluster
    ///
    /// Auxiliary containers come first so the nodes can resolve them at
    /// boot: etcd, then the load balancer, then the configured nodes in
    /// config order with per-role numbering starting at 1.
    pub fn container_plan(
        name: &str,
        cluster: &Cluster,
        options: &CreateOptions,
    ) -> Vec<ContainerSpec> {
        let mut plan = Vec::new();

        if options.external_etcd {
            plan.push(ContainerSpec {
                name: format!("{}-etcd", name),
                image: ETCD_IMAGE.to_string(),
                role: ContainerRole::Etcd,
            });
        }

        // Implicit when more than one control-plane needs fronting.
        if options.external_load_balancer || cluster.count_role(NodeRole::ControlPlane) > 1 {
            plan.push(ContainerSpec {
                name: format!("{}-lb", name),
                image: LOAD_BALANCER_IMAGE.to_string(),
                role: ContainerRole::LoadBalancer,
            });
        }

        let mut control_planes = 0;
        let mut workers = 0;
        for node in &cluster.nodes {
            let (role, ordinal) = match node.role {
                NodeRole::ControlPlane => {
                    control_planes += 1;
                    (ContainerRole::ControlPlane, control_planes)
                }
                NodeRole::Worker => {
                    workers += 1;
                    (ContainerRole::Worker, workers)
                }
            };
            plan.push(ContainerSpec {
                name: format!("{}-{}-{}", name, role, ordinal),
                image: node.image.clone(),
                role,
            });
        }

        plan
    }

    /// Start a single container for a cluster
    async fn run_container(&self, cluster_name: &str, spec: &ContainerSpec) -> Result<()> {
        debug!("Starting container {} ({})", spec.name, spec.image);

        let cluster_label = format!("{}={}", CLUSTER_LABEL, cluster_name);
        let role_label = format!("{}={}", ROLE_LABEL, spec.role);
        let output = Command::new(self.docker_cmd())
            .args([
                "run",
                "--detach",
                "--privileged",
                "--name",
                spec.name.as_str(),
                "--hostname",
                spec.name.as_str(),
                "--label",
                cluster_label.as_str(),
                "--label",
                role_label.as_str(),
                spec.image.as_str(),
            ])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "Failed to start container {}: {}",
                spec.name,
                stderr.trim()
            ));
        }

        Ok(())
    }

    /// Get the names of all containers belonging to a cluster
    async fn container_names(&self, name: &str) -> Result<Vec<String>> {
        let filter = format!("label={}={}", CLUSTER_LABEL, name);
        let output = Command::new(self.docker_cmd())
            .args([
                "ps",
                "--all",
                "--filter",
                filter.as_str(),
                "--format",
                "{{.Names}}",
            ])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Failed to list containers: {}", stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .collect())
    }

    /// Remove all containers belonging to a cluster
    async fn remove_containers(&self, name: &str) -> Result<()> {
        let containers = self.container_names(name).await?;
        if containers.is_empty() {
            return Ok(());
        }

        let mut args = vec!["rm".to_string(), "--force".to_string(), "--volumes".to_string()];
        args.extend(containers);

        let output = Command::new(self.docker_cmd()).args(&args).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Failed to remove containers: {}", stderr.trim()));
        }

        Ok(())
    }

    /// Build cluster summaries from label listing output
    ///
    /// Input lines are `{cluster}\t{role}` pairs, one per container.
    /// Only node containers count toward the node total.
    fn summarize(lines: &str) -> Vec<ClusterSummary> {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();

        for line in lines.lines() {
            let mut parts = line.trim().splitn(2, '\t');
            let (Some(cluster), Some(role)) = (parts.next(), parts.next()) else {
                continue;
            };
            if cluster.is_empty() {
                continue;
            }
            let entry = counts.entry(cluster.to_string()).or_default();
            if role == "control-plane" || role == "worker" {
                *entry += 1;
            }
        }

        counts
            .into_iter()
            .map(|(name, nodes)| ClusterSummary::new(name, nodes))
            .collect()
    }
}

impl Default for DockerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClusterManager for DockerManager {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn create(&self, name: &str, cluster: &Cluster, options: &CreateOptions) -> Result<()> {
        if !self.check_docker() {
            return Err(anyhow!(
                "Docker is not running. Please start Docker and try again."
            ));
        }

        if self.exists(name).await {
            return Err(anyhow!("Cluster '{}' already exists", name));
        }

        let plan = Self::container_plan(name, cluster, options);
        info!(
            "Creating cluster '{}' ({} containers)",
            name,
            plan.len()
        );

        for spec in &plan {
            if let Err(e) = self.run_container(name, spec).await {
                if options.retain {
                    warn!("Creation failed; retaining containers for debugging");
                } else if let Err(cleanup) = self.remove_containers(name).await {
                    warn!("Rollback failed: {}", cleanup);
                }
                return Err(e);
            }
        }

        info!("Cluster '{}' created successfully", name);
        Ok(())
    }

    async fn delete(&self, name: &str, force: bool) -> Result<()> {
        if !self.exists(name).await {
            if force {
                warn!("Cluster '{}' does not exist", name);
                return Ok(());
            }
            return Err(anyhow!("Cluster '{}' does not exist", name));
        }

        info!("Deleting cluster: {}", name);
        self.remove_containers(name).await?;
        info!("Cluster '{}' deleted", name);
        Ok(())
    }

    async fn exists(&self, name: &str) -> bool {
        match self.container_names(name).await {
            Ok(containers) => !containers.is_empty(),
            Err(_) => false,
        }
    }

    async fn list(&self) -> Result<Vec<ClusterSummary>> {
        let filter = format!("label={}", CLUSTER_LABEL);
        let format = format!(
            "{{{{.Label \"{}\"}}}}\t{{{{.Label \"{}\"}}}}",
            CLUSTER_LABEL, ROLE_LABEL
        );
        let output = Command::new(self.docker_cmd())
            .args([
                "ps",
                "--all",
                "--filter",
                filter.as_str(),
                "--format",
                format.as_str(),
            ])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Failed to list clusters: {}", stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Self::summarize(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindling_config::synthesize;

    #[test]
    fn test_plan_single_control_plane() {
        let cluster = synthesize(1, 0, "node:v1").unwrap();
        let plan = DockerManager::container_plan("test", &cluster, &CreateOptions::new());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name, "test-control-plane-1");
        assert_eq!(plan[0].image, "node:v1");
        assert_eq!(plan[0].role, ContainerRole::ControlPlane);
    }

    #[test]
    fn test_plan_numbers_nodes_per_role() {
        let cluster = synthesize(2, 2, "node:v1").unwrap();
        let plan = DockerManager::container_plan("ha", &cluster, &CreateOptions::new());

        let names: Vec<&str> = plan.iter().map(|s| s.name.as_str()).collect();
        // Two control-planes imply a load balancer.
        assert_eq!(
            names,
            vec![
                "ha-lb",
                "ha-control-plane-1",
                "ha-control-plane-2",
                "ha-worker-1",
                "ha-worker-2",
            ]
        );
    }

    #[test]
    fn test_plan_explicit_load_balancer() {
        let cluster = synthesize(1, 0, "node:v1").unwrap();
        let options = CreateOptions::new().with_external_load_balancer(true);
        let plan = DockerManager::container_plan("test", &cluster, &options);

        assert_eq!(plan[0].role, ContainerRole::LoadBalancer);
        assert_eq!(plan[0].name, "test-lb");
    }

    #[test]
    fn test_plan_external_etcd_first() {
        let cluster = synthesize(3, 1, "node:v1").unwrap();
        let options = CreateOptions::new().with_external_etcd(true);
        let plan = DockerManager::container_plan("test", &cluster, &options);

        assert_eq!(plan[0].role, ContainerRole::Etcd);
        assert_eq!(plan[0].name, "test-etcd");
        assert_eq!(plan[1].role, ContainerRole::LoadBalancer);
        assert_eq!(plan.len(), 6);
    }

    #[test]
    fn test_plan_empty_cluster() {
        let cluster = synthesize(0, 0, "").unwrap();
        let plan = DockerManager::container_plan("test", &cluster, &CreateOptions::new());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_summarize_counts_node_containers_only() {
        let lines = "alpha\tcontrol-plane\n\
                     alpha\tworker\n\
                     alpha\texternal-load-balancer\n\
                     beta\tcontrol-plane\n";
        let summaries = DockerManager::summarize(lines);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "alpha");
        assert_eq!(summaries[0].nodes, 2);
        assert_eq!(summaries[1].name, "beta");
        assert_eq!(summaries[1].nodes, 1);
    }

    #[test]
    fn test_summarize_ignores_blank_lines() {
        let summaries = DockerManager::summarize("\n\n");
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_container_role_display() {
        assert_eq!(ContainerRole::ControlPlane.to_string(), "control-plane");
        assert_eq!(ContainerRole::Worker.to_string(), "worker");
        assert_eq!(
            ContainerRole::LoadBalancer.to_string(),
            "external-load-balancer"
        );
        assert_eq!(ContainerRole::Etcd.to_string(), "external-etcd");
    }
}
