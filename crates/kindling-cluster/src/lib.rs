//! Cluster lifecycle management for kindling
//!
//! This crate provides the cluster-manager abstraction consumed by the
//! CLI: a [`ClusterManager`] trait plus a Docker-backed implementation
//! that runs cluster nodes as containers.
//!
//! # Example
//!
//! ```ignore
//! use kindling_cluster::{ClusterManager, CreateOptions, DockerManager};
//! use kindling_config::synthesize;
//!
//! let manager = DockerManager::new();
//! let cluster = synthesize(1, 2, "")?;
//! let options = CreateOptions::new().with_retain(true);
//!
//! manager.create("my-cluster", &cluster, &options).await?;
//!
//! for summary in manager.list().await? {
//!     println!("  - {} ({} nodes)", summary.name, summary.nodes);
//! }
//!
//! manager.delete("my-cluster", true).await?;
//! ```

pub mod docker;
pub mod manager;
pub mod options;
pub mod summary;

pub use docker::{ContainerRole, ContainerSpec, DockerManager};
pub use manager::ClusterManager;
pub use options::CreateOptions;
pub use summary::ClusterSummary;
