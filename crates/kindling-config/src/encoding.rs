//! Topology synthesis and config document loading
//!
//! Both entry points produce the internal [`Cluster`] the same way: build
//! or parse the versioned schema, run schema defaulting on it, then
//! convert. Downstream consumers never see an under-defaulted
//! configuration regardless of which path produced it.

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::v1alpha;
use camino::Utf8Path;
use std::fs;
use tracing::debug;

/// Synthesize a cluster configuration from intent parameters
///
/// Appends `control_planes` control-plane nodes followed by `workers`
/// worker nodes, each carrying `image` (possibly empty; defaulting
/// resolves empty images). Zero counts are legal here: a cluster with no
/// control-planes is for the manager to reject, not synthesis.
pub fn synthesize(control_planes: i32, workers: i32, image: &str) -> Result<Cluster> {
    let mut versioned = v1alpha::Cluster::new();

    for _ in 0..control_planes {
        versioned.nodes.push(v1alpha::Node {
            role: v1alpha::NodeRole::ControlPlane,
            image: image.to_string(),
        });
    }

    for _ in 0..workers {
        versioned.nodes.push(v1alpha::Node {
            role: v1alpha::NodeRole::Worker,
            image: image.to_string(),
        });
    }

    versioned.set_defaults();

    debug!(
        "Synthesized cluster config: {} control-plane, {} worker",
        control_planes, workers
    );

    Ok(versioned.into())
}

/// Load a cluster configuration from a config document
///
/// The document is parsed in the versioned schema, defaulted with the
/// same pass as synthesized configurations, and converted. The document
/// replaces synthesis entirely: node order is whatever it specifies.
pub fn load(path: &Utf8Path) -> Result<Cluster> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path.as_str())
        } else {
            Error::Io(e)
        }
    })?;

    let mut versioned: v1alpha::Cluster = serde_yaml_ng::from_str(&content)?;

    if versioned.api_version != v1alpha::API_VERSION {
        return Err(Error::unsupported_api_version(
            &versioned.api_version,
            v1alpha::API_VERSION,
        ));
    }
    if versioned.kind != v1alpha::KIND {
        return Err(Error::invalid_config(format!(
            "unexpected kind: {} (expected {})",
            versioned.kind,
            v1alpha::KIND
        )));
    }

    versioned.set_defaults();

    debug!("Loaded cluster config from {}", path);

    Ok(versioned.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::NodeRole;
    use camino::Utf8PathBuf;

    #[test]
    fn test_synthesize_orders_control_planes_first() {
        let cluster = synthesize(3, 2, "custom:tag").unwrap();
        assert_eq!(cluster.nodes.len(), 5);
        for node in &cluster.nodes[..3] {
            assert_eq!(node.role, NodeRole::ControlPlane);
            assert_eq!(node.image, "custom:tag");
        }
        for node in &cluster.nodes[3..] {
            assert_eq!(node.role, NodeRole::Worker);
            assert_eq!(node.image, "custom:tag");
        }
    }

    #[test]
    fn test_synthesize_single_control_plane_defaults_image() {
        let cluster = synthesize(1, 0, "").unwrap();
        assert_eq!(cluster.nodes.len(), 1);
        assert_eq!(cluster.nodes[0].role, NodeRole::ControlPlane);
        assert_eq!(cluster.nodes[0].image, v1alpha::DEFAULT_NODE_IMAGE);
        assert_eq!(cluster.workers().count(), 0);
    }

    #[test]
    fn test_synthesize_zero_control_planes() {
        let cluster = synthesize(0, 2, "").unwrap();
        assert_eq!(cluster.nodes.len(), 2);
        assert!(cluster.nodes.iter().all(|n| n.role == NodeRole::Worker));
    }

    #[test]
    fn test_synthesize_empty_cluster() {
        let cluster = synthesize(0, 0, "").unwrap();
        assert!(cluster.nodes.is_empty());
    }

    #[test]
    fn test_synthesize_applies_networking_defaults() {
        let cluster = synthesize(1, 0, "").unwrap();
        assert_eq!(cluster.networking.pod_subnet, v1alpha::DEFAULT_POD_SUBNET);
        assert_eq!(
            cluster.networking.service_subnet,
            v1alpha::DEFAULT_SERVICE_SUBNET
        );
    }

    #[test]
    fn test_synthesize_is_idempotent() {
        let a = synthesize(2, 1, "custom:tag").unwrap();
        let b = synthesize(2, 1, "custom:tag").unwrap();
        assert_eq!(a, b);
    }

    fn write_doc(dir: &tempfile::TempDir, content: &str) -> Utf8PathBuf {
        let path = dir.path().join("cluster.yaml");
        std::fs::write(&path, content).unwrap();
        Utf8PathBuf::from_path_buf(path).expect("path should be valid UTF-8")
    }

    #[test]
    fn test_load_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            r#"
apiVersion: kindling.dev/v1alpha1
kind: Cluster
nodes:
  - role: worker
    image: custom:tag
  - role: control-plane
"#,
        );

        let cluster = load(&path).unwrap();
        // Document node order is preserved verbatim.
        assert_eq!(cluster.nodes.len(), 2);
        assert_eq!(cluster.nodes[0].role, NodeRole::Worker);
        assert_eq!(cluster.nodes[0].image, "custom:tag");
        assert_eq!(cluster.nodes[1].role, NodeRole::ControlPlane);
        assert_eq!(cluster.nodes[1].image, v1alpha::DEFAULT_NODE_IMAGE);
    }

    #[test]
    fn test_load_defaults_match_synthesis() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            r#"
nodes:
  - role: control-plane
"#,
        );

        let loaded = load(&path).unwrap();
        let synthesized = synthesize(1, 0, "").unwrap();
        assert_eq!(loaded, synthesized);
    }

    #[test]
    fn test_load_missing_file() {
        let path = Utf8Path::new("/tmp/nonexistent-kindling-config-12345.yaml");
        let err = load(path).unwrap_err();
        assert!(
            matches!(err, Error::ConfigNotFound { .. }),
            "Expected ConfigNotFound, got: {:?}",
            err
        );
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(&dir, "nodes:\n  - role: control-plane\n bad: [[[");
        let err = load(&path).unwrap_err();
        assert!(
            matches!(err, Error::YamlParse(_)),
            "Expected YamlParse, got: {:?}",
            err
        );
    }

    #[test]
    fn test_load_unsupported_api_version() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "apiVersion: kindling.dev/v9\nkind: Cluster\nnodes: []\n",
        );
        let err = load(&path).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedApiVersion { .. }),
            "Expected UnsupportedApiVersion, got: {:?}",
            err
        );
    }

    #[test]
    fn test_load_wrong_kind() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            "apiVersion: kindling.dev/v1alpha1\nkind: Pod\nnodes: []\n",
        );
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("unexpected kind"));
    }
}
