//! Cluster deletion command

use crate::cli::DeleteArgs;
use anyhow::Result;
use kindling_cluster::{ClusterManager, DockerManager};
use owo_colors::OwoColorize;

/// Run the delete command
pub async fn run(args: DeleteArgs) -> Result<()> {
    let manager = DockerManager::new();

    if !manager.exists(&args.name).await && args.force {
        eprintln!(
            "{} Cluster '{}' does not exist",
            "Warning:".yellow().bold(),
            args.name
        );
        return Ok(());
    }

    manager.delete(&args.name, args.force).await?;

    eprintln!(
        "{} Cluster '{}' deleted",
        "Success:".green().bold(),
        args.name
    );

    Ok(())
}
