use std::path::PathBuf;

use environment::RuntimeEnvironment;

/// continfo-monitor: reports per-container resource usage by scanning the
/// host's process table.
///
/// Each process is classified into a container identity through its cgroup
/// membership path; memory, CPU time and process counts are aggregated per
/// identity and exposed as a JSON snapshot recomputed fresh on every read.
/// A companion endpoint reports whole-system memory and a per-process
/// listing without any aggregation.
pub mod api;
pub mod container;
pub mod environment;
pub mod error;
pub mod fsutil;
pub mod proc;
pub mod snapshot;
pub mod system;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Runs the monitor.
///
/// Resolves which procfs tree to scan (the host root mount when running
/// containerized, `/` otherwise), reads the runtime marker configuration,
/// and serves the read-only reporting endpoints.
///
/// # Errors
///
/// Returns an error if a container runtime environment is detected but the
/// host root mount is missing.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let rootfs = std::env::var_os("ROOTFS_MOUNT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/rootfs"));
    let runtime_env = environment::detect_runtime_environment(&rootfs);
    if matches!(runtime_env, RuntimeEnvironment::Container) && !rootfs.exists() {
        return Err(format!(
            "Detected container runtime environment, but missing host root mount at `{}`!",
            rootfs.display()
        )
        .into());
    }

    let rootfs = match runtime_env {
        RuntimeEnvironment::Container => rootfs,
        RuntimeEnvironment::Host => PathBuf::from("/"),
    };
    log::debug!("Final rootfs: {}", rootfs.display());

    let builder = match std::env::var("CONTAINER_RUNTIME_MARKERS") {
        Ok(raw) => snapshot::SnapshotBuilder::new(
            raw.split(',')
                .map(|m| m.trim().to_owned())
                .filter(|m| !m.is_empty())
                .collect(),
        ),
        Err(_) => snapshot::SnapshotBuilder::default(),
    };
    log::debug!("Runtime markers: {:?}", builder.markers());

    let enumerator = proc::Enumerator::new(&rootfs);
    let state = api::ReportState::new(enumerator, builder);

    let listen_addr =
        std::env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_owned());
    log::info!("Listening on {}", &listen_addr);

    let server = api::APIServer::new(state).await;
    server.listen(listen_addr.as_str()).await;
    Ok(())
}
