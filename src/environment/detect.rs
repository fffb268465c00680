use std::path::Path;
use std::{env, fs};

use crate::fsutil;
use crate::snapshot::{DEFAULT_RUNTIME_MARKERS, extract_hex_id};

use super::{Error, Result};

/// Available runtime environments for the monitoring tool.
#[derive(Debug, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    /// Running directly on the host.
    Host,
    /// Running inside a containerized environment (e.g., Docker,
    /// Kubernetes, Podman).
    Container,
}

/// Detects whether the current process runs in a container or on the host.
///
/// Heuristics, in order: a PID namespace differing from the init process
/// visible under `rootfs`, container runtime traces in
/// `/proc/self/cgroup`, and well-known marker files or environment
/// variables. Individual check failures are logged as warnings and never
/// fail the detection.
pub fn detect_runtime_environment(rootfs: impl AsRef<Path>) -> RuntimeEnvironment {
    let rootfs = rootfs.as_ref();

    match pid_namespace_differs(rootfs) {
        Ok(true) => return RuntimeEnvironment::Container,
        Ok(false) => {}
        Err(err) => log::warn!(
            "Namespace check failed when detecting runtime environment: {}",
            err
        ),
    }

    match self_cgroup_is_containerized() {
        Ok(true) => return RuntimeEnvironment::Container,
        Ok(false) => {}
        Err(err) => log::warn!("Cgroup analysis failed during runtime detection: {}", err),
    }

    if has_container_markers() {
        return RuntimeEnvironment::Container;
    }

    RuntimeEnvironment::Host
}

/// Returns true if the init process visible under `rootfs` lives in a
/// different PID namespace than this process.
///
/// A missing `proc` mount under `rootfs` reads as "no evidence" rather
/// than an error.
fn pid_namespace_differs(rootfs: &Path) -> Result<bool> {
    let proc_dir = rootfs.join("proc");
    let exists = proc_dir.try_exists().map_err(|source| Error::ExistenceCheck {
        path: proc_dir.clone(),
        source,
    })?;
    if !exists {
        return Ok(false);
    }

    let self_ns_path = Path::new("/proc/self/ns/pid");
    let self_ns = fs::read_link(self_ns_path).map_err(|source| Error::ReadSymlink {
        path: self_ns_path.to_path_buf(),
        source,
    })?;

    let root_ns_path = rootfs.join("proc/1/ns/pid");
    let root_ns = fs::read_link(&root_ns_path).map_err(|source| Error::ReadSymlink {
        path: root_ns_path,
        source,
    })?;

    Ok(self_ns != root_ns)
}

fn self_cgroup_is_containerized() -> Result<bool> {
    let content = fsutil::read_file_to_string("/proc/self/cgroup")?;
    Ok(cgroup_content_is_containerized(&content))
}

/// Returns true if any cgroup line carries a runtime marker substring or a
/// full 64-character hex identifier.
fn cgroup_content_is_containerized(content: &str) -> bool {
    content.lines().any(|line| {
        DEFAULT_RUNTIME_MARKERS.iter().any(|m| line.contains(m)) || extract_hex_id(line).is_some()
    })
}

/// Returns true if known container marker files or variables exist
/// (e.g., `/.dockerenv`, the `container` env var).
fn has_container_markers() -> bool {
    fs::metadata("/.dockerenv").is_ok()
        || fs::metadata("/run/.containerenv").is_ok()
        || env::var_os("container").is_some()
}
