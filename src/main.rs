/// Entry point for the continfo-monitor container reporting tool.
///
/// This binary scans the host's process table, aggregates resource usage
/// per container via cgroup membership paths, and serves the results as
/// JSON over read-only HTTP endpoints.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., a containerized
/// deployment without the host root mount).
///
/// # Examples
///
/// ```bash
/// LISTEN_ADDR=0.0.0.0:3000 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    continfo_monitor::run().await
}
