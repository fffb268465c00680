//! Per-container aggregation over one process-table scan.
//!
//! This is the heart of the crate: given the process samples of one scan, it
//! classifies each sample into a container identity via its cgroup path,
//! accumulates memory, CPU and process counts per identity in a keyed table,
//! and renders the result as a single JSON document.
//!
//! # Key Components
//!
//! - [`SnapshotBuilder`] — drives one scan: filter, identify, accumulate,
//!   render.
//! - [`AggregationTable`] — keyed `id → `[`ContainerAggregate`] store,
//!   rebuilt from scratch for every snapshot.
//! - [`extract_hex_id`] / [`path_hash`] — identity recovery from a cgroup
//!   path, with the deterministic fallback hash.
//! - [`encode_json_string`] — JSON string-literal escaping for rendered
//!   output.
//!
//! # Snapshot lifecycle
//!
//! Table created empty → populated by upsert during the scan → read-only
//! during rendering → dropped. No identifier or accumulator survives into
//! the next read.
mod builder;
mod identity;
mod json;
mod table;

pub use builder::{DEFAULT_RUNTIME_MARKERS, SnapshotBuilder, UNKNOWN_CGROUP_PATH};
pub use identity::{container_identity, extract_hex_id, path_hash};
pub use json::encode_json_string;
pub use table::{AggregationTable, ContainerAggregate};
