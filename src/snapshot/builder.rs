use crate::proc::ProcessSample;

use super::identity;
use super::json::encode_json_string;
use super::table::AggregationTable;

/// Substrings recognized as container-runtime cgroup hierarchies.
pub const DEFAULT_RUNTIME_MARKERS: &[&str] = &["docker", "containerd", "kubepods"];

/// Sentinel grouping path for processes without cgroup membership.
pub const UNKNOWN_CGROUP_PATH: &str = "unknown";

/// Builds one aggregated container snapshot from a stream of process
/// samples.
///
/// A snapshot is computed fresh for every request: a new
/// [`AggregationTable`] is created, populated in a single pass over the
/// samples, rendered, and dropped. Nothing carries over between reads, so
/// concurrent readers never share mutable state.
///
/// Classification is a substring heuristic, not a cgroup parser: a sample
/// participates only if its path contains one of the configured runtime
/// markers. False positives are possible and accepted.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    markers: Vec<String>,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self {
            markers: DEFAULT_RUNTIME_MARKERS
                .iter()
                .map(|m| (*m).to_owned())
                .collect(),
        }
    }
}

impl SnapshotBuilder {
    /// Creates a builder recognizing the given marker substrings.
    ///
    /// An empty marker list is allowed and matches nothing.
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    fn is_container_path(&self, path: &str) -> bool {
        self.markers.iter().any(|m| path.contains(m.as_str()))
    }

    /// Runs the aggregation pass over `samples` into a fresh table.
    ///
    /// Samples outside any recognized runtime hierarchy are skipped
    /// entirely. Per-sample problems never abort the pass.
    pub fn build(&self, samples: impl IntoIterator<Item = ProcessSample>) -> AggregationTable {
        let mut table = AggregationTable::new();

        for sample in samples {
            let path = sample.cgroup_path.as_deref().unwrap_or(UNKNOWN_CGROUP_PATH);
            if !self.is_container_path(path) {
                continue;
            }

            let id = identity::container_identity(path);
            table
                .upsert(id, path)
                .accumulate(sample.rss_kb, sample.cpu_ticks);
        }

        table
    }

    /// Renders the aggregation table as the snapshot JSON document.
    ///
    /// Entry order follows table iteration order and is unspecified.
    pub fn render(&self, table: &AggregationTable) -> String {
        let mut out = String::with_capacity(64 + table.len() * 256);

        out.push_str("{\n");
        out.push_str(&format!("  \"Count\": {},\n", table.len()));
        out.push_str("  \"Containers\": [\n");

        let mut first = true;
        for agg in table.iter() {
            if !first {
                out.push_str(",\n");
            }
            first = false;

            out.push_str("    {\n");
            out.push_str("      \"ContainerID\": ");
            encode_json_string(&mut out, agg.id().as_ref());
            out.push_str(",\n");
            out.push_str("      \"CgroupPath\": ");
            encode_json_string(&mut out, agg.cgroup_path());
            out.push_str(",\n");
            out.push_str(&format!("      \"RSS_KB\": {},\n", agg.rss_kb()));
            out.push_str(&format!("      \"CPU_Jiffies\": {},\n", agg.cpu_jiffies()));
            out.push_str(&format!("      \"Procs\": {}\n", agg.procs()));
            out.push_str("    }");
        }

        if !first {
            out.push('\n');
        }
        out.push_str("  ]\n}\n");
        out
    }

    /// One full snapshot: aggregate `samples`, render, drop the table.
    pub fn snapshot(&self, samples: impl IntoIterator<Item = ProcessSample>) -> String {
        self.render(&self.build(samples))
    }
}
