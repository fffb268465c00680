//! Process enumeration over a procfs tree.
//!
//! This module plays the "process enumerator" role for the snapshot core:
//! it walks `<rootfs>/proc/<pid>/`, reads the per-process counters the
//! aggregation needs, and yields them as plain [`ProcessSample`] values.
//! The snapshot code never touches the filesystem itself, which keeps it
//! testable against hand-built sample vectors.
//!
//! A process that disappears between directory listing and file reads is
//! skipped silently; that is normal churn, not an error. Only the inability
//! to list the process directory at all fails an enumeration.
mod cgroup;
mod error;
mod meminfo;
mod parser;
mod stat;
mod status;

pub use cgroup::membership_path;
pub use error::{Error, Result};
pub use meminfo::MemInfo;
pub use parser::KeyValueFile;
pub use stat::{ProcStat, total_cpu_ticks};
pub use status::ProcStatus;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResultOkLogExt;
use crate::fsutil;

/// One process's contribution to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSample {
    pub pid: i32,
    /// Resident memory in kB; 0 for processes without a mapped address
    /// space.
    pub rss_kb: u64,
    /// Accumulated user + kernel CPU time in clock ticks.
    pub cpu_ticks: u64,
    /// Cgroup membership path, `None` when the process has no resolvable
    /// membership.
    pub cgroup_path: Option<String>,
}

/// Walks a procfs tree, producing per-process samples and whole-system
/// counters.
#[derive(Debug, Clone)]
pub struct Enumerator {
    proc_root: PathBuf,
}

impl Enumerator {
    /// Creates an enumerator reading `<rootfs>/proc`.
    pub fn new(rootfs: impl AsRef<Path>) -> Self {
        Self {
            proc_root: rootfs.as_ref().join("proc"),
        }
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    /// Lists the process ids currently visible in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListDir`] if the proc root cannot be read.
    pub fn pids(&self) -> Result<Vec<i32>> {
        let entries = fs::read_dir(&self.proc_root).map_err(|source| Error::ListDir {
            path: self.proc_root.clone(),
            source,
        })?;

        let mut pids = Vec::new();
        for entry in entries.flatten() {
            if let Some(pid) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<i32>().ok())
            {
                pids.push(pid);
            }
        }

        Ok(pids)
    }

    /// Collects one sample per process visible right now.
    ///
    /// Processes that vanish mid-scan or whose stat line cannot be parsed
    /// are dropped from the result, never reported as errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListDir`] if the proc root cannot be read.
    pub fn samples(&self) -> Result<Vec<ProcessSample>> {
        let pids = self.pids()?;
        let mut out = Vec::with_capacity(pids.len());

        for pid in pids {
            if let Some(sample) = self.sample(pid) {
                out.push(sample);
            }
        }

        Ok(out)
    }

    /// Reads one process's sample; `None` if it exited mid-scan.
    pub fn sample(&self, pid: i32) -> Option<ProcessSample> {
        let stat = self.stat(pid)?;
        let rss_kb = self.status(pid).map(|s| s.vm_rss_kb).unwrap_or(0);
        let cgroup_path = self.cgroup_path(pid);

        Some(ProcessSample {
            pid,
            rss_kb,
            cpu_ticks: stat.total_ticks(),
            cgroup_path,
        })
    }

    /// CPU counters from `<proc>/<pid>/stat`.
    pub fn stat(&self, pid: i32) -> Option<ProcStat> {
        let line = fs::read_to_string(self.pid_path(pid, "stat"))
            .ok_log_with(&format!("skipping pid {pid}"))?;
        ProcStat::from_line(&line)
    }

    /// Memory fields from `<proc>/<pid>/status`.
    pub fn status(&self, pid: i32) -> Option<ProcStatus> {
        let mut reader = fsutil::open_file_reader(self.pid_path(pid, "status")).ok()?;
        ProcStatus::from_reader(&mut reader).ok()
    }

    /// Cgroup membership path from `<proc>/<pid>/cgroup`.
    pub fn cgroup_path(&self, pid: i32) -> Option<String> {
        let mut reader = fsutil::open_file_reader(self.pid_path(pid, "cgroup")).ok()?;
        membership_path(&mut reader).ok().flatten()
    }

    /// Task name from `<proc>/<pid>/comm`.
    pub fn comm(&self, pid: i32) -> Option<String> {
        fs::read_to_string(self.pid_path(pid, "comm"))
            .ok()
            .map(|name| name.trim_end().to_owned())
    }

    /// Command line from `<proc>/<pid>/cmdline`, NUL separators replaced
    /// with spaces and trailing whitespace trimmed.
    ///
    /// Returns `None` when the file is empty (kernel threads) or
    /// unreadable.
    pub fn cmdline(&self, pid: i32) -> Option<String> {
        let raw = fs::read(self.pid_path(pid, "cmdline")).ok()?;
        let text = String::from_utf8_lossy(&raw).replace('\0', " ");
        let text = text.trim_end();

        if text.is_empty() {
            None
        } else {
            Some(text.to_owned())
        }
    }

    /// Whole-system memory figures from `<proc>/meminfo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn meminfo(&self) -> Result<MemInfo> {
        let path = self.proc_root.join("meminfo");
        let mut reader = fsutil::open_file_reader(&path)?;
        MemInfo::from_reader(&mut reader).map_err(|source| Error::ReadFile { path, source })
    }

    /// Total accumulated CPU ticks from the aggregate line of
    /// `<proc>/stat`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn total_cpu_ticks(&self) -> Result<u64> {
        let path = self.proc_root.join("stat");
        let mut reader = fsutil::open_file_reader(&path)?;
        total_cpu_ticks(&mut reader).map_err(|source| Error::ReadFile { path, source })
    }

    fn pid_path(&self, pid: i32, file: &str) -> PathBuf {
        self.proc_root.join(pid.to_string()).join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Builds a minimal procfs tree inside a tempdir:
    // <root>/proc/<pid>/{stat,status,cgroup,comm,cmdline} plus top-level
    // stat and meminfo.
    fn write_proc_entry(
        root: &Path,
        pid: i32,
        comm: &str,
        utime: u64,
        stime: u64,
        rss_kb: Option<u64>,
        cgroup: Option<&str>,
    ) {
        let dir = root.join("proc").join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();

        let mut stat = fs::File::create(dir.join("stat")).unwrap();
        write!(
            stat,
            "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194304 100 0 0 0 {utime} {stime} 0 0 20 0 1 0 100 1000 200 0"
        )
        .unwrap();

        let mut status = fs::File::create(dir.join("status")).unwrap();
        writeln!(status, "Name:\t{comm}").unwrap();
        if let Some(rss) = rss_kb {
            writeln!(status, "VmSize:\t{} kB", rss * 4).unwrap();
            writeln!(status, "VmRSS:\t{rss} kB").unwrap();
        }

        let mut cgroup_file = fs::File::create(dir.join("cgroup")).unwrap();
        if let Some(path) = cgroup {
            writeln!(cgroup_file, "0::{path}").unwrap();
        }

        fs::write(dir.join("comm"), format!("{comm}\n")).unwrap();
        fs::write(dir.join("cmdline"), format!("/usr/bin/{comm}\0--flag\0")).unwrap();
    }

    fn write_system_files(root: &Path) {
        let proc_dir = root.join("proc");
        fs::create_dir_all(&proc_dir).unwrap();
        fs::write(
            proc_dir.join("stat"),
            "cpu  100 0 50 8000 10 0 5 0 0 0\ncpu0 100 0 50 8000 10 0 5 0 0 0\n",
        )
        .unwrap();
        fs::write(
            proc_dir.join("meminfo"),
            "MemTotal:  4096000 kB\nMemFree:   1024000 kB\n",
        )
        .unwrap();
    }

    #[test]
    fn test_samples_from_fixture_tree() {
        let tmp = tempfile::tempdir().unwrap();
        write_system_files(tmp.path());
        write_proc_entry(tmp.path(), 1, "init", 10, 5, Some(1200), Some("/init.scope"));
        write_proc_entry(tmp.path(), 7, "kworker", 3, 9, None, None);

        let enumerator = Enumerator::new(tmp.path());
        let mut samples = enumerator.samples().unwrap();
        samples.sort_by_key(|s| s.pid);

        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples[0],
            ProcessSample {
                pid: 1,
                rss_kb: 1200,
                cpu_ticks: 15,
                cgroup_path: Some("/init.scope".to_owned()),
            }
        );
        assert_eq!(samples[1].rss_kb, 0);
        assert_eq!(samples[1].cpu_ticks, 12);
        assert_eq!(samples[1].cgroup_path, None);
    }

    #[test]
    fn test_non_numeric_entries_are_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        write_system_files(tmp.path());
        fs::create_dir_all(tmp.path().join("proc/sys")).unwrap();
        write_proc_entry(tmp.path(), 42, "bash", 1, 1, Some(100), Some("/user.slice"));

        let enumerator = Enumerator::new(tmp.path());
        assert_eq!(enumerator.pids().unwrap(), vec![42]);
    }

    #[test]
    fn test_vanished_process_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_system_files(tmp.path());
        // A pid directory without any files, as if the process exited
        // right after the directory listing.
        fs::create_dir_all(tmp.path().join("proc/99")).unwrap();

        let enumerator = Enumerator::new(tmp.path());
        assert_eq!(enumerator.samples().unwrap(), vec![]);
    }

    #[test]
    fn test_missing_proc_root_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let enumerator = Enumerator::new(tmp.path().join("nope"));
        assert!(matches!(
            enumerator.samples(),
            Err(Error::ListDir { .. })
        ));
    }

    #[test]
    fn test_cmdline_and_comm() {
        let tmp = tempfile::tempdir().unwrap();
        write_system_files(tmp.path());
        write_proc_entry(tmp.path(), 5, "nginx", 0, 0, Some(10), None);

        let enumerator = Enumerator::new(tmp.path());
        assert_eq!(enumerator.comm(5).as_deref(), Some("nginx"));
        assert_eq!(
            enumerator.cmdline(5).as_deref(),
            Some("/usr/bin/nginx --flag")
        );
        assert_eq!(enumerator.cmdline(12345), None);
    }

    #[test]
    fn test_system_counters() {
        let tmp = tempfile::tempdir().unwrap();
        write_system_files(tmp.path());

        let enumerator = Enumerator::new(tmp.path());
        let meminfo = enumerator.meminfo().unwrap();
        assert_eq!(meminfo.mem_total_kb, 4_096_000);
        assert_eq!(meminfo.mem_free_kb, 1_024_000);
        assert_eq!(enumerator.total_cpu_ticks().unwrap(), 8165);
    }
}
