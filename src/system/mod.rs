//! Whole-system reporting: memory totals and a per-process listing.
//!
//! This is the companion to the container snapshot: plain enumeration with
//! no aggregation and no keyed state. It runs its own pass over the process
//! table and shares nothing with the snapshot core.

use serde::Serialize;

use crate::error::ResultOkLogExt;
use crate::proc::{Enumerator, Result};

/// Placeholder for process fields that cannot be read.
const NOT_AVAILABLE: &str = "N/A";

/// One process entry of the system report.
#[derive(Debug, Serialize)]
pub struct ProcessReport {
    #[serde(rename = "PID")]
    pub pid: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Cmdline")]
    pub cmdline: String,
    /// Virtual memory size in kB.
    pub vsz: u64,
    /// Resident set size in kB.
    pub rss: u64,
    /// Share of total RAM, in percent with one decimal.
    #[serde(rename = "Memory_Usage")]
    pub memory_usage: f64,
    /// Share of accumulated CPU time, in percent with two decimals.
    #[serde(rename = "CPU_Usage")]
    pub cpu_usage: f64,
}

/// Whole-system memory figures plus the full process listing.
#[derive(Debug, Serialize)]
pub struct SystemReport {
    #[serde(rename = "Totalram")]
    pub totalram: u64,
    #[serde(rename = "Freeram")]
    pub freeram: u64,
    #[serde(rename = "Procs")]
    pub procs: usize,
    #[serde(rename = "Processes")]
    pub processes: Vec<ProcessReport>,
}

/// Collects the report in one pass over the process table.
///
/// Per-process read failures drop that process from the listing; only an
/// unreadable proc root or `meminfo` fails the whole report.
///
/// # Errors
///
/// Returns an error if the process directory or `meminfo` cannot be read.
pub fn collect(enumerator: &Enumerator) -> Result<SystemReport> {
    let meminfo = enumerator.meminfo()?;
    // A missing total leaves every CPU share at zero rather than failing
    // the report.
    let total_ticks = enumerator.total_cpu_ticks().ok_log().unwrap_or(0);

    let pids = enumerator.pids()?;
    let mut processes = Vec::with_capacity(pids.len());

    for pid in pids {
        let Some(stat) = enumerator.stat(pid) else {
            continue;
        };
        let status = enumerator.status(pid).unwrap_or_default();
        let name = enumerator
            .comm(pid)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
        let cmdline = enumerator
            .cmdline(pid)
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned());

        let memory_usage = if meminfo.mem_total_kb > 0 {
            round_to(status.vm_rss_kb as f64 * 100.0 / meminfo.mem_total_kb as f64, 10.0)
        } else {
            0.0
        };
        let cpu_usage = if total_ticks > 0 {
            round_to(stat.total_ticks() as f64 * 100.0 / total_ticks as f64, 100.0)
        } else {
            0.0
        };

        processes.push(ProcessReport {
            pid,
            name,
            cmdline,
            vsz: status.vm_size_kb,
            rss: status.vm_rss_kb,
            memory_usage,
            cpu_usage,
        });
    }

    Ok(SystemReport {
        totalram: meminfo.mem_total_kb,
        freeram: meminfo.mem_free_kb,
        procs: processes.len(),
        processes,
    })
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
