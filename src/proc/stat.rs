use std::io::BufRead;

/// CPU time counters from one `/proc/<pid>/stat` line.
///
/// Values are in scheduler clock ticks, exactly as the kernel reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcStat {
    /// Time spent in user mode.
    pub utime: u64,
    /// Time spent in kernel mode.
    pub stime: u64,
}

// Token offsets counted from after the comm field. The overall stat fields
// are 1-based with utime at 14 and stime at 15; pid and comm sit before the
// closing ')'.
const UTIME_OFFSET: usize = 11;

impl ProcStat {
    /// Parses the utime/stime fields from a raw stat line.
    ///
    /// The comm field may contain spaces and parentheses, so parsing starts
    /// after the *last* `)` in the line. Returns `None` for lines too short
    /// or non-numeric in the expected positions.
    pub fn from_line(line: &str) -> Option<Self> {
        let (_, rest) = line.rsplit_once(')')?;
        let mut fields = rest.split_whitespace();

        let utime = fields.nth(UTIME_OFFSET)?.parse().ok()?;
        let stime = fields.next()?.parse().ok()?;

        Some(Self { utime, stime })
    }

    /// Accumulated user + kernel time.
    pub fn total_ticks(&self) -> u64 {
        self.utime + self.stime
    }
}

/// Sums the aggregate `cpu` line of `/proc/stat`.
///
/// The first line accumulates ticks across all CPUs and modes; its sum is
/// the denominator for per-process CPU shares.
///
/// # Errors
///
/// Returns an error if reading from `buf` fails.
pub fn total_cpu_ticks<R: BufRead>(buf: &mut R) -> std::io::Result<u64> {
    let mut line = String::new();
    buf.read_line(&mut line)?;

    Ok(line
        .split_whitespace()
        .skip(1)
        .filter_map(|v| v.parse::<u64>().ok())
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_stat_line() {
        let line = "42 (bash) S 1 42 42 34816 42 4194304 1573 0 0 0 25 11 0 0 20 0 1 0 173 10000 1200 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 3 0 0 0 0 0";
        let stat = ProcStat::from_line(line).unwrap();
        assert_eq!(stat.utime, 25);
        assert_eq!(stat.stime, 11);
        assert_eq!(stat.total_ticks(), 36);
    }

    #[test]
    fn test_comm_with_spaces_and_parens() {
        let line = "99 (tmux: server) (x) S 1 99 99 0 -1 4194368 500 0 0 0 7 3 0 0 20 0 1 0 200 1 1 0";
        let stat = ProcStat::from_line(line).unwrap();
        assert_eq!(stat.utime, 7);
        assert_eq!(stat.stime, 3);
    }

    #[test]
    fn test_truncated_line() {
        assert_eq!(ProcStat::from_line("1 (init) S 0 1"), None);
        assert_eq!(ProcStat::from_line(""), None);
        assert_eq!(ProcStat::from_line("no parens at all"), None);
    }

    #[test]
    fn test_total_cpu_ticks_sums_aggregate_line() {
        let data = "cpu  100 20 30 4000 50 0 6 0 0 0\ncpu0 50 10 15 2000 25 0 3 0 0 0\n";
        let total = total_cpu_ticks(&mut data.as_bytes()).unwrap();
        assert_eq!(total, 4206);
    }

    #[test]
    fn test_total_cpu_ticks_empty_input() {
        assert_eq!(total_cpu_ticks(&mut "".as_bytes()).unwrap(), 0);
    }
}
