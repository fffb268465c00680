use std::collections::HashMap;
use std::sync::LazyLock;

use super::parser::KeyValueFile;

/// Memory fields from `/proc/<pid>/status`.
///
/// Both values are reported by the kernel in kB. A task without a mapped
/// address space (a kernel thread) carries no `Vm*` lines at all, so both
/// fields read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcStatus {
    /// Resident set size in kB (`VmRSS`).
    pub vm_rss_kb: u64,
    /// Virtual memory size in kB (`VmSize`).
    pub vm_size_kb: u64,
}

impl ProcStatus {
    fn set_vm_rss_kb(&mut self, vm_rss_kb: u64) {
        self.vm_rss_kb = vm_rss_kb;
    }

    fn set_vm_size_kb(&mut self, vm_size_kb: u64) {
        self.vm_size_kb = vm_size_kb;
    }
}

type Setter = fn(&mut ProcStatus, u64);

static SETTERS: LazyLock<HashMap<&'static str, Setter>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Setter> = HashMap::with_capacity(2);

    m.insert("VmRSS", ProcStatus::set_vm_rss_kb);
    m.insert("VmSize", ProcStatus::set_vm_size_kb);

    m
});

impl KeyValueFile for ProcStatus {
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)> {
        &SETTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_process_status() {
        let data = "\
Name:\tbash
Umask:\t0022
State:\tS (sleeping)
VmPeak:\t   10500 kB
VmSize:\t   10400 kB
VmRSS:\t    3520 kB
Threads:\t1
";
        let status = ProcStatus::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(status.vm_rss_kb, 3520);
        assert_eq!(status.vm_size_kb, 10400);
    }

    #[test]
    fn test_kernel_thread_has_no_vm_fields() {
        let data = "\
Name:\tkthreadd
State:\tS (sleeping)
Threads:\t1
";
        let status = ProcStatus::from_reader(&mut data.as_bytes()).unwrap();
        assert_eq!(status, ProcStatus::default());
    }
}
