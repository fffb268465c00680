use std::collections::HashMap;
use std::sync::LazyLock;

use super::parser::KeyValueFile;

/// Whole-system memory figures from `/proc/meminfo`, in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemInfo {
    /// Total usable RAM (`MemTotal`).
    pub mem_total_kb: u64,
    /// Free RAM (`MemFree`).
    pub mem_free_kb: u64,
}

impl MemInfo {
    fn set_mem_total_kb(&mut self, mem_total_kb: u64) {
        self.mem_total_kb = mem_total_kb;
    }

    fn set_mem_free_kb(&mut self, mem_free_kb: u64) {
        self.mem_free_kb = mem_free_kb;
    }
}

type Setter = fn(&mut MemInfo, u64);

static SETTERS: LazyLock<HashMap<&'static str, Setter>> = LazyLock::new(|| {
    let mut m: HashMap<&'static str, Setter> = HashMap::with_capacity(2);

    m.insert("MemTotal", MemInfo::set_mem_total_kb);
    m.insert("MemFree", MemInfo::set_mem_free_kb);

    m
});

impl KeyValueFile for MemInfo {
    fn field_handlers() -> &'static HashMap<&'static str, fn(&mut Self, u64)> {
        &SETTERS
    }
}
