use crate::container::{ContainerID, HEX_ID_LEN};

/// Returns the first run of exactly [`HEX_ID_LEN`] consecutive ASCII hex
/// characters in `path`, scanning left to right.
///
/// Any non-hex character resets the current run. The first run to reach 64
/// characters wins; later runs are never considered, even if the winning run
/// continues past 64 characters. Returns `None` if no such run exists.
pub fn extract_hex_id(path: &str) -> Option<&str> {
    let mut run = 0;
    let mut start = 0;

    for (i, b) in path.bytes().enumerate() {
        if b.is_ascii_hexdigit() {
            if run == 0 {
                start = i;
            }
            run += 1;
            if run == HEX_ID_LEN {
                return Some(&path[start..=i]);
            }
        } else {
            run = 0;
        }
    }
    None
}

/// djb2 hash over the full path bytes, with unsigned 32-bit wraparound.
///
/// Deterministic across runs and platforms; the decimal rendering of this
/// value forms the `path:<hash>` fallback identifier.
pub fn path_hash(path: &str) -> u32 {
    let mut h: u32 = 5381;
    for b in path.bytes() {
        h = h.wrapping_mul(33).wrapping_add(u32::from(b));
    }
    h
}

/// Derives the container identity for a cgroup path.
///
/// Prefers the 64-character hex run; falls back to the deterministic
/// `path:<hash>` form so that processes sharing an unparseable but identical
/// path still aggregate together.
pub fn container_identity(path: &str) -> ContainerID {
    match extract_hex_id(path) {
        Some(hex) => {
            ContainerID::from_hex(hex).expect("a 64-character hex run is a valid container id")
        }
        None => ContainerID::from_path_hash(path_hash(path)),
    }
}
