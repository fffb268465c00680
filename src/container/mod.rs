use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

mod error;

pub use error::{Error, Result};

/// The exact length of a hex-run container identifier.
pub const HEX_ID_LEN: usize = 64;

/// Prefix of synthetic identifiers derived from a path hash.
const PATH_HASH_PREFIX: &str = "path:";

/// A container identity recovered from a cgroup path.
///
/// Comes in exactly two shapes: a 64-character hexadecimal run found inside
/// the path, or the synthetic `path:<hash>` form used when no such run
/// exists. The identifier is the aggregation key for one snapshot.
///
/// # Examples
///
/// ```
/// # use continfo_monitor::container::ContainerID;
/// let raw_id = "abc123abc123abc123abc123abc123abc123abc123abc123abc123abc123abcd";
/// let container_id = ContainerID::from_hex(raw_id).unwrap();
/// assert_eq!(container_id.as_ref(), raw_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerID(Arc<str>);

impl ContainerID {
    /// Creates a `ContainerID` from a 64-character hexadecimal run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] if the input is not exactly
    /// [`HEX_ID_LEN`] ASCII hex characters.
    pub fn from_hex(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.len() != HEX_ID_LEN || !src.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }

    /// Creates the synthetic `path:<hash>` identifier for a path without a
    /// recoverable hex run.
    pub fn from_path_hash(hash: u32) -> Self {
        Self(format!("{PATH_HASH_PREFIX}{hash}").into())
    }

    /// Returns true if this identifier is the synthetic fallback form.
    pub fn is_path_hash(&self) -> bool {
        self.0.starts_with(PATH_HASH_PREFIX)
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
