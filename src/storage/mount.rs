//! External storage mount state

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rustix::fs::Access;

/// Mount state of the shared storage medium, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountState {
    /// Present and writable
    Mounted,
    /// Present but read-only
    MountedReadOnly,
    /// Present but not mounted
    Unmounted,
    /// Not present at all
    Removed,
    /// Exported to another host and unavailable locally
    Shared,
    /// Being checked before mounting
    Checking,
    #[default]
    Unknown,
}

impl MountState {
    /// Only a read/write mount allows screenshots to be written
    pub fn is_writable(self) -> bool {
        self == MountState::Mounted
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MountState::Mounted => "mounted",
            MountState::MountedReadOnly => "mounted_ro",
            MountState::Unmounted => "unmounted",
            MountState::Removed => "removed",
            MountState::Shared => "shared",
            MountState::Checking => "checking",
            MountState::Unknown => "unknown",
        }
    }

    /// Derive a mount state from a storage root on the local filesystem
    pub fn probe(root: &Path) -> Self {
        if !root.is_dir() {
            return MountState::Removed;
        }
        if rustix::fs::access(root, Access::WRITE_OK).is_ok() {
            MountState::Mounted
        } else if rustix::fs::access(root, Access::READ_OK).is_ok() {
            MountState::MountedReadOnly
        } else {
            MountState::Unmounted
        }
    }
}

impl fmt::Display for MountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MountState {
    type Err = std::convert::Infallible;

    /// Unrecognized states map to `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mounted" => MountState::Mounted,
            "mounted_ro" => MountState::MountedReadOnly,
            "unmounted" => MountState::Unmounted,
            "removed" => MountState::Removed,
            "shared" => MountState::Shared,
            "checking" => MountState::Checking,
            _ => MountState::Unknown,
        })
    }
}
