//! Permission widening for created directories and written files

use std::io;
use std::path::Path;

/// Add `bits` to the permission bits of `path`, keeping the ones already set
#[cfg(unix)]
pub fn widen(path: &Path, bits: u32) -> io::Result<()> {
    use rustix::fs::{Mode, RawMode};

    let current = rustix::fs::stat(path)?.st_mode as u32 & 0o7777;
    let mode = Mode::from_bits_truncate((current | bits) as RawMode);
    rustix::fs::chmod(path, mode)?;
    Ok(())
}

#[cfg(not(unix))]
pub fn widen(_path: &Path, _bits: u32) -> io::Result<()> {
    Ok(())
}

/// Apply `bits` if the policy sets any
pub fn apply(path: &Path, bits: Option<u32>) -> io::Result<()> {
    match bits {
        Some(bits) => widen(path, bits),
        None => Ok(()),
    }
}
