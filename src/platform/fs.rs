// Platform-specific filesystem statistics

use crate::error::StatError;
use std::path::Path;

/// Bytes available to unprivileged users on the filesystem holding `path`
///
/// Computed as available blocks times the fundamental block size, the same
/// figure `df` reports as "Avail".
#[cfg(unix)]
#[allow(clippy::unnecessary_cast)]
pub fn available_bytes(path: &Path) -> Result<u64, StatError> {
    use std::ffi::CString;
    use std::io;
    use std::os::unix::ffi::OsStrExt;

    let stat_err = |source: io::Error| StatError::Stat {
        path: path.to_path_buf(),
        source,
    };

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| stat_err(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(stat_err(io::Error::last_os_error()));
    }

    Ok((stat.f_bavail as u64).saturating_mul(stat.f_frsize as u64))
}

#[cfg(not(unix))]
pub fn available_bytes(path: &Path) -> Result<u64, StatError> {
    use sysinfo::Disks;

    let canonical = path.canonicalize().map_err(|source| StatError::Stat {
        path: path.to_path_buf(),
        source,
    })?;

    let disks = Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .filter(|disk| canonical.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .map(|disk| disk.available_space())
        .ok_or_else(|| StatError::NoMatchingDisk(canonical.clone()))
}
