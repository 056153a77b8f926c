//! Linux /proc readers for the numbers sysinfo does not expose: the
//! user/system/iowait time split and the open file table.

use std::path::{Path, PathBuf};

use crate::error::ProbeError;

/// USER_HZ; fixed at 100 on every mainstream Linux ABI.
const CLOCK_TICKS: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuTimes {
    pub user_secs: f64,
    pub sys_secs: f64,
    pub iowait_secs: f64,
}

/// Parse the contents of `/proc/<pid>/stat`.
pub fn parse_stat(pid: u32, text: &str) -> Result<CpuTimes, ProbeError> {
    // comm may contain spaces and parens; fields restart after the last ')'
    let rest = text
        .rfind(')')
        .map(|i| &text[i + 1..])
        .ok_or(ProbeError::ProcStatFormat { pid })?;
    let fields: Vec<&str> = rest.split_whitespace().collect();
    // fields[0] is field 3 (state): utime=14, stime=15, delayacct_blkio_ticks=42
    let field = |n: usize| -> Result<f64, ProbeError> {
        fields
            .get(n - 3)
            .and_then(|v| v.parse::<u64>().ok())
            .map(|ticks| ticks as f64 / CLOCK_TICKS)
            .ok_or(ProbeError::ProcStatFormat { pid })
    };
    Ok(CpuTimes {
        user_secs: field(14)?,
        sys_secs: field(15)?,
        iowait_secs: field(42).unwrap_or(0.0),
    })
}

#[cfg(target_os = "linux")]
pub fn cpu_times(pid: u32) -> Result<CpuTimes, ProbeError> {
    let path = format!("/proc/{pid}/stat");
    let text = std::fs::read_to_string(path).map_err(|source| ProbeError::ProcStat { pid, source })?;
    parse_stat(pid, &text)
}

#[cfg(not(target_os = "linux"))]
pub fn cpu_times(_pid: u32) -> Result<CpuTimes, ProbeError> {
    Ok(CpuTimes::default())
}

/// The first open file of `pid` that lives under `dir`. `None` when nothing
/// matches; `Err` only when the fd table could not be listed at all.
#[cfg(target_os = "linux")]
pub fn open_file_under(pid: u32, dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let fd_dir = format!("/proc/{pid}/fd");
    for entry in std::fs::read_dir(fd_dir)? {
        let Ok(entry) = entry else { continue };
        if let Ok(target) = std::fs::read_link(entry.path()) {
            if target.starts_with(dir) {
                return Ok(Some(target));
            }
        }
    }
    Ok(None)
}

#[cfg(not(target_os = "linux"))]
pub fn open_file_under(_pid: u32, _dir: &Path) -> std::io::Result<Option<PathBuf>> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "open file inspection is only available on Linux",
    ))
}
