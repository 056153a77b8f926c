//! Job model shared between the probe and the dashboard.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Progress marker of a plot job: `major` is the plotter phase (1..=4),
/// `minor` the table/sub-step inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phase {
    pub major: u32,
    pub minor: u32,
    pub known: bool,
}

impl Phase {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            known: true,
        }
    }

    pub const fn unknown() -> Self {
        Self {
            major: 0,
            minor: 0,
            known: false,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::unknown()
    }
}

// Unknown phases sort before every known one.
impl Ord for Phase {
    fn cmp(&self, other: &Self) -> Ordering {
        self.known
            .cmp(&other.known)
            .then(self.major.cmp(&other.major))
            .then(self.minor.cmp(&other.minor))
    }
}

impl PartialOrd for Phase {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Coarse scheduler state of the plotting process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    #[default]
    Other,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Running => "RUN",
            RunStatus::Sleeping => "SLP",
            RunStatus::DiskSleep => "DSK",
            RunStatus::Stopped => "STP",
            RunStatus::Other => "???",
        };
        f.write_str(s)
    }
}

/// One running plot job as observed during a single tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobSnapshot {
    pub plot_id: String,
    pub k: u32,
    pub tmp_dir: PathBuf,
    pub tmp2_dir: Option<PathBuf>,
    pub dst_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    pub wall_secs: u64,
    pub user_secs: f64,
    pub sys_secs: f64,
    pub iowait_secs: f64,
    pub phase: Phase,
    pub mem_bytes: u64,
    pub tmp_usage_bytes: u64,
    pub pid: u32,
    /// Process start time (seconds since the epoch); with `pid` it identifies
    /// the process across ticks.
    pub start_time: u64,
    pub status: RunStatus,
}

impl JobSnapshot {
    pub fn same_process(&self, pid: u32, start_time: u64) -> bool {
        self.pid == pid && self.start_time == start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_phase_sorts_first() {
        let mut v = vec![Phase::new(2, 1), Phase::unknown(), Phase::new(1, 7)];
        v.sort();
        assert_eq!(v, vec![Phase::unknown(), Phase::new(1, 7), Phase::new(2, 1)]);
    }

    #[test]
    fn run_status_short_codes() {
        assert_eq!(RunStatus::DiskSleep.to_string(), "DSK");
        assert_eq!(RunStatus::default().to_string(), "???");
    }
}
