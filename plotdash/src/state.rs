//! Process-wide dashboard state that lives across ticks.

use plotdash_probe::JobSnapshot;

#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Jobs seen on the last tick; handed back to discovery as a cache.
    pub jobs: Vec<JobSnapshot>,
    /// Number of completed ticks.
    pub tick: u64,
    /// Cleared once by the loop driver when the dashboard terminates.
    pub running: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            tick: 0,
            running: true,
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
