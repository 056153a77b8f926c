//! Per-tick job sampling on top of a [`JobSource`].

use std::collections::HashMap;
use std::path::Path;

use plotdash_probe::{JobSnapshot, JobSource};
use tracing::{debug, warn};

pub struct Sampler<S> {
    source: S,
}

impl<S: JobSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Jobs running under `log_dir` right now.
    ///
    /// Never fails: if discovery as a whole errors the previous jobs are
    /// returned unchanged, and a job that could not be inspected keeps its
    /// previous snapshot (or is left out if it has none yet).
    pub fn sample(&mut self, log_dir: &Path, previous: &[JobSnapshot]) -> Vec<JobSnapshot> {
        let discovery = match self.source.discover(log_dir, previous) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "job discovery failed; keeping previous tick");
                return previous.to_vec();
            }
        };

        let mut jobs = discovery.jobs;
        if !discovery.failures.is_empty() {
            let by_pid: HashMap<u32, &JobSnapshot> =
                previous.iter().map(|j| (j.pid, j)).collect();
            for failure in discovery.failures {
                match by_pid.get(&failure.pid) {
                    Some(stale) => {
                        warn!(pid = failure.pid, error = %failure.error, "keeping stale snapshot");
                        jobs.push((*stale).clone());
                    }
                    None => {
                        debug!(pid = failure.pid, error = %failure.error, "skipping uninspectable new job");
                    }
                }
            }
        }
        jobs
    }
}
