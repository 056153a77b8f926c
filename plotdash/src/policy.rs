//! Scheduling policy: may a tmp directory take another plot job right now?

use std::path::Path;

use plotdash_probe::Phase;

use crate::config::{Directories, Scheduling};

pub trait SchedulingPolicy {
    /// `phases` are the phases of every job using `dir`, sorted ascending.
    fn permits_new_job(
        &self,
        phases: &[Phase],
        dir: &Path,
        sched: &Scheduling,
        dirs: &Directories,
    ) -> bool;
}

/// Stagger rule: at most `tmpdir_stagger_phase_limit` jobs may sit before the
/// milestone phase, and at most `tmpdir_max_jobs` jobs in total. Per
/// directory overrides win over the global values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaggerPolicy;

impl SchedulingPolicy for StaggerPolicy {
    fn permits_new_job(
        &self,
        phases: &[Phase],
        dir: &Path,
        sched: &Scheduling,
        dirs: &Directories,
    ) -> bool {
        if phases.is_empty() {
            return true;
        }
        let ov = dirs.tmp_overrides.get(dir).copied().unwrap_or_default();
        let major = ov
            .tmpdir_stagger_phase_major
            .unwrap_or(sched.tmpdir_stagger_phase_major);
        let minor = ov
            .tmpdir_stagger_phase_minor
            .unwrap_or(sched.tmpdir_stagger_phase_minor);
        let limit = ov
            .tmpdir_stagger_phase_limit
            .unwrap_or(sched.tmpdir_stagger_phase_limit);
        let max_jobs = ov.tmpdir_max_jobs.unwrap_or(sched.tmpdir_max_jobs);

        let milestone = Phase::new(major, minor);
        let early = phases.iter().filter(|p| **p < milestone).count();
        if early >= limit as usize {
            return false;
        }
        phases.len() < max_jobs as usize
    }
}
