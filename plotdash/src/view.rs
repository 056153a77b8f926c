//! Per-tick view models: the jobs table and the tmp directory table.
//!
//! Rows are plain display strings computed once per tick. Column layouts are
//! fixed `(label, accessor)` lists that the screen iterates when drawing.

use std::path::{Path, PathBuf};

use plotdash_probe::{JobSnapshot, Phase};

use crate::config::{Directories, Scheduling};
use crate::format::{
    abbreviate_path, common_prefix, format_bytes, format_duration, format_phase,
    format_phase_list, prefix_chars,
};
use crate::policy::SchedulingPolicy;

/// Most phases listed per tmp directory.
pub const MAX_TMP_PHASES: usize = 5;

const PLOT_ID_CHARS: usize = 8;

pub type Column<R> = (&'static str, fn(&R) -> String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRow {
    pub plot_id: String,
    pub k: String,
    pub tmp: String,
    pub dst: String,
    pub wall: String,
    pub phase: String,
    pub tmp_usage: String,
    pub pid: String,
    pub stat: String,
    pub mem: String,
    pub user: String,
    pub sys: String,
    pub io: String,
}

pub const JOB_COLUMNS: &[Column<JobRow>] = &[
    ("plot id", |r| r.plot_id.clone()),
    ("k", |r| r.k.clone()),
    ("tmp", |r| r.tmp.clone()),
    ("dst", |r| r.dst.clone()),
    ("wall", |r| r.wall.clone()),
    ("phase", |r| r.phase.clone()),
    ("tmp", |r| r.tmp_usage.clone()),
    ("pid", |r| r.pid.clone()),
    ("stat", |r| r.stat.clone()),
    ("mem", |r| r.mem.clone()),
    ("user", |r| r.user.clone()),
    ("sys", |r| r.sys.clone()),
    ("io", |r| r.io.clone()),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmpRow {
    /// Directory as configured.
    pub dir: PathBuf,
    /// Directory relative to the common tmp prefix.
    pub path: String,
    pub ready: bool,
    /// Distinct phases of the jobs in this directory, ascending, at most
    /// [`MAX_TMP_PHASES`].
    pub phases: Vec<Phase>,
    /// Distinct phases that did not fit in `phases`.
    pub more: usize,
}

impl TmpRow {
    pub fn ready_label(&self) -> &'static str {
        if self.ready {
            "OK"
        } else {
            "--"
        }
    }

    pub fn phases_label(&self) -> String {
        let shown = format_phase_list(&self.phases, MAX_TMP_PHASES);
        if self.more > 0 {
            format!("{shown} [+{}]", self.more)
        } else {
            shown
        }
    }
}

pub const TMP_COLUMNS: &[Column<TmpRow>] = &[
    ("tmp", |r| r.path.clone()),
    ("ready", |r| r.ready_label().to_string()),
    ("phases", |r| r.phases_label()),
];

/// Everything one tick puts on screen. Built completely before any of it is
/// drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub tick: u64,
    /// Local wall clock at sampling time, `HH:MM:SS`.
    pub sampled_at: String,
    pub jobs: Vec<JobRow>,
    pub tmp: Vec<TmpRow>,
}

/// Common prefixes used to shorten tmp and dst paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathPrefixes {
    pub tmp: Option<PathBuf>,
    pub dst: Option<PathBuf>,
}

impl PathPrefixes {
    pub fn from_dirs(dirs: &Directories) -> Self {
        Self {
            tmp: common_prefix(&dirs.tmp),
            dst: common_prefix(&dirs.dst),
        }
    }
}

impl JobRow {
    pub fn from_job(job: &JobSnapshot, prefixes: &PathPrefixes) -> Self {
        Self {
            plot_id: prefix_chars(&job.plot_id, PLOT_ID_CHARS),
            k: job.k.to_string(),
            tmp: abbreviate_path(&job.tmp_dir, prefixes.tmp.as_deref()),
            dst: abbreviate_path(&job.dst_dir, prefixes.dst.as_deref()),
            wall: format_duration(job.wall_secs as f64),
            phase: format_phase(&job.phase),
            tmp_usage: format_bytes(job.tmp_usage_bytes, 0),
            pid: job.pid.to_string(),
            stat: job.status.to_string(),
            mem: format_bytes(job.mem_bytes, 1),
            user: format_duration(job.user_secs),
            sys: format_duration(job.sys_secs),
            io: format_duration(job.iowait_secs),
        }
    }
}

/// One row per job, shortest wall time first; equal wall times keep the
/// order discovery reported them in.
pub fn build_job_rows(jobs: &[JobSnapshot], prefixes: &PathPrefixes) -> Vec<JobRow> {
    let mut sorted: Vec<&JobSnapshot> = jobs.iter().collect();
    sorted.sort_by_key(|j| j.wall_secs);
    sorted
        .into_iter()
        .map(|j| JobRow::from_job(j, prefixes))
        .collect()
}

/// One row per configured tmp directory, ordered by path.
pub fn build_tmp_rows<P: SchedulingPolicy + ?Sized>(
    jobs: &[JobSnapshot],
    dirs: &Directories,
    sched: &Scheduling,
    policy: &P,
    prefix: Option<&Path>,
) -> Vec<TmpRow> {
    let mut tmp_dirs: Vec<&PathBuf> = dirs.tmp.iter().collect();
    tmp_dirs.sort();

    tmp_dirs
        .into_iter()
        .map(|dir| {
            let mut phases: Vec<Phase> = jobs
                .iter()
                .filter(|j| &j.tmp_dir == dir)
                .map(|j| j.phase)
                .collect();
            phases.sort();
            let ready = policy.permits_new_job(&phases, dir, sched, dirs);

            phases.dedup();
            let more = phases.len().saturating_sub(MAX_TMP_PHASES);
            phases.truncate(MAX_TMP_PHASES);

            TmpRow {
                dir: dir.clone(),
                path: abbreviate_path(dir, prefix),
                ready,
                phases,
                more,
            }
        })
        .collect()
}
