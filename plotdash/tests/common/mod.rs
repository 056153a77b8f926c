//! Shared fixtures: a scripted job source and small builders.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use plotdash::config::{Config, Directories, Scheduling};
use plotdash_probe::{Discovery, JobSnapshot, JobSource, Phase, ProbeError};

/// Replays one discovery result per call; repeats the last successful one
/// when the script runs out.
pub struct ScriptedSource {
    script: VecDeque<Result<Vec<JobSnapshot>, ()>>,
    last: Vec<JobSnapshot>,
    pub calls: Rc<RefCell<usize>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<JobSnapshot>, ()>>) -> Self {
        Self {
            script: script.into(),
            last: Vec::new(),
            calls: Rc::new(RefCell::new(0)),
        }
    }

    pub fn steady(jobs: Vec<JobSnapshot>) -> Self {
        Self::new(vec![Ok(jobs)])
    }
}

impl JobSource for ScriptedSource {
    fn discover(&mut self, log_dir: &Path, _cached: &[JobSnapshot]) -> Result<Discovery, ProbeError> {
        *self.calls.borrow_mut() += 1;
        match self.script.pop_front() {
            Some(Ok(jobs)) => {
                self.last = jobs.clone();
                Ok(Discovery { jobs, failures: vec![] })
            }
            Some(Err(())) => Err(ProbeError::LogDir {
                path: log_dir.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
            None => Ok(Discovery {
                jobs: self.last.clone(),
                failures: vec![],
            }),
        }
    }
}

pub fn job(plot_id: &str, pid: u32, wall_secs: u64, tmp: &str, phase: Phase) -> JobSnapshot {
    JobSnapshot {
        plot_id: plot_id.to_string(),
        k: 32,
        tmp_dir: PathBuf::from(tmp),
        dst_dir: PathBuf::from("/mnt/dst/00"),
        wall_secs,
        phase,
        pid,
        ..JobSnapshot::default()
    }
}

pub fn config(tmp: &[&str]) -> Config {
    Config {
        directories: Directories {
            log: PathBuf::from("/var/log/plots"),
            tmp: tmp.iter().map(PathBuf::from).collect(),
            dst: vec![PathBuf::from("/mnt/dst/00"), PathBuf::from("/mnt/dst/01")],
            tmp_overrides: Default::default(),
        },
        scheduling: Scheduling::default(),
    }
}
