//! Finds running `chia plots create` processes and turns them into
//! [`JobSnapshot`]s, reusing what is already known about a process from the
//! previous pass.

use std::fs;
use std::path::{Path, PathBuf};

use sysinfo::{Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind};
use tracing::{debug, trace};

use crate::error::ProbeError;
use crate::plotlog::read_log;
use crate::procfs::{cpu_times, open_file_under};
use crate::types::{JobSnapshot, Phase, RunStatus};

/// Result of one discovery pass.
#[derive(Debug, Default)]
pub struct Discovery {
    pub jobs: Vec<JobSnapshot>,
    /// Jobs that are still running but could not be inspected this pass.
    pub failures: Vec<EntryFailure>,
}

#[derive(Debug)]
pub struct EntryFailure {
    pub pid: u32,
    pub error: ProbeError,
}

/// Anything that can list the plot jobs currently writing logs into a
/// directory.
pub trait JobSource {
    fn discover(&mut self, log_dir: &Path, cached: &[JobSnapshot]) -> Result<Discovery, ProbeError>;
}

/// Arguments recovered from a plotter command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotArgs {
    pub k: Option<u32>,
    pub tmp_dir: Option<PathBuf>,
    pub tmp2_dir: Option<PathBuf>,
    pub dst_dir: Option<PathBuf>,
}

/// Recognize `chia plots create ...`, optionally launched through a python
/// interpreter, and pull out the options the dashboard shows.
pub fn parse_plot_cmdline(cmd: &[String]) -> Option<PlotArgs> {
    let mut args = cmd;
    if args
        .first()
        .is_some_and(|a| a.to_ascii_lowercase().contains("python"))
    {
        args = &args[1..];
    }
    if args.len() < 3 || !args[0].ends_with("chia") || args[1] != "plots" || args[2] != "create" {
        return None;
    }

    let mut out = PlotArgs::default();
    let mut it = args[3..].iter();
    while let Some(arg) = it.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((f, v)) if f.starts_with("--") => (f, Some(v.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = || inline.clone().or_else(|| it.next().cloned());
        match flag {
            "-k" | "--size" => out.k = value().and_then(|v| v.parse().ok()),
            "-t" | "--tmp_dir" => out.tmp_dir = value().map(PathBuf::from),
            "-2" | "--tmp2_dir" => out.tmp2_dir = value().map(PathBuf::from),
            "-d" | "--final_dir" => out.dst_dir = value().map(PathBuf::from),
            _ => {}
        }
    }
    Some(out)
}

/// sysinfo-backed [`JobSource`]. Keeps one `System` alive across passes so
/// process tables are refreshed rather than rebuilt.
pub struct ProcessProbe {
    sys: System,
}

impl ProcessProbe {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }
}

impl Default for ProcessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSource for ProcessProbe {
    fn discover(&mut self, log_dir: &Path, cached: &[JobSnapshot]) -> Result<Discovery, ProbeError> {
        fs::read_dir(log_dir).map_err(|source| ProbeError::LogDir {
            path: log_dir.to_path_buf(),
            source,
        })?;

        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::new()
                .with_memory()
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );

        let mut out = Discovery::default();
        for (pid, process) in self.sys.processes() {
            // threads share their leader's cmdline and open files
            if process.thread_kind().is_some() {
                continue;
            }
            let pid = pid.as_u32();
            let start_time = process.start_time();

            let base = match cached.iter().find(|j| j.same_process(pid, start_time)) {
                Some(known) => known.clone(),
                None => match identify(pid, start_time, process, log_dir) {
                    Some(job) => job,
                    None => continue,
                },
            };

            match refresh(base, process) {
                Ok(job) => out.jobs.push(job),
                Err(error) => {
                    debug!(pid, %error, "plot job inspection failed");
                    out.failures.push(EntryFailure { pid, error });
                }
            }
        }

        out.jobs.sort_by_key(|j| (j.start_time, j.pid));
        trace!(jobs = out.jobs.len(), failures = out.failures.len(), "discovery pass");
        Ok(out)
    }
}

// First sighting of a process: parse its command line and find its log.
fn identify(pid: u32, start_time: u64, process: &Process, log_dir: &Path) -> Option<JobSnapshot> {
    let cmd: Vec<String> = process
        .cmd()
        .iter()
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    let args = parse_plot_cmdline(&cmd)?;

    let log_file = match open_file_under(pid, log_dir) {
        Ok(Some(log)) => Some(log),
        // plotting, but not logging into our directory
        Ok(None) => return None,
        Err(e) => {
            debug!(pid, error = %e, "cannot list open files; keeping job without a log");
            None
        }
    };

    Some(JobSnapshot {
        k: args.k.unwrap_or(32),
        tmp_dir: args.tmp_dir.unwrap_or_else(|| PathBuf::from(".")),
        tmp2_dir: args.tmp2_dir,
        dst_dir: args.dst_dir.unwrap_or_else(|| PathBuf::from(".")),
        log_file,
        pid,
        start_time,
        ..JobSnapshot::default()
    })
}

fn refresh(mut job: JobSnapshot, process: &Process) -> Result<JobSnapshot, ProbeError> {
    match &job.log_file {
        Some(path) => {
            let info = read_log(path)?;
            if let Some(id) = info.plot_id {
                job.plot_id = id;
            }
            if let Some(k) = info.k {
                job.k = k;
            }
            if job.tmp_dir == Path::new(".") {
                if let Some(tmp) = info.tmp_dir {
                    job.tmp_dir = tmp;
                }
            }
            if job.dst_dir == Path::new(".") {
                if let Some(dst) = info.dst_dir {
                    job.dst_dir = dst;
                }
            }
            job.phase = info.phase;
        }
        None => job.phase = Phase::unknown(),
    }

    let times = cpu_times(job.pid)?;
    job.user_secs = times.user_secs;
    job.sys_secs = times.sys_secs;
    job.iowait_secs = times.iowait_secs;
    job.wall_secs = process.run_time();
    job.mem_bytes = process.memory();
    job.status = run_status(process.status());
    job.tmp_usage_bytes = tmp_usage(&job.tmp_dir, &job.plot_id);
    Ok(job)
}

fn run_status(status: ProcessStatus) -> RunStatus {
    match status {
        ProcessStatus::Run => RunStatus::Running,
        ProcessStatus::Sleep => RunStatus::Sleeping,
        ProcessStatus::UninterruptibleDiskSleep => RunStatus::DiskSleep,
        ProcessStatus::Stop => RunStatus::Stopped,
        _ => RunStatus::Other,
    }
}

/// Total size of the files in `dir` whose names carry `plot_id`.
pub fn tmp_usage(dir: &Path, plot_id: &str) -> u64 {
    if plot_id.is_empty() {
        return 0;
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().contains(plot_id))
        // files vanish while the plotter works
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
