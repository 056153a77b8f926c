//! App core shared by both backends: one tick samples jobs and builds a
//! complete [`Frame`]; `run` owns terminal setup/teardown and hands the
//! terminal to the selected backend.

use std::io;

use chrono::Local;
use crossterm::event::EventStream;
use plotdash_probe::JobSource;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::backend::{cooperative, polling, BackendKind, Cadence};
use crate::cancel::{Cancellation, CrosstermMode, TerminalSession};
use crate::config::Config;
use crate::error::DashError;
use crate::policy::{SchedulingPolicy, StaggerPolicy};
use crate::sampler::Sampler;
use crate::state::DashboardState;
use crate::view::{build_job_rows, build_tmp_rows, Frame, PathPrefixes};

pub struct App<S, P = StaggerPolicy> {
    config: Config,
    prefixes: PathPrefixes,
    sampler: Sampler<S>,
    policy: P,
    host: String,
    pub state: DashboardState,
}

impl<S: JobSource, P: SchedulingPolicy> App<S, P> {
    pub fn new(config: Config, source: S, policy: P) -> Self {
        let prefixes = PathPrefixes::from_dirs(&config.directories);
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "unknown".into());
        Self {
            config,
            prefixes,
            sampler: Sampler::new(source),
            policy,
            host,
            state: DashboardState::new(),
        }
    }

    /// Sample, then build both tables. The returned frame is self-contained;
    /// nothing in it changes after this call.
    pub fn tick(&mut self) -> Frame {
        let dirs = &self.config.directories;
        let jobs = self.sampler.sample(&dirs.log, &self.state.jobs);

        let frame = Frame {
            tick: self.state.tick,
            sampled_at: Local::now().format("%H:%M:%S").to_string(),
            jobs: build_job_rows(&jobs, &self.prefixes),
            tmp: build_tmp_rows(
                &jobs,
                dirs,
                &self.config.scheduling,
                &self.policy,
                self.prefixes.tmp.as_deref(),
            ),
        };
        debug!(tick = frame.tick, jobs = jobs.len(), "tick");

        self.state.jobs = jobs;
        self.state.tick += 1;
        frame
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn stop(&mut self) {
        self.state.running = false;
    }
}

/// Take over the terminal and run until the user quits. Raw mode is released
/// exactly once on every path out of here.
pub async fn run<S: JobSource, P: SchedulingPolicy>(
    mut app: App<S, P>,
    kind: BackendKind,
) -> Result<(), DashError> {
    let mut session = TerminalSession::acquire(CrosstermMode)?;
    info!(?kind, "dashboard started");

    let result = drive(&mut app, kind).await;
    let released = session.release();

    info!(ticks = app.state.tick, "dashboard stopped");
    result?;
    released?;
    Ok(())
}

async fn drive<S: JobSource, P: SchedulingPolicy>(
    app: &mut App<S, P>,
    kind: BackendKind,
) -> Result<(), DashError> {
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    let cancel = Cancellation::new();
    let cadence = Cadence::default();

    match kind {
        BackendKind::Polling => polling::run(
            app,
            &mut terminal,
            &mut polling::CrosstermKeys,
            cadence,
            &cancel,
        ),
        BackendKind::Cooperative => {
            cooperative::run(app, &mut terminal, EventStream::new(), cadence, &cancel).await
        }
    }
}
