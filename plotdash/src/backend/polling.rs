//! Polling backend: one sequential loop.
//!
//! `Sampling -> Rendering -> WaitingForInput -> Sampling`, until a quit key
//! moves it to `Terminated`. Input is checked in short slices so a quit is
//! noticed within one slice wherever in the wait it arrives.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use plotdash_probe::JobSource;
use ratatui::{backend::Backend, Terminal};
use tracing::debug;

use crate::app::App;
use crate::backend::Cadence;
use crate::cancel::{is_quit_key, Cancellation};
use crate::error::DashError;
use crate::policy::SchedulingPolicy;
use crate::ui;
use crate::view::Frame;

/// Where keystrokes come from.
pub trait KeySource {
    /// Block for about `wait` and return every key pressed meanwhile.
    fn read_keys(&mut self, wait: Duration) -> io::Result<Vec<KeyEvent>>;
}

/// Reads the real terminal; needs raw mode to see single keystrokes.
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_keys(&mut self, wait: Duration) -> io::Result<Vec<KeyEvent>> {
        let deadline = Instant::now() + wait;
        let mut keys = Vec::new();
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || !event::poll(left)? {
                break;
            }
            if let Event::Key(k) = event::read()? {
                keys.push(k);
            }
        }
        Ok(keys)
    }
}

#[derive(Debug)]
enum Step {
    Sampling,
    Rendering(Frame),
    WaitingForInput,
    Terminated,
}

pub fn run<S, P, B, K>(
    app: &mut App<S, P>,
    terminal: &mut Terminal<B>,
    keys: &mut K,
    cadence: Cadence,
    cancel: &Cancellation,
) -> Result<(), DashError>
where
    S: JobSource,
    P: SchedulingPolicy,
    B: Backend,
    K: KeySource,
{
    let mut step = Step::Sampling;
    while app.state.running {
        step = match step {
            Step::Sampling => Step::Rendering(app.tick()),
            Step::Rendering(frame) => {
                let host = app.host();
                terminal.draw(|f| ui::draw(f, &frame, host))?;
                Step::WaitingForInput
            }
            Step::WaitingForInput => {
                if wait_for_quit(keys, cadence, cancel)? {
                    cancel.request_quit();
                    Step::Terminated
                } else {
                    Step::Sampling
                }
            }
            Step::Terminated => {
                app.stop();
                Step::Terminated
            }
        };
    }
    debug!(ticks = app.state.tick, "polling backend terminated");
    Ok(())
}

fn wait_for_quit<K: KeySource>(
    keys: &mut K,
    cadence: Cadence,
    cancel: &Cancellation,
) -> io::Result<bool> {
    for _ in 0..cadence.slices {
        if cancel.is_cancelled() {
            return Ok(true);
        }
        if keys.read_keys(cadence.slice)?.iter().any(is_quit_key) {
            return Ok(true);
        }
    }
    Ok(cancel.is_cancelled())
}
