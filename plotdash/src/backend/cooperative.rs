//! Cooperative backend: two tasks on one thread.
//!
//! The render task samples and publishes a whole [`Frame`] once per tick,
//! then yields. The input task owns the terminal: it draws when a redraw is
//! requested and watches for quit keys. When the input task ends it cancels
//! the shared signal, which stops the render task at its next yield.

use std::cell::RefCell;
use std::io;
use std::time::Duration;

use crossterm::event::Event;
use futures::{Stream, StreamExt};
use plotdash_probe::JobSource;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::backend::Cadence;
use crate::cancel::{is_quit_key, Cancellation};
use crate::error::DashError;
use crate::policy::SchedulingPolicy;
use crate::ui;
use crate::view::Frame;

/// Latest published frame plus a pending-redraw flag.
#[derive(Default)]
struct Screen {
    frame: RefCell<Option<Frame>>,
    redraw: Notify,
}

impl Screen {
    fn publish(&self, frame: Frame) {
        *self.frame.borrow_mut() = Some(frame);
        self.redraw.notify_one();
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>, host: &str) -> io::Result<()> {
        if let Some(frame) = self.frame.borrow().as_ref() {
            terminal.draw(|f| ui::draw(f, frame, host))?;
        }
        Ok(())
    }
}

pub async fn run<S, P, B, E>(
    app: &mut App<S, P>,
    terminal: &mut Terminal<B>,
    events: E,
    cadence: Cadence,
    cancel: &Cancellation,
) -> Result<(), DashError>
where
    S: JobSource,
    P: SchedulingPolicy,
    B: Backend,
    E: Stream<Item = io::Result<Event>> + Unpin,
{
    let screen = Screen::default();
    let host = app.host().to_string();

    let ((), result) = tokio::join!(
        render_task(app, &screen, cadence.tick(), cancel),
        input_task(terminal, events, &screen, &host, cancel),
    );

    debug!(ticks = app.state.tick, "cooperative backend terminated");
    result
}

async fn render_task<S: JobSource, P: SchedulingPolicy>(
    app: &mut App<S, P>,
    screen: &Screen,
    every: Duration,
    cancel: &Cancellation,
) {
    while app.state.running {
        if cancel.is_cancelled() {
            app.stop();
            break;
        }
        // the frame is complete before the redraw request goes out
        screen.publish(app.tick());
        tokio::select! {
            _ = cancel.cancelled() => app.stop(),
            _ = tokio::time::sleep(every) => {}
        }
    }
    debug!("render task stopped");
}

async fn input_task<B, E>(
    terminal: &mut Terminal<B>,
    mut events: E,
    screen: &Screen,
    host: &str,
    cancel: &Cancellation,
) -> Result<(), DashError>
where
    B: Backend,
    E: Stream<Item = io::Result<Event>> + Unpin,
{
    let result = event_loop(terminal, &mut events, screen, host, cancel).await;
    cancel.request_quit();
    result
}

async fn event_loop<B, E>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    screen: &Screen,
    host: &str,
    cancel: &Cancellation,
) -> Result<(), DashError>
where
    B: Backend,
    E: Stream<Item = io::Result<Event>> + Unpin,
{
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ctrl_c_armed = true;

    loop {
        tokio::select! {
            _ = screen.redraw.notified() => screen.draw(terminal, host)?,
            ev = events.next() => match ev {
                Some(Ok(Event::Key(key))) if is_quit_key(&key) => {
                    info!(code = ?key.code, "quit key");
                    return Ok(());
                }
                Some(Ok(Event::Resize(..))) => screen.draw(terminal, host)?,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    debug!("input stream closed");
                    return Ok(());
                }
            },
            res = &mut ctrl_c, if ctrl_c_armed => match res {
                Ok(()) => {
                    info!("interrupt signal");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "cannot listen for interrupt signal");
                    ctrl_c_armed = false;
                }
            },
            _ = cancel.cancelled() => return Ok(()),
        }
    }
}
