//! Quit handling shared by both backends: which keys quit, a one-shot
//! cancellation signal, and the raw-mode terminal session that must be
//! released exactly once however the dashboard exits.

use std::io;

use crossterm::{
    cursor::{Hide, Show},
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// `q` or Ctrl-C. Key releases never count.
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') => !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT),
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Shared stop signal. Only the first request has any effect.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    token: CancellationToken,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call stopped the dashboard, `false` if it was
    /// already stopping.
    pub fn request_quit(&self) -> bool {
        if self.token.is_cancelled() {
            debug!("quit already requested");
            return false;
        }
        self.token.cancel();
        info!("quit requested");
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

/// Switches the terminal into and out of dashboard mode.
pub trait TerminalMode {
    fn enter(&mut self) -> io::Result<()>;
    fn leave(&mut self) -> io::Result<()>;
}

/// Raw input mode plus the alternate screen on stdout.
#[derive(Debug, Default)]
pub struct CrosstermMode;

impl TerminalMode for CrosstermMode {
    fn enter(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        let screen = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let raw = disable_raw_mode();
        raw.and(screen)
    }
}

/// Scoped terminal mode: entered on [`acquire`](Self::acquire), left on the
/// first of [`release`](Self::release) or drop.
pub struct TerminalSession<M: TerminalMode> {
    mode: M,
    active: bool,
}

impl<M: TerminalMode> TerminalSession<M> {
    pub fn acquire(mut mode: M) -> io::Result<Self> {
        mode.enter()?;
        debug!("terminal session acquired");
        Ok(Self { mode, active: true })
    }

    pub fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        debug!("terminal session released");
        self.mode.leave()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl<M: TerminalMode> Drop for TerminalSession<M> {
    fn drop(&mut self) {
        let _ = self.release();
    }
}
