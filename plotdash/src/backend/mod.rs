//! Presentation backends. Both drive [`App::tick`](crate::app::App::tick) and
//! draw whole frames; they differ in how they wait and read input.

pub mod cooperative;
pub mod polling;

use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Single blocking loop with sliced input polling.
    #[default]
    Polling,
    /// Render and input tasks on a single-threaded async scheduler.
    Cooperative,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poll" | "polling" => Ok(BackendKind::Polling),
            "coop" | "cooperative" => Ok(BackendKind::Cooperative),
            other => Err(format!(
                "unknown backend '{other}' (expected 'poll' or 'coop')"
            )),
        }
    }
}

/// Tick timing: a tick lasts `slices` input checks of `slice` each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub slice: Duration,
    pub slices: u32,
}

impl Cadence {
    pub fn tick(&self) -> Duration {
        self.slice * self.slices
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            slice: Duration::from_millis(100),
            slices: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!("poll".parse(), Ok(BackendKind::Polling));
        assert_eq!("cooperative".parse(), Ok(BackendKind::Cooperative));
        assert!("threads".parse::<BackendKind>().is_err());
    }

    #[test]
    fn default_cadence_is_one_second() {
        assert_eq!(Cadence::default().tick(), Duration::from_secs(1));
    }
}
