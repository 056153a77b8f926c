//! Fatal dashboard errors. Per-tick sampling problems never surface here;
//! they are logged and the previous data is kept.

use std::io;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DashError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
