//! Errors raised while inspecting plot jobs.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("log directory '{}' is not readable: {source}", path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read plot log '{}': {source}", path.display())]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read process stats for pid {pid}: {source}")]
    ProcStat {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed process stats for pid {pid}")]
    ProcStatFormat { pid: u32 },
}
