//! Discovery of running chia plotting jobs: process inspection, plotter log
//! parsing and the job model consumed by the dashboard.

pub mod discovery;
pub mod error;
pub mod plotlog;
pub mod procfs;
pub mod types;

pub use discovery::{Discovery, EntryFailure, JobSource, ProcessProbe};
pub use error::ProbeError;
pub use types::{JobSnapshot, Phase, RunStatus};
