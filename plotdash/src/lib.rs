//! plotdash: live terminal dashboard for running chia plot jobs and the
//! readiness of their tmp directories.

pub mod app;
pub mod backend;
pub mod cancel;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod policy;
pub mod sampler;
pub mod state;
pub mod ui;
pub mod view;
