//! Mailing-list archive monitor.
//!
//! Polls the day listing of an archive such as oss-security, picks out new
//! messages whose titles match a keyword list, pushes them to chat webhooks
//! and keeps a per-day record so each title is announced at most once.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod monitor;
pub mod notifiers;
pub mod parsers;
pub mod scheduler;
pub mod scrapers;
pub mod storage;
pub mod utils;

pub use error::{MonitorError, Result};
pub use monitor::{CycleReport, Monitor, MonitorState};
