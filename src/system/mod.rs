//! System access module - process metrics and terminal capabilities
//!
//! This module isolates everything OS-facing behind small traits so the
//! display engine never branches on platform.

pub mod console;
pub mod error;
pub mod processes;

pub use console::{Console, CrosstermConsole};
pub use processes::{MetricSource, SysinfoSource};
