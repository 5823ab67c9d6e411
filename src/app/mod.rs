//! Application state and logic
//!
//! - `snapshot` - Filter, sort and truncate one metric read
//! - `session` - Shared display state and the pause/resume controller
//! - `shutdown` - Exactly-once terminal teardown
//! - `runner` - Refresh, key and signal tasks
//! - `input` - Key decoding and the key listener thread
//! - `cli` - Command-line configuration

mod cli;
mod input;
pub mod logging;
mod process_record;
mod runner;
mod session;
mod shutdown;
mod snapshot;
mod sort;
mod state;

pub use cli::Config;
pub use process_record::ProcessRecord;
pub use runner::run;
pub use snapshot::{NameFilter, Snapshot, SnapshotRequest};
pub use sort::{SortDirection, SortKey};
