//! User interface rendering
//!
//! This module provides all terminal UI rendering functionality:
//! - `layout` - Column widths for the current terminal width
//! - `render` - Live frame and static table entry points
//! - `components` - Title line, column headers, footer, banners
//! - `process_list` - One process row
//! - `utils` - Shared formatting and color helpers

mod components;
mod layout;
mod process_list;
mod render;
mod utils;

pub use components::TitleInfo;
pub use layout::Layout;
pub use render::{render_frame, render_paused, render_static, Frame, FrameBody};
