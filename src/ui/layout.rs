//! Column layout for the process table
//!
//! Fixed columns (PID, CPU%, MEM%, MEM, UPTIME, STATUS) never change width.
//! NAME, CREATED and USER share whatever the terminal has left, so the table
//! always spans exactly `total` cells.

use crate::constants::{
    CREATED_SHARE_PERCENT, FALLBACK_COLUMNS, FIXED_OVERHEAD, MAX_CREATED_WIDTH, MAX_NAME_WIDTH,
    MIN_CREATED_WIDTH, MIN_NAME_WIDTH, MIN_TOTAL_WIDTH, MIN_USER_WIDTH, NAME_SHARE_PERCENT,
};

/// Widths of the variable columns and of the whole table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: usize,
    pub created: usize,
    pub user: usize,
    pub total: usize,
}

impl Layout {
    /// Computes the layout for a terminal `columns` wide.
    ///
    /// A width of 0 (output redirected, size unknown) uses the fallback width.
    /// Widths below [`MIN_TOTAL_WIDTH`] are clamped up to it, so the table may
    /// be wider than the terminal in degenerate cases.
    pub fn for_width(columns: u16) -> Self {
        let columns = if columns == 0 {
            FALLBACK_COLUMNS
        } else {
            columns
        };
        let total = usize::from(columns).max(MIN_TOTAL_WIDTH);
        let remaining = total - FIXED_OVERHEAD;

        let mut name = (remaining * NAME_SHARE_PERCENT / 100).clamp(MIN_NAME_WIDTH, MAX_NAME_WIDTH);
        let mut created =
            (remaining * CREATED_SHARE_PERCENT / 100).clamp(MIN_CREATED_WIDTH, MAX_CREATED_WIDTH);

        // USER keeps its minimum by shrinking NAME first, then CREATED.
        let mut deficit = (name + created + MIN_USER_WIDTH).saturating_sub(remaining);
        let take = deficit.min(name - MIN_NAME_WIDTH);
        name -= take;
        deficit -= take;
        created -= deficit.min(created - MIN_CREATED_WIDTH);

        Self {
            name,
            created,
            user: remaining - name - created,
            total,
        }
    }
}
