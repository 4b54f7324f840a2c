//! Offset-based pagination utilities.

use serde::Serialize;

/// A resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub limit: usize,
    pub offset: usize,
}

impl PageWindow {
    /// Builds a window from optional query values.
    ///
    /// A missing limit falls back to `default_limit`; any limit is clamped to
    /// `1..=max_limit`. A missing offset means the first page.
    pub fn resolve(
        limit: Option<usize>,
        offset: Option<usize>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let max_limit = max_limit.max(1);
        let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
        Self {
            limit,
            offset: offset.unwrap_or(0),
        }
    }

    /// Returns the slice of `items` covered by this window.
    ///
    /// An offset past the end yields an empty slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }
}
