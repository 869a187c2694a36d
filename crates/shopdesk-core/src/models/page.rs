use serde::{Deserialize, Serialize};

/// One page of a list endpoint. `meta` is present only when the backend
/// answered with a paginator rather than a bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total across all pages when known, otherwise the items on this page
    pub fn total(&self) -> u64 {
        self.meta
            .as_ref()
            .map(|m| m.total)
            .unwrap_or(self.items.len() as u64)
    }

    pub fn has_next(&self) -> bool {
        self.meta
            .as_ref()
            .map(|m| m.current_page < m.last_page)
            .unwrap_or(false)
    }
}

/// Laravel paginator fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PageMeta {
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}
