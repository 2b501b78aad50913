use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_bool;

/// Offset/limit pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "Page::default_limit")]
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    fn default_limit() -> u32 {
        Self::DEFAULT_LIMIT
    }

    /// Returns the window of `items` covered by this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.offset as usize).min(items.len());
        let end = start.saturating_add(self.limit as usize).min(items.len());
        &items[start..end]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Filter for vacation listings.
///
/// `approved: None` matches every vacation regardless of decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VacationFilter {
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub approved: Option<bool>,
}

impl VacationFilter {
    pub fn approved(approved: bool) -> Self {
        Self {
            approved: Some(approved),
        }
    }
}
