//! Offset/limit window for list queries

use serde::{Deserialize, Serialize};

/// Result window requested by the host
///
/// Either bound may be absent. Hosts commonly pass negative values to mean
/// "no bound"; [`Pageable::from_host`] normalizes those.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    /// Number of rows to skip
    #[serde(default)]
    pub first: Option<u32>,

    /// Maximum number of rows to return
    #[serde(default)]
    pub max: Option<u32>,
}

impl Pageable {
    /// Window covering every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Window with both bounds set
    pub fn new(first: u32, max: u32) -> Self {
        Self {
            first: Some(first),
            max: Some(max),
        }
    }

    /// Build a window from host-style signed bounds
    pub fn from_host(first: Option<i32>, max: Option<i32>) -> Self {
        Self {
            first: first.and_then(|v| u32::try_from(v).ok()).filter(|v| *v > 0),
            max: max.and_then(|v| u32::try_from(v).ok()),
        }
    }

    /// Rows to skip, zero when unset
    pub fn offset(&self) -> u32 {
        self.first.unwrap_or(0)
    }

    /// Whether the window covers every row
    pub fn is_unbounded(&self) -> bool {
        self.offset() == 0 && self.max.is_none()
    }

    /// Apply the window to rows already in memory
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let iter = items.into_iter().skip(self.offset() as usize);
        match self.max {
            Some(max) => iter.take(max as usize).collect(),
            None => iter.collect(),
        }
    }
}
