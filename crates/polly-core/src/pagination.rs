//! Offset/limit window for list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination window shared by all list endpoints.
///
/// - `skip`: ≥ 0, default 0
/// - `limit`: 1–100, default 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWindow {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    10
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl ListWindow {
    /// Clamp `limit` to the valid range 1–100. `skip` is unbounded.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            skip: self.skip,
            limit: self.limit.clamp(1, 100),
        }
    }
}
