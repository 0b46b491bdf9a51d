//! Retrieval windowing over a log partition.
//!
//! Converts the client's `(last, limit)` pair into a concrete inclusive
//! index range:
//!
//! ```text
//! last  = requested_last  or mlen - 1
//! limit = requested_limit or (embedded_limit if embedded else mlen)
//! start = max(last - limit + 1, 0)
//! ```
//!
//! With an empty partition `last` is -1, so the window is `[0, -1]`: empty,
//! never clamped upward.

use crate::domain::foundation::ValidationError;

/// Window parameters as supplied by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowRequest {
    pub last: Option<i64>,
    pub limit: Option<i64>,
    pub embedded: bool,
}

impl WindowRequest {
    /// Parses raw query values. Anything but a non-negative integer is rejected.
    pub fn parse(
        last: Option<&str>,
        limit: Option<&str>,
        embedded: bool,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            last: last.map(|v| parse_non_negative("last", v)).transpose()?,
            limit: limit.map(|v| parse_non_negative("limit", v)).transpose()?,
            embedded,
        })
    }
}

fn parse_non_negative(field: &str, raw: &str) -> Result<i64, ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(ValidationError::not_non_negative(field, raw)),
    }
}

/// Inclusive index range `[start, end]`; empty when `end < start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogWindow {
    pub start: i64,
    pub end: i64,
}

impl LogWindow {
    const EMPTY: Self = Self { start: 0, end: -1 };

    pub fn compute(mlen: u64, request: &WindowRequest, embedded_limit: u64) -> Self {
        let mlen = i64::try_from(mlen).unwrap_or(i64::MAX);
        let last = request.last.unwrap_or(mlen - 1);
        let default_limit = if request.embedded {
            i64::try_from(embedded_limit).unwrap_or(i64::MAX)
        } else {
            mlen
        };
        let limit = request.limit.unwrap_or(default_limit);
        let start = (i128::from(last) - i128::from(limit) + 1).max(0);
        match i64::try_from(start) {
            Ok(start) if start <= last => Self { start, end: last },
            _ => Self::EMPTY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Non-negative bounds, or `None` for an empty window.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        if self.is_empty() {
            None
        } else {
            Some((self.start as u64, self.end as u64))
        }
    }
}
