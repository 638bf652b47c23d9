//! Domain-level query types.
//!
//! These are used by services and repositories and are **not** exposed over
//! the public API; the REST layer maps its query-string structs onto them.

use chrono::NaiveDate;
use shared::RentalStatus;

/// Offset/limit window applied to every listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: u32,
    /// `None` returns everything after `offset`
    pub limit: Option<u32>,
}

impl Page {
    pub fn new(offset: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            offset: offset.unwrap_or(0),
            limit,
        }
    }

    /// Value for a SQLite `LIMIT` clause, where a negative limit means "no limit"
    pub fn sql_limit(&self) -> i64 {
        self.limit.map_or(-1, i64::from)
    }

    pub fn sql_offset(&self) -> i64 {
        i64::from(self.offset)
    }
}

/// Filters accepted by the rental listing. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalFilter {
    pub customer_id: Option<i64>,
    pub game_id: Option<i64>,
    pub status: Option<RentalStatus>,
    /// Only rentals rented on or after this date
    pub start_date: Option<NaiveDate>,
}
