//! List query types
//!
//! Filter and pagination parameters for `EventStore::list`.

use serde::Serialize;

use crate::domain::{Event, EventType};

/// Optional filters, combined with AND semantics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub tipo: Option<EventType>,
    /// `YYYY-MM`, compared against the first seven characters of `fecha`
    pub year_month: Option<String>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tipo(mut self, tipo: EventType) -> Self {
        self.tipo = Some(tipo);
        self
    }

    pub fn with_year_month(mut self, year_month: impl Into<String>) -> Self {
        self.year_month = Some(year_month.into());
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        let tipo_ok = self.tipo.map_or(true, |tipo| event.tipo == tipo);
        let month_ok = self
            .year_month
            .as_deref()
            .map_or(true, |month| event.fecha.year_month() == month);
        tipo_ok && month_ok
    }
}

/// 1-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;

    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        let start = self.page.saturating_sub(1).saturating_mul(self.limit);
        usize::try_from(start).unwrap_or(usize::MAX)
    }

    pub fn take(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// One page of filtered events. `total` counts the filtered set before
/// pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub page: u64,
    pub limit: u64,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::new(3, 20).offset(), 40);
        assert_eq!(Pagination::new(u64::MAX, 100).offset(), usize::MAX);
    }
}
