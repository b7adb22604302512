use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Gender;

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;
/// Keeps `offset` well inside Postgres' signed 64-bit OFFSET.
const MAX_PAGE: u64 = 1_000_000;

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct Pagination {
    /// 1-indexed page number, default 1.
    pub page: Option<u64>,
    /// Items per page, default 20, capped at 100.
    #[serde(alias = "pageSize", alias = "per_page")]
    pub page_size: Option<u64>,
}

impl Pagination {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Fills in `page_size` when the caller did not send one.
    pub fn or_page_size(mut self, page_size: u64) -> Self {
        self.page_size.get_or_insert(page_size);
        self
    }

    /// Returns `(page, page_size, offset)`.
    pub fn normalize(&self) -> (u64, u64, u64) {
        let page = self.page.unwrap_or(1).clamp(1, MAX_PAGE);
        let page_size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;
        (page, page_size, offset)
    }
}

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<u64>,
    #[serde(alias = "pageSize", alias = "per_page")]
    pub page_size: Option<u64>,
    /// Includes unisex products alongside the requested facet.
    pub gender: Option<Gender>,
    /// Exact category match.
    pub category: Option<String>,
}

impl ProductQuery {
    // Query strings cannot go through `#[serde(flatten)]` for numeric fields.
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
    }

    #[test]
    fn computes_offset_from_one_indexed_page() {
        assert_eq!(Pagination::new(3, 10).normalize(), (3, 10, 20));
    }

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(Pagination::new(0, 0).normalize(), (1, 1, 0));
        assert_eq!(Pagination::new(2, 5000).normalize(), (2, 100, 100));
    }

    #[test]
    fn huge_page_does_not_overflow_offset() {
        let (page, page_size, offset) = Pagination::new(u64::MAX, 100).normalize();
        assert_eq!(page, MAX_PAGE);
        assert_eq!(page_size, 100);
        assert_eq!(offset, (MAX_PAGE - 1) * 100);
    }

    #[test]
    fn default_page_size_only_fills_missing_value() {
        let filled = Pagination::default().or_page_size(50).normalize();
        assert_eq!(filled, (1, 50, 0));
        let explicit = Pagination::new(1, 10).or_page_size(50).normalize();
        assert_eq!(explicit, (1, 10, 0));
    }
}
