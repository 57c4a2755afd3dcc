//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use amora_core::paging::Paging;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub take: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new<F>(items: Vec<T>, total: i64, paging: &Paging<F>) -> Self {
        Self {
            items,
            page: paging.page(),
            take: paging.limit(),
            total_items: total,
            total_pages: paging.total_pages(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_metadata_uses_effective_values() {
        let paging = Paging::new(()).with_page(0).with_take(4);
        let page = Paginated::new(vec![1, 2, 3, 4], 9, &paging);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["take"], 4);
        assert_eq!(json["totalItems"], 9);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["items"].as_array().unwrap().len(), 4);
    }
}
