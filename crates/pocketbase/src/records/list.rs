//! Paginated list result.

use serde::{Deserialize, Serialize};

use super::Record;

/// One page of records from a collection.
///
/// Items keep the order the server returned them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    /// The current page, starting at 1.
    pub page: u32,

    /// Page size used by the server.
    pub per_page: u32,

    /// Total matching records across all pages.
    pub total_items: i64,

    /// Total number of pages.
    pub total_pages: i64,

    /// Records on this page.
    #[serde(default)]
    pub items: Vec<Record>,
}

impl ListResult {
    /// True when no later page exists.
    pub fn is_last_page(&self) -> bool {
        i64::from(self.page) >= self.total_pages
    }
}
