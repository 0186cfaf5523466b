use serde::Serialize;

/// One page of results plus the numbers a client needs to page further.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            last: page + 1 >= total_pages,
        }
    }
}
