//! Product list search and pagination.

use super::product::Product;

/// Rows shown per page of the product list.
pub const ROWS_PER_PAGE: usize = 15;

/// Products whose name contains `query`, ignoring case. An empty query
/// keeps every product.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.to_lowercase();
    products
        .iter()
        .filter(|product| product.nome.to_lowercase().contains(&query))
        .collect()
}

/// Rows of the zero-based `page`; empty past the last page.
#[must_use]
pub fn paginate<T>(rows: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_mul(per_page);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed for `total` rows; zero when there are none.
#[must_use]
pub const fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total.div_ceil(per_page)
    }
}
