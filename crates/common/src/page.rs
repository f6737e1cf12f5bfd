//! Pagination types shared by all three backend integrations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected page parameters, surfaced before any backend call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPage {
    /// Page numbers are zero-based and must not be negative.
    #[error("page number must not be negative, got {0}")]
    NegativePageNumber(i64),

    /// A page must hold at least one element.
    #[error("page size must be positive, got {0}")]
    NonPositivePageSize(i64),
}

/// Parameters of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Validates raw page parameters into a request.
    pub fn new(number: i64, size: i64) -> Result<Self, InvalidPage> {
        if number < 0 {
            return Err(InvalidPage::NegativePageNumber(number));
        }
        if size <= 0 {
            return Err(InvalidPage::NonPositivePageSize(size));
        }
        Ok(Self {
            number: number as u32,
            size: size as u32,
        })
    }

    /// Returns the request for the first page at the given size.
    pub fn first(size: u32) -> Self {
        Self { number: 0, size }
    }

    /// Zero-based page number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Maximum number of elements in the page.
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Metadata describing one page of a larger collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
}

impl PageMetadata {
    /// Builds metadata for one page, deriving the total page count.
    pub fn new(number: u32, size: u32, total_elements: u64) -> Self {
        Self {
            size,
            total_elements,
            total_pages: Self::total_pages(total_elements, size),
            number,
        }
    }

    /// Total pages needed for `total_elements` at `size` elements per page.
    ///
    /// A collection smaller than one page (including an empty one) still
    /// occupies a single page.
    pub fn total_pages(total_elements: u64, size: u32) -> u32 {
        if total_elements < u64::from(size) {
            1
        } else {
            total_elements.div_ceil(u64::from(size)) as u32
        }
    }
}

/// One page of elements together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageMetadata,
}

impl<T> Page<T> {
    /// Creates a page from its content and metadata.
    pub fn new(content: Vec<T>, page: PageMetadata) -> Self {
        Self { content, page }
    }

    /// Returns an empty page positioned at the given request.
    pub fn empty(request: PageRequest) -> Self {
        Self {
            content: Vec::new(),
            page: PageMetadata::new(request.number(), request.size(), 0),
        }
    }

    /// Returns true if the page holds no elements.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maps the page content, preserving the metadata unchanged.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_one_below_a_full_page() {
        assert_eq!(PageMetadata::total_pages(0, 10), 1);
        assert_eq!(PageMetadata::total_pages(1, 10), 1);
        assert_eq!(PageMetadata::total_pages(9, 10), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(PageMetadata::total_pages(10, 10), 1);
        assert_eq!(PageMetadata::total_pages(11, 10), 2);
        assert_eq!(PageMetadata::total_pages(25, 10), 3);
        assert_eq!(PageMetadata::total_pages(30, 10), 3);
    }

    #[test]
    fn page_request_rejects_negative_number() {
        let err = PageRequest::new(-1, 10).unwrap_err();
        assert_eq!(err, InvalidPage::NegativePageNumber(-1));
    }

    #[test]
    fn page_request_rejects_non_positive_size() {
        assert_eq!(
            PageRequest::new(0, 0).unwrap_err(),
            InvalidPage::NonPositivePageSize(0)
        );
        assert_eq!(
            PageRequest::new(0, -5).unwrap_err(),
            InvalidPage::NonPositivePageSize(-5)
        );
    }

    #[test]
    fn empty_page_carries_request_position() {
        let page: Page<u32> = Page::empty(PageRequest::new(2, 10).unwrap());
        assert!(page.is_empty());
        assert_eq!(page.page.number, 2);
        assert_eq!(page.page.size, 10);
        assert_eq!(page.page.total_elements, 0);
        assert_eq!(page.page.total_pages, 1);
    }

    #[test]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2, 3], PageMetadata::new(0, 10, 3));
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1", "2", "3"]);
        assert_eq!(mapped.page, PageMetadata::new(0, 10, 3));
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let json = serde_json::to_value(PageMetadata::new(1, 10, 25)).unwrap();
        assert_eq!(json["totalElements"], 25);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["number"], 1);
        assert_eq!(json["size"], 10);
    }
}
