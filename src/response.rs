//! Normalized responses and pagination metadata.
//!
//! Every sub-client call resolves to a [`NormalizedResponse`]: the HTTP
//! status, the decoded JSON body (or raw bytes when the body is not JSON),
//! and pagination metadata parsed from the `X-Blueink-Pagination` header
//! when the server sends it.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Response header carrying pagination state for list endpoints.
pub const PAGINATION_HEADER: &str = "X-Blueink-Pagination";

/// Pagination state for a paged response, parsed from the
/// `X-Blueink-Pagination` header.
///
/// The header value is four comma-separated integers:
/// `page_number,total_pages,per_page,total_results`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_number: u32,
    pub total_pages: u32,
    pub per_page: u32,
    pub total_results: u64,
}

impl Pagination {
    /// Parse the header value. Returns `None` if the value is not four
    /// comma-separated integers; a malformed header is tolerated rather
    /// than treated as an error.
    pub fn parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.split(',').map(|p| p.trim());
        let page_number = parts.next()?.parse().ok()?;
        let total_pages = parts.next()?.parse().ok()?;
        let per_page = parts.next()?.parse().ok()?;
        let total_results = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Pagination {
            page_number,
            total_pages,
            per_page,
            total_results,
        })
    }
}

impl std::fmt::Display for Pagination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page_number: {}, per_page: {}, total_pages: {}, total_results: {}",
            self.page_number, self.per_page, self.total_pages, self.total_results
        )
    }
}

/// The SDK's uniform wrapper around a raw HTTP response.
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body. `Value::Null` when the body was not valid JSON;
    /// the undecoded bytes stay available in `raw`.
    pub data: Value,
    /// The raw response body.
    pub raw: Vec<u8>,
    /// Pagination metadata, when the response carried the pagination header.
    pub pagination: Option<Pagination>,
}

impl NormalizedResponse {
    /// Build a normalized response from a raw reqwest response, consuming
    /// its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let pagination = response
            .headers()
            .get(PAGINATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Pagination::parse);

        let raw = response.bytes().await?.to_vec();
        // Some responses (e.g. 500 pages) have empty or HTML bodies.
        let data = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        Ok(NormalizedResponse {
            status,
            data,
            raw,
            pagination,
        })
    }

    /// Returns true for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the JSON body into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_parse() {
        let p = Pagination::parse("2,7,50,312").unwrap();
        assert_eq!(p.page_number, 2);
        assert_eq!(p.total_pages, 7);
        assert_eq!(p.per_page, 50);
        assert_eq!(p.total_results, 312);
    }

    #[test]
    fn test_pagination_parse_with_spaces() {
        let p = Pagination::parse("1, 3, 50, 120").unwrap();
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_pagination_parse_malformed() {
        assert!(Pagination::parse("").is_none());
        assert!(Pagination::parse("1,2,3").is_none());
        assert!(Pagination::parse("1,2,3,4,5").is_none());
        assert!(Pagination::parse("one,two,three,four").is_none());
    }

    #[test]
    fn test_pagination_display() {
        let p = Pagination::parse("1,3,50,120").unwrap();
        let s = p.to_string();
        assert!(s.contains("total_pages: 3"));
        assert!(s.contains("total_results: 120"));
    }
}
