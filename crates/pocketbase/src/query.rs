//! Query-string encoding for list and read operations.
//!
//! `filter`, `sort` and `expand` are opaque to the client: they are written
//! in the server's own grammar and only percent-encoded here, never parsed.

use crate::error::{Error, ValidationError};

/// Page the server returns when none is requested.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size the server uses when none is requested.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// Pagination, filtering, sorting and relation expansion for a request.
///
/// Unset fields, empty strings and values equal to the server default are
/// left out of the encoded query so they never override server defaults.
///
/// # Example
///
/// ```
/// use pocketbase::QuerySpec;
///
/// let query = QuerySpec::new()
///     .with_page(2)
///     .with_filter("status = 'published'")
///     .with_sort("-created");
/// assert_eq!(
///     query.encode().unwrap(),
///     "page=2&filter=status%20%3D%20%27published%27&sort=-created"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Records per page.
    pub per_page: Option<u32>,
    /// Filter expression, e.g. `title ~ 'abc' && created > '2022-01-01'`.
    pub filter: Option<String>,
    /// Comma-separated sort fields, `-` prefix for descending.
    pub sort: Option<String>,
    /// Comma-separated relation paths to expand, e.g. `author,comments.user`.
    pub expand: Option<String>,
}

impl QuerySpec {
    /// An empty query; encodes to the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// A query carrying only an optional expand expression.
    pub fn expanding(expand: Option<&str>) -> Self {
        Self {
            expand: expand.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Check pagination bounds without encoding.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero page or page size.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(page) = self.page
            && page == 0
        {
            return Err(ValidationError::Page { value: page }.into());
        }
        if let Some(per_page) = self.per_page
            && per_page == 0
        {
            return Err(ValidationError::PerPage { value: per_page }.into());
        }
        Ok(())
    }

    /// Encode into a query string without a leading `?`.
    ///
    /// Parameters always appear in the order `page`, `perPage`, `filter`,
    /// `sort`, `expand`, so equal specs encode to identical bytes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero page or page size.
    pub fn encode(&self) -> Result<String, Error> {
        self.validate()?;

        let mut params: Vec<(&str, String)> = Vec::with_capacity(5);

        if let Some(page) = self.page.filter(|p| *p != DEFAULT_PAGE) {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page.filter(|p| *p != DEFAULT_PER_PAGE) {
            params.push(("perPage", per_page.to_string()));
        }
        for (key, value) in [
            ("filter", &self.filter),
            ("sort", &self.sort),
            ("expand", &self.expand),
        ] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.push((key, urlencoding::encode(value).into_owned()));
            }
        }

        Ok(params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_encodes_to_nothing() {
        assert_eq!(QuerySpec::new().encode().unwrap(), "");
    }

    #[test]
    fn defaults_are_omitted() {
        let query = QuerySpec::new()
            .with_page(DEFAULT_PAGE)
            .with_per_page(DEFAULT_PER_PAGE);
        assert_eq!(query.encode().unwrap(), "");
    }

    #[test]
    fn empty_strings_are_omitted() {
        let query = QuerySpec::new().with_filter("").with_sort("").with_expand("");
        assert_eq!(query.encode().unwrap(), "");
    }

    #[test]
    fn parameters_follow_fixed_order() {
        let query = QuerySpec::new()
            .with_expand("author")
            .with_sort("-created,title")
            .with_filter("a=1")
            .with_per_page(2)
            .with_page(3);
        assert_eq!(
            query.encode().unwrap(),
            "page=3&perPage=2&filter=a%3D1&sort=-created%2Ctitle&expand=author"
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let query = QuerySpec::new()
            .with_page(4)
            .with_filter("title ~ 'x' || (n > 1 && n < 5)")
            .with_expand("comments_via_post.user");
        let first = query.encode().unwrap();
        let second = query.clone().encode().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn filter_is_passed_through_opaquely() {
        // Not valid filter syntax; still encoded as-is for the server to reject.
        let query = QuerySpec::new().with_filter("&&== 'unterminated");
        assert_eq!(
            query.encode().unwrap(),
            "filter=%26%26%3D%3D%20%27unterminated"
        );
    }

    #[test]
    fn zero_page_is_rejected() {
        let err = QuerySpec::new().with_page(0).encode().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Page { value: 0 })
        ));
    }

    #[test]
    fn zero_per_page_is_rejected() {
        let err = QuerySpec::new().with_per_page(0).encode().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::PerPage { value: 0 })
        ));
    }

    #[test]
    fn expanding_only_sets_expand() {
        assert_eq!(QuerySpec::expanding(None), QuerySpec::new());
        assert_eq!(
            QuerySpec::expanding(Some("author")).encode().unwrap(),
            "expand=author"
        );
    }
}
