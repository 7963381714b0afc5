//! Request types
//!
//! Query-string structures accepted by the branch API.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest LIMIT / START value the store accepts
pub const MAX_QUERY_BOUND: u64 = u32::MAX as u64;

/// Sortable branch fields (JSON names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Code,
    Address,
    City,
    State,
    Phone,
    Email,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Parse a JSON field name; unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "code" => Some(Self::Code),
            "address" => Some(Self::Address),
            "city" => Some(Self::City),
            "state" => Some(Self::State),
            "phone" => Some(Self::Phone),
            "email" => Some(Self::Email),
            "status" => Some(Self::Status),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    /// JSON field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Status => "status",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Storage column name
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            other => other.as_str(),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `asc` sorts ascending, anything else descending
    pub fn parse(s: &str) -> Self {
        if s == "asc" { Self::Asc } else { Self::Desc }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

fn default_sort_by() -> String {
    SortField::Name.as_str().to_string()
}

fn default_sort_order() -> String {
    SortOrder::Asc.as_str().to_string()
}

/// `GET /api/branches` query string
///
/// Kept loose on purpose (strings and signed integers) so that it mirrors
/// what a caller may send; [`BranchListQuery::normalize`] turns it into
/// [`ListParams`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_sort_order")]
    pub sort_order: String,
}

impl Default for BranchListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            sort_by: default_sort_by(),
            sort_order: default_sort_order(),
        }
    }
}

impl BranchListQuery {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = field.as_str().to_string();
        self.sort_order = order.as_str().to_string();
        self
    }

    /// Clamp page and limit to at least 1 and resolve the sort settings
    ///
    /// `limit` is also capped at [`MAX_QUERY_BOUND`]. The search text is kept
    /// verbatim; only an empty string disables the filter.
    pub fn normalize(&self) -> ListParams {
        ListParams {
            page: self.page.max(1) as u64,
            limit: (self.limit.max(1) as u64).min(MAX_QUERY_BOUND),
            search: self.search.clone(),
            sort_field: SortField::parse(&self.sort_by).unwrap_or_default(),
            sort_order: SortOrder::parse(&self.sort_order),
        }
    }

    /// Query-string pairs in wire order (values not yet percent-encoded)
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("search", self.search.clone()),
            ("sortBy", self.sort_by.clone()),
            ("sortOrder", self.sort_order.clone()),
        ]
    }
}

/// Normalized list parameters handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Search text as sent, empty for no filter
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl ListParams {
    /// Number of records to skip, capped at [`MAX_QUERY_BOUND`]
    ///
    /// A capped offset lies past any stored row, so the page comes back empty.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(MAX_QUERY_BOUND)
    }

    /// ceil(total / limit)
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_query() {
        let query: BranchListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, BranchListQuery::default());

        let params = query.normalize();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort_field, SortField::Name);
        assert_eq!(params.sort_order, SortOrder::Asc);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_normalize_clamps_and_falls_back() {
        let query = BranchListQuery {
            page: 0,
            limit: -5,
            search: "  spring ".into(),
            sort_by: "nonsense".into(),
            sort_order: "DESC".into(),
        };
        let params = query.normalize();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);
        assert_eq!(params.search, "  spring ");
        assert_eq!(params.sort_field, SortField::Name);
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_total_pages_and_offset() {
        let params = BranchListQuery::new(3, 4).normalize();
        assert_eq!(params.offset(), 8);
        assert_eq!(params.total_pages(0), 0);
        assert_eq!(params.total_pages(8), 2);
        assert_eq!(params.total_pages(9), 3);
    }

    #[test]
    fn test_huge_page_and_limit_stay_in_bounds() {
        let params = BranchListQuery::new(i64::MAX, i64::MAX).normalize();
        assert_eq!(params.limit, MAX_QUERY_BOUND);
        assert_eq!(params.offset(), MAX_QUERY_BOUND);
        assert_eq!(params.total_pages(7), 1);

        let params = BranchListQuery::new(4, 9_223_372_036_854_775_807).normalize();
        assert_eq!(params.offset(), MAX_QUERY_BOUND);

        let params = BranchListQuery::new(2, 10).normalize();
        assert_eq!(params.offset(), 10);
    }

    #[test]
    fn test_sort_field_columns() {
        assert_eq!(SortField::parse("createdAt"), Some(SortField::CreatedAt));
        assert_eq!(SortField::CreatedAt.column(), "created_at");
        assert_eq!(SortField::City.column(), "city");
        assert_eq!(SortField::parse("created_at"), None);
    }

    #[test]
    fn test_to_pairs() {
        let query = BranchListQuery::new(2, 20)
            .with_search("north")
            .with_sort(SortField::Code, SortOrder::Desc);
        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("page", "2".to_string()));
        assert_eq!(pairs[2], ("search", "north".to_string()));
        assert_eq!(pairs[3], ("sortBy", "code".to_string()));
        assert_eq!(pairs[4], ("sortOrder", "desc".to_string()));
    }
}
