//! List-request parameters and their query-string encoding.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::filter::FilterState;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_SORT_FIELD: &str = "lastName";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(CoreError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Sort field plus direction; wire encoding `sort=<field>,asc|desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.field, self.order)
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, SortOrder::Asc)
    }
}

/// Everything a list fetch sends: page, size, sort, filters.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: u64,
    pub size: Option<u64>,
    pub sort: Option<Sort>,
    pub filters: FilterState,
}

impl ListParams {
    pub fn first_page() -> Self {
        Self {
            page: 0,
            size: Some(DEFAULT_PAGE_SIZE),
            sort: Some(Sort::default()),
            filters: FilterState::default(),
        }
    }

    /// Query pairs in the order the upstream API documents them:
    /// page, size, sort, filters, query. Percent-encoding is the HTTP
    /// layer's job.
    pub fn to_query_pairs(&self) -> crate::error::Result<Vec<(String, String)>> {
        let mut pairs = vec![("page".to_string(), self.page.to_string())];
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.to_query_value()));
        }
        if let Some(filters) = self.filters.encode()? {
            pairs.push(("filters".to_string(), filters));
        }
        if let Some(query) = self.filters.global_query() {
            pairs.push(("query".to_string(), query.to_string()));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::MatchMode;

    #[test]
    fn test_sort_query_value() {
        assert_eq!(Sort::default().to_query_value(), "lastName,asc");
        assert_eq!(
            Sort::new("dateOfBirth", SortOrder::Desc).to_query_value(),
            "dateOfBirth,desc"
        );
    }

    #[test]
    fn test_default_params_send_no_filters() {
        let pairs = ListParams::first_page().to_query_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "20".to_string()),
                ("sort".to_string(), "lastName,asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_populated_filters_and_global_query_are_sent() {
        let mut params = ListParams::first_page();
        params.page = 2;
        params.filters.set_constraint("lastName", MatchMode::StartsWith, "Sm");
        params.filters.set_global("smith");

        let pairs = params.to_query_pairs().unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["page", "size", "sort", "filters", "query"]);
        assert_eq!(pairs[0].1, "2");
        assert!(pairs[3].1.contains("\"startsWith\""));
        assert_eq!(pairs[4].1, "smith");
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
