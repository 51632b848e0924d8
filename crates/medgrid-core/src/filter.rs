//! Grid filter model and its wire encoding.
//!
//! The list endpoint takes a `filters` query parameter holding a URI-encoded
//! JSON array of `{key, operator, constraints: [{value, matchMode}]}`. Only
//! fields with at least one populated constraint are transmitted; an
//! entirely blank filter state sends no parameter at all. The global
//! full-text constraint travels separately, as the `query` parameter.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Comparison semantic applied by a single constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    StartsWith,
    EndsWith,
    Contains,
    Equals,
    DateIs,
    DateIsNot,
    DateBefore,
    DateAfter,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::DateIs => "dateIs",
            Self::DateIsNot => "dateIsNot",
            Self::DateBefore => "dateBefore",
            Self::DateAfter => "dateAfter",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "startsWith" => Ok(Self::StartsWith),
            "endsWith" => Ok(Self::EndsWith),
            "contains" => Ok(Self::Contains),
            "equals" => Ok(Self::Equals),
            "dateIs" => Ok(Self::DateIs),
            "dateIsNot" => Ok(Self::DateIsNot),
            "dateBefore" => Ok(Self::DateBefore),
            "dateAfter" => Ok(Self::DateAfter),
            other => Err(CoreError::UnknownMatchMode(other.to_string())),
        }
    }
}

/// How a field's constraints combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConstraint {
    pub value: Option<String>,
    pub match_mode: MatchMode,
}

impl FilterConstraint {
    pub fn new(match_mode: MatchMode, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            match_mode,
        }
    }

    pub fn blank(match_mode: MatchMode) -> Self {
        Self {
            value: None,
            match_mode,
        }
    }

    /// A constraint participates in the query only when it has a non-empty value.
    pub fn is_populated(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub operator: FilterOperator,
    pub constraints: Vec<FilterConstraint>,
}

impl FieldFilter {
    pub fn new(operator: FilterOperator, constraints: Vec<FilterConstraint>) -> Self {
        Self {
            operator,
            constraints,
        }
    }
}

/// The global full-text constraint. Unlike field filters it has no operator
/// and is sent as the `query` parameter rather than inside `filters`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalFilter {
    pub value: Option<String>,
    pub match_mode: MatchMode,
}

/// One field's entry in the `filters` wire array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFilter {
    pub key: String,
    pub operator: FilterOperator,
    pub constraints: Vec<FilterConstraint>,
}

/// Per-field constraint sets plus the global full-text constraint.
///
/// Field order is preserved so the encoded `filters` parameter is stable
/// across fetches.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub global: GlobalFilter,
    pub fields: IndexMap<String, FieldFilter>,
}

impl Default for FilterState {
    /// The fixed default shape; also what `clear` resets to.
    fn default() -> Self {
        let mut fields = IndexMap::new();
        fields.insert(
            "firstName".to_string(),
            FieldFilter::new(
                FilterOperator::Or,
                vec![FilterConstraint::blank(MatchMode::StartsWith)],
            ),
        );
        fields.insert(
            "lastName".to_string(),
            FieldFilter::new(
                FilterOperator::Or,
                vec![FilterConstraint::blank(MatchMode::StartsWith)],
            ),
        );
        fields.insert(
            "dateOfBirth".to_string(),
            FieldFilter::new(
                FilterOperator::Or,
                vec![FilterConstraint::blank(MatchMode::DateIs)],
            ),
        );
        fields.insert(
            "medicalRecordNumber".to_string(),
            FieldFilter::new(
                FilterOperator::Or,
                vec![FilterConstraint::blank(MatchMode::Contains)],
            ),
        );
        Self {
            global: GlobalFilter {
                value: None,
                match_mode: MatchMode::Contains,
            },
            fields,
        }
    }
}

impl FilterState {
    /// Replace a field's constraints with a single populated constraint.
    /// Fields outside the default shape are appended, preserving order.
    pub fn set_constraint(
        &mut self,
        field: impl Into<String>,
        match_mode: MatchMode,
        value: impl Into<String>,
    ) {
        let entry = self
            .fields
            .entry(field.into())
            .or_insert_with(|| FieldFilter::new(FilterOperator::Or, Vec::new()));
        entry.constraints = vec![FilterConstraint::new(match_mode, value)];
    }

    pub fn set_global(&mut self, value: impl Into<String>) {
        self.global.value = Some(value.into());
    }

    /// Reset to the fixed default shape.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The populated subset in wire order. Blank constraints are skipped;
    /// fields whose constraints are all blank are omitted.
    pub fn to_wire(&self) -> Vec<WireFilter> {
        self.fields
            .iter()
            .filter_map(|(key, field)| {
                let populated: Vec<FilterConstraint> = field
                    .constraints
                    .iter()
                    .filter(|c| c.is_populated())
                    .cloned()
                    .collect();
                if populated.is_empty() {
                    return None;
                }
                Some(WireFilter {
                    key: key.clone(),
                    operator: field.operator,
                    constraints: populated,
                })
            })
            .collect()
    }

    /// The value of the `filters` query parameter, or `None` when nothing is
    /// populated. Percent-encoding is left to the HTTP layer.
    pub fn encode(&self) -> Result<Option<String>> {
        let wire = self.to_wire();
        if wire.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&wire)?))
    }

    /// The global full-text value, if populated.
    pub fn global_query(&self) -> Option<&str> {
        self.global.value.as_deref().filter(|v| !v.is_empty())
    }
}
