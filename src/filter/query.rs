//! Boolean-query AST
//!
//! Tagged variant mirroring the collaborator's query objects: groups of
//! occurrence-tagged clauses, field:value terms, and a match-all leaf.

/// How a clause participates in its group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    /// Clause must match (`AND`)
    Required,
    /// Clause must not match (`AND NOT`)
    Prohibited,
    /// Clause may match (`OR`)
    Optional,
}

/// One occurrence-tagged sub-query inside a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub occur: Occur,
    pub query: FilterQuery,
}

impl FilterClause {
    pub fn required(query: FilterQuery) -> Self {
        Self {
            occur: Occur::Required,
            query,
        }
    }

    pub fn prohibited(query: FilterQuery) -> Self {
        Self {
            occur: Occur::Prohibited,
            query,
        }
    }

    pub fn optional(query: FilterQuery) -> Self {
        Self {
            occur: Occur::Optional,
            query,
        }
    }
}

/// A boolean filter query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterQuery {
    /// Conjunction/disjunction of occurrence-tagged clauses
    Group(Vec<FilterClause>),
    /// `field:value` leaf
    Term { field: String, value: String },
    /// Matches every heading
    MatchAll,
}

impl FilterQuery {
    /// `field:value` term leaf
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterQuery::Term {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Group of clauses
    pub fn group(clauses: Vec<FilterClause>) -> Self {
        FilterQuery::Group(clauses)
    }
}
