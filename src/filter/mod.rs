//! Boolean filter queries over the browse index
//!
//! The request shell hands the engine a boolean-query AST (from the
//! full-text search collaborator); the translator lowers it into a
//! parameterized predicate over the filter-link table of one generation.
//!
//! # Rules
//!
//! - Unknown filter fields are not errors: the clause is dropped and logged
//! - Values are always carried as parameters, never interpolated; only
//!   validated type ids appear structurally in the predicate text

mod query;
mod translate;

pub use query::{FilterClause, FilterQuery, Occur};
pub use translate::{translate, CompiledFilter};
