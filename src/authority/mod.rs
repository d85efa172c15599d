//! Authority cross-references
//!
//! Resolves a heading against an external preferred/variant-term authority
//! index: a preferred-term hit yields see-also references and a scope note;
//! a variant hit yields the preferred terms to use instead. Cross-references
//! with no matching bibliographic records are suppressed in both branches.

mod errors;
mod resolver;

pub use errors::{AuthorityError, AuthorityResult};
pub use resolver::{
    AuthorityDoc, AuthorityFields, AuthorityIndex, AuthorityResolver, CrossRefs,
    DEFAULT_MAX_REDIRECTS,
};
