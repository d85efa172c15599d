//! Authority record lookup and cross-reference assembly

use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{AuthorityError, AuthorityResult};
use crate::browse::BibliographicIndex;

/// Redirect targets fetched per variant heading unless configured otherwise
pub const DEFAULT_MAX_REDIRECTS: usize = 1000;

/// One record from the authority backing index: field name → stored values
#[derive(Debug, Clone, Default)]
pub struct AuthorityDoc {
    fields: HashMap<String, Vec<String>>,
}

impl AuthorityDoc {
    pub fn new(fields: HashMap<String, Vec<String>>) -> Self {
        Self { fields }
    }

    /// Values stored under `field`; empty when the field is absent.
    pub fn values(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The external authority backing index
pub trait AuthorityIndex: Send + Sync {
    /// Record whose preferred-term field equals `heading`, if any
    fn preferred_record(&self, heading: &str) -> AuthorityResult<Option<AuthorityDoc>>;

    /// Up to `limit` records whose variant-term field equals `variant`
    fn redirect_targets(&self, variant: &str, limit: usize) -> AuthorityResult<Vec<AuthorityDoc>>;

    /// Pick up a rebuilt authority index, if the backend supports it
    fn reopen_if_updated(&self) -> AuthorityResult<()> {
        Ok(())
    }
}

/// Field names within authority records, per deployment configuration
#[derive(Debug, Clone)]
pub struct AuthorityFields {
    pub preferred_field: String,
    pub use_instead_field: String,
    pub see_also_field: String,
    pub note_field: String,
    pub max_redirects: usize,
}

impl Default for AuthorityFields {
    fn default() -> Self {
        Self {
            preferred_field: "preferred".to_string(),
            use_instead_field: "use_instead".to_string(),
            see_also_field: "see_also".to_string(),
            note_field: "note".to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Cross-reference sets for one heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossRefs {
    pub see_also: Vec<String>,
    pub use_instead: Vec<String>,
    pub note: String,
}

/// Resolves headings against the authority index
pub struct AuthorityResolver {
    index: Arc<dyn AuthorityIndex>,
    fields: AuthorityFields,
}

impl AuthorityResolver {
    pub fn new(index: Arc<dyn AuthorityIndex>, fields: AuthorityFields) -> Self {
        Self { index, fields }
    }

    /// Forward a reload signal to the backing index.
    pub fn reopen_if_updated(&self) -> AuthorityResult<()> {
        self.index.reopen_if_updated()
    }

    /// Resolve cross-references for `heading`.
    ///
    /// Preferred-term hit: see-also values and scope note, taken directly.
    /// Otherwise the heading is treated as a variant and `use_instead`
    /// collects the preferred forms it redirects to. Either way, references
    /// whose bibliographic record count is zero are dropped so dead
    /// cross-references are never surfaced.
    pub fn resolve(
        &self,
        heading: &str,
        bib: &dyn BibliographicIndex,
    ) -> AuthorityResult<CrossRefs> {
        let mut refs = CrossRefs::default();

        if let Some(doc) = self.index.preferred_record(heading)? {
            for value in doc.values(&self.fields.see_also_field) {
                if bib.record_count(value)? > 0 {
                    refs.see_also.push(value.clone());
                }
            }
            for value in doc.values(&self.fields.note_field) {
                refs.note = value.clone();
            }
        } else {
            for doc in self
                .index
                .redirect_targets(heading, self.fields.max_redirects)?
            {
                for value in doc.values(&self.fields.preferred_field) {
                    if bib.record_count(value)? > 0 {
                        refs.use_instead.push(value.clone());
                    }
                }
            }
        }

        Ok(refs)
    }
}
