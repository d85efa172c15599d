//! Generation lifecycle and hot swap
//!
//! Each snapshot path is owned by one `VersionedIndex`:
//! `Unloaded → Open → (StaleDetected → Swapping → Open)*`. The only shared
//! mutable state on the online path is the generation pointer; readers
//! clone an `Arc<Generation>` under a read lock and keep their generation
//! alive for the whole query, so a swap never yields a mixed view and old
//! generations are freed when the last reader drops them.
//!
//! `IndexRegistry` is the process-owned registry of open handles, injected
//! wherever browsers are assembled.

mod errors;
mod registry;
mod versioned;

pub use errors::{VersionError, VersionResult};
pub use registry::IndexRegistry;
pub use versioned::VersionedIndex;
