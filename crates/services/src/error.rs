//! Shared error types for the services crate.

use thiserror::Error;

use case_core::model::CatalogError;

/// Errors emitted while building a session.
///
/// Once a session exists there are no fatal conditions: storage problems
/// degrade inside the progress store and disallowed operations are no-ops.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
