use crate::error::Result;
use async_trait::async_trait;

/// The data-access contract for alias-to-URL persistence.
///
/// Implementations must be safe for concurrent use without external
/// locking; uniqueness of the alias is enforced inside the backend
/// (never by a client-side check-then-insert), so concurrent saves of
/// the same alias must yield exactly one success.
#[async_trait]
pub trait UrlRepository: Send + Sync + 'static {
    /// Persists one alias-to-URL mapping and returns the backend-generated
    /// identifier, a strictly positive integer.
    ///
    /// Returns `Err(AliasExists)` if the alias is already taken. The
    /// operation is not idempotent: repeating it with the same arguments
    /// produces one success and then `AliasExists`, never a second row.
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64>;
}
