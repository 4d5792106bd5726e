//! Traits for data-access abstraction

use async_trait::async_trait;

use crate::types::*;

/// Data-access abstraction for the reconciliation engine
///
/// This trait allows the reconciliation core to work with any backend
/// (PostgreSQL, a hosted API, in-memory fixtures, etc.) by implementing
/// these three snapshot queries. The engine never imports a backend client;
/// it only ever sees the materialized collections.
#[async_trait]
pub trait ReconSource: Send + Sync {
    /// List the currency reference data for the tenant
    async fn list_currencies(&self) -> ReconResult<Vec<Currency>>;

    /// List every commitment for the tenant, in creation order
    async fn list_commitments(&self) -> ReconResult<Vec<Commitment>>;

    /// List every payment for the tenant
    async fn list_payments(&self) -> ReconResult<Vec<Payment>>;
}
