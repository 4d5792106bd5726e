//! In-memory data source for testing and development

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::ReconSource;
use crate::types::*;
use crate::utils::validation;

/// In-memory [`ReconSource`] implementation for testing and development
///
/// Collections keep insertion order, so commitments come back in creation
/// order the way the backing store lists them. Rows are validated on the
/// way in; see [`crate::utils::validation`].
#[derive(Debug, Clone)]
pub struct MemorySource {
    currencies: Arc<RwLock<Vec<Currency>>>,
    commitments: Arc<RwLock<Vec<Commitment>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self {
            currencies: Arc::new(RwLock::new(Vec::new())),
            commitments: Arc::new(RwLock::new(Vec::new())),
            payments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Add a currency after validating it
    pub fn add_currency(&self, currency: Currency) -> ReconResult<()> {
        validation::validate_currency(&currency)?;
        self.currencies.write().unwrap().push(currency);
        Ok(())
    }

    /// Add a commitment after validating it
    pub fn add_commitment(&self, commitment: Commitment) -> ReconResult<()> {
        validation::validate_commitment(&commitment)?;
        self.commitments.write().unwrap().push(commitment);
        Ok(())
    }

    /// Add a payment after validating it
    pub fn add_payment(&self, payment: Payment) -> ReconResult<()> {
        validation::validate_payment(&payment)?;
        self.payments.write().unwrap().push(payment);
        Ok(())
    }

    /// Clear all data (useful between tests)
    pub fn clear(&self) {
        self.currencies.write().unwrap().clear();
        self.commitments.write().unwrap().clear();
        self.payments.write().unwrap().clear();
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReconSource for MemorySource {
    async fn list_currencies(&self) -> ReconResult<Vec<Currency>> {
        Ok(self.currencies.read().unwrap().clone())
    }

    async fn list_commitments(&self) -> ReconResult<Vec<Commitment>> {
        Ok(self.commitments.read().unwrap().clone())
    }

    async fn list_payments(&self) -> ReconResult<Vec<Payment>> {
        Ok(self.payments.read().unwrap().clone())
    }
}
