use thiserror::Error;

use stockalloc_core::{DomainError, Sku};

pub type AllocationResult<T> = Result<T, AllocationError>;

/// Failures surfaced by the allocation service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// No batch in the given snapshot can take the line. Definitive for that
    /// snapshot: retrying only makes sense with fresh batch data.
    #[error("out of stock for sku {sku}")]
    OutOfStock { sku: Sku },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AllocationError {
    pub fn out_of_stock(sku: Sku) -> Self {
        Self::OutOfStock { sku }
    }

    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, Self::OutOfStock { .. })
    }
}
