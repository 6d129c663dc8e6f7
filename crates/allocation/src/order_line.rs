use serde::{Deserialize, Serialize};

use stockalloc_core::{DomainError, DomainResult, OrderId, Sku, ValueObject};

/// A requested quantity of one SKU for one customer order.
///
/// Value object: two lines with the same order id, SKU and quantity are
/// interchangeable, and a line never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OrderLineRecord")]
pub struct OrderLine {
    order_id: OrderId,
    sku: Sku,
    quantity: u32,
}

impl OrderLine {
    /// Build a line, rejecting a zero quantity.
    pub fn new(
        order_id: impl Into<OrderId>,
        sku: impl Into<Sku>,
        quantity: u32,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(Self {
            order_id: order_id.into(),
            sku: sku.into(),
            quantity,
        })
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl ValueObject for OrderLine {}

#[derive(Deserialize)]
struct OrderLineRecord {
    order_id: OrderId,
    sku: Sku,
    quantity: u32,
}

impl TryFrom<OrderLineRecord> for OrderLine {
    type Error = DomainError;

    fn try_from(record: OrderLineRecord) -> Result<Self, Self::Error> {
        OrderLine::new(record.order_id, record.sku, record.quantity)
    }
}
