use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use std::collections::HashSet;

use chrono::NaiveDate;

use stockalloc_core::{BatchReference, Entity, Sku};

use crate::order_line::OrderLine;

/// A purchased lot of one SKU, either on hand or arriving on its ETA.
///
/// Entity: identity is the [`BatchReference`] alone. The ETA may move and
/// lines come and go while the batch stays the same batch.
#[derive(Debug, Clone)]
pub struct Batch {
    reference: BatchReference,
    sku: Sku,
    eta: Option<NaiveDate>,
    purchased_quantity: u32,
    allocations: HashSet<OrderLine>,
}

impl Batch {
    /// A batch with no allocations. `eta: None` means the stock is on hand.
    pub fn new(
        reference: impl Into<BatchReference>,
        sku: impl Into<Sku>,
        purchased_quantity: u32,
        eta: Option<NaiveDate>,
    ) -> Self {
        Self {
            reference: reference.into(),
            sku: sku.into(),
            eta,
            purchased_quantity,
            allocations: HashSet::new(),
        }
    }

    pub fn reference(&self) -> &BatchReference {
        &self.reference
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn eta(&self) -> Option<NaiveDate> {
        self.eta
    }

    pub fn is_in_stock(&self) -> bool {
        self.eta.is_none()
    }

    pub fn purchased_quantity(&self) -> u32 {
        self.purchased_quantity
    }

    /// Lines currently allocated to this batch, in no particular order.
    pub fn allocations(&self) -> impl Iterator<Item = &OrderLine> {
        self.allocations.iter()
    }

    pub fn is_allocated(&self, line: &OrderLine) -> bool {
        self.allocations.contains(line)
    }

    pub fn allocated_quantity(&self) -> u32 {
        self.allocations.iter().map(OrderLine::quantity).sum()
    }

    pub fn available_quantity(&self) -> u32 {
        self.purchased_quantity - self.allocated_quantity()
    }

    pub fn can_allocate(&self, line: &OrderLine) -> bool {
        self.sku == *line.sku() && self.available_quantity() >= line.quantity()
    }

    /// Allocate `line` if it fits; otherwise leave the batch untouched.
    ///
    /// Allocating a line that is already allocated changes nothing.
    pub fn allocate(&mut self, line: &OrderLine) {
        if self.can_allocate(line) {
            self.allocations.insert(line.clone());
        }
        debug_assert!(self.allocated_quantity() <= self.purchased_quantity);
    }

    pub fn deallocate(&mut self, line: &OrderLine) {
        self.allocations.remove(line);
    }

    /// Move the expected arrival. `None` marks the stock as arrived.
    pub fn reschedule(&mut self, eta: Option<NaiveDate>) {
        self.eta = eta;
    }

    /// Allocation priority: on-hand stock first, then earliest ETA.
    ///
    /// Two on-hand batches compare equal. This is only a sort key and is kept
    /// apart from equality, which looks at the reference alone.
    pub fn priority_cmp(&self, other: &Batch) -> Ordering {
        match (self.eta, other.eta) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl Entity for Batch {
    type Id = BatchReference;

    fn id(&self) -> &Self::Id {
        &self.reference
    }
}

impl PartialEq for Batch {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Batch {}

impl Hash for Batch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl core::fmt::Display for Batch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Batch {}", self.reference)
    }
}
