//! Allocation domain service: picks the batch an order line goes to.

use stockalloc_core::BatchReference;

use crate::batch::Batch;
use crate::error::{AllocationError, AllocationResult};
use crate::order_line::OrderLine;

/// Allocate `line` to the highest-priority batch that can take it.
///
/// Batches are tried on-hand first, then by ascending ETA. Batches of equal
/// priority are tried in the order given; the caller's collection is never
/// reordered. Exactly one batch is mutated on success and none on failure.
///
/// Returns the reference of the batch that received the line, or
/// [`AllocationError::OutOfStock`] when no batch fits (including when
/// `batches` is empty).
pub fn allocate<'a, I>(line: &OrderLine, batches: I) -> AllocationResult<BatchReference>
where
    I: IntoIterator<Item = &'a mut Batch>,
{
    let mut candidates: Vec<&'a mut Batch> = batches.into_iter().collect();
    // Stable: equal-priority batches keep their relative order.
    candidates.sort_by(|a, b| a.priority_cmp(b));

    let Some(batch) = candidates.into_iter().find(|batch| batch.can_allocate(line)) else {
        tracing::info!(
            sku = %line.sku(),
            order_id = %line.order_id(),
            quantity = line.quantity(),
            "no batch can satisfy order line"
        );
        return Err(AllocationError::out_of_stock(line.sku().clone()));
    };

    batch.allocate(line);
    tracing::debug!(
        sku = %line.sku(),
        order_id = %line.order_id(),
        quantity = line.quantity(),
        batch = %batch.reference(),
        available = batch.available_quantity(),
        "order line allocated"
    );

    Ok(batch.reference().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use proptest::prelude::*;
    use stockalloc_core::Sku;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn line(sku: &str, qty: u32) -> OrderLine {
        OrderLine::new("order-1", sku, qty).unwrap()
    }

    #[test]
    fn empty_collection_is_out_of_stock() {
        let err = allocate(&line("CLOCK", 1), Vec::<&mut Batch>::new()).unwrap_err();
        assert_eq!(err, AllocationError::out_of_stock(Sku::from("CLOCK")));
        assert_eq!(err.to_string(), "out of stock for sku CLOCK");
    }

    #[test]
    fn sku_mismatch_is_out_of_stock_and_mutates_nothing() {
        let mut batches = vec![
            Batch::new("a", "TABLE", 100, None),
            Batch::new("b", "CHAIR", 100, Some(today())),
        ];

        let err = allocate(&line("CLOCK", 1), &mut batches).unwrap_err();

        assert!(err.is_out_of_stock());
        assert!(batches.iter().all(|b| b.available_quantity() == 100));
    }

    #[test]
    fn skips_higher_priority_batch_without_enough_stock() {
        let mut in_stock = Batch::new("in-stock", "CLOCK", 5, None);
        let mut shipment = Batch::new("shipment", "CLOCK", 100, Some(today()));

        let chosen = allocate(&line("CLOCK", 10), [&mut in_stock, &mut shipment]).unwrap();

        assert_eq!(chosen, "shipment");
        assert_eq!(in_stock.available_quantity(), 5);
        assert_eq!(shipment.available_quantity(), 90);
    }

    #[test]
    fn equal_priority_batches_are_tried_in_given_order() {
        let mut batches = vec![
            Batch::new("shipment", "CLOCK", 100, Some(today())),
            Batch::new("first-in-stock", "CLOCK", 100, None),
            Batch::new("second-in-stock", "CLOCK", 100, None),
        ];

        let chosen = allocate(&line("CLOCK", 10), &mut batches).unwrap();

        assert_eq!(chosen, "first-in-stock");
        let order: Vec<&str> = batches.iter().map(|b| b.reference().as_str()).collect();
        assert_eq!(order, ["shipment", "first-in-stock", "second-in-stock"]);
    }

    fn eta_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
        prop::option::of((0u64..30).prop_map(|d| today() + Days::new(d)))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the chosen batch is eligible, no eligible batch outranks
        /// it, and only the chosen batch changes.
        #[test]
        fn picks_highest_priority_eligible_batch(
            specs in prop::collection::vec((0u32..30, eta_strategy()), 0..8),
            qty in 1u32..20
        ) {
            let mut batches: Vec<Batch> = specs
                .iter()
                .enumerate()
                .map(|(i, (purchased, eta))| Batch::new(format!("batch-{i}"), "CLOCK", *purchased, *eta))
                .collect();
            let before = batches.clone();
            let order_line = line("CLOCK", qty);

            match allocate(&order_line, &mut batches) {
                Ok(reference) => {
                    let chosen = before.iter().find(|b| *b.reference() == reference).unwrap();
                    prop_assert!(chosen.can_allocate(&order_line));
                    for other in before.iter().filter(|b| b.can_allocate(&order_line)) {
                        prop_assert!(other.priority_cmp(chosen) != core::cmp::Ordering::Less);
                    }
                    for (old, new) in before.iter().zip(&batches) {
                        let expected = if *new.reference() == reference {
                            old.available_quantity() - qty
                        } else {
                            old.available_quantity()
                        };
                        prop_assert_eq!(new.available_quantity(), expected);
                    }
                }
                Err(err) => {
                    prop_assert!(err.is_out_of_stock());
                    prop_assert!(before.iter().all(|b| !b.can_allocate(&order_line)));
                    for (old, new) in before.iter().zip(&batches) {
                        prop_assert_eq!(new.available_quantity(), old.available_quantity());
                    }
                }
            }
        }
    }
}
