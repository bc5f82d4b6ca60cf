use contracts::dashboards::d403_order_completion::{CompletionPartition, CompletionSummary};
use contracts::domain::OrderRecord;

use crate::shared::normalize::{is_complete, or_zero, to_lakh};

/// Splits order lines into "complete" and everything else.
///
/// Anything that is not exactly "complete" (ignoring case) lands in the
/// incomplete partition, blank and "cancelled" statuses included. Pending
/// dispatch is narrower on purpose: see `calculate_pending_dispatch`.
pub fn prepare_order_completion_status(orders: &[OrderRecord]) -> CompletionSummary {
    let (completed, incomplete): (Vec<OrderRecord>, Vec<OrderRecord>) =
        orders.iter().cloned().partition(|o| is_complete(&o.status));

    CompletionSummary {
        completed: into_partition(completed),
        incomplete: into_partition(incomplete),
    }
}

fn into_partition(orders: Vec<OrderRecord>) -> CompletionPartition {
    let value: f64 = orders.iter().map(|o| or_zero(o.value)).sum();
    CompletionPartition {
        value_lakh: to_lakh(value),
        count: orders.len(),
        orders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d403_order_completion::CompletionStatus;
    use proptest::prelude::*;

    fn order(status: &str, value: Option<f64>) -> OrderRecord {
        OrderRecord {
            status: status.into(),
            value,
            ..Default::default()
        }
    }

    #[test]
    fn test_partition_treats_unknown_as_incomplete() {
        let orders = vec![
            order("Complete", Some(300_000.0)),
            order("incomplete", Some(100_000.0)),
            order("cancelled", Some(100_000.0)),
            order("", None),
        ];

        let summary = prepare_order_completion_status(&orders);

        assert_eq!(summary.completed.count, 1);
        assert_eq!(summary.incomplete.count, 3);
        assert_eq!(summary.completed.value_lakh, 3.0);
        assert_eq!(summary.incomplete.value_lakh, 2.0);
        assert_eq!(summary.incomplete.orders[1].status, "cancelled");
        assert_eq!(
            summary.partition(CompletionStatus::Completed).orders[0].status,
            "Complete"
        );
    }

    #[test]
    fn test_pie() {
        let summary = prepare_order_completion_status(&[order("complete", Some(100_000.0))]);
        let pie = summary.pie();
        assert_eq!(pie.labels, vec!["Completed", "Incomplete"]);
        assert_eq!(pie.values, vec![1.0, 0.0]);
        assert_eq!(pie.counts, vec![1, 0]);
    }

    #[test]
    fn test_empty() {
        let summary = prepare_order_completion_status(&[]);
        assert_eq!(summary.total_count(), 0);
        assert_eq!(summary.completed.value_lakh, 0.0);
    }

    fn status() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("complete".to_string()),
            Just("Complete".to_string()),
            Just("incomplete".to_string()),
            Just(String::new()),
            "[a-zA-Z ]{0,12}",
        ]
    }

    proptest! {
        #[test]
        fn prop_partition_covers_every_line(
            lines in prop::collection::vec((status(), prop::option::of(0.0f64..1e7)), 0..40)
        ) {
            let orders: Vec<OrderRecord> = lines
                .into_iter()
                .map(|(s, v)| order(&s, v))
                .collect();

            let summary = prepare_order_completion_status(&orders);

            prop_assert_eq!(summary.completed.count + summary.incomplete.count, orders.len());
            prop_assert_eq!(summary.completed.orders.len(), summary.completed.count);
            prop_assert!(summary.completed.orders.iter().all(|o| is_complete(&o.status)));
            prop_assert!(summary.incomplete.orders.iter().all(|o| !is_complete(&o.status)));
        }
    }
}
