use futures::future::join_all;
use tracing::debug;

use crate::models::{Analysis, Product};
use crate::scoring::Scorer;

/// Maximum number of analyses in flight at once.
pub const BATCH_SIZE: usize = 5;

/// Scores `products` in groups of `batch_size`: every product in a group is scored
/// concurrently, and the next group starts only once the whole group has settled.
/// Results come back in input order, one per product.
pub async fn analyze_in_batches(
    scorer: &dyn Scorer,
    products: &[&Product],
    batch_size: usize,
) -> Vec<Analysis> {
    let batch_size = batch_size.max(1);
    let mut analyses = Vec::with_capacity(products.len());

    for (index, batch) in products.chunks(batch_size).enumerate() {
        debug!(
            batch = index + 1,
            size = batch.len(),
            backend = %scorer.backend(),
            "Scoring product batch"
        );
        let results = join_all(batch.iter().map(|product| scorer.score(product))).await;
        analyses.extend(results);
    }

    analyses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ScorerBackend};
    use crate::scoring::RuleScorer;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Event {
        Start,
        End,
    }

    /// Records start/end of every call; yields once so that calls in a group overlap.
    /// Odd ids play the part of a failed call and come back degraded.
    struct RecordingScorer {
        events: Mutex<Vec<Event>>,
    }

    #[async_trait]
    impl Scorer for RecordingScorer {
        async fn score(&self, product: &Product) -> Analysis {
            self.events.lock().unwrap().push(Event::Start);
            tokio::task::yield_now().await;
            self.events.lock().unwrap().push(Event::End);

            let (text, confidence) = if product.id % 2 == 1 {
                ("degraded", 0.5)
            } else {
                ("ok", 0.9)
            };
            Analysis::for_product(product, text.to_string(), confidence, ScorerBackend::Llm)
        }

        fn backend(&self) -> ScorerBackend {
            ScorerBackend::Llm
        }
    }

    fn products(count: u32) -> Vec<Product> {
        (1..=count)
            .map(|id| Product::new(id, "P", Category::Software, Decimal::from(100 * id)))
            .collect()
    }

    /// Splits the event log into groups of overlapping calls.
    fn group_sizes(events: &[Event]) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut in_flight = 0usize;
        let mut started = 0usize;
        for event in events {
            match event {
                Event::Start => {
                    in_flight += 1;
                    started += 1;
                }
                Event::End => {
                    assert!(in_flight > 0);
                    in_flight -= 1;
                    if in_flight == 0 {
                        sizes.push(started);
                        started = 0;
                    }
                }
            }
        }
        sizes
    }

    #[tokio::test]
    async fn test_twelve_products_run_as_five_five_two() {
        let scorer = RecordingScorer {
            events: Mutex::new(Vec::new()),
        };
        let catalog = products(12);
        let refs: Vec<&Product> = catalog.iter().collect();

        let analyses = analyze_in_batches(&scorer, &refs, BATCH_SIZE).await;

        assert_eq!(analyses.len(), 12);
        let ids: Vec<u32> = analyses.iter().map(|a| a.product_id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
        assert_eq!(analyses.iter().filter(|a| a.confidence_score == 0.5).count(), 6);

        let events = scorer.events.lock().unwrap();
        assert_eq!(group_sizes(&events), vec![5, 5, 2]);
    }

    #[tokio::test]
    async fn test_group_never_exceeds_batch_size() {
        let scorer = RecordingScorer {
            events: Mutex::new(Vec::new()),
        };
        let catalog = products(7);
        let refs: Vec<&Product> = catalog.iter().collect();

        analyze_in_batches(&scorer, &refs, 3).await;

        let events = scorer.events.lock().unwrap();
        assert_eq!(group_sizes(&events), vec![3, 3, 1]);
    }

    #[tokio::test]
    async fn test_empty_input_and_zero_batch_size() {
        let empty = analyze_in_batches(&RuleScorer, &[], BATCH_SIZE).await;
        assert!(empty.is_empty());

        let catalog = products(2);
        let refs: Vec<&Product> = catalog.iter().collect();
        let analyses = analyze_in_batches(&RuleScorer, &refs, 0).await;
        assert_eq!(analyses.len(), 2);
    }
}
