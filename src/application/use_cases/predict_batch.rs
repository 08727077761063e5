use std::sync::Arc;

use tracing::info;

use crate::application::use_cases::ExtractCpvCodeUseCase;
use crate::domain::Prediction;

/// Runs the extractor over a batch of texts, strictly sequentially.
pub struct PredictBatchUseCase {
    extractor: Arc<ExtractCpvCodeUseCase>,
}

impl PredictBatchUseCase {
    pub fn new(extractor: Arc<ExtractCpvCodeUseCase>) -> Self {
        Self { extractor }
    }

    /// Predict a CPV code for every text, in input order.
    ///
    /// One remote round-trip (plus its internal retries) is in flight at a
    /// time. A failed item is recorded as `cpv_code: null` and never aborts
    /// the rest of the batch, so the output always has the same length and
    /// order as the input.
    pub async fn execute(&self, texts: Vec<String>, api_key: &str) -> Vec<Prediction> {
        info!("Predicting CPV codes for {} text(s)", texts.len());

        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            let cpv_code = self.extractor.execute(&text, api_key).await;
            results.push(Prediction { text, cpv_code });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::application::ChatClient;
    use crate::domain::ChatError;

    use super::*;

    /// Succeeds for every text except the ones it is told to fail on.
    struct SelectiveChat {
        fail_on: Vec<String>,
    }

    #[async_trait]
    impl ChatClient for SelectiveChat {
        async fn complete(
            &self,
            _api_key: &str,
            _system: &str,
            user: &str,
        ) -> Result<String, ChatError> {
            if self.fail_on.iter().any(|needle| user.contains(needle)) {
                return Err(ChatError::other("provider unavailable"));
            }
            Ok("77311".to_string())
        }
    }

    fn batch_use_case(fail_on: &[&str]) -> PredictBatchUseCase {
        let chat = Arc::new(SelectiveChat {
            fail_on: fail_on.iter().map(|s| s.to_string()).collect(),
        });
        PredictBatchUseCase::new(Arc::new(ExtractCpvCodeUseCase::new(chat)))
    }

    #[tokio::test]
    async fn results_preserve_input_order_and_cardinality() {
        let use_case = batch_use_case(&[]);

        let texts = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let results = use_case.execute(texts, "test-key").await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].text, "A");
        assert_eq!(results[1].text, "B");
        assert_eq!(results[2].text, "C");
        assert!(results.iter().all(|r| r.cpv_code.is_some()));
    }

    #[tokio::test]
    async fn one_failing_item_never_aborts_the_batch() {
        let use_case = batch_use_case(&["B"]);

        let texts = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let results = use_case.execute(texts, "test-key").await;

        assert_eq!(results.len(), 3);
        assert!(results[0].cpv_code.is_some());
        assert!(results[1].cpv_code.is_none());
        assert!(results[2].cpv_code.is_some());
    }

    #[tokio::test]
    async fn empty_batch_yields_empty_results() {
        let use_case = batch_use_case(&[]);

        let results = use_case.execute(Vec::new(), "test-key").await;

        assert!(results.is_empty());
    }
}
