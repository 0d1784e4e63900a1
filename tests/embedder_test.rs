//! Integration tests for the embedding client's retry and batch fallback
//! behavior, exercised against a scripted mock transport.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use spckit::{ApiError, Embedder, EmbeddingApi, EmbeddingConfig, EmbeddingError, TaskType};

/// Deterministic per-text vector so positional correspondence can be asserted.
fn vector_for(text: &str) -> Vec<f32> {
    let first_byte = text.as_bytes().first().copied().unwrap_or(0);
    vec![text.len() as f32, f32::from(first_byte)]
}

#[derive(Clone, Copy, Debug)]
enum BatchMode {
    /// Nested list of vectors, one per input
    Nested,
    /// `{"embeddings": [{"values": ...}, ...]}`
    Keyed,
    /// One flat vector regardless of chunk size (silent degradation)
    Flat,
    /// Unrecognizable payload
    Garbage,
    /// Transport failure on every batch call
    TransportError,
}

#[derive(Clone, Copy)]
enum SingleMode {
    /// Always succeed
    Ok,
    /// Fail with a transient error N times, then succeed
    FailThenOk(u32),
    /// Fail with a transient error on every call
    AlwaysFail,
    /// Fail with a permanent (non-retryable) error
    PermanentFail,
}

struct MockEmbeddingApi {
    batch_mode: BatchMode,
    single_mode: SingleMode,
    single_calls: AtomicU32,
    batch_calls: AtomicU32,
}

impl MockEmbeddingApi {
    fn new(batch_mode: BatchMode, single_mode: SingleMode) -> Self {
        Self {
            batch_mode,
            single_mode,
            single_calls: AtomicU32::new(0),
            batch_calls: AtomicU32::new(0),
        }
    }

    fn single_calls(&self) -> u32 {
        self.single_calls.load(Ordering::SeqCst)
    }

    fn batch_calls(&self) -> u32 {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingApi for MockEmbeddingApi {
    async fn embed_content(&self, text: &str, _task: TaskType) -> Result<Vec<f32>, ApiError> {
        let call = self.single_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.single_mode {
            SingleMode::Ok => Ok(vector_for(text)),
            SingleMode::FailThenOk(failures) => {
                if call <= failures {
                    Err(ApiError::ServerError("transient".to_string()))
                } else {
                    Ok(vector_for(text))
                }
            }
            SingleMode::AlwaysFail => Err(ApiError::ServerError("persistent".to_string())),
            SingleMode::PermanentFail => {
                Err(ApiError::AuthenticationFailed("bad key".to_string()))
            }
        }
    }

    async fn batch_embed_contents(
        &self,
        texts: &[String],
        _task: TaskType,
    ) -> Result<Value, ApiError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        match self.batch_mode {
            BatchMode::Nested => Ok(json!(texts
                .iter()
                .map(|text| vector_for(text))
                .collect::<Vec<_>>())),
            BatchMode::Keyed => Ok(json!({
                "embeddings": texts
                    .iter()
                    .map(|text| json!({"values": vector_for(text)}))
                    .collect::<Vec<_>>()
            })),
            BatchMode::Flat => Ok(json!(vector_for(&texts[0]))),
            BatchMode::Garbage => Ok(json!({"error": {"message": "unexpected"}})),
            BatchMode::TransportError => Err(ApiError::ServerError("batch down".to_string())),
        }
    }
}

fn test_config(batch_size: usize, max_retries: u32) -> EmbeddingConfig {
    EmbeddingConfig {
        batch_size,
        max_retries,
        retry_delay_ms: 1,
        batch_pause_ms: 1,
        ..EmbeddingConfig::default()
    }
}

fn texts(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn embedder(api: &Arc<MockEmbeddingApi>, config: EmbeddingConfig) -> Embedder {
    Embedder::new(Arc::clone(api) as Arc<dyn EmbeddingApi>, config)
}

#[tokio::test]
async fn test_batch_nested_success_preserves_order() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Nested, SingleMode::Ok));
    let embedder = embedder(&api, test_config(2, 3));

    let inputs = texts(&["cpu", "gpu", "memory", "psu", "case"]);
    let vectors = embedder
        .embed_batch(&inputs, TaskType::RetrievalDocument)
        .await
        .unwrap();

    assert_eq!(vectors.len(), inputs.len());
    for (text, vector) in inputs.iter().zip(&vectors) {
        assert_eq!(vector, &vector_for(text));
    }
    // Three chunks of [2, 2, 1], all served by the batch path
    assert_eq!(api.batch_calls(), 3);
    assert_eq!(api.single_calls(), 0);
}

#[tokio::test]
async fn test_batch_keyed_success_preserves_order() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Keyed, SingleMode::Ok));
    let embedder = embedder(&api, test_config(3, 3));

    let inputs = texts(&["a", "bb", "ccc", "dddd"]);
    let vectors = embedder
        .embed_batch(&inputs, TaskType::RetrievalDocument)
        .await
        .unwrap();

    assert_eq!(vectors.len(), 4);
    for (text, vector) in inputs.iter().zip(&vectors) {
        assert_eq!(vector, &vector_for(text));
    }
    assert_eq!(api.single_calls(), 0);
}

#[tokio::test]
async fn test_flat_response_for_multi_text_chunk_falls_back() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Flat, SingleMode::Ok));
    let embedder = embedder(&api, test_config(3, 3));

    let inputs = texts(&["ssd", "cooler", "fan"]);
    let vectors = embedder
        .embed_batch(&inputs, TaskType::RetrievalDocument)
        .await
        .unwrap();

    // The degraded batch answer must not be reused across inputs
    assert_eq!(vectors.len(), 3);
    for (text, vector) in inputs.iter().zip(&vectors) {
        assert_eq!(vector, &vector_for(text));
    }
    assert_eq!(api.batch_calls(), 1);
    assert_eq!(api.single_calls(), 3);
}

#[tokio::test]
async fn test_flat_response_for_single_text_chunk_is_accepted() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Flat, SingleMode::Ok));
    let embedder = embedder(&api, test_config(10, 3));

    let inputs = texts(&["lone text"]);
    let vectors = embedder
        .embed_batch(&inputs, TaskType::RetrievalQuery)
        .await
        .unwrap();

    assert_eq!(vectors, vec![vector_for("lone text")]);
    assert_eq!(api.batch_calls(), 1);
    assert_eq!(api.single_calls(), 0);
}

#[tokio::test]
async fn test_garbage_response_falls_back() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Garbage, SingleMode::Ok));
    let embedder = embedder(&api, test_config(2, 3));

    let inputs = texts(&["x", "y"]);
    let vectors = embedder
        .embed_batch(&inputs, TaskType::RetrievalDocument)
        .await
        .unwrap();

    assert_eq!(vectors.len(), 2);
    assert_eq!(api.single_calls(), 2);
}

#[tokio::test]
async fn test_batch_transport_error_falls_back_without_batch_retry() {
    let api = Arc::new(MockEmbeddingApi::new(
        BatchMode::TransportError,
        SingleMode::Ok,
    ));
    let embedder = embedder(&api, test_config(4, 3));

    let inputs = texts(&["one", "two", "three"]);
    let vectors = embedder
        .embed_batch(&inputs, TaskType::RetrievalDocument)
        .await
        .unwrap();

    assert_eq!(vectors.len(), 3);
    // The batch call is never retried; fallback goes straight to per-item
    assert_eq!(api.batch_calls(), 1);
    assert_eq!(api.single_calls(), 3);
}

#[tokio::test]
async fn test_individual_failure_during_fallback_propagates() {
    let api = Arc::new(MockEmbeddingApi::new(
        BatchMode::Garbage,
        SingleMode::AlwaysFail,
    ));
    let embedder = embedder(&api, test_config(2, 2));

    let inputs = texts(&["a", "b"]);
    let result = embedder.embed_batch(&inputs, TaskType::RetrievalDocument).await;

    assert!(matches!(
        result,
        Err(EmbeddingError::RetriesExhausted { .. })
    ));
    // The first text exhausted its budget; the second was never attempted
    assert_eq!(api.single_calls(), 2);
}

#[tokio::test]
async fn test_empty_batch_makes_no_calls() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Nested, SingleMode::Ok));
    let embedder = embedder(&api, test_config(2, 3));

    let vectors = embedder
        .embed_batch(&[], TaskType::RetrievalDocument)
        .await
        .unwrap();

    assert!(vectors.is_empty());
    assert_eq!(api.batch_calls(), 0);
    assert_eq!(api.single_calls(), 0);
}

#[tokio::test]
async fn test_embed_text_retries_exactly_max_retries_then_fails() {
    let api = Arc::new(MockEmbeddingApi::new(
        BatchMode::Nested,
        SingleMode::AlwaysFail,
    ));
    let embedder = embedder(&api, test_config(2, 3));

    let result = embedder
        .embed_text("persistent failure case", TaskType::RetrievalDocument)
        .await;

    match result {
        Err(EmbeddingError::RetriesExhausted {
            attempts,
            text_prefix,
            ..
        }) => {
            assert_eq!(attempts, 3);
            assert_eq!(text_prefix, "persistent failure case");
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(api.single_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retry_backoff_grows_linearly() {
    let api = Arc::new(MockEmbeddingApi::new(
        BatchMode::Nested,
        SingleMode::AlwaysFail,
    ));
    let config = EmbeddingConfig {
        max_retries: 3,
        retry_delay_ms: 100,
        ..EmbeddingConfig::default()
    };
    let embedder = Embedder::new(Arc::clone(&api) as Arc<dyn EmbeddingApi>, config);

    let start = tokio::time::Instant::now();
    let result = embedder
        .embed_text("slow text", TaskType::RetrievalDocument)
        .await;

    assert!(matches!(
        result,
        Err(EmbeddingError::RetriesExhausted { .. })
    ));
    // Waits of 100ms and then 200ms separate the three attempts, with no
    // wait after the final one. A constant-delay regression would spend
    // 200ms here instead.
    assert_eq!(start.elapsed(), Duration::from_millis(300));
    assert_eq!(api.single_calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_batch_pauses_only_between_chunks() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Nested, SingleMode::Ok));
    let config = EmbeddingConfig {
        batch_size: 2,
        batch_pause_ms: 250,
        ..EmbeddingConfig::default()
    };
    let embedder = Embedder::new(Arc::clone(&api) as Arc<dyn EmbeddingApi>, config);

    let inputs = texts(&["a", "b", "c", "d", "e"]);
    let start = tokio::time::Instant::now();
    embedder
        .embed_batch(&inputs, TaskType::RetrievalDocument)
        .await
        .unwrap();

    // Three chunks of [2, 2, 1]: two pauses, none after the final chunk
    assert_eq!(api.batch_calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_millis(500));

    // A single chunk never pauses at all
    let start = tokio::time::Instant::now();
    embedder
        .embed_batch(&texts(&["x", "y"]), TaskType::RetrievalDocument)
        .await
        .unwrap();
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_embed_text_recovers_after_transient_failures() {
    let api = Arc::new(MockEmbeddingApi::new(
        BatchMode::Nested,
        SingleMode::FailThenOk(2),
    ));
    let embedder = embedder(&api, test_config(2, 3));

    let vector = embedder
        .embed_text("flaky", TaskType::RetrievalQuery)
        .await
        .unwrap();

    assert_eq!(vector, vector_for("flaky"));
    assert_eq!(api.single_calls(), 3);
}

#[tokio::test]
async fn test_embed_text_permanent_error_fails_fast() {
    let api = Arc::new(MockEmbeddingApi::new(
        BatchMode::Nested,
        SingleMode::PermanentFail,
    ));
    let embedder = embedder(&api, test_config(2, 5));

    let result = embedder.embed_text("nope", TaskType::RetrievalDocument).await;

    assert!(matches!(result, Err(EmbeddingError::Api(_))));
    // Permanent errors never burn the retry budget
    assert_eq!(api.single_calls(), 1);
}

#[tokio::test]
async fn test_embed_query_and_document_use_single_path() {
    let api = Arc::new(MockEmbeddingApi::new(BatchMode::Nested, SingleMode::Ok));
    let embedder = embedder(&api, test_config(2, 3));

    let query_vector = embedder.embed_query("budget build").await.unwrap();
    let document_vector = embedder.embed_document("RTX 4070 spec sheet").await.unwrap();

    assert_eq!(query_vector, vector_for("budget build"));
    assert_eq!(document_vector, vector_for("RTX 4070 spec sheet"));
    assert_eq!(api.single_calls(), 2);
    assert_eq!(api.batch_calls(), 0);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn text_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9 ]{1,40}").expect("valid regex")
    }

    fn batch_mode_strategy() -> impl Strategy<Value = BatchMode> {
        prop_oneof![
            Just(BatchMode::Nested),
            Just(BatchMode::Keyed),
            Just(BatchMode::Flat),
            Just(BatchMode::Garbage),
            Just(BatchMode::TransportError),
        ]
    }

    proptest! {
        /// Output length equals input length and position i maps to input i,
        /// regardless of which strategy served each chunk.
        #[test]
        fn proptest_batch_order_preserved(
            inputs in prop::collection::vec(text_strategy(), 1..20),
            batch_size in 1usize..6,
            batch_mode in batch_mode_strategy(),
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let api = Arc::new(MockEmbeddingApi::new(batch_mode, SingleMode::Ok));
                let embedder = Embedder::new(
                    Arc::clone(&api) as Arc<dyn EmbeddingApi>,
                    test_config(batch_size, 3),
                );

                let vectors = embedder
                    .embed_batch(&inputs, TaskType::RetrievalDocument)
                    .await
                    .expect("embedding should succeed");

                prop_assert_eq!(vectors.len(), inputs.len());
                for (text, vector) in inputs.iter().zip(&vectors) {
                    prop_assert_eq!(vector, &vector_for(text));
                }
                Ok(()) as Result<(), proptest::test_runner::TestCaseError>
            })?;
        }
    }
}
