use std::sync::Arc;

use serde_json::Value;

use crate::action::{AsyncActionKinds, QueryNotification, QueryPage};
use crate::action_sender::{ActionSender, AnyActionSender};
use crate::debounce::DebounceChannel;
use crate::effect::Effect;
use crate::executor::{QueryContext, QueryError, QueryExecutor, QueryRequest};
use crate::sequencer::SeqNo;

/// Executes one sequenced query attempt. The sequence number is allocated
/// synchronously at construction and the `Requested` notification is emitted
/// before the remote call, so loading state updates ahead of any network
/// latency. Errors never escape: transport, missing-data, and decode
/// failures all surface as a `Failed` notification.
pub fn sequenced_query<P, F>(
    ctx: &QueryContext,
    kinds: AsyncActionKinds,
    request: QueryRequest,
    page: QueryPage,
    transform: F,
) -> Effect<QueryNotification<P>>
where
    P: Send + 'static,
    F: FnOnce(Value) -> Result<P, QueryError> + Send + 'static,
{
    let seq = ctx.sequencer.next();
    let executor = ctx.executor.clone();
    Effect::run(move |sender| async move {
        sender.send(kinds.requested(page, seq));
        attempt(executor, kinds, request, page, seq, transform, sender).await;
    })
}

/// Like `sequenced_query`, but the remote call waits out the debouncer's
/// quiescence window on the domain's channel. The `Requested` notification
/// still fires immediately, and the sequence number is pre-allocated before
/// the window opens and handed to the debouncer, so ordering reflects
/// invocation order even when the spawned jobs start out of order.
pub fn debounced_query<P, F>(
    ctx: &QueryContext,
    kinds: AsyncActionKinds,
    request: QueryRequest,
    page: QueryPage,
    transform: F,
) -> Effect<QueryNotification<P>>
where
    P: Send + 'static,
    F: FnOnce(Value) -> Result<P, QueryError> + Send + 'static,
{
    let seq = ctx.sequencer.next();
    let executor = ctx.executor.clone();
    let debouncer = ctx.debouncer.clone();
    Effect::run(move |sender| async move {
        sender.send(kinds.requested(page, seq));
        debouncer.debounce(
            DebounceChannel(kinds.domain),
            seq,
            attempt(executor, kinds, request, page, seq, transform, sender),
        );
    })
}

async fn attempt<P, F>(
    executor: Arc<dyn QueryExecutor>,
    kinds: AsyncActionKinds,
    request: QueryRequest,
    page: QueryPage,
    seq: SeqNo,
    transform: F,
    sender: AnyActionSender<QueryNotification<P>>,
) where
    P: Send + 'static,
    F: FnOnce(Value) -> Result<P, QueryError> + Send + 'static,
{
    match executor.execute(request).await.and_then(transform) {
        Ok(payload) => sender.send(kinds.succeeded(payload, page.page, seq)),
        Err(error) => {
            log::error!("{}: {error}", kinds.failure);
            sender.send(kinds.failed(error, seq));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::action::Domain;
    use crate::debounce::Debouncer;
    use crate::effect::EffectValue;
    use crate::executor::require_field;
    use crate::sequencer::RequestSequencer;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::time::Duration;

    const KINDS: AsyncActionKinds = AsyncActionKinds::of(Domain::Search);

    struct ScriptedExecutor {
        responses: Mutex<Vec<Result<Value, QueryError>>>,
        calls: Mutex<Vec<QueryRequest>>,
    }

    impl ScriptedExecutor {
        fn new(responses: Vec<Result<Value, QueryError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl QueryExecutor for ScriptedExecutor {
        async fn execute(&self, request: QueryRequest) -> Result<Value, QueryError> {
            self.calls.lock().push(request);
            self.responses.lock().remove(0)
        }
    }

    #[derive(Clone)]
    struct Collector(Arc<Mutex<Vec<QueryNotification<String>>>>);

    impl Collector {
        fn new() -> Self {
            Self(Arc::new(Mutex::new(Vec::new())))
        }

        fn sender(&self) -> AnyActionSender<QueryNotification<String>> {
            AnyActionSender::new(Box::new(self.clone()))
        }
    }

    impl ActionSender for Collector {
        type SendableAction = QueryNotification<String>;

        fn send(&self, action: QueryNotification<String>) {
            self.0.lock().push(action);
        }
    }

    fn context(executor: Arc<ScriptedExecutor>, window: Duration) -> QueryContext {
        QueryContext {
            executor,
            sequencer: Arc::new(RequestSequencer::new()),
            debouncer: Arc::new(Debouncer::with_window(window)),
        }
    }

    fn term_of(data: Value) -> Result<String, QueryError> {
        let search = require_field(&data, "Search", "search")?;
        Ok(search["term"].as_str().unwrap_or_default().to_owned())
    }

    async fn run(effect: Effect<QueryNotification<String>>, collector: &Collector) {
        match effect.value {
            EffectValue::Async(job) => job(collector.sender()).await,
            _ => panic!("loader effects are async"),
        }
    }

    #[tokio::test]
    async fn success_emits_requested_then_succeeded() {
        let executor = ScriptedExecutor::new(vec![Ok(json!({ "search": { "term": "hero" } }))]);
        let ctx = context(executor.clone(), Duration::ZERO);
        let collector = Collector::new();

        let effect = sequenced_query(
            &ctx,
            KINDS,
            QueryRequest::new("Search", json!({ "term": "hero" })),
            QueryPage::first(),
            term_of,
        );
        run(effect, &collector).await;

        let notes = collector.0.lock();
        assert_eq!(notes.len(), 2);
        match &notes[0] {
            QueryNotification::Requested {
                page,
                is_loading_more,
                ..
            } => {
                assert_eq!(*page, 1);
                assert!(!is_loading_more);
            }
            other => panic!("expected Requested, got {other:?}"),
        }
        match &notes[1] {
            QueryNotification::Succeeded { payload, page, seq } => {
                assert_eq!(payload, "hero");
                assert_eq!(*page, 1);
                assert_eq!(*seq, notes[0].seq());
            }
            other => panic!("expected Succeeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_top_level_field_fails_like_transport() {
        let executor = ScriptedExecutor::new(vec![Ok(json!({ "search": null }))]);
        let ctx = context(executor, Duration::ZERO);
        let collector = Collector::new();

        let effect = sequenced_query(
            &ctx,
            KINDS,
            QueryRequest::new("Search", json!({})),
            QueryPage::first(),
            term_of,
        );
        run(effect, &collector).await;

        let notes = collector.0.lock();
        assert!(notes[1].is_error());
        match &notes[1] {
            QueryNotification::Failed { error, .. } => {
                assert!(matches!(**error, QueryError::MissingData { field: "search", .. }));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_errors_become_failed_notifications() {
        let executor = ScriptedExecutor::new(vec![Err(QueryError::Transport {
            operation: "Search",
            source: anyhow::anyhow!("connection reset"),
        })]);
        let ctx = context(executor, Duration::ZERO);
        let collector = Collector::new();

        let effect = sequenced_query(
            &ctx,
            KINDS,
            QueryRequest::new("Search", json!({})),
            QueryPage::first(),
            term_of,
        );
        run(effect, &collector).await;

        let notes = collector.0.lock();
        assert_eq!(notes.len(), 2);
        assert!(notes[1].is_error());
    }

    #[tokio::test]
    async fn bypass_cache_reaches_the_executor() {
        let executor = ScriptedExecutor::new(vec![Ok(json!({ "search": { "term": "" } }))]);
        let ctx = context(executor.clone(), Duration::ZERO);
        let collector = Collector::new();

        let effect = sequenced_query(
            &ctx,
            KINDS,
            QueryRequest::new("Search", json!({})).bypass_cache(true),
            QueryPage::first(),
            term_of,
        );
        run(effect, &collector).await;

        assert!(executor.calls.lock()[0].bypass_cache);
    }

    #[tokio::test]
    async fn debounced_retypes_issue_one_call_with_final_parameters() {
        let executor = ScriptedExecutor::new(vec![Ok(json!({ "search": { "term": "heroes" } }))]);
        let ctx = context(executor.clone(), Duration::from_millis(40));
        let collector = Collector::new();

        for term in ["h", "he", "heroes"] {
            let effect = debounced_query(
                &ctx,
                KINDS,
                QueryRequest::new("Search", json!({ "term": term })),
                QueryPage::first(),
                term_of,
            );
            run(effect, &collector).await;
        }
        tokio::time::sleep(Duration::from_millis(150)).await;

        let calls = executor.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].variables["term"], "heroes");

        // Three Requested notifications fired eagerly, one Succeeded.
        let notes = collector.0.lock();
        let requested = notes
            .iter()
            .filter(|n| matches!(n, QueryNotification::Requested { .. }))
            .count();
        let succeeded = notes
            .iter()
            .filter(|n| matches!(n, QueryNotification::Succeeded { .. }))
            .count();
        assert_eq!(requested, 3);
        assert_eq!(succeeded, 1);
        // The winning completion carries the last-allocated sequence number.
        let max_seq = notes.iter().map(|n| n.seq()).max().unwrap();
        let success_seq = notes
            .iter()
            .find_map(|n| match n {
                QueryNotification::Succeeded { seq, .. } => Some(*seq),
                _ => None,
            })
            .unwrap();
        assert_eq!(success_seq, max_seq);
    }

    #[tokio::test]
    async fn a_job_starting_late_cannot_displace_a_newer_pending_call() {
        let executor = ScriptedExecutor::new(vec![Ok(json!({ "search": { "term": "new" } }))]);
        let ctx = context(executor.clone(), Duration::from_millis(40));
        let collector = Collector::new();

        let older = debounced_query(
            &ctx,
            KINDS,
            QueryRequest::new("Search", json!({ "term": "old" })),
            QueryPage::first(),
            term_of,
        );
        let newer = debounced_query(
            &ctx,
            KINDS,
            QueryRequest::new("Search", json!({ "term": "new" })),
            QueryPage::first(),
            term_of,
        );

        // The run loop spawns loader jobs without a first-poll order
        // guarantee; here the newer invocation's job runs first.
        run(newer, &collector).await;
        run(older, &collector).await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        let calls = executor.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].variables["term"], "new");

        let notes = collector.0.lock();
        let success_seq = notes
            .iter()
            .find_map(|n| match n {
                QueryNotification::Succeeded { seq, .. } => Some(*seq),
                _ => None,
            })
            .unwrap();
        assert_eq!(success_seq, notes.iter().map(|n| n.seq()).max().unwrap());
    }
}
