// Interception pipeline: advices are woven onto registry operations once at startup,
// then every invocation walks its precomputed chain.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::aspect::error::{AdviceError, AspectError, OperationError};
use crate::aspect::join_point::JoinPoint;
use crate::aspect::registry::{OperationRegistry, OperationSignature};
use crate::aspect::traits::{
    AdviceBox, AdviceKind, AfterAdvice, AfterReturningAdvice, AfterThrowingAdvice, AroundAdvice,
    BeforeAdvice, Payload,
};

/// Advices matched to one operation, grouped by kind in registration order
#[derive(Default)]
pub struct AdviceChain {
    before: Vec<Arc<dyn BeforeAdvice>>,
    around: Vec<Arc<dyn AroundAdvice>>,
    after_returning: Vec<Arc<dyn AfterReturningAdvice>>,
    after_throwing: Vec<Arc<dyn AfterThrowingAdvice>>,
    after: Vec<Arc<dyn AfterAdvice>>,
}

impl AdviceChain {
    fn push(&mut self, advice: &AdviceBox) {
        match advice {
            AdviceBox::Before(a) => self.before.push(a.clone()),
            AdviceBox::Around(a) => self.around.push(a.clone()),
            AdviceBox::AfterReturning(a) => self.after_returning.push(a.clone()),
            AdviceBox::AfterThrowing(a) => self.after_throwing.push(a.clone()),
            AdviceBox::After(a) => self.after.push(a.clone()),
        }
    }

    /// Names of the woven advices, in firing order
    pub fn describe(&self) -> Vec<(AdviceKind, &'static str)> {
        let mut out = Vec::new();
        out.extend(self.before.iter().map(|a| (AdviceKind::Before, a.name())));
        out.extend(self.around.iter().map(|a| (AdviceKind::Around, a.name())));
        out.extend(self.after_returning.iter().map(|a| (AdviceKind::AfterReturning, a.name())));
        out.extend(self.after_throwing.iter().map(|a| (AdviceKind::AfterThrowing, a.name())));
        out.extend(self.after.iter().map(|a| (AdviceKind::After, a.name())));
        out
    }

    /// Innermost step: run the operation, then the outcome-specific and unconditional after advices
    async fn run_target(
        &self,
        jp: &JoinPoint,
        target: BoxFuture<'_, Result<Payload, OperationError>>,
    ) -> Result<Payload, AspectError> {
        let outcome = target.await;
        let failure = outcome.as_ref().err().cloned();

        match failure {
            None => {
                for advice in &self.after_returning {
                    report_post_call(advice.name(), jp, advice.after_returning(jp).await);
                }
            }
            Some(error) => {
                for advice in &self.after_throwing {
                    report_post_call(advice.name(), jp, advice.after_throwing(jp, &error).await);
                }
            }
        }

        for advice in &self.after {
            report_post_call(advice.name(), jp, advice.after(jp).await);
        }

        outcome.map_err(AspectError::from)
    }
}

/// Post-call advice failures are logged and never change the operation outcome
fn report_post_call(name: &'static str, jp: &JoinPoint, result: Result<(), AdviceError>) {
    if let Err(e) = result {
        tracing::warn!(
            invocation = %jp.id(),
            "Advice {} failed after {}: {}",
            name,
            jp.signature(),
            e
        );
    }
}

/// One-shot handle an around advice uses to continue the chain.
/// Consumed by `proceed`, so the operation runs at most once.
pub struct Proceed<'a> {
    join_point: &'a JoinPoint,
    chain: &'a AdviceChain,
    remaining: &'a [Arc<dyn AroundAdvice>],
    target: BoxFuture<'a, Result<Payload, OperationError>>,
}

impl<'a> Proceed<'a> {
    pub fn join_point(&self) -> &JoinPoint {
        self.join_point
    }

    /// Run the next around advice, or the operation itself when none remain
    pub fn proceed(self) -> BoxFuture<'a, Result<Payload, AspectError>> {
        Box::pin(async move {
            let Proceed { join_point, chain, remaining, target } = self;
            match remaining.split_first() {
                Some((advice, rest)) => {
                    let next = Proceed {
                        join_point,
                        chain,
                        remaining: rest,
                        target,
                    };
                    advice.around(join_point, next).await
                }
                None => chain.run_target(join_point, target).await,
            }
        })
    }
}

/// Collects advices before weaving
#[derive(Default)]
pub struct AspectPipelineBuilder {
    advices: Vec<AdviceBox>,
}

impl AspectPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an advice; advices of the same kind fire in registration order
    pub fn register(mut self, advice: AdviceBox) -> Self {
        tracing::debug!(
            "Registered {:?} advice '{}' on {}",
            advice.kind(),
            advice.name(),
            advice.pointcut()
        );
        self.advices.push(advice);
        self
    }

    /// Weave every registered advice onto the matching registry operations
    pub fn build(self, registry: &OperationRegistry) -> AspectPipeline {
        let mut chains = HashMap::new();

        for operation in registry.iter() {
            let mut chain = AdviceChain::default();
            for advice in &self.advices {
                if advice.pointcut().matches(operation) {
                    chain.push(advice);
                }
            }

            tracing::info!(
                "Woven {} with advices {:?}",
                operation.signature,
                chain.describe()
            );
            chains.insert(operation.signature, chain);
        }

        AspectPipeline { chains }
    }
}

/// Immutable, shareable pipeline. Holds no per-call state.
pub struct AspectPipeline {
    chains: HashMap<OperationSignature, AdviceChain>,
}

impl AspectPipeline {
    pub fn builder() -> AspectPipelineBuilder {
        AspectPipelineBuilder::new()
    }

    pub fn chain_for(&self, signature: &OperationSignature) -> Option<&AdviceChain> {
        self.chains.get(signature)
    }

    /// Run `operation` through the advices woven for the join point's signature.
    /// Operations outside the registry run unintercepted.
    pub async fn invoke<'a, T, Fut>(&'a self, jp: JoinPoint, operation: Fut) -> Result<T, AspectError>
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, OperationError>> + Send + 'a,
    {
        let chain = match self.chains.get(jp.signature()) {
            Some(chain) => chain,
            None => {
                tracing::trace!("{} is not an interceptable operation", jp.signature());
                return operation.await.map_err(AspectError::from);
            }
        };

        for advice in &chain.before {
            if let Err(source) = advice.before(&jp).await {
                tracing::error!(
                    invocation = %jp.id(),
                    "Before advice {} failed for {}: {}",
                    advice.name(),
                    jp.signature(),
                    source
                );
                return Err(AspectError::AdviceFailed {
                    advice: advice.name(),
                    source,
                });
            }
        }

        let target: BoxFuture<'a, Result<Payload, OperationError>> =
            Box::pin(async move { operation.await.map(|value| Box::new(value) as Payload) });

        let proceed = Proceed {
            join_point: &jp,
            chain,
            remaining: &chain.around,
            target,
        };

        let payload = proceed.proceed().await?;
        payload
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| AspectError::ReturnTypeMismatch {
                expected: std::any::type_name::<T>(),
                found: "a value of another type",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::pointcut::Pointcut;
    use crate::aspect::registry::{Component, ComponentMarker};
    use crate::aspect::traits::Advice;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Ledger;

    impl Component for Ledger {
        fn component_name(&self) -> &'static str {
            "LedgerController"
        }

        fn markers(&self) -> &'static [ComponentMarker] {
            &[ComponentMarker::RestController]
        }

        fn operations(&self) -> &'static [&'static str] {
            &["post_entry", "list_entries"]
        }
    }

    type Events = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        label: &'static str,
        pointcut: Pointcut,
        events: Events,
    }

    impl Recorder {
        fn new(label: &'static str, pointcut: Pointcut, events: &Events) -> Arc<Self> {
            Arc::new(Self { label, pointcut, events: events.clone() })
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl Advice for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        fn pointcut(&self) -> Pointcut {
            self.pointcut.clone()
        }
    }

    #[async_trait]
    impl BeforeAdvice for Recorder {
        async fn before(&self, jp: &JoinPoint) -> Result<(), AdviceError> {
            self.push(format!("{}:{}", self.label, jp.operation_name()));
            Ok(())
        }
    }

    #[async_trait]
    impl AfterAdvice for Recorder {
        async fn after(&self, jp: &JoinPoint) -> Result<(), AdviceError> {
            self.push(format!("{}:{}", self.label, jp.operation_name()));
            Ok(())
        }
    }

    #[async_trait]
    impl AfterReturningAdvice for Recorder {
        async fn after_returning(&self, _jp: &JoinPoint) -> Result<(), AdviceError> {
            self.push(self.label.to_string());
            Ok(())
        }
    }

    #[async_trait]
    impl AfterThrowingAdvice for Recorder {
        async fn after_throwing(&self, _jp: &JoinPoint, error: &OperationError) -> Result<(), AdviceError> {
            self.push(format!("{}:{}", self.label, error));
            Ok(())
        }
    }

    #[async_trait]
    impl AroundAdvice for Recorder {
        async fn around(&self, jp: &JoinPoint, proceed: Proceed<'_>) -> Result<Payload, AspectError> {
            self.push(format!("{}:enter", self.label));
            let outcome = proceed.proceed().await;
            self.push(format!("{}:exit", self.label));
            outcome.map_err(|e| AspectError::WrappedInvocation {
                owner: jp.target_name_or_default().to_string(),
                operation: jp.operation_name().to_string(),
                source: Box::new(e),
            })
        }
    }

    fn registry() -> OperationRegistry {
        let mut registry = OperationRegistry::new();
        registry.register(&Ledger);
        registry
    }

    fn full_pipeline(events: &Events) -> AspectPipeline {
        let post_entry = Pointcut::operation("LedgerController", "post_entry");
        AspectPipeline::builder()
            .register(AdviceBox::Before(Recorder::new("before", Pointcut::owner("LedgerController"), events)))
            .register(AdviceBox::Before(Recorder::new(
                "before-rest",
                Pointcut::within(ComponentMarker::RestController),
                events,
            )))
            .register(AdviceBox::After(Recorder::new("after", Pointcut::owner("LedgerController"), events)))
            .register(AdviceBox::AfterReturning(Recorder::new("returning", post_entry.clone(), events)))
            .register(AdviceBox::AfterThrowing(Recorder::new("throwing", post_entry.clone(), events)))
            .register(AdviceBox::Around(Recorder::new("around", post_entry, events)))
            .build(&registry())
    }

    fn jp(operation: &'static str) -> JoinPoint {
        JoinPoint::new(Arc::new(Ledger), operation, vec![])
    }

    fn take(events: &Events) -> Vec<String> {
        std::mem::take(&mut *events.lock().unwrap())
    }

    #[tokio::test]
    async fn success_fires_every_matching_advice_in_order() {
        let events = Events::default();
        let pipeline = full_pipeline(&events);
        let calls = AtomicUsize::new(0);

        let value = pipeline
            .invoke(jp("post_entry"), async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, OperationError>(42u32)
            })
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            take(&events),
            vec![
                "before:post_entry",
                "before-rest:post_entry",
                "around:enter",
                "returning",
                "after:post_entry",
                "around:exit",
            ]
        );
    }

    #[tokio::test]
    async fn failure_is_wrapped_only_by_the_around_advice() {
        let events = Events::default();
        let pipeline = full_pipeline(&events);

        let err = pipeline
            .invoke(jp("post_entry"), async {
                Err::<u32, _>(OperationError::ValidationError("amount is required".into()))
            })
            .await
            .unwrap_err();

        assert!(err.is_wrapped());
        assert_eq!(
            err.root_operation_error(),
            Some(&OperationError::ValidationError("amount is required".into()))
        );
        assert_eq!(
            take(&events),
            vec![
                "before:post_entry",
                "before-rest:post_entry",
                "around:enter",
                "throwing:Validation error: amount is required",
                "after:post_entry",
                "around:exit",
            ]
        );
    }

    #[tokio::test]
    async fn unscoped_operations_keep_their_native_failure() {
        let events = Events::default();
        let pipeline = full_pipeline(&events);

        let err = pipeline
            .invoke(jp("list_entries"), async {
                Err::<Vec<u32>, _>(OperationError::DatabaseError("disk full".into()))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AspectError::Operation(OperationError::DatabaseError(_))));
        assert_eq!(
            take(&events),
            vec!["before:list_entries", "before-rest:list_entries", "after:list_entries"]
        );
    }

    #[tokio::test]
    async fn operations_outside_the_registry_run_unintercepted() {
        let events = Events::default();
        let pipeline = full_pipeline(&events);

        let value = pipeline
            .invoke(jp("close_ledger"), async { Ok::<_, OperationError>("closed") })
            .await
            .unwrap();

        assert_eq!(value, "closed");
        assert!(take(&events).is_empty());
    }

    struct FailingBefore;

    impl Advice for FailingBefore {
        fn name(&self) -> &'static str {
            "FailingBefore"
        }

        fn pointcut(&self) -> Pointcut {
            Pointcut::owner("LedgerController")
        }
    }

    #[async_trait]
    impl BeforeAdvice for FailingBefore {
        async fn before(&self, _jp: &JoinPoint) -> Result<(), AdviceError> {
            Err(AdviceError("sink unavailable".into()))
        }
    }

    #[tokio::test]
    async fn failing_before_advice_propagates_and_skips_the_operation() {
        let pipeline = AspectPipeline::builder()
            .register(AdviceBox::Before(Arc::new(FailingBefore)))
            .build(&registry());
        let calls = AtomicUsize::new(0);

        let err = pipeline
            .invoke(jp("list_entries"), async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, OperationError>(())
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AspectError::AdviceFailed { advice: "FailingBefore", .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    struct Substituting;

    impl Advice for Substituting {
        fn name(&self) -> &'static str {
            "Substituting"
        }

        fn pointcut(&self) -> Pointcut {
            Pointcut::operation("LedgerController", "post_entry")
        }
    }

    #[async_trait]
    impl AroundAdvice for Substituting {
        async fn around(&self, _jp: &JoinPoint, proceed: Proceed<'_>) -> Result<Payload, AspectError> {
            proceed.proceed().await?;
            Ok(Box::new("not a number") as Payload)
        }
    }

    #[tokio::test]
    async fn around_advice_must_return_the_operation_type() {
        let pipeline = AspectPipeline::builder()
            .register(AdviceBox::Around(Arc::new(Substituting)))
            .build(&registry());

        let err = pipeline
            .invoke(jp("post_entry"), async { Ok::<_, OperationError>(7u32) })
            .await
            .unwrap_err();

        assert!(matches!(err, AspectError::ReturnTypeMismatch { expected: "u32", .. }));
    }

    #[test]
    fn weaving_matches_by_owner_operation_and_marker() {
        let events = Events::default();
        let pipeline = full_pipeline(&events);

        let post = pipeline
            .chain_for(&OperationSignature::new("LedgerController", "post_entry"))
            .unwrap();
        assert_eq!(post.describe().len(), 6);

        let list = pipeline
            .chain_for(&OperationSignature::new("LedgerController", "list_entries"))
            .unwrap();
        assert_eq!(
            list.describe(),
            vec![
                (AdviceKind::Before, "before"),
                (AdviceKind::Before, "before-rest"),
                (AdviceKind::After, "after"),
            ]
        );
    }
}
