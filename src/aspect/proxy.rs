use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::aspect::error::{AspectError, OperationError};
use crate::aspect::join_point::JoinPoint;
use crate::aspect::pipeline::AspectPipeline;
use crate::aspect::registry::Component;

/// Invocation boundary around a component. Callers go through the proxy;
/// the component's own methods stay unaware of the advices.
pub struct Proxy<C: Component> {
    target: Arc<C>,
    pipeline: Arc<AspectPipeline>,
}

impl<C: Component> Clone for Proxy<C> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<C: Component> Proxy<C> {
    pub fn new(target: Arc<C>, pipeline: Arc<AspectPipeline>) -> Self {
        Self { target, pipeline }
    }

    /// Build the join point for `operation` and run `call` through the woven advices
    pub async fn call<T, F, Fut>(&self, operation: &'static str, args: Vec<Value>, call: F) -> Result<T, AspectError>
    where
        T: Send + 'static,
        F: FnOnce(Arc<C>) -> Fut,
        Fut: Future<Output = Result<T, OperationError>> + Send,
    {
        let target: Arc<dyn Component> = self.target.clone();
        let jp = JoinPoint::new(target, operation, args);
        self.pipeline.invoke(jp, call(self.target.clone())).await
    }
}
