// Around advice: owns the call boundary and re-raises failures under a generic kind
use async_trait::async_trait;

use crate::aspect::error::AspectError;
use crate::aspect::join_point::JoinPoint;
use crate::aspect::pipeline::Proceed;
use crate::aspect::pointcut::Pointcut;
use crate::aspect::traits::{Advice, AroundAdvice, Payload};

/// Wraps a single operation. Success values pass through untouched; any failure
/// is logged with its detail and replaced by `AspectError::WrappedInvocation`.
pub struct WrappingAroundLogger {
    pointcut: Pointcut,
}

impl WrappingAroundLogger {
    pub fn new(owner: &'static str, operation: &'static str) -> Self {
        Self { pointcut: Pointcut::operation(owner, operation) }
    }
}

impl Advice for WrappingAroundLogger {
    fn name(&self) -> &'static str {
        "WrappingAroundLogger"
    }

    fn pointcut(&self) -> Pointcut {
        self.pointcut.clone()
    }
}

#[async_trait]
impl AroundAdvice for WrappingAroundLogger {
    async fn around(&self, jp: &JoinPoint, proceed: Proceed<'_>) -> Result<Payload, AspectError> {
        tracing::info!(invocation = %jp.id(), "Inside around advice in Aspect!");

        match proceed.proceed().await {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::error!(
                    invocation = %jp.id(),
                    "Around advice encountered an exception, details {:?}",
                    error
                );
                Err(AspectError::WrappedInvocation {
                    owner: jp.target_name_or_default().to_string(),
                    operation: jp.operation_name().to_string(),
                    source: Box::new(error),
                })
            }
        }
    }
}
