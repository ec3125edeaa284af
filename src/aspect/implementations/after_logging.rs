// After advices: unconditional completion, normal return, and failure
use async_trait::async_trait;

use crate::aspect::error::{AdviceError, OperationError};
use crate::aspect::join_point::JoinPoint;
use crate::aspect::pointcut::Pointcut;
use crate::aspect::traits::{Advice, AfterAdvice, AfterReturningAdvice, AfterThrowingAdvice};

/// Logs completion of every operation of one controller, whatever the outcome
pub struct ControllerAfterLogger {
    pointcut: Pointcut,
}

impl ControllerAfterLogger {
    pub fn new(owner: &'static str) -> Self {
        Self { pointcut: Pointcut::owner(owner) }
    }
}

impl Advice for ControllerAfterLogger {
    fn name(&self) -> &'static str {
        "ControllerAfterLogger"
    }

    fn pointcut(&self) -> Pointcut {
        self.pointcut.clone()
    }
}

#[async_trait]
impl AfterAdvice for ControllerAfterLogger {
    async fn after(&self, jp: &JoinPoint) -> Result<(), AdviceError> {
        tracing::info!(
            invocation = %jp.id(),
            "Controller class {} Method {} executed with arguments {}",
            jp.target_name_or_default(),
            jp.operation_name(),
            jp.args_display()
        );
        Ok(())
    }
}

/// Logs normal return of a single operation
pub struct OperationReturningLogger {
    pointcut: Pointcut,
}

impl OperationReturningLogger {
    pub fn new(owner: &'static str, operation: &'static str) -> Self {
        Self { pointcut: Pointcut::operation(owner, operation) }
    }
}

impl Advice for OperationReturningLogger {
    fn name(&self) -> &'static str {
        "OperationReturningLogger"
    }

    fn pointcut(&self) -> Pointcut {
        self.pointcut.clone()
    }
}

#[async_trait]
impl AfterReturningAdvice for OperationReturningLogger {
    async fn after_returning(&self, jp: &JoinPoint) -> Result<(), AdviceError> {
        tracing::info!(
            invocation = %jp.id(),
            "Controller class {} Method {} executed with arguments {} successfully",
            jp.target_name_or_default(),
            jp.operation_name(),
            jp.args_display()
        );
        Ok(())
    }
}

/// Logs the failure message of a single operation. Propagation is untouched.
pub struct OperationThrowingLogger {
    pointcut: Pointcut,
}

impl OperationThrowingLogger {
    pub fn new(owner: &'static str, operation: &'static str) -> Self {
        Self { pointcut: Pointcut::operation(owner, operation) }
    }
}

impl Advice for OperationThrowingLogger {
    fn name(&self) -> &'static str {
        "OperationThrowingLogger"
    }

    fn pointcut(&self) -> Pointcut {
        self.pointcut.clone()
    }
}

#[async_trait]
impl AfterThrowingAdvice for OperationThrowingLogger {
    async fn after_throwing(&self, jp: &JoinPoint, error: &OperationError) -> Result<(), AdviceError> {
        tracing::info!(
            invocation = %jp.id(),
            "Controller class {} Method {} with arguments {} encountered an exception {}",
            jp.target_name_or_default(),
            jp.operation_name(),
            jp.args_display(),
            error
        );
        Ok(())
    }
}
