// Before advices: log the call about to run
use async_trait::async_trait;

use crate::aspect::error::AdviceError;
use crate::aspect::join_point::JoinPoint;
use crate::aspect::pointcut::Pointcut;
use crate::aspect::registry::ComponentMarker;
use crate::aspect::traits::{Advice, BeforeAdvice};

/// Logs entry into every operation of one controller
pub struct ControllerBeforeLogger {
    pointcut: Pointcut,
}

impl ControllerBeforeLogger {
    pub fn new(owner: &'static str) -> Self {
        Self { pointcut: Pointcut::owner(owner) }
    }
}

impl Advice for ControllerBeforeLogger {
    fn name(&self) -> &'static str {
        "ControllerBeforeLogger"
    }

    fn pointcut(&self) -> Pointcut {
        self.pointcut.clone()
    }
}

#[async_trait]
impl BeforeAdvice for ControllerBeforeLogger {
    async fn before(&self, jp: &JoinPoint) -> Result<(), AdviceError> {
        tracing::info!(
            invocation = %jp.id(),
            "Controller class {} Method {} about to be executed with arguments {}",
            jp.target_name_or_default(),
            jp.operation_name(),
            jp.args_display()
        );
        Ok(())
    }
}

/// Logs entry into any operation of a REST-exposed component
#[derive(Default)]
pub struct RestControllerBeforeLogger;

impl Advice for RestControllerBeforeLogger {
    fn name(&self) -> &'static str {
        "RestControllerBeforeLogger"
    }

    fn pointcut(&self) -> Pointcut {
        Pointcut::within(ComponentMarker::RestController)
    }
}

#[async_trait]
impl BeforeAdvice for RestControllerBeforeLogger {
    async fn before(&self, jp: &JoinPoint) -> Result<(), AdviceError> {
        tracing::info!(
            invocation = %jp.id(),
            "Before RestController class {} Method {} about to be executed with arguments {}",
            jp.target_name_or_default(),
            jp.operation_name(),
            jp.args_display()
        );
        Ok(())
    }
}
