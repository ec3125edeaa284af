// Logging advices for controller operations

pub mod after_logging;
pub mod around_logging;
pub mod before_logging;

pub use after_logging::*;
pub use around_logging::*;
pub use before_logging::*;

use std::sync::Arc;

use crate::aspect::pipeline::AspectPipelineBuilder;
use crate::aspect::traits::AdviceBox;

/// Register the controller logging aspect: entry/exit logging on every operation
/// of `owner`, entry logging on every REST controller, and returning/throwing/around
/// logging scoped to `wrapped_operation`.
pub fn register_controller_logging(
    builder: AspectPipelineBuilder,
    owner: &'static str,
    wrapped_operation: &'static str,
) -> AspectPipelineBuilder {
    builder
        .register(AdviceBox::Before(Arc::new(ControllerBeforeLogger::new(owner))))
        .register(AdviceBox::Before(Arc::new(RestControllerBeforeLogger)))
        .register(AdviceBox::After(Arc::new(ControllerAfterLogger::new(owner))))
        .register(AdviceBox::AfterReturning(Arc::new(OperationReturningLogger::new(
            owner,
            wrapped_operation,
        ))))
        .register(AdviceBox::AfterThrowing(Arc::new(OperationThrowingLogger::new(
            owner,
            wrapped_operation,
        ))))
        .register(AdviceBox::Around(Arc::new(WrappingAroundLogger::new(
            owner,
            wrapped_operation,
        ))))
}
