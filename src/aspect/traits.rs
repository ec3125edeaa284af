use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::aspect::error::{AdviceError, AspectError, OperationError};
use crate::aspect::join_point::JoinPoint;
use crate::aspect::pipeline::Proceed;
use crate::aspect::pointcut::Pointcut;

/// Type-erased operation return value; restored to its concrete type at the pipeline boundary
pub type Payload = Box<dyn Any + Send>;

/// Relation of an advice to the operation it intercepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceKind {
    Before,
    Around,
    AfterReturning,
    AfterThrowing,
    After,
}

/// Base trait for all advices with metadata and matching rule
pub trait Advice: Send + Sync {
    /// Advice name for logging and debugging
    fn name(&self) -> &'static str;

    /// Which operations this advice applies to
    fn pointcut(&self) -> Pointcut;
}

/// Fires before the operation runs. Cannot alter the arguments.
#[async_trait]
pub trait BeforeAdvice: Advice {
    async fn before(&self, jp: &JoinPoint) -> Result<(), AdviceError>;
}

/// Fires once the operation has run, whatever the outcome
#[async_trait]
pub trait AfterAdvice: Advice {
    async fn after(&self, jp: &JoinPoint) -> Result<(), AdviceError>;
}

/// Fires only when the operation returned normally
#[async_trait]
pub trait AfterReturningAdvice: Advice {
    async fn after_returning(&self, jp: &JoinPoint) -> Result<(), AdviceError>;
}

/// Fires only when the operation failed. Cannot suppress the failure.
#[async_trait]
pub trait AfterThrowingAdvice: Advice {
    async fn after_throwing(&self, jp: &JoinPoint, error: &OperationError) -> Result<(), AdviceError>;
}

/// Owns the call boundary: runs the operation through `proceed` and may
/// substitute the outcome. The returned payload must have the operation's type.
#[async_trait]
pub trait AroundAdvice: Advice {
    async fn around(&self, jp: &JoinPoint, proceed: Proceed<'_>) -> Result<Payload, AspectError>;
}

/// Registered advice of any kind
#[derive(Clone)]
pub enum AdviceBox {
    Before(Arc<dyn BeforeAdvice>),
    Around(Arc<dyn AroundAdvice>),
    AfterReturning(Arc<dyn AfterReturningAdvice>),
    AfterThrowing(Arc<dyn AfterThrowingAdvice>),
    After(Arc<dyn AfterAdvice>),
}

impl AdviceBox {
    pub fn name(&self) -> &'static str {
        match self {
            AdviceBox::Before(a) => a.name(),
            AdviceBox::Around(a) => a.name(),
            AdviceBox::AfterReturning(a) => a.name(),
            AdviceBox::AfterThrowing(a) => a.name(),
            AdviceBox::After(a) => a.name(),
        }
    }

    pub fn pointcut(&self) -> Pointcut {
        match self {
            AdviceBox::Before(a) => a.pointcut(),
            AdviceBox::Around(a) => a.pointcut(),
            AdviceBox::AfterReturning(a) => a.pointcut(),
            AdviceBox::AfterThrowing(a) => a.pointcut(),
            AdviceBox::After(a) => a.pointcut(),
        }
    }

    pub fn kind(&self) -> AdviceKind {
        match self {
            AdviceBox::Before(_) => AdviceKind::Before,
            AdviceBox::Around(_) => AdviceKind::Around,
            AdviceBox::AfterReturning(_) => AdviceKind::AfterReturning,
            AdviceBox::AfterThrowing(_) => AdviceKind::AfterThrowing,
            AdviceBox::After(_) => AdviceKind::After,
        }
    }
}

impl std::fmt::Debug for AdviceBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceBox")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("pointcut", &self.pointcut())
            .finish()
    }
}
