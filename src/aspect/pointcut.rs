use std::fmt;

use crate::aspect::registry::{ComponentMarker, RegisteredOperation};

/// Declarative rule selecting which registry operations an advice applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pointcut {
    /// Operations declared on the named owner; `None` matches all of them
    Execution {
        owner: &'static str,
        operation: Option<&'static str>,
    },
    /// Every operation on any component tagged with the marker
    Within(ComponentMarker),
}

impl Pointcut {
    /// All operations of an owner
    pub fn owner(owner: &'static str) -> Self {
        Pointcut::Execution { owner, operation: None }
    }

    /// A single named operation of an owner
    pub fn operation(owner: &'static str, operation: &'static str) -> Self {
        Pointcut::Execution { owner, operation: Some(operation) }
    }

    pub fn within(marker: ComponentMarker) -> Self {
        Pointcut::Within(marker)
    }

    pub fn matches(&self, candidate: &RegisteredOperation) -> bool {
        match self {
            Pointcut::Execution { owner, operation } => {
                candidate.signature.owner == *owner
                    && operation.map_or(true, |name| candidate.signature.operation == name)
            }
            Pointcut::Within(marker) => candidate.has_marker(*marker),
        }
    }
}

impl fmt::Display for Pointcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pointcut::Execution { owner, operation: None } => write!(f, "execution({}.*)", owner),
            Pointcut::Execution { owner, operation: Some(op) } => write!(f, "execution({}.{})", owner, op),
            Pointcut::Within(marker) => write!(f, "within(@{:?})", marker),
        }
    }
}
