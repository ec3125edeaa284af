use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::aspect::error::ResolutionFailure;
use crate::aspect::registry::{Component, OperationSignature};

/// Owner label used when the target cannot be resolved
pub const DEFAULT_OWNER_NAME: &str = "DefaultController";

/// Descriptor for a single operation invocation.
/// Built at dispatch time and dropped once the call completes.
#[derive(Clone)]
pub struct JoinPoint {
    id: Uuid,
    signature: OperationSignature,
    target: Option<Arc<dyn Component>>,
    args: Vec<Value>,
}

impl JoinPoint {
    pub fn new(target: Arc<dyn Component>, operation: &'static str, args: Vec<Value>) -> Self {
        let signature = OperationSignature::new(target.component_name(), operation);
        Self {
            id: Uuid::new_v4(),
            signature,
            target: Some(target),
            args,
        }
    }

    /// Join point without a target handle (the owner can't be introspected)
    pub fn detached(signature: OperationSignature, args: Vec<Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            signature,
            target: None,
            args,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn signature(&self) -> &OperationSignature {
        &self.signature
    }

    pub fn operation_name(&self) -> &'static str {
        self.signature.operation
    }

    /// Arguments rendered as a JSON array for log lines
    pub fn args_display(&self) -> String {
        serde_json::to_string(&self.args).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn resolve_target_name(&self) -> Result<&'static str, ResolutionFailure> {
        let target = self.target.as_ref().ok_or(ResolutionFailure::TargetUnavailable)?;
        match target.component_name() {
            "" => Err(ResolutionFailure::AnonymousTarget),
            name => Ok(name),
        }
    }

    /// Target name, or `DEFAULT_OWNER_NAME` when resolution fails
    pub fn target_name_or_default(&self) -> &'static str {
        match self.resolve_target_name() {
            Ok(name) => name,
            Err(reason) => {
                tracing::error!(
                    reason = %reason,
                    "Unable to obtain the target class name, default name will be used!"
                );
                DEFAULT_OWNER_NAME
            }
        }
    }

    /// Serialize one argument; values that fail to serialize are logged as a placeholder
    pub fn arg<T: Serialize + ?Sized>(value: &T) -> Value {
        serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::debug!("Unable to serialize join point argument: {}", e);
            Value::String("<unserializable>".to_string())
        })
    }
}

impl std::fmt::Debug for JoinPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinPoint")
            .field("id", &self.id)
            .field("signature", &self.signature)
            .field("has_target", &self.target.is_some())
            .field("args", &self.args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Named(&'static str);

    impl Component for Named {
        fn component_name(&self) -> &'static str {
            self.0
        }
    }

    #[test]
    fn resolves_target_name() {
        let jp = JoinPoint::new(Arc::new(Named("EmployeeController")), "list_employees", vec![]);
        assert_eq!(jp.resolve_target_name(), Ok("EmployeeController"));
        assert_eq!(jp.target_name_or_default(), "EmployeeController");
        assert_eq!(jp.signature().to_string(), "EmployeeController.list_employees");
    }

    #[test]
    fn falls_back_to_default_when_target_missing() {
        let jp = JoinPoint::detached(OperationSignature::new("EmployeeController", "list_employees"), vec![]);
        assert_eq!(jp.resolve_target_name(), Err(ResolutionFailure::TargetUnavailable));
        assert_eq!(jp.target_name_or_default(), DEFAULT_OWNER_NAME);
    }

    #[test]
    fn falls_back_to_default_when_target_is_anonymous() {
        let jp = JoinPoint::new(Arc::new(Named("")), "list_employees", vec![]);
        assert_eq!(jp.resolve_target_name(), Err(ResolutionFailure::AnonymousTarget));
        assert_eq!(jp.target_name_or_default(), "DefaultController");
    }

    #[test]
    fn renders_args_as_json_array() {
        let jp = JoinPoint::new(
            Arc::new(Named("EmployeeController")),
            "create_employee",
            vec![JoinPoint::arg(&json!({"firstName": "A"}))],
        );
        assert_eq!(jp.args_display(), r#"[{"firstName":"A"}]"#);
        assert_ne!(jp.id(), JoinPoint::detached(*jp.signature(), vec![]).id());
    }
}
