use std::fmt;

/// Capability tags a component can carry; matched by `Pointcut::Within`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentMarker {
    /// Externally invokable HTTP entry point
    RestController,
}

/// A component whose operations can be intercepted
pub trait Component: Send + Sync + 'static {
    /// Simple display name used in log lines, e.g. "EmployeeController"
    fn component_name(&self) -> &'static str;

    fn markers(&self) -> &'static [ComponentMarker] {
        &[]
    }

    /// Names of the operations this component exposes for interception
    fn operations(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Identifies one operation on one owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationSignature {
    pub owner: &'static str,
    pub operation: &'static str,
}

impl OperationSignature {
    pub const fn new(owner: &'static str, operation: &'static str) -> Self {
        Self { owner, operation }
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.operation)
    }
}

/// Registry entry: an operation plus the markers of its owner
#[derive(Debug, Clone)]
pub struct RegisteredOperation {
    pub signature: OperationSignature,
    pub markers: &'static [ComponentMarker],
}

impl RegisteredOperation {
    pub fn has_marker(&self, marker: ComponentMarker) -> bool {
        self.markers.contains(&marker)
    }
}

/// The set of operations visible to the interception pipeline.
/// Holds metadata only; never executes anything.
#[derive(Debug, Default, Clone)]
pub struct OperationRegistry {
    operations: Vec<RegisteredOperation>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every operation a component declares
    pub fn register(&mut self, component: &dyn Component) {
        let owner = component.component_name();
        for &operation in component.operations() {
            self.register_operation(OperationSignature::new(owner, operation), component.markers());
        }
    }

    pub fn register_operation(&mut self, signature: OperationSignature, markers: &'static [ComponentMarker]) {
        if self.contains(&signature) {
            tracing::debug!("Operation {} already registered, skipping", signature);
            return;
        }
        tracing::debug!("Registered interceptable operation {}", signature);
        self.operations.push(RegisteredOperation { signature, markers });
    }

    pub fn contains(&self, signature: &OperationSignature) -> bool {
        self.operations.iter().any(|op| &op.signature == signature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredOperation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
