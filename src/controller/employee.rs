use std::sync::Arc;

use crate::aspect::{AspectError, Component, ComponentMarker, JoinPoint, OperationError, Proxy};
use crate::database::{Employee, EmployeeStore};

/// REST controller for the Employee resource. Delegates straight to the store;
/// logging is attached from outside through `Proxy<EmployeeController>`.
pub struct EmployeeController {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeController {
    pub const NAME: &'static str = "EmployeeController";
    pub const LIST: &'static str = "list_employees";
    pub const CREATE: &'static str = "create_employee";
    pub const UPDATE: &'static str = "update_employee";

    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    /// Seed `count` sample employees. Called directly at startup, not intercepted.
    pub async fn init(&self, count: usize) -> Result<Vec<Employee>, OperationError> {
        let employees = (0..count)
            .map(|i| {
                Employee::new(
                    format!("first name {}", i),
                    format!("last name {}", i),
                    format!("email {}", i),
                )
            })
            .collect();

        let saved = self.store.save_all(employees).await?;
        tracing::info!("Seeded {} employees", saved.len());
        Ok(saved)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, OperationError> {
        Ok(self.store.find_all().await?)
    }

    /// Always inserts; any client-supplied id is ignored
    pub async fn create_employee(&self, mut employee: Employee) -> Result<Employee, OperationError> {
        employee.id = None;
        Ok(self.store.save(employee).await?)
    }

    pub async fn update_employee(&self, employee: Employee) -> Result<Employee, OperationError> {
        if employee.first_name.is_none() {
            return Err(OperationError::ValidationError("firstName must not be null".to_string()));
        }
        if employee.id.is_none() {
            return Err(OperationError::ValidationError("id is required for update".to_string()));
        }
        Ok(self.store.save(employee).await?)
    }
}

impl Component for EmployeeController {
    fn component_name(&self) -> &'static str {
        Self::NAME
    }

    fn markers(&self) -> &'static [ComponentMarker] {
        &[ComponentMarker::RestController]
    }

    fn operations(&self) -> &'static [&'static str] {
        &[Self::LIST, Self::CREATE, Self::UPDATE]
    }
}

/// Intercepted entry points used by the HTTP handlers
impl Proxy<EmployeeController> {
    pub async fn list_employees(&self) -> Result<Vec<Employee>, AspectError> {
        self.call(EmployeeController::LIST, vec![], |c| async move { c.list_employees().await })
            .await
    }

    pub async fn create_employee(&self, employee: Employee) -> Result<Employee, AspectError> {
        let args = vec![JoinPoint::arg(&employee)];
        self.call(EmployeeController::CREATE, args, |c| async move {
            c.create_employee(employee).await
        })
        .await
    }

    pub async fn update_employee(&self, employee: Employee) -> Result<Employee, AspectError> {
        let args = vec![JoinPoint::arg(&employee)];
        self.call(EmployeeController::UPDATE, args, |c| async move {
            c.update_employee(employee).await
        })
        .await
    }
}
