use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::Employee;

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email";

/// Persistence contract for employee records
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All records in creation order
    async fn find_all(&self) -> Result<Vec<Employee>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, DatabaseError>;

    /// Insert when `id` is absent, otherwise update the existing row.
    /// Updating an id that isn't stored yields `DatabaseError::NotFound`.
    async fn save(&self, employee: Employee) -> Result<Employee, DatabaseError>;

    async fn save_all(&self, employees: Vec<Employee>) -> Result<Vec<Employee>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// SQL-backed store over a sqlx pool
#[derive(Clone)]
pub struct SqlEmployeeStore {
    pool: SqlitePool,
}

impl SqlEmployeeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn insert(&self, employee: Employee) -> Result<Employee, DatabaseError> {
        let sql = format!(
            "INSERT INTO employee (first_name, last_name, email) VALUES (?, ?, ?) RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let saved = sqlx::query_as::<_, Employee>(&sql)
            .bind(employee.first_name)
            .bind(employee.last_name)
            .bind(employee.email)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Inserted employee {:?}", saved.id);
        Ok(saved)
    }

    async fn update(&self, id: i64, employee: Employee) -> Result<Employee, DatabaseError> {
        let sql = format!(
            "UPDATE employee SET first_name = ?, last_name = ?, email = ? WHERE id = ? RETURNING {}",
            EMPLOYEE_COLUMNS
        );
        let saved = sqlx::query_as::<_, Employee>(&sql)
            .bind(employee.first_name)
            .bind(employee.last_name)
            .bind(employee.email)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        saved.ok_or_else(|| DatabaseError::NotFound(format!("employee {} not found", id)))
    }
}

#[async_trait]
impl EmployeeStore for SqlEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employee ORDER BY id", EMPLOYEE_COLUMNS);
        let rows = sqlx::query_as::<_, Employee>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, DatabaseError> {
        let sql = format!("SELECT {} FROM employee WHERE id = ?", EMPLOYEE_COLUMNS);
        let row = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn save(&self, employee: Employee) -> Result<Employee, DatabaseError> {
        match employee.id {
            Some(id) => self.update(id, employee).await,
            None => self.insert(employee).await,
        }
    }

    async fn save_all(&self, employees: Vec<Employee>) -> Result<Vec<Employee>, DatabaseError> {
        let mut saved = Vec::with_capacity(employees.len());
        for employee in employees {
            saved.push(self.save(employee).await?);
        }
        Ok(saved)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        crate::database::manager::DatabaseManager::health_check(&self.pool).await
    }
}
