pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::Employee;
pub use repository::{EmployeeStore, SqlEmployeeStore};

