pub mod employee;

pub use employee::EmployeeController;
