// HTTP handlers. Each one is a thin adapter from the route to the intercepted controller.
pub mod employee;
pub mod system;
