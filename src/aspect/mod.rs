// Aspect system: logging advices woven around controller operations

pub mod error;
pub mod implementations;
pub mod join_point;
pub mod pipeline;
pub mod pointcut;
pub mod proxy;
pub mod registry;
pub mod traits;

// Re-export core types
pub use error::*;
pub use join_point::*;
pub use pipeline::*;
pub use pointcut::*;
pub use proxy::*;
pub use registry::*;
pub use traits::*;
