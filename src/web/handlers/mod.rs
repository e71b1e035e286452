pub mod eligibility_handlers;
pub mod requirement_handlers;
pub mod system_handlers;

pub use eligibility_handlers::*;
pub use requirement_handlers::*;
pub use system_handlers::*;
