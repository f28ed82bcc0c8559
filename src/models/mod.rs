pub mod plan;
pub mod session;
pub mod template;

pub use plan::*;
pub use session::*;
pub use template::*;
