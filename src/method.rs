mod method_context;
mod method_context_error;
mod method_registry;

pub use method_context::MethodContext;
pub use method_context_error::MethodContextError;
pub use method_registry::{MethodHandler, MethodRegistry};
