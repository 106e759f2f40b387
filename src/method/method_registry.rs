use super::MethodContext;
use std::collections::HashMap;
use std::{future::Future, pin::Pin, sync::Arc};

/// A type-erased application handler.
///
/// Handlers report back only through the [`MethodContext`] they are given.
pub type MethodHandler =
    Arc<dyn Fn(MethodContext) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Maps method names to handlers.
///
/// Filled in during setup and only read afterwards, so lookups need no lock.
#[derive(Default, Clone)]
pub struct MethodRegistry {
    handlers: HashMap<String, MethodHandler>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `handler` under `name`, replacing any earlier registration.
    pub fn register<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(MethodContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let name = name.into();
        let wrapped: MethodHandler = Arc::new(move |ctx: MethodContext| {
            Box::pin(handler(ctx)) as Pin<Box<dyn Future<Output = ()> + Send>>
        });

        if self.handlers.insert(name.clone(), wrapped).is_some() {
            tracing::debug!("Replaced handler for method `{}`", name);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&MethodHandler> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
