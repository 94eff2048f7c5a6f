use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::JobError;
use crate::handler::JobHandler;

/// Handlers keyed by job type
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own job type; each type takes one handler
    pub fn register<H: JobHandler + 'static>(&mut self, handler: H) -> Result<(), JobError> {
        self.register_arc(Arc::new(handler))
    }

    pub fn register_arc(&mut self, handler: Arc<dyn JobHandler>) -> Result<(), JobError> {
        let job_type = handler.job_type().to_string();
        if self.handlers.contains_key(&job_type) {
            return Err(JobError::DuplicateJobType(job_type));
        }
        debug!("Registered handler for job type '{}'", job_type);
        self.handlers.insert(job_type, handler);
        Ok(())
    }

    pub fn resolve(&self, job_type: &str) -> Result<Arc<dyn JobHandler>, JobError> {
        self.handlers
            .get(job_type)
            .cloned()
            .ok_or_else(|| JobError::UnknownJobType(job_type.to_string()))
    }

    /// Registered job types, sorted
    pub fn job_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("job_types", &self.job_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_handler::MockJobHandler;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register(MockJobHandler::new()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.job_types(), vec!["mock"]);
        assert_eq!(registry.resolve("mock").unwrap().job_type(), "mock");
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = HandlerRegistry::new();
        registry.register(MockJobHandler::new()).unwrap();

        match registry.register(MockJobHandler::new()) {
            Err(JobError::DuplicateJobType(t)) => assert_eq!(t, "mock"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type() {
        let registry = HandlerRegistry::new();
        assert!(matches!(
            registry.resolve("payment"),
            Err(JobError::UnknownJobType(ref t)) if t == "payment"
        ));
    }
}
