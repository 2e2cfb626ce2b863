//! Change set name generation.

use uuid::Uuid;

/// Produces a change set name for a stack when the caller supplies none.
pub trait NameGenerator: Send + Sync {
    /// Returns a new change set name for the given stack.
    fn generate(&self, stack_name: &str) -> String;
}

/// Generates `{stack}-{uuid v4}` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidNameGenerator;

impl NameGenerator for UuidNameGenerator {
    fn generate(&self, stack_name: &str) -> String {
        format!("{stack_name}-{}", Uuid::new_v4())
    }
}

impl<F> NameGenerator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn generate(&self, stack_name: &str) -> String {
        self(stack_name)
    }
}
