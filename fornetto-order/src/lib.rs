pub mod memory;
pub mod orchestrator;

pub use memory::{InMemoryCustomizationStore, InMemoryOrderStore, MockIngredientClient};
pub use orchestrator::OrderOrchestrator;
