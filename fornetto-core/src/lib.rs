pub mod error;
pub mod ingredient;
pub mod order;
pub mod repository;

pub use error::{ClientError, OrderError, StoreError};
pub use ingredient::IngredientClient;
pub use order::{Customization, CustomizationId, CustomizationKind, Order};
pub use repository::{CustomizationStore, OrderStore};
