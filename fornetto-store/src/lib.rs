pub mod app_config;
pub mod customization_store;
pub mod database;
pub mod ingredient_client;
pub mod order_store;

pub use customization_store::PgCustomizationStore;
pub use database::DbClient;
pub use ingredient_client::HttpIngredientClient;
pub use order_store::PgOrderStore;
