/// Failure of a keyed record store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Failure reaching, or rejection by, the ingredient service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Ingredient service unreachable: {0}")]
    Unreachable(String),

    #[error("Ingredient service rejected the request: {0}")]
    Rejected(String),
}

/// Errors surfaced by the order workflows
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(i64),

    #[error("Pricing service failure: {0}")]
    UpstreamPricing(#[from] ClientError),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}
