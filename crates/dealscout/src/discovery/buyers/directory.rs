use super::domain::{BuyerKind, BuyerRecord};

/// Buyer source boundary. One snapshot per session; the engine does not
/// paginate or cache beyond what a single call returns.
pub trait BuyerDirectory: Send + Sync {
    fn list(&self, kind: BuyerKind) -> Result<Vec<BuyerRecord>, DirectoryError>;
}

/// Failure surfaced by the upstream buyer source.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("buyer source unavailable: {0}")]
    Unavailable(String),
}
