//! Repository trait definitions.
//!
//! The engine and service layer are written against these traits so storage
//! backends can be swapped without touching allocation logic.

pub mod audit;
pub mod booking;
pub mod error;
pub mod master;

use async_trait::async_trait;

pub use audit::AuditRepository;
pub use booking::BookingRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use master::MasterDataRepository;

/// Combined repository trait for backends that implement every concern.
///
/// The service layer and HTTP state hold an `Arc<dyn FullRepository>`.
#[async_trait]
pub trait FullRepository:
    BookingRepository + MasterDataRepository + AuditRepository
{
    /// Verify the store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
