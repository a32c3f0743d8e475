//! HTTP API layer built on axum.
//!
//! Enabled with the `http-server` feature. Handlers are thin wrappers over
//! the service layer; all allocation logic lives in [`crate::engine`] and
//! [`crate::services`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
