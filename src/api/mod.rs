//! API handlers for the bookstore REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Uniform success envelope returned by every endpoint
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Result payload
    pub data: T,
    /// Human-readable status message
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}
