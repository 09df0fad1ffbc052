//! Ticket error types

use thiserror::Error;

/// Errors raised at the boundary where host values enter the ticket core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TicketError {
    /// A dimension or position was NaN or infinite
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    /// A container size was negative
    #[error("invalid container size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
}

/// Result type for ticket operations
pub type Result<T> = std::result::Result<T, TicketError>;
