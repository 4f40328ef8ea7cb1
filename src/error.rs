use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the calculator and the sales ledger
#[derive(Debug, Error)]
pub enum WarrantyError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u32 },

    #[error("no sale with serial, motor or chassis number '{0}'")]
    UnknownVehicle(String),

    #[error("warranty for sale {sale_id} expired on {expired_at}")]
    WarrantyExpired {
        sale_id: u32,
        expired_at: DateTime<Utc>,
    },
}

impl WarrantyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, WarrantyError>;
