//! Error types for subnet planning and traffic checks.

use crate::models::NetworkSpec;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Which side of a traffic check carried the bad address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Source,
    Destination,
}

impl std::fmt::Display for AddressField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressField::Source => write!(f, "source"),
            AddressField::Destination => write!(f, "destination"),
        }
    }
}

/// All failures are user-correctable input errors, except `LogSink`.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Invalid IP network: {0}")]
    InvalidNetwork(String),
    #[error("Invalid {field} address: '{value}'")]
    InvalidAddress { field: AddressField, value: String },
    #[error("Subnets not generated yet, generate subnets first")]
    SubnetsNotInitialized,
    #[error("Subnet {0} has no usable host addresses")]
    EmptySubnet(NetworkSpec),
    #[error("Log sink error: {0}")]
    LogSink(#[from] std::io::Error),
}

impl GuardError {
    /// True for errors the user can fix by correcting their input.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, GuardError::LogSink(_))
    }
}
