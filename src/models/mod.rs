//! Domain models for SOHO Guard.
//!
//! This module contains the core data structures used throughout the application:
//! - [`NetworkSpec`] - IPv4 block in CIDR notation
//! - [`SubnetPair`] and [`HostRange`] - Result of splitting a network
//! - [`TrafficEvent`] and [`Decision`] - Outcome of a traffic check

mod ipv4;
mod subnet;
mod traffic;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cidr_mask, ip_after_block, netmask_prefix, network_addr, NetworkSpec,
    MAX_LENGTH,
};
pub use subnet::{HostRange, SubnetDetails, SubnetPair, Zone};
pub use traffic::{Decision, TrafficEvent, TIMESTAMP_FORMAT};
