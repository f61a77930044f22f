//! Subnet planning and access control logic.
//!
//! This module contains the business logic:
//! - [`planner`] - Splitting a network into internal and guest halves
//! - [`access`] - The guest isolation rule and traffic logging
//! - [`session`] - Caller-owned state tying the two together

mod access;
mod planner;
mod session;

// Re-export public functions
pub use access::{decide, evaluate, AccessController};
pub use planner::{describe, host_range, split, MAX_SPLIT_PREFIX};
pub use session::{Session, SessionState, SubnetSummary};
