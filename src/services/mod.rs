//! Service layer for orderscan business logic.
//!
//! This module contains domain logic separated from UI concerns.
//! Services can be used by CLI, web server, or other interfaces.

pub mod orders;

pub use orders::{OrderService, ServiceError};
