//! API Module
//!
//! REST surface for the advisor. Handlers marshal the service facade's
//! results; no decision logic lives here.

pub mod rest;
pub mod server;

pub use rest::RestRouter;
pub use server::{ApiServer, ApiServerConfig};
