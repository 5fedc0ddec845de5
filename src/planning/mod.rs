//! Planning Module
//!
//! Fleet-level decision functions: cloud option ranking, strategy
//! scoring, and the tiering planner that orchestrates the per-entity
//! analytics across the full inventory.

pub mod cloud;
pub mod strategy;
pub mod tiering;

pub use cloud::*;
pub use strategy::*;
pub use tiering::*;
