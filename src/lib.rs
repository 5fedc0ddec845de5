//! Storage Sentinel - Risk-Aware Storage Advisor
//!
//! Ingests per-drive SMART telemetry and per-file access metadata and
//! produces storage-management decisions: drive health/risk scores,
//! failure-time estimates, file tier classifications, compression
//! recommendations, and ranked fleet-wide tiering strategies. All cloud
//! actions are advisory; nothing is migrated or compressed by this
//! service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        REST API (axum)                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                       Advisor Service                           │
//! │  ┌──────────────┐  ┌───────────────┐  ┌─────────────────────┐   │
//! │  │   Analytics  │  │   Planning    │  │   Configuration     │   │
//! │  │ health score │  │ cloud pricer  │  │ pricing parameters  │   │
//! │  │ failure est. │  │ strategy rank │  │ pricing table       │   │
//! │  │ access class │  │ tiering plan  │  │ strategy catalog    │   │
//! │  │ compression  │  │               │  │                     │   │
//! │  └──────────────┘  └───────────────┘  └─────────────────────┘   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                     Inventory Port (injected)                   │
//! │        drives / files / alerts  (in-memory sample fleet)        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: raw records -> per-entity scorers/classifiers ->
//! per-file recommendations -> fleet aggregation -> ranked strategies.
//! Every decision function is pure; repeated calls over unchanged records
//! return identical results.
//!
//! # Modules
//!
//! - [`analytics`]: per-entity scoring and classification
//! - [`planning`]: fleet-level ranking and the tiering planner
//! - [`inventory`]: in-memory inventory and the sample fleet
//! - [`api`]: REST surface
//! - [`domain`]: record types and the inventory port
//! - [`config`]: pricing parameters, pricing table, strategy catalog
//! - [`error`]: error types and handling

pub mod analytics;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod planning;
pub mod service;

// Re-export commonly used types
pub use analytics::{
    AccessClassifier, AccessPattern, CompressionAdvisor, CompressionEstimate, FailurePredictor,
    HealthAssessment, HealthScorer,
};

pub use api::{ApiServer, ApiServerConfig, RestRouter};

pub use config::{
    CloudPricingTable, PricingSettings, Settings, StrategyCatalog,
};

pub use domain::{
    Alert, AlertSeverity, CloudOption, DriveKind, DriveRecord, FileRecord, Inventory,
    InventoryRef, RiskLevel, StorageTier, StrategyCatalogEntry,
};

pub use error::{Error, Result};

pub use inventory::{InMemoryInventory, sample_inventory};

pub use planning::{
    CloudPricer, MigrationUrgency, RankedStrategy, RiskTolerance, StrategyOptimizer, TieringPlan,
    TieringPlanner, TieringRecommendation,
};

pub use service::AdvisorService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
