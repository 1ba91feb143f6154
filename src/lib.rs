//! # Ampora - client core for the Ampora EV charging platform
//!
//! A Rust implementation of the Ampora client core: station recommendation
//! for trip planning, live charging-session monitoring, and the typed service
//! clients those two need (routing service, backend REST API, payment gateway).
//!
//! ## Features
//!
//! - **Station Recommendation**: deterministic scoring of charging stations
//!   against a vehicle's range and connector for a planned route
//! - **Live Session Monitor**: explicit state machine over the charging
//!   telemetry stream with terminal session-end detection and billing info
//! - **Trip Planning**: route + nearby-station retrieval with recommendation
//!   applied in one call
//! - **Payment Redirect**: PayHere-style checkout form construction from a
//!   backend-issued integrity hash
//! - **Configuration**: YAML-based configuration with validation
//!
//! ## Architecture
//!
//! The crate follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `planner`: Station recommendation scoring (pure, no I/O)
//! - `session`: Charging-session monitor state machine and streaming feed
//! - `routing`: Routing/trip service client and trip-planning facade
//! - `vehicle`: Vehicle catalogue types and backend vehicle client
//! - `trips`: Saved-trip persistence client
//! - `payment`: Payment-initialization client and redirect form builder

pub mod config;
pub mod error;
pub mod logging;
pub mod payment;
pub mod planner;
pub mod routing;
pub mod session;
pub mod trips;
pub mod vehicle;
mod wire;

// Re-export commonly used types
pub use config::Config;
pub use error::{AmporaError, Result};
pub use planner::{RecommendationSet, RouteSummary, Station};
pub use session::{BillInfo, LiveTelemetry, MonitorState, SessionMonitor};
pub use vehicle::Vehicle;
