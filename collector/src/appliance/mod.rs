//! Appliance REST collaborator
//!
//! Thin typed client for the storage appliance's metrics API: session
//! establishment, capacity and KPI snapshots, and historical/real-time
//! metric queries.

pub mod error;
pub mod session;
pub mod types;

pub use error::ApplianceError;
pub use session::Session;
