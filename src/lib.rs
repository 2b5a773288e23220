//! Analytics core for the Cogitara dashboard.
//!
//! [`analysis`] holds the stateless text, numeric and pattern analyzers;
//! [`security`] holds the intrusion guard and input validators. [`api`] is a
//! thin axum host that wires both behind JSON endpoints.

pub mod analysis;
pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod security;
pub mod state;

pub use analysis::result::AnalysisResult;
pub use analysis::{AnalysisKind, Analyzer};
pub use security::IntrusionGuard;
