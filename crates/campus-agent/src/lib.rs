//! Async runtime for the campus assistant: data tiers, tool executor and
//! the `CampusAgent` entry point.

pub mod agent;
pub mod config;
pub mod data_access;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod logging;

pub use agent::{CampusAgent, ProcessResponse};
pub use config::Config;
pub use data_access::{DataAccess, HttpDataAccess, OfflineDataAccess};
pub use error::{AgentError, DataAccessError, FixtureError};
pub use executor::{ExecutorStats, StatsSnapshot, ToolExecutor};
pub use fixtures::{FixtureProvider, StaticFixtures};
