pub mod config;
pub mod graphql;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;

pub use config::{Config, ConfigError, ServiceKind};
pub use observability::{init_observability, shutdown_observability, Metrics};
