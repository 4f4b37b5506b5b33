//! Schema module - configuration and seeding types for the engine.

mod config;
mod seed;

pub use config::*;
pub use seed::*;
