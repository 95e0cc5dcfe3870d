// ============================================================================
// Engine Module
// Configured entry point used by a calculator interpreter
// ============================================================================

mod number_engine;

pub mod config;
pub mod factory;

pub use config::EngineConfig;
pub use factory::{create_from_config, EngineBuilder};
pub use number_engine::NumberEngine;
