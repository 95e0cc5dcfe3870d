// ============================================================================
// Engine Factory
// Creates number engines with validated configuration
// ============================================================================

use crate::engine::config::EngineConfig;
use crate::engine::NumberEngine;
use crate::interfaces::{Interrupt, NeverInterrupt};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a number engine from configuration
///
/// # Arguments
/// * `config` - Engine configuration
/// * `interrupt` - Cancellation source polled by long operations
///
/// # Returns
/// * `Result<NumberEngine, String>` - Configured engine or error
///
/// # Example
/// ```
/// use decimal_engine::prelude::*;
/// use decimal_engine::engine::factory::create_from_config;
/// use std::sync::Arc;
///
/// let engine = create_from_config(EngineConfig::posix(), Arc::new(NeverInterrupt)).unwrap();
/// assert_eq!(engine.config().line_length, 70);
/// ```
pub fn create_from_config(
    config: EngineConfig,
    interrupt: Arc<dyn Interrupt>,
) -> Result<NumberEngine, String> {
    config.validate()?;
    Ok(NumberEngine::new(config, interrupt))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating number engines with fluent API
///
/// # Example
/// ```
/// use decimal_engine::prelude::*;
/// use decimal_engine::engine::factory::EngineBuilder;
///
/// let mut engine = EngineBuilder::new()
///     .with_line_length(0)
///     .with_leading_zero(true)
///     .build()
///     .unwrap();
///
/// let n = engine.parse("FF", 16).unwrap();
/// assert_eq!(engine.to_string_in(&n, Notation::Base(2)).unwrap(), "11111111");
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    interrupt: Arc<dyn Interrupt>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Create a new builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            interrupt: Arc::new(NeverInterrupt),
        }
    }

    // ========================================================================
    // Output Configuration
    // ========================================================================

    /// Set the output line length (0 disables wrapping)
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.config.line_length = line_length;
        self
    }

    /// Print a leading zero for pure fractions
    pub fn with_leading_zero(mut self, leading_zero: bool) -> Self {
        self.config.leading_zero = leading_zero;
        self
    }

    /// Limit the output base
    pub fn with_max_obase(mut self, max_obase: u32) -> Self {
        self.config.max_obase = max_obase;
        self
    }

    // ========================================================================
    // Input Configuration
    // ========================================================================

    /// Clamp out-of-range letter digits to the input base
    pub fn with_digit_clamp(mut self, digit_clamp: bool) -> Self {
        self.config.digit_clamp = digit_clamp;
        self
    }

    /// Limit the input base
    pub fn with_max_ibase(mut self, max_ibase: u32) -> Self {
        self.config.max_ibase = max_ibase;
        self
    }

    // ========================================================================
    // Additional Configuration
    // ========================================================================

    /// Install the cancellation source
    pub fn with_interrupt(mut self, interrupt: Arc<dyn Interrupt>) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Apply `BC_LINE_LENGTH` from the environment
    pub fn with_env(mut self) -> Self {
        self.config = self.config.from_env();
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Start from the POSIX preset
    pub fn posix() -> Self {
        Self {
            config: EngineConfig::posix(),
            ..Self::new()
        }
    }

    /// Start from the embedded library preset
    pub fn library() -> Self {
        Self {
            config: EngineConfig::library(),
            ..Self::new()
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the number engine
    pub fn build(self) -> Result<NumberEngine, String> {
        create_from_config(self.config, self.interrupt)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::InterruptFlag;
    use crate::numeric::{Number, NumericError};

    #[test]
    fn test_create_from_config() {
        let engine = create_from_config(EngineConfig::library(), Arc::new(NeverInterrupt)).unwrap();
        assert_eq!(engine.config().line_length, 0);
    }

    #[test]
    fn test_create_rejects_invalid_config() {
        let config = EngineConfig::new().with_line_length(1);
        assert!(create_from_config(config, Arc::new(NeverInterrupt)).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let engine = EngineBuilder::new()
            .with_line_length(100)
            .with_digit_clamp(true)
            .with_max_ibase(16)
            .build()
            .unwrap();

        assert_eq!(engine.config().line_length, 100);
        assert!(engine.config().digit_clamp);
        assert_eq!(engine.config().max_ibase, 16);
    }

    #[test]
    fn test_builder_rejects_bad_base() {
        assert!(EngineBuilder::new().with_max_obase(1).build().is_err());
    }

    #[test]
    fn test_builder_with_interrupt() {
        let flag = InterruptFlag::new();
        let engine = EngineBuilder::new()
            .with_interrupt(Arc::new(flag.clone()))
            .build()
            .unwrap();

        flag.raise();
        let a: Number = "9".repeat(400).parse().unwrap();
        let mut c = Number::new();
        assert_eq!(engine.mul(&a, &a, &mut c, 0), Err(NumericError::Interrupted));
    }

    #[test]
    fn test_preset_builders() {
        let posix = EngineBuilder::posix().build().unwrap();
        assert!(posix.config().digit_clamp);

        let library = EngineBuilder::library();
        assert!(library.get_config().leading_zero);
        assert!(library.build().is_ok());
    }
}
