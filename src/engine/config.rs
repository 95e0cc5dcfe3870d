// ============================================================================
// Engine Configuration
// Output formatting, literal parsing and base limits for a number engine
// ============================================================================

use crate::numeric::{MAX_IBASE, MAX_OBASE, MIN_BASE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable holding the output line length.
pub const LINE_LENGTH_ENV: &str = "BC_LINE_LENGTH";

/// Default characters per output line, including the wrapping backslash.
pub const DEFAULT_LINE_LENGTH: usize = 70;

/// Comprehensive configuration for creating a number engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Wrap output with `\` and a newline once `line_length - 1` characters
    /// are on a line. Zero disables wrapping.
    pub line_length: usize,

    /// Print `0` before the radix point of pure fractions
    pub leading_zero: bool,

    /// Read letter digits at or above the input base as `base - 1`
    pub digit_clamp: bool,

    /// Largest accepted input base
    pub max_ibase: u32,

    /// Largest accepted output base
    pub max_obase: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a configuration with the default line length and full base
    /// ranges
    pub fn new() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            leading_zero: false,
            digit_clamp: false,
            max_ibase: MAX_IBASE,
            max_obase: MAX_OBASE,
        }
    }

    /// Builder method: Set the output line length
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    /// Builder method: Print a leading zero for pure fractions
    pub fn with_leading_zero(mut self, leading_zero: bool) -> Self {
        self.leading_zero = leading_zero;
        self
    }

    /// Builder method: Clamp out-of-range letter digits
    pub fn with_digit_clamp(mut self, digit_clamp: bool) -> Self {
        self.digit_clamp = digit_clamp;
        self
    }

    /// Builder method: Limit the input base
    pub fn with_max_ibase(mut self, max_ibase: u32) -> Self {
        self.max_ibase = max_ibase;
        self
    }

    /// Builder method: Limit the output base
    pub fn with_max_obase(mut self, max_obase: u32) -> Self {
        self.max_obase = max_obase;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.line_length == 1 {
            return Err("Line length must be 0 or at least 2".to_string());
        }

        if !(MIN_BASE..=MAX_IBASE).contains(&self.max_ibase) {
            return Err(format!(
                "Maximum input base must be between {} and {}",
                MIN_BASE, MAX_IBASE
            ));
        }

        if !(MIN_BASE..=MAX_OBASE).contains(&self.max_obase) {
            return Err(format!(
                "Maximum output base must be between {} and {}",
                MIN_BASE, MAX_OBASE
            ));
        }

        Ok(())
    }

    /// Apply overrides from the environment.
    ///
    /// `BC_LINE_LENGTH` sets the line length; values that do not parse or
    /// fail validation are ignored.
    pub fn from_env(self) -> Self {
        match std::env::var(LINE_LENGTH_ENV) {
            Ok(value) => self.apply_line_length(&value),
            Err(_) => self,
        }
    }

    fn apply_line_length(self, value: &str) -> Self {
        match value.trim().parse::<usize>() {
            Ok(len) if len != 1 => self.with_line_length(len),
            _ => {
                tracing::debug!(value, "ignoring invalid {}", LINE_LENGTH_ENV);
                self
            },
        }
    }

    /// Read a configuration document.
    ///
    /// Missing fields take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EngineConfig {
    /// POSIX-style configuration
    /// - No leading zero before the radix point
    /// - Letter digits clamped to the input base
    /// - 70-character lines
    pub fn posix() -> Self {
        Self::new()
            .with_leading_zero(false)
            .with_digit_clamp(true)
            .with_max_ibase(16)
            .with_line_length(DEFAULT_LINE_LENGTH)
    }

    /// Embedded library configuration
    /// - Leading zero for pure fractions
    /// - No line wrapping
    pub fn library() -> Self {
        Self::new().with_leading_zero(true).with_line_length(0)
    }
}
