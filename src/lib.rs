// ============================================================================
// Decimal Engine Library
// Arbitrary-precision scaled-decimal arithmetic for calculator runtimes
// ============================================================================

//! # Decimal Engine
//!
//! An arbitrary-precision decimal arithmetic engine with the semantics of a
//! POSIX `bc` calculator.
//!
//! ## Features
//!
//! - **Exact scaled decimals** stored as radix-10^9 limbs, no binary floating point
//! - **Full operator set**: add, subtract, multiply (Karatsuba), divide, modulus,
//!   power, square root, modular exponentiation, decimal shifts
//! - **Base conversion** between text and numbers in bases 2 through 36 on input
//!   and 2 through 10^9 on output, plus scientific and engineering notation
//! - **Cooperative cancellation** of long operations through an [`Interrupt`](interfaces::Interrupt)
//!
//! ## Example
//!
//! ```rust
//! use decimal_engine::prelude::*;
//!
//! let mut engine = EngineBuilder::library().build().unwrap();
//!
//! let a = engine.parse("1", 10).unwrap();
//! let b = engine.parse("3", 10).unwrap();
//! let mut c = Number::new();
//! engine.div(&a, &b, &mut c, 5).unwrap();
//! assert_eq!(c.to_string(), "0.33333");
//!
//! let hex = engine.parse("FF", 16).unwrap();
//! assert_eq!(engine.to_string_in(&hex, Notation::Base(10)).unwrap(), "255");
//! assert_eq!(engine.to_string_in(&c, Notation::Scientific).unwrap(), "3.3333e-1");
//! ```

pub mod engine;
pub mod interfaces;
pub mod numeric;

// Re-exports for convenience
pub mod prelude {
    pub use crate::engine::{create_from_config, EngineBuilder, EngineConfig, NumberEngine};
    pub use crate::interfaces::{
        CharSink, FnSink, Interrupt, InterruptFlag, LoggingSink, NeverInterrupt, NoOpSink,
        RandomSource,
    };
    pub use crate::numeric::{
        GeneratorSeed, LineWriter, Notation, Number, NumericError, NumericResult, PrintOptions,
    };
}
