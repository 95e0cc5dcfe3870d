// ============================================================================
// Number Engine
// Interpreter-facing façade over the numeric operations
// ============================================================================

use crate::engine::config::EngineConfig;
use crate::interfaces::{CharSink, Interrupt, NeverInterrupt, RandomSource};
use crate::numeric::{
    self, BaseCache, GeneratorSeed, LineWriter, Notation, Number, NumericError, NumericResult,
    PrintOptions,
};
use std::sync::Arc;

/// Arithmetic engine bound to one configuration and interrupt source
///
/// Every operation writes into a caller-supplied destination. A failed
/// operation leaves its destination as zero and is logged at debug level.
pub struct NumberEngine {
    /// Formatting and parsing switches
    config: EngineConfig,

    /// Polled by every long-running operation
    interrupt: Arc<dyn Interrupt>,

    /// Largest power of the last output base that fits a limb
    base_cache: BaseCache,
}

impl NumberEngine {
    /// Create a new engine
    pub fn new(config: EngineConfig, interrupt: Arc<dyn Interrupt>) -> Self {
        Self {
            config,
            interrupt,
            base_cache: BaseCache::default(),
        }
    }

    /// Engine with the default configuration that is never interrupted
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default(), Arc::new(NeverInterrupt))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn interrupt(&self) -> &Arc<dyn Interrupt> {
        &self.interrupt
    }

    fn logged<T>(op: &'static str, result: NumericResult<T>) -> NumericResult<T> {
        if let Err(err) = &result {
            tracing::debug!(op, %err, "numeric operation failed");
        }
        result
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Parse an unsigned literal in `base`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a malformed literal or a base above the
    /// configured maximum.
    pub fn parse(&self, text: &str, base: u32) -> NumericResult<Number> {
        let result = if base > self.config.max_ibase {
            Err(NumericError::InvalidInput)
        } else {
            numeric::parse(text, base, self.config.digit_clamp, &*self.interrupt)
        };
        Self::logged("parse", result)
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    pub fn add(&self, a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
        Self::logged("add", numeric::add(a, b, c))
    }

    pub fn sub(&self, a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
        Self::logged("sub", numeric::sub(a, b, c))
    }

    pub fn mul(&self, a: &Number, b: &Number, c: &mut Number, scale: usize) -> NumericResult<()> {
        Self::logged("mul", numeric::mul(a, b, c, scale, &*self.interrupt))
    }

    pub fn div(&self, a: &Number, b: &Number, c: &mut Number, scale: usize) -> NumericResult<()> {
        Self::logged("div", numeric::div(a, b, c, scale, &*self.interrupt))
    }

    pub fn rem(&self, a: &Number, b: &Number, c: &mut Number, scale: usize) -> NumericResult<()> {
        Self::logged("rem", numeric::rem(a, b, c, scale, &*self.interrupt))
    }

    pub fn divmod(
        &self,
        a: &Number,
        b: &Number,
        q: &mut Number,
        r: &mut Number,
        scale: usize,
    ) -> NumericResult<()> {
        Self::logged("divmod", numeric::divmod(a, b, q, r, scale, &*self.interrupt))
    }

    pub fn pow(&self, a: &Number, b: &Number, c: &mut Number, scale: usize) -> NumericResult<()> {
        Self::logged("pow", numeric::pow(a, b, c, scale, &*self.interrupt))
    }

    pub fn sqrt(&self, a: &Number, b: &mut Number, scale: usize) -> NumericResult<()> {
        Self::logged("sqrt", numeric::sqrt(a, b, scale, &*self.interrupt))
    }

    pub fn modexp(&self, a: &Number, b: &Number, c: &Number, d: &mut Number) -> NumericResult<()> {
        Self::logged("modexp", numeric::modexp(a, b, c, d, &*self.interrupt))
    }

    pub fn places(&self, a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
        Self::logged("places", numeric::places(a, b, c))
    }

    pub fn lshift(&self, a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
        Self::logged("lshift", numeric::lshift(a, b, c))
    }

    pub fn rshift(&self, a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
        Self::logged("rshift", numeric::rshift(a, b, c))
    }

    // ========================================================================
    // Random Generator Bridge
    // ========================================================================

    pub fn irand<R>(&self, a: &Number, b: &mut Number, rng: &mut R) -> NumericResult<()>
    where
        R: RandomSource + ?Sized,
    {
        Self::logged("irand", numeric::irand(a, b, rng))
    }

    pub fn to_seed(&self, n: &Number) -> NumericResult<GeneratorSeed> {
        Self::logged("to_seed", numeric::to_seed(n))
    }

    pub fn from_seed(&self, seed: &GeneratorSeed) -> NumericResult<Number> {
        Self::logged("from_seed", numeric::from_seed(seed))
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Wrap `sink` with the configured line length.
    pub fn writer<S: CharSink>(&self, sink: S) -> LineWriter<S> {
        LineWriter::new(sink, self.config.line_length)
    }

    /// Print `n` in `notation`, optionally followed by a newline.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an output base outside `2..=max_obase`.
    pub fn print<S: CharSink>(
        &mut self,
        n: &Number,
        notation: Notation,
        newline: bool,
        out: &mut LineWriter<S>,
    ) -> NumericResult<()> {
        let result = match notation {
            Notation::Base(base) if base > self.config.max_obase => Err(NumericError::InvalidInput),
            _ => {
                let opts = PrintOptions {
                    notation,
                    leading_zero: self.config.leading_zero,
                    newline,
                };
                numeric::print(n, opts, &mut self.base_cache, out, &*self.interrupt)
            },
        };
        Self::logged("print", result)
    }

    /// Render `n` on a single unwrapped line.
    pub fn to_string_in(&mut self, n: &Number, notation: Notation) -> NumericResult<String> {
        let mut out = LineWriter::unwrapped(String::new());
        self.print(n, notation, false, &mut out)?;
        Ok(out.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::InterruptFlag;

    fn engine() -> NumberEngine {
        NumberEngine::new(EngineConfig::library(), Arc::new(NeverInterrupt))
    }

    #[test]
    fn test_parse_and_print_round_trip() {
        let mut engine = engine();
        let n = engine.parse("FF.8", 16).unwrap();
        assert_eq!(engine.to_string_in(&n, Notation::Base(10)).unwrap(), "255.5");
        assert_eq!(engine.to_string_in(&n, Notation::Base(16)).unwrap(), "FF.8");
    }

    #[test]
    fn test_parse_respects_limits() {
        let engine = NumberEngine::new(EngineConfig::posix(), Arc::new(NeverInterrupt));
        assert_eq!(engine.parse("10", 20), Err(NumericError::InvalidInput));
        assert_eq!(engine.parse("1G", 16).unwrap().to_string(), "31");
    }

    #[test]
    fn test_arithmetic_scenarios() {
        let engine = engine();
        let mut c = Number::new();

        engine
            .div(&engine.parse("1", 10).unwrap(), &engine.parse("3", 10).unwrap(), &mut c, 5)
            .unwrap();
        assert_eq!(c.to_string(), "0.33333");

        let big = engine.parse("999999999999", 10).unwrap();
        engine.mul(&big, &big, &mut c, 0).unwrap();
        assert_eq!(c.to_string(), "999999999998000000000001");

        let mut q = Number::new();
        let mut r = Number::new();
        engine
            .divmod(&"-7".parse().unwrap(), &"2".parse().unwrap(), &mut q, &mut r, 0)
            .unwrap();
        assert_eq!(q.to_string(), "-3");
        assert_eq!(r.to_string(), "-1");
    }

    #[test]
    fn test_failure_zeroes_destination() {
        let engine = engine();
        let mut c: Number = "5".parse().unwrap();
        assert_eq!(
            engine.sqrt(&"-1".parse().unwrap(), &mut c, 2),
            Err(NumericError::Negative)
        );
        assert!(c.is_zero());
    }

    #[test]
    fn test_interrupt_is_honoured() {
        let flag = InterruptFlag::new();
        let engine = NumberEngine::new(EngineConfig::library(), Arc::new(flag.clone()));
        let a: Number = "3".repeat(500).parse().unwrap();
        let mut c = Number::new();

        flag.raise();
        assert_eq!(engine.mul(&a, &a, &mut c, 0), Err(NumericError::Interrupted));

        flag.reset();
        assert!(engine.mul(&a, &a, &mut c, 0).is_ok());
    }

    #[test]
    fn test_print_wraps_and_checks_base() {
        let mut engine = NumberEngine::new(
            EngineConfig::new().with_line_length(6).with_max_obase(16),
            Arc::new(NeverInterrupt),
        );
        let n: Number = "1234567890".parse().unwrap();

        let mut out = engine.writer(String::new());
        engine.print(&n, Notation::Base(10), true, &mut out).unwrap();
        assert_eq!(out.into_inner(), "12345\\\n67890\n");

        let mut out = engine.writer(String::new());
        assert_eq!(
            engine.print(&n, Notation::Base(17), false, &mut out),
            Err(NumericError::InvalidInput)
        );
    }

    #[test]
    fn test_leading_zero_follows_config() {
        let n: Number = "0.5".parse().unwrap();

        let mut posix = NumberEngine::new(EngineConfig::posix(), Arc::new(NeverInterrupt));
        assert_eq!(posix.to_string_in(&n, Notation::Base(10)).unwrap(), ".5");

        let mut library = engine();
        assert_eq!(library.to_string_in(&n, Notation::Base(10)).unwrap(), "0.5");
    }

    #[test]
    fn test_seed_bridge() {
        let engine = engine();
        let n: Number = "5.5".parse().unwrap();
        let seed = engine.to_seed(&n).unwrap();
        assert_eq!(engine.from_seed(&seed).unwrap(), n);
    }
}
