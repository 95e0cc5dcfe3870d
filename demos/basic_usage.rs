// ============================================================================
// Basic Usage Example
// ============================================================================

use decimal_engine::prelude::*;
use std::sync::Arc;

/// Tiny xorshift generator standing in for the host's PRNG
struct XorShift(u64);

impl RandomSource for XorShift {
    fn bounded(&mut self, bound: u64) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0 % bound
    }
}

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Decimal Engine Example ===\n");

    // Create an engine with POSIX formatting and a cancellation flag
    let flag = InterruptFlag::new();
    let mut engine = EngineBuilder::posix()
        .with_env()
        .with_interrupt(Arc::new(flag.clone()))
        .build()
        .unwrap();

    println!("Line length: {}\n", engine.config().line_length);

    // Basic arithmetic at a chosen scale
    println!("=== Arithmetic ===");
    let one = engine.parse("1", 10).unwrap();
    let seven = engine.parse("7", 10).unwrap();
    let mut result = Number::new();

    engine.div(&one, &seven, &mut result, 20).unwrap();
    println!("  1 / 7 = {}", engine.to_string_in(&result, Notation::Base(10)).unwrap());

    engine.sqrt(&engine.parse("2", 10).unwrap(), &mut result, 30).unwrap();
    println!("  sqrt(2) = {}", engine.to_string_in(&result, Notation::Base(10)).unwrap());

    let two = engine.parse("2", 10).unwrap();
    engine.pow(&two, &engine.parse("100", 10).unwrap(), &mut result, 0).unwrap();
    println!("  2 ^ 100 = {}", result);

    let mut quotient = Number::new();
    let mut remainder = Number::new();
    engine
        .divmod(&result, &seven, &mut quotient, &mut remainder, 0)
        .unwrap();
    println!("  2 ^ 100 = 7 * {} + {}", quotient, remainder);

    // Bases and notations
    println!("\n=== Bases ===");
    let hex = engine.parse("DEAD.BEEF", 16).unwrap();
    for notation in [
        Notation::Base(10),
        Notation::Base(2),
        Notation::Base(1000),
        Notation::Scientific,
        Notation::Engineering,
    ] {
        println!(
            "  {:?}: {}",
            notation,
            engine.to_string_in(&hex, notation).unwrap()
        );
    }

    // Long output wraps at the configured line length
    println!("\n=== Wrapped Output ===");
    engine.pow(&two, &engine.parse("1000", 10).unwrap(), &mut result, 0).unwrap();
    let mut out = engine.writer(FnSink(|c| print!("{}", c)));
    engine.print(&result, Notation::Base(10), true, &mut out).unwrap();

    // Random integers below a bound
    println!("\n=== Random ===");
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let bound = engine.parse("1000000000000000000000", 10).unwrap();
    for _ in 0..3 {
        engine.irand(&bound, &mut result, &mut rng).unwrap();
        println!("  irand = {}", result);
    }

    // Errors leave the destination zeroed
    println!("\n=== Errors ===");
    let zero = Number::new();
    match engine.div(&one, &zero, &mut result, 10) {
        Ok(()) => println!("  unexpected success"),
        Err(e) => println!("  1 / 0 -> {} (result = {})", e, result),
    }

    let big = engine.parse(&"9".repeat(2000), 10).unwrap();
    flag.raise();
    match engine.mul(&big, &big, &mut result, 0) {
        Ok(()) => println!("  multiplication finished before the interrupt"),
        Err(e) => println!("  interrupted multiply -> {}", e),
    }
}
