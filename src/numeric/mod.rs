// ============================================================================
// Numeric Module
// Arbitrary-precision scaled decimal arithmetic
// ============================================================================
//
// This module provides:
// - Number: signed decimal with unbounded integer and fractional digits
// - Destination-passing operations (add, mul, div, pow, sqrt, ...)
// - Literal parsing and printing in bases 2 and up
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - No floating-point operations
// - All arithmetic returns Result (no panics)
// - Every failed operation leaves its destination as zero
// - Long loops poll an Interrupt so callers can cancel

mod add_sub;
mod binary;
mod divide;
mod errors;
mod limb;
mod multiply;
mod number;
mod parse;
mod power;
mod print;
mod rand_bridge;
mod shift;

pub use binary::{add, div, divmod, lshift, mul, places, pow, rem, rshift, sub};
pub use errors::{NumericError, NumericResult};
pub use limb::{BigLimb, Limb, DEF_SIZE, KARATSUBA_LEN, LIMB_DIGITS, RADIX};
pub use number::Number;
pub use parse::{is_valid_literal, parse, MAX_IBASE, MIN_BASE};
pub use power::{modexp, sqrt};
pub use print::{
    print, to_decimal_string, to_string_with, BaseCache, LineWriter, Notation, PrintOptions,
    MAX_OBASE,
};
pub use rand_bridge::{from_seed, irand, to_seed, GeneratorSeed, SEED_SCALE};
