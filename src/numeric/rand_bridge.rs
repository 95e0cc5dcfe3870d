// ============================================================================
// Random Generator Bridge
// Conversions between numbers and the external generator's 128-bit seed
// ============================================================================
//
// A seed number carries the generator state in its fraction (scaled by 2^128)
// and the stream increment in its integer part (taken mod 2^128).

use super::binary::{add, div, divmod, mul, rem};
use super::errors::{NumericError, NumericResult};
use super::limb::{Limb, RADIX};
use super::number::Number;
use crate::interfaces::{NeverInterrupt, RandomSource};

/// Fractional digits of a number rebuilt from a seed.
pub const SEED_SCALE: usize = 128;

/// The four 64-bit words exchanged with the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GeneratorSeed {
    pub state_lo: u64,
    pub state_hi: u64,
    pub inc_lo: u64,
    pub inc_hi: u64,
}

fn two_pow_64() -> NumericResult<Number> {
    let mut n = Number::new();
    add(&Number::from_u64(u64::MAX), &Number::one(), &mut n)?;
    Ok(n)
}

/// `hi × 2^64 + lo`.
fn join(hi: u64, lo: u64, max: &Number) -> NumericResult<Number> {
    let mut high = Number::new();
    mul(&Number::from_u64(hi), max, &mut high, 0, &NeverInterrupt)?;
    let mut n = Number::new();
    add(&high, &Number::from_u64(lo), &mut n)?;
    Ok(n)
}

/// Split a value below 2^128 into (high, low) words.
fn split(n: &Number, max: &Number) -> NumericResult<(u64, u64)> {
    let mut q = Number::new();
    let mut r = Number::new();
    divmod(n, max, &mut q, &mut r, 0, &NeverInterrupt)?;
    Ok((q.to_u64()?, r.to_u64()?))
}

/// Derive a generator seed from a number.
///
/// The sign is ignored.
pub fn to_seed(n: &Number) -> NumericResult<GeneratorSeed> {
    let max = two_pow_64()?;
    let mut max2 = Number::new();
    mul(&max, &max, &mut max2, 0, &NeverInterrupt)?;

    let mut seed = GeneratorSeed::default();

    let mut frac = Number::with_capacity(n.rdx);
    frac.limbs.extend_from_slice(&n.limbs[..n.rdx]);
    frac.rdx = n.rdx;
    frac.scale = n.scale;
    frac.clean();

    let mut state = Number::new();
    mul(&frac, &max2, &mut state, 0, &NeverInterrupt)?;
    state.truncate(state.scale);

    if !state.is_zero() {
        (seed.state_hi, seed.state_lo) = split(&state, &max)?;
    }

    let mut intn = Number::with_capacity(n.int_limbs());
    intn.limbs.extend_from_slice(&n.limbs[n.rdx..]);
    intn.clean();

    if !intn.is_zero() {
        let mut q = Number::new();
        let mut r = Number::new();
        divmod(&intn, &max, &mut q, &mut r, 0, &NeverInterrupt)?;
        seed.inc_lo = r.to_u64()?;

        if q >= max {
            let high = std::mem::take(&mut q);
            rem(&high, &max, &mut q, 0, &NeverInterrupt)?;
        }
        seed.inc_hi = q.to_u64()?;
    }

    tracing::trace!(?seed, "number converted to generator seed");
    Ok(seed)
}

/// Rebuild the number that seeds the generator to `seed`.
///
/// The result has [`SEED_SCALE`] fractional digits.
pub fn from_seed(seed: &GeneratorSeed) -> NumericResult<Number> {
    let max = two_pow_64()?;
    let mut max2 = Number::new();
    mul(&max, &max, &mut max2, 0, &NeverInterrupt)?;

    let state = join(seed.state_hi, seed.state_lo, &max)?;
    let mut frac = Number::new();
    div(&state, &max2, &mut frac, SEED_SCALE, &NeverInterrupt)?;

    let inc = join(seed.inc_hi, seed.inc_lo, &max)?;
    let mut n = Number::new();
    add(&inc, &frac, &mut n)?;
    Ok(n)
}

/// `b` = a random integer in `[0, a)`, limb by limb.
///
/// Every limb below the top is drawn from `[0, RADIX)` and the top limb
/// from `[0, top)`. Zero and one yield zero.
///
/// # Errors
/// - `Negative` if `a` is negative
/// - `NonInteger` if `a` has a non-zero fraction
pub fn irand<R>(a: &Number, b: &mut Number, rng: &mut R) -> NumericResult<()>
where
    R: RandomSource + ?Sized,
{
    let result = irand_inner(a, b, rng);
    if result.is_err() {
        b.set_zero(0);
    }
    result
}

fn irand_inner<R>(a: &Number, b: &mut Number, rng: &mut R) -> NumericResult<()>
where
    R: RandomSource + ?Sized,
{
    if a.neg {
        return Err(NumericError::Negative);
    }

    b.set_zero(0);
    if a.is_zero() || a.is_one() {
        return Ok(());
    }

    let bound = a.integer_view().ok_or(NumericError::NonInteger)?;
    let len = bound.limbs.len() - 1;

    b.expand(bound.limbs.len())?;
    for _ in 0..len {
        b.limbs.push(rng.bounded(RADIX) as Limb);
    }

    let top = bound.limbs[len];
    if top != 1 {
        b.limbs.push(rng.bounded(top as u64) as Limb);
    }

    b.clean();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        s.parse().unwrap()
    }

    /// Always draws the largest value allowed.
    struct MaxSource(usize);

    impl RandomSource for MaxSource {
        fn bounded(&mut self, bound: u64) -> u64 {
            self.0 += 1;
            bound - 1
        }
    }

    #[test]
    fn test_seed_from_fraction_and_integer() {
        let seed = to_seed(&num("5.5")).unwrap();
        assert_eq!(
            seed,
            GeneratorSeed {
                state_lo: 0,
                state_hi: 1 << 63,
                inc_lo: 5,
                inc_hi: 0,
            }
        );
    }

    #[test]
    fn test_seed_wide_increment() {
        // 2^64 + 3
        let seed = to_seed(&num("18446744073709551619")).unwrap();
        assert_eq!(seed.inc_lo, 3);
        assert_eq!(seed.inc_hi, 1);
        assert_eq!(seed.state_lo, 0);
        assert_eq!(seed.state_hi, 0);

        // 2^128 + 7 wraps the high word
        let seed = to_seed(&num("340282366920938463463374607431768211463")).unwrap();
        assert_eq!(seed.inc_lo, 7);
        assert_eq!(seed.inc_hi, 0);
    }

    #[test]
    fn test_seed_ignores_sign() {
        assert_eq!(to_seed(&num("-5.5")).unwrap(), to_seed(&num("5.5")).unwrap());
    }

    #[test]
    fn test_from_seed() {
        let seed = GeneratorSeed {
            state_lo: 0,
            state_hi: 1 << 63,
            inc_lo: 5,
            inc_hi: 0,
        };
        let n = from_seed(&seed).unwrap();
        assert_eq!(n.scale(), SEED_SCALE);
        assert_eq!(n, num("5.5"));
        assert_eq!(to_seed(&n).unwrap(), seed);
    }

    #[test]
    fn test_seed_round_trip_full_words() {
        let seed = GeneratorSeed {
            state_lo: 0x0123_4567_89AB_CDEF,
            state_hi: 0xFEDC_BA98_7654_3210,
            inc_lo: u64::MAX,
            inc_hi: 42,
        };
        let n = from_seed(&seed).unwrap();
        assert_eq!(to_seed(&n).unwrap(), seed);
    }

    #[test]
    fn test_irand_draws_each_limb() {
        let mut rng = MaxSource(0);
        let mut b = Number::new();
        irand(&num("1000000000000"), &mut b, &mut rng).unwrap();
        assert_eq!(b.to_string(), "999999999999");
        assert_eq!(rng.0, 2);

        irand(&num("1000000000"), &mut b, &mut rng).unwrap();
        assert_eq!(b.to_string(), "999999999");
    }

    #[test]
    fn test_irand_trivial_bounds() {
        let mut rng = MaxSource(0);
        let mut b = num("12");
        irand(&num("1"), &mut b, &mut rng).unwrap();
        assert!(b.is_zero());
        irand(&Number::new(), &mut b, &mut rng).unwrap();
        assert!(b.is_zero());
        assert_eq!(rng.0, 0);
    }

    #[test]
    fn test_irand_errors() {
        let mut rng = MaxSource(0);
        let mut b = num("12");
        assert_eq!(
            irand(&num("-5"), &mut b, &mut rng),
            Err(NumericError::Negative)
        );
        assert!(b.is_zero());
        assert_eq!(
            irand(&num("2.5"), &mut b, &mut rng),
            Err(NumericError::NonInteger)
        );
    }
}
