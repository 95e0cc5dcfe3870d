// ============================================================================
// Binary Operation Dispatch
// Capacity planning and error discipline shared by every two-operand op
// ============================================================================
//
// Each public operation sizes its destination up front, runs the algorithm,
// and resets the destination to zero if anything fails. Operands are shared
// borrows and the destination is exclusive, so results are never aliased
// with their inputs.

use super::add_sub::add_sub;
use super::divide::{div_general, divmod_general, rem_general};
use super::errors::{NumericError, NumericResult};
use super::limb::{grow, rdx_for};
use super::multiply::mul_general;
use super::number::Number;
use super::power::pow_general;
use crate::interfaces::Interrupt;

// ============================================================================
// Capacity Requirements
// ============================================================================

/// Limbs needed for a sum or difference.
pub(crate) fn add_req(a: &Number, b: &Number) -> NumericResult<usize> {
    let rdx = a.rdx.max(b.rdx);
    let int = a.int_limbs().max(b.int_limbs());
    grow(grow(rdx, int)?, 1)
}

/// Limbs needed for a product at `scale`.
pub(crate) fn mul_req(a: &Number, b: &Number, scale: usize) -> NumericResult<usize> {
    let rdx = grow(a.rdx, b.rdx)?;
    let max = grow(rdx_for(scale).max(rdx), 1)?;
    grow(grow(a.int_limbs(), b.int_limbs())?, max)
}

/// Limbs needed for a quotient at `scale`.
pub(crate) fn div_req(a: &Number, b: &Number, scale: usize) -> NumericResult<usize> {
    let rdx = grow(a.rdx, b.rdx)?;
    let max = grow(rdx_for(scale).max(rdx), 1)?;
    grow(a.int_limbs(), max)
}

/// Initial limbs for a power; the squaring loop grows as needed.
pub(crate) fn pow_req(a: &Number, b: &Number) -> NumericResult<usize> {
    grow(grow(a.limbs.len(), b.limbs.len())?, 1)
}

/// Limbs needed by the places and shift operators.
pub(crate) fn places_req(a: &Number, b: &Number) -> NumericResult<usize> {
    grow(a.int_limbs(), b.int_limbs())
}

// ============================================================================
// Dispatch
// ============================================================================

fn binary<F>(c: &mut Number, req: NumericResult<usize>, op: F) -> NumericResult<()>
where
    F: FnOnce(&mut Number) -> NumericResult<()>,
{
    let result = req.and_then(|req| {
        tracing::trace!(req, "sizing destination");
        c.expand(req)?;
        op(c)
    });

    if result.is_err() {
        c.set_zero(0);
    }

    debug_assert!(result.is_err() || c.is_canonical());
    result
}

/// Extract a non-negative machine-integer count and copy `a` into `c`.
fn intop(a: &Number, b: &Number, c: &mut Number) -> NumericResult<usize> {
    let count = b.integer_view().ok_or(NumericError::NonInteger)?;
    c.copy_from(a);
    let count = count.to_u64()?;
    usize::try_from(count).map_err(|_| NumericError::Overflow)
}

// ============================================================================
// Operations
// ============================================================================

/// `c = a + b`. The result scale is the larger operand scale.
pub fn add(a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
    binary(c, add_req(a, b), |c| {
        add_sub(a, b, c, false);
        Ok(())
    })
}

/// `c = a - b`. The result scale is the larger operand scale.
pub fn sub(a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
    binary(c, add_req(a, b), |c| {
        add_sub(a, b, c, true);
        Ok(())
    })
}

/// `c = a × b` with `min(a.scale + b.scale, max(scale, a.scale, b.scale))`
/// fractional digits.
pub fn mul<I>(a: &Number, b: &Number, c: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    binary(c, mul_req(a, b, scale), |c| mul_general(a, b, c, scale, int))
}

/// `c = a / b` truncated to `scale` fractional digits.
///
/// # Errors
/// Returns `DivisionByZero` if `b` is zero.
pub fn div<I>(a: &Number, b: &Number, c: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    binary(c, div_req(a, b, scale), |c| div_general(a, b, c, scale, int))
}

/// `c = a mod b`, the remainder of the quotient truncated at `scale`.
///
/// The remainder has `max(scale + b.scale, a.scale)` fractional digits.
///
/// # Errors
/// Returns `DivisionByZero` if `b` is zero.
pub fn rem<I>(a: &Number, b: &Number, c: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    binary(c, div_req(a, b, scale), |c| {
        let ts = grow(scale, b.scale)?.max(a.scale);
        let mut quotient = Number::with_capacity(mul_req(a, b, ts)?);
        rem_general(a, b, &mut quotient, c, scale, ts, int)
    })
}

/// Quotient `q` at `scale` and remainder `r` in one pass.
///
/// # Errors
/// Returns `DivisionByZero` if `b` is zero. Both destinations are zeroed on
/// failure.
pub fn divmod<I>(
    a: &Number,
    b: &Number,
    q: &mut Number,
    r: &mut Number,
    scale: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    let result = grow(scale, b.scale).and_then(|ts| {
        let ts = ts.max(a.scale);
        q.expand(mul_req(a, b, ts)?)?;
        divmod_general(a, b, q, r, scale, ts, int)
    });

    if result.is_err() {
        q.set_zero(0);
        r.set_zero(0);
    }
    result
}

/// `c = a ^ b` for an integer exponent.
///
/// # Errors
/// - `NonInteger` if `b` has a non-zero fraction
/// - `DivisionByZero` for zero raised to a negative power
/// - `Overflow` if `|b|` does not fit a `u64`
pub fn pow<I>(a: &Number, b: &Number, c: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    binary(c, pow_req(a, b), |c| pow_general(a, b, c, scale, int))
}

/// `c` = `a` truncated or extended to exactly `b` fractional digits.
pub fn places(a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
    binary(c, places_req(a, b), |c| {
        let val = intop(a, b, c)?;
        if val < c.scale {
            c.truncate(c.scale - val);
        } else if val > c.scale {
            c.extend(val - c.scale)?;
        }
        Ok(())
    })
}

/// `c = a × 10^b` for a non-negative integer `b`.
pub fn lshift(a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
    binary(c, places_req(a, b), |c| {
        let val = intop(a, b, c)?;
        c.shift_left(val)
    })
}

/// `c = a / 10^b` for a non-negative integer `b`; the scale grows by `b`.
pub fn rshift(a: &Number, b: &Number, c: &mut Number) -> NumericResult<()> {
    binary(c, places_req(a, b), |c| {
        let val = intop(a, b, c)?;
        if c.is_zero() {
            return Ok(());
        }
        c.shift_right(val)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{InterruptFlag, NeverInterrupt};

    fn num(s: &str) -> Number {
        s.parse().unwrap()
    }

    #[test]
    fn test_requirements() {
        let a = num("123456789012.5");
        let b = num("7.25");
        assert_eq!(add_req(&a, &b), Ok(4));
        assert_eq!(mul_req(&a, &b, 20), Ok(2 + 1 + 3 + 1));
        assert_eq!(div_req(&a, &b, 0), Ok(2 + 2 + 1));
        assert_eq!(places_req(&a, &b), Ok(3));
    }

    #[test]
    fn test_failure_zeroes_destination() {
        let mut c = num("99.5");
        let res = div(&num("1"), &Number::new(), &mut c, 5, &NeverInterrupt);
        assert_eq!(res, Err(NumericError::DivisionByZero));
        assert!(c.is_zero());
        assert_eq!(c.scale(), 0);
    }

    #[test]
    fn test_interrupt_aborts() {
        let flag = InterruptFlag::new();
        flag.raise();

        let a: Number = "7".repeat(400).parse().unwrap();
        let mut c = Number::new();
        let res = mul(&a, &a, &mut c, 0, &flag);
        assert_eq!(res, Err(NumericError::Interrupted));
        assert!(c.is_zero());
    }

    #[test]
    fn test_divmod_identity() {
        let a = num("-1234.5678");
        let b = num("3.3");
        let mut q = Number::new();
        let mut r = Number::new();
        divmod(&a, &b, &mut q, &mut r, 0, &NeverInterrupt).unwrap();
        assert_eq!(q.to_string(), "-374");
        assert_eq!(r.to_string(), "-0.3678");

        let mut back = Number::new();
        mul(&q, &b, &mut back, 4, &NeverInterrupt).unwrap();
        let back = &back + &r;
        assert_eq!(back, a);
    }

    #[test]
    fn test_divmod_by_zero_zeroes_both() {
        let mut q = num("1");
        let mut r = num("2");
        let res = divmod(&num("5"), &Number::new(), &mut q, &mut r, 0, &NeverInterrupt);
        assert_eq!(res, Err(NumericError::DivisionByZero));
        assert!(q.is_zero() && r.is_zero());
    }

    #[test]
    fn test_rem_scale() {
        let mut c = Number::new();
        rem(&num("7.25"), &num("2"), &mut c, 0, &NeverInterrupt).unwrap();
        assert_eq!(c.to_string(), "1.25");
        assert_eq!(c.scale(), 2);
    }

    #[test]
    fn test_places() {
        let mut c = Number::new();
        places(&num("3.14159"), &num("2"), &mut c).unwrap();
        assert_eq!(c.to_string(), "3.14");

        places(&num("3.1"), &num("4"), &mut c).unwrap();
        assert_eq!(c.to_string(), "3.1000");

        assert_eq!(
            places(&num("3.1"), &num("1.5"), &mut c),
            Err(NumericError::NonInteger)
        );
        assert_eq!(
            places(&num("3.1"), &num("-1"), &mut c),
            Err(NumericError::Negative)
        );
    }

    #[test]
    fn test_shifts() {
        let mut c = Number::new();
        lshift(&num("1.234"), &num("2"), &mut c).unwrap();
        assert_eq!(c.to_string(), "123.4");

        rshift(&num("1234"), &num("6"), &mut c).unwrap();
        assert_eq!(c.to_string(), "0.001234");

        rshift(&Number::new(), &num("3"), &mut c).unwrap();
        assert!(c.is_zero());
        assert_eq!(c.scale(), 0);

        assert_eq!(
            lshift(&num("1"), &num("-2"), &mut c),
            Err(NumericError::Negative)
        );
    }

    #[test]
    fn test_pow_dispatch() {
        let mut c = Number::new();
        pow(&num("2"), &num("-3"), &mut c, 5, &NeverInterrupt).unwrap();
        assert_eq!(c.to_string(), "0.12500");

        assert_eq!(
            pow(&num("2"), &num("18446744073709551616"), &mut c, 0, &NeverInterrupt),
            Err(NumericError::Overflow)
        );
        assert!(c.is_zero());
    }
}
