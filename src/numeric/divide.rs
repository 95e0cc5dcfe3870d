// ============================================================================
// Division and Remainder
// Long division with a one-limb quotient estimate per step
// ============================================================================

use super::add_sub::add_sub;
use super::binary::{add_req, div_req};
use super::errors::{NumericError, NumericResult};
use super::limb::{
    any_nonzero, compare, grow, log10, rdx_for, sub_arrays, BigLimb, Limb, LIMB_DIGITS, RADIX,
};
use super::multiply::{mul_general, mul_limb};
use super::number::Number;
use crate::interfaces::Interrupt;
use std::cmp::Ordering;

/// Divisor top limbs at or below this are normalized before dividing.
const NORMALIZE_BELOW: BigLimb = 1 << 16;

/// `c = |a| / b` for a single non-zero limb, returning the remainder.
pub(crate) fn div_limb(a: &Number, b: Limb, c: &mut Number) -> BigLimb {
    debug_assert!(b != 0);

    let b = b as BigLimb;
    c.limbs.clear();
    c.limbs.resize(a.limbs.len(), 0);

    let mut carry: BigLimb = 0;
    for i in (0..a.limbs.len()).rev() {
        let value = a.limbs[i] as BigLimb + carry * RADIX;
        c.limbs[i] = (value / b) as Limb;
        carry = value % b;
    }

    c.rdx = a.rdx;
    c.scale = a.scale;
    c.neg = false;
    c.clean();
    carry
}

/// Compare the window `a[..=len]` against the `len`-limb divisor.
#[inline]
fn div_cmp(a: &[Limb], b: &[Limb], len: usize) -> Ordering {
    if a[len] != 0 {
        Ordering::Greater
    } else {
        compare(a, b, len)
    }
}

/// Scale both operands so the divisor's top limb has a full nine digits.
fn div_extend(a: &mut Number, b: &mut Number, divisor: BigLimb) -> NumericResult<()> {
    let pow = LIMB_DIGITS - log10(divisor);
    a.shift_left(pow)?;
    b.shift_left(pow)
}

/// Long division of prepared operands.
///
/// `b` is an integer strictly shorter than `a`; `a` carries enough
/// fractional limbs for `scale`. The quotient takes `a`'s radix position.
fn div_long<I>(
    a: &mut Number,
    b: &mut Number,
    c: &mut Number,
    scale: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    debug_assert!(b.limbs.len() < a.limbs.len());

    let c_rdx = a.rdx;
    let c_scale = a.scale;

    let mut divisor = b.limbs[b.limbs.len() - 1] as BigLimb;
    let realnonzero = if b.limbs.len() > 1 && any_nonzero(&b.limbs[..b.limbs.len() - 1]) {
        if divisor <= NORMALIZE_BELOW {
            div_extend(a, b, divisor)?;

            let len2 = a.limbs.len().max(b.limbs.len()) + 1;
            if len2 > a.limbs.len() {
                a.expand(len2)?;
                a.limbs.resize(len2, 0);
            }

            divisor = b.limbs[b.limbs.len() - 1] as BigLimb;
            any_nonzero(&b.limbs[..b.limbs.len() - 1])
        } else {
            true
        }
    } else {
        false
    };

    // Round the estimate divisor up so quotient guesses never overshoot.
    divisor += realnonzero as BigLimb;

    let len = b.limbs.len();
    let realend = a.limbs.len() - len;

    c.set_zero(0);
    c.expand(a.limbs.len())?;
    c.limbs.resize(a.limbs.len(), 0);
    c.rdx = c_rdx;
    c.scale = c_scale;

    debug_assert!(c_scale >= scale);
    let rdx = c_rdx - rdx_for(scale);

    let mut cpb = Number::with_capacity(len + 1);

    for i in (rdx..realend).rev() {
        int.check()?;

        let n = &mut a.limbs[i..];
        let mut result: BigLimb = 0;
        let mut cmp = div_cmp(n, &b.limbs, len);

        while cmp != Ordering::Less {
            let dividend = n[len] as BigLimb * RADIX + n[len - 1] as BigLimb;
            let mut quotient = dividend / divisor;

            if quotient <= 1 {
                quotient = 1;
                sub_arrays(n, &b.limbs);
            } else {
                debug_assert!(quotient <= RADIX);
                mul_limb(b, quotient, &mut cpb);
                sub_arrays(n, &cpb.limbs);
            }

            result += quotient;
            debug_assert!(result <= RADIX);

            cmp = if realnonzero {
                div_cmp(n, &b.limbs, len)
            } else {
                Ordering::Less
            };
        }

        debug_assert!(result < RADIX);
        c.limbs[i] = result as Limb;
    }

    c.clean();
    Ok(())
}

/// `c = a / b` truncated to `scale` fractional digits.
pub(crate) fn div_general<I>(
    a: &Number,
    b: &Number,
    c: &mut Number,
    scale: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    if b.is_zero() {
        return Err(NumericError::DivisionByZero);
    }

    if a.is_zero() {
        c.set_zero(scale);
        return Ok(());
    }

    if b.is_one() {
        c.copy_from(a);
        return c.retire_mul(scale, a.neg, b.neg);
    }

    if a.rdx == 0 && b.rdx == 0 && b.limbs.len() == 1 && scale == 0 {
        div_limb(a, b.limbs[0], c);
        return c.retire_mul(scale, a.neg, b.neg);
    }

    let mut cpa = Number::with_capacity(div_req(a, b, scale)?);
    cpa.copy_from(a);
    let mut cpb = b.clone();

    let len = b.limbs.len();
    if len > cpa.limbs.len() {
        cpa.expand(grow(len, 2)?)?;
        cpa.extend((len - cpa.limbs.len()) * LIMB_DIGITS)?;
    }

    // Shift the dividend by the divisor's fractional limbs so the divisor
    // can be treated as an integer.
    cpa.scale = cpa.rdx * LIMB_DIGITS;
    cpa.extend(b.scale)?;
    let cpardx = cpa.rdx - rdx_for(b.scale);
    cpa.rdx = cpardx;
    cpa.scale = cpardx * LIMB_DIGITS;

    if scale > cpa.scale {
        cpa.extend(scale)?;
        cpa.scale = cpa.rdx * LIMB_DIGITS;
    }

    cpa.expand(grow(cpa.limbs.len(), 1)?)?;
    cpa.limbs.push(0);

    if cpb.rdx == cpb.limbs.len() {
        let len = cpb.non_zero_len();
        cpb.limbs.truncate(len);
    }
    cpb.scale = 0;
    cpb.rdx = 0;

    div_long(&mut cpa, &mut cpb, c, scale, int)?;
    c.retire_mul(scale, a.neg, b.neg)
}

/// Quotient `c` at `scale` and remainder `d = a - c × b` at scale `ts`.
///
/// The remainder carries the dividend's sign.
pub(crate) fn rem_general<I>(
    a: &Number,
    b: &Number,
    c: &mut Number,
    d: &mut Number,
    scale: usize,
    ts: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    if b.is_zero() {
        return Err(NumericError::DivisionByZero);
    }

    if a.is_zero() {
        c.set_zero(ts);
        d.set_zero(ts);
        return Ok(());
    }

    div_general(a, b, c, scale, int)?;

    let realscale = if scale != 0 { grow(ts, 1)? } else { 0 };

    let mut temp = Number::with_capacity(d.capacity());
    mul_general(c, b, &mut temp, realscale, int)?;

    d.expand(add_req(a, &temp)?)?;
    add_sub(a, &temp, d, true);

    if ts > d.scale && !d.is_zero() {
        d.extend(ts - d.scale)?;
    }

    let neg = d.neg;
    d.retire_mul(ts, a.neg, b.neg)?;
    d.neg = !d.is_zero() && neg;
    Ok(())
}

/// Quotient and remainder with the single-limb integer fast path.
///
/// On the fast path the quotient is negative when exactly one operand is,
/// and the remainder takes the dividend's sign.
pub(crate) fn divmod_general<I>(
    a: &Number,
    b: &Number,
    q: &mut Number,
    r: &mut Number,
    scale: usize,
    ts: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    if !a.is_zero() && a.rdx == 0 && b.rdx == 0 && b.limbs.len() == 1 && scale == 0 {
        let rem = div_limb(a, b.limbs[0], q);
        q.scale = 0;
        q.neg = !q.is_zero() && a.neg != b.neg;

        r.set_u64(rem);
        r.neg = !r.is_zero() && a.neg;
        return Ok(());
    }

    rem_general(a, b, q, r, scale, ts, int)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NeverInterrupt;

    fn num(s: &str) -> Number {
        s.parse().unwrap()
    }

    fn div(a: &str, b: &str, scale: usize) -> Number {
        let mut c = Number::new();
        div_general(&num(a), &num(b), &mut c, scale, &NeverInterrupt).unwrap();
        c
    }

    fn rem(a: &str, b: &str, scale: usize) -> Number {
        let (a, b) = (num(a), num(b));
        let ts = (scale + b.scale()).max(a.scale());
        let mut q = Number::new();
        let mut d = Number::new();
        rem_general(&a, &b, &mut q, &mut d, scale, ts, &NeverInterrupt).unwrap();
        d
    }

    #[test]
    fn test_div_limb() {
        let mut c = Number::new();
        let r = div_limb(&num("1000000000000000007"), 10, &mut c);
        assert_eq!(r, 7);
        assert_eq!(c.to_string(), "100000000000000000");
    }

    #[test]
    fn test_div_basic() {
        assert_eq!(div("1", "3", 5).to_string(), "0.33333");
        assert_eq!(div("10", "4", 2).to_string(), "2.50");
        assert_eq!(div("-10", "4", 0).to_string(), "-2");
        assert_eq!(div("7", "-7", 3).to_string(), "-1.000");
    }

    #[test]
    fn test_div_multi_limb_divisor() {
        assert_eq!(
            div("100000000000000000000", "123456789012", 3).to_string(),
            "810000007.292"
        );
        assert_eq!(
            div("2", "1000000001", 20).to_string(),
            "0.00000000199999999800"
        );
    }

    #[test]
    fn test_div_divisor_longer_than_dividend() {
        assert_eq!(
            div("1", "12345678901234567890", 30).to_string(),
            "0.000000000000000000081000000729"
        );
    }

    #[test]
    fn test_div_fractional_divisor() {
        assert_eq!(
            div("98765432109876543210.5", "0.000000000123", 5).to_string(),
            "802970992763223928540650406504.06504"
        );
    }

    #[test]
    fn test_div_by_zero() {
        let mut c = Number::new();
        assert_eq!(
            div_general(&num("1"), &Number::new(), &mut c, 0, &NeverInterrupt),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_div_zero_dividend() {
        let c = div("0", "5", 4);
        assert!(c.is_zero());
        assert_eq!(c.scale(), 4);
    }

    #[test]
    fn test_rem() {
        assert_eq!(rem("7", "3", 0).to_string(), "1");
        assert_eq!(rem("-7", "3", 0).to_string(), "-1");
        assert_eq!(rem("7", "-3", 0).to_string(), "1");
        assert_eq!(rem("5.5", "2", 0).to_string(), "1.5");
        assert!(rem("6", "3", 0).is_zero());
    }

    #[test]
    fn test_rem_with_scale() {
        // 10 / 3 at scale 2 is 3.33; 10 - 9.99 = 0.01
        let d = rem("10", "3", 2);
        assert_eq!(d.to_string(), "0.01");
        assert_eq!(d.scale(), 2);
    }

    #[test]
    fn test_divmod_fast_path_signs() {
        let (a, b) = (num("-7"), num("2"));
        let mut q = Number::new();
        let mut r = Number::new();
        divmod_general(&a, &b, &mut q, &mut r, 0, 0, &NeverInterrupt).unwrap();
        assert_eq!(q.to_string(), "-3");
        assert_eq!(r.to_string(), "-1");

        let (a, b) = (num("7"), num("-2"));
        divmod_general(&a, &b, &mut q, &mut r, 0, 0, &NeverInterrupt).unwrap();
        assert_eq!(q.to_string(), "-3");
        assert_eq!(r.to_string(), "1");
    }
}
