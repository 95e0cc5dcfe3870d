// ============================================================================
// Multiplication
// Lattice multiplication with a Karatsuba split for long operands
// ============================================================================

use super::add_sub::add_sub;
use super::errors::NumericResult;
use super::limb::{
    add_arrays, grow, sub_arrays, BigLimb, Limb, DEF_SIZE, KARATSUBA_LEN, LIMB_DIGITS, RADIX,
};
use super::number::Number;
use crate::interfaces::Interrupt;

/// `c = |a| × b` for a single limb `b <= RADIX`. `c` takes `a`'s radix
/// position and is left non-negative.
pub(crate) fn mul_limb(a: &Number, b: BigLimb, c: &mut Number) {
    debug_assert!(b <= RADIX);

    c.limbs.clear();
    let mut carry: BigLimb = 0;
    for &limb in &a.limbs {
        let value = limb as BigLimb * b + carry;
        c.limbs.push((value % RADIX) as Limb);
        carry = value / RADIX;
    }
    debug_assert!(carry < RADIX);
    if carry != 0 {
        c.limbs.push(carry as Limb);
    }

    c.rdx = a.rdx;
    c.scale = a.scale;
    c.neg = false;
    c.clean();
}

/// Schoolbook product of two integers, summed column by column.
fn mul_simple<I>(a: &Number, b: &Number, c: &mut Number, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    debug_assert!(a.rdx == 0 && b.rdx == 0);

    let alen = a.limbs.len();
    let blen = b.limbs.len();
    let clen = grow(alen, blen)?;

    c.set_zero(0);
    c.expand(grow(clen, 1)?)?;
    c.limbs.resize(clen, 0);

    let mut sum: BigLimb = 0;
    let mut carry: BigLimb = 0;

    for i in 0..clen {
        int.check()?;

        let jstart = (i + 1).saturating_sub(blen);
        let jend = alen.min(i + 1);

        for j in jstart..jend {
            sum += a.limbs[j] as BigLimb * b.limbs[i - j] as BigLimb;
            if sum >= RADIX * RADIX {
                carry += sum / RADIX;
                sum %= RADIX;
            }
        }

        if sum >= RADIX {
            carry += sum / RADIX;
            sum %= RADIX;
        }

        c.limbs[i] = sum as Limb;
        sum = carry;
        carry = 0;
    }

    debug_assert_eq!(sum, 0);
    c.clean();
    Ok(())
}

/// Split an integer at limb `idx` into its low and high halves.
fn split(n: &Number, idx: usize) -> (Number, Number) {
    if idx < n.limbs.len() {
        let mut low = Number::with_capacity(idx);
        low.limbs.extend_from_slice(&n.limbs[..idx]);
        low.clean();

        let mut high = Number::with_capacity(n.limbs.len() - idx);
        high.limbs.extend_from_slice(&n.limbs[idx..]);
        high.clean();

        (low, high)
    } else {
        let mut low = n.clone();
        low.neg = false;
        low.clean();
        (low, Number::new())
    }
}

/// Karatsuba product of two non-negative integers.
fn karatsuba<I>(a: &Number, b: &Number, c: &mut Number, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    c.set_zero(0);

    if a.is_zero() || b.is_zero() {
        return Ok(());
    }

    let aone = a.is_one();
    if aone || b.is_one() {
        c.copy_from(if aone { b } else { a });
        c.neg = a.neg != b.neg;
        return Ok(());
    }

    if a.limbs.len() < KARATSUBA_LEN || b.limbs.len() < KARATSUBA_LEN {
        return mul_simple(a, b, c, int);
    }

    int.check()?;

    let max = a.limbs.len().max(b.limbs.len()).max(DEF_SIZE);
    let max2 = max.div_ceil(2);
    tracing::trace!(max, split = max2, "karatsuba split");

    let (l1, h1) = split(a, max2);
    let (l2, h2) = split(b, max2);

    let mut m1 = Number::with_capacity(max);
    let mut m2 = Number::with_capacity(max);
    add_sub(&h1, &l1, &mut m1, true);
    add_sub(&l2, &h2, &mut m2, true);

    let total = grow(grow(max, 1)?, grow(max, 1)?)? + 1;
    c.expand(total)?;
    c.limbs.resize(total, 0);

    let mut z = Number::with_capacity(max + 1);

    // z2 = h1 × h2 lands at B^2m and B^m
    if !h1.is_zero() && !h2.is_zero() {
        mul_general(&h1, &h2, &mut z, 0, int)?;
        add_arrays(&mut c.limbs[max2 * 2..], &z.limbs);
        add_arrays(&mut c.limbs[max2..], &z.limbs);
    }

    // z0 = l1 × l2 lands at B^m and B^0
    if !l1.is_zero() && !l2.is_zero() {
        mul_general(&l1, &l2, &mut z, 0, int)?;
        add_arrays(&mut c.limbs[max2..], &z.limbs);
        add_arrays(&mut c.limbs[..], &z.limbs);
    }

    // z1 = (h1 - l1)(l2 - h2) lands at B^m with its sign
    if !m1.is_zero() && !m2.is_zero() {
        mul_general(&m1, &m2, &mut z, 0, int)?;
        if m1.neg != m2.neg {
            sub_arrays(&mut c.limbs[max2..], &z.limbs);
        } else {
            add_arrays(&mut c.limbs[max2..], &z.limbs);
        }
    }

    c.clean();
    Ok(())
}

/// Count and remove the zero limbs at the bottom of an integer.
fn strip_low_zeros(n: &mut Number) -> usize {
    debug_assert!(n.rdx == 0 || n.is_zero());
    let zeros = n.limbs.iter().take_while(|&&limb| limb == 0).count();
    n.limbs.drain(..zeros);
    zeros
}

/// `c = a × b`, keeping `min(a.scale + b.scale, max(scale, a.scale,
/// b.scale))` fractional digits.
pub(crate) fn mul_general<I>(
    a: &Number,
    b: &Number,
    c: &mut Number,
    scale: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    c.set_zero(0);

    let realscale = a
        .scale
        .saturating_add(b.scale)
        .min(scale.max(a.scale).max(b.scale));

    // Single-limb integer operand
    if (a.limbs.len() == 1 || b.limbs.len() == 1) && a.rdx == 0 && b.rdx == 0 {
        let (dig, operand) = if a.limbs.len() == 1 {
            (a.limbs[0], b)
        } else {
            (b.limbs[0], a)
        };

        mul_limb(operand, dig as BigLimb, c);

        if c.is_zero() {
            c.scale = realscale;
        } else {
            c.neg = a.neg != b.neg;
        }
        return Ok(());
    }

    // Work on integer copies; the radix point is restored afterwards.
    let mut cpa = a.clone();
    let mut cpb = b.clone();
    cpa.neg = false;
    cpb.neg = false;

    let ardx = cpa.rdx * LIMB_DIGITS;
    cpa.shift_left(ardx)?;
    let brdx = cpb.rdx * LIMB_DIGITS;
    cpb.shift_left(brdx)?;

    let azero = strip_low_zeros(&mut cpa);
    let bzero = strip_low_zeros(&mut cpb);
    cpa.clean();
    cpb.clean();

    karatsuba(&cpa, &cpb, c, int)?;

    let zero = grow(azero, bzero)?;
    if zero > 0 && !c.is_zero() {
        c.expand(grow(c.limbs.len(), zero)?)?;
        c.limbs.insert_many(0, std::iter::repeat_n(0, zero));
    }

    c.shift_right(grow(ardx, brdx)?)?;
    c.retire_mul(realscale, a.neg, b.neg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NeverInterrupt;

    fn num(s: &str) -> Number {
        s.parse().unwrap()
    }

    fn mul(a: &str, b: &str, scale: usize) -> Number {
        let mut c = Number::new();
        mul_general(&num(a), &num(b), &mut c, scale, &NeverInterrupt).unwrap();
        c
    }

    /// 10^(9k) - 1: k limbs of 999999999.
    fn nines(limbs: usize) -> Number {
        "9".repeat(limbs * LIMB_DIGITS).parse().unwrap()
    }

    #[test]
    fn test_mul_limb() {
        let mut c = Number::new();
        mul_limb(&num("999999999999999999"), 1_000_000_000, &mut c);
        assert_eq!(c.to_string(), "999999999999999999000000000");
    }

    #[test]
    fn test_mul_integers() {
        assert_eq!(mul("12", "-3", 0).to_string(), "-36");
        assert_eq!(mul("-12", "-3", 0).to_string(), "36");
        assert_eq!(
            mul("123456789012345678901234567890", "987654321098765432109876543210", 0)
                .to_string(),
            "121932631137021795226185032733622923332237463801111263526900"
        );
    }

    #[test]
    fn test_mul_scale_rule() {
        let c = mul("1.25", "2.5", 0);
        assert_eq!(c.to_string(), "3.12");
        assert_eq!(c.scale(), 2);

        let d = mul("1.25", "2.5", 10);
        assert_eq!(d.to_string(), "3.125");
        assert_eq!(d.scale(), 3);

        let e = mul("0.5", "4", 0);
        assert_eq!(e.scale(), 1);
        assert_eq!(e.to_string(), "2.0");
    }

    #[test]
    fn test_mul_zero() {
        let c = mul("0", "123.45", 5);
        assert!(c.is_zero());
        assert!(!c.is_negative());
        assert_eq!(c.scale(), 2);
    }

    #[test]
    fn test_mul_by_one_keeps_sign() {
        assert_eq!(mul("-1", "7.5", 1).to_string(), "-7.5");
        assert_eq!(mul("-1", "-7.5", 1).to_string(), "7.5");
    }

    #[test]
    fn test_karatsuba_matches_identity() {
        // (10^n - 1)^2 = 10^2n - 2·10^n + 1
        let n = nines(40);
        let mut sq = Number::new();
        mul_general(&n, &n, &mut sq, 0, &NeverInterrupt).unwrap();

        let digits = 40 * LIMB_DIGITS;
        let expected = format!("{}8{}1", "9".repeat(digits - 1), "0".repeat(digits - 1));
        assert_eq!(sq.to_string(), expected);
        assert!(sq.is_canonical());
    }

    #[test]
    fn test_karatsuba_uneven_operands() {
        let a = nines(70);
        let b = nines(35);
        let mut c = Number::new();
        mul_general(&a, &b, &mut c, 0, &NeverInterrupt).unwrap();

        // (10^x - 1)(10^y - 1) = 10^(x+y) - 10^x - 10^y + 1
        let x = 70 * LIMB_DIGITS;
        let y = 35 * LIMB_DIGITS;
        let expected = format!(
            "{}8{}{}1",
            "9".repeat(y - 1),
            "9".repeat(x - y),
            "0".repeat(y - 1)
        );
        assert_eq!(c.to_string(), expected);
    }

    #[test]
    fn test_mul_with_low_zero_limbs() {
        let c = mul("1000000000000000000.5", "2000000000", 1);
        assert_eq!(c.to_string(), "2000000000000000001000000000.0");
    }
}
