// ============================================================================
// Power, Square Root and Modular Exponentiation
// ============================================================================

use super::add_sub::add_sub;
use super::binary::{add_req, divmod, rem};
use super::divide::div_general;
use super::errors::{NumericError, NumericResult};
use super::limb::{grow, Limb, LIMB_DIGITS, RADIX};
use super::multiply::mul_general;
use super::number::Number;
use crate::interfaces::Interrupt;
use smallvec::smallvec;

/// Extra digits carried by the square-root iteration beyond the target.
const SQRT_GUARD_DIGITS: usize = LIMB_DIGITS + 2;

/// `n = n × n` at `scale`.
fn square<I>(n: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    let mut out = Number::with_capacity(n.limbs.len() * 2 + 1);
    mul_general(n, n, &mut out, scale, int)?;
    *n = out;
    Ok(())
}

/// `c = 1 / a` at `scale`.
fn invert<I>(a: &Number, c: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    div_general(&Number::one(), a, c, scale, int)
}

/// `c = a ^ b` for an integer exponent `b`.
pub(crate) fn pow_general<I>(
    a: &Number,
    b: &Number,
    c: &mut Number,
    scale: usize,
    int: &I,
) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    let mut exponent = b.integer_view().ok_or(NumericError::NonInteger)?;

    if exponent.is_zero() {
        c.set_one();
        return Ok(());
    }

    if a.is_zero() {
        if exponent.neg {
            return Err(NumericError::DivisionByZero);
        }
        c.set_zero(scale);
        return Ok(());
    }

    if exponent.is_one() {
        return if exponent.neg {
            invert(a, c, scale, int)
        } else {
            c.copy_from(a);
            Ok(())
        };
    }

    let neg = exponent.neg;
    exponent.neg = false;
    let mut exp = exponent.to_u64()?;

    let realscale = if neg {
        scale
    } else {
        let max = scale.max(a.scale);
        let scalepow = (a.scale as u64)
            .checked_mul(exp)
            .ok_or(NumericError::Overflow)?;
        scalepow.min(max as u64) as usize
    };

    let mut copy = a.clone();
    let mut powrdx = a.scale;

    while exp & 1 == 0 {
        int.check()?;
        powrdx = powrdx.saturating_mul(2);
        square(&mut copy, powrdx, int)?;
        exp >>= 1;
    }

    c.copy_from(&copy);
    let mut resrdx = powrdx;

    loop {
        exp >>= 1;
        if exp == 0 {
            break;
        }
        int.check()?;

        powrdx = powrdx.saturating_mul(2);
        square(&mut copy, powrdx, int)?;

        if exp & 1 == 1 {
            resrdx = resrdx.saturating_add(powrdx);
            let mut product = Number::with_capacity(c.limbs.len() + copy.limbs.len() + 1);
            mul_general(c, &copy, &mut product, resrdx, int)?;
            *c = product;
        }
    }

    if neg {
        let base = std::mem::take(c);
        invert(&base, c, realscale, int)?;
    }

    if c.scale > realscale {
        c.truncate(c.scale - realscale);
    }
    c.clean();
    Ok(())
}

/// `b = √a` with at least `max(a.scale, scale)` fractional digits, truncated.
///
/// # Errors
/// Returns `Negative` for a negative operand.
pub fn sqrt<I>(a: &Number, b: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    let result = sqrt_inner(a, b, scale, int);
    if result.is_err() {
        b.set_zero(0);
    }
    result
}

fn sqrt_inner<I>(a: &Number, b: &mut Number, scale: usize, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    if a.neg {
        return Err(NumericError::Negative);
    }

    let realscale = a.scale.max(scale);

    if a.is_zero() {
        b.set_zero(realscale);
        return Ok(());
    }

    if a.is_one() {
        b.set_one();
        return b.extend(realscale);
    }

    // Seed with a power of ten near the root.
    let mut x0 = Number::one();
    let pow = a.int_digits();
    if pow > 0 {
        x0.limbs[0] = if pow & 1 == 1 { 2 } else { 6 };
        let pow = pow - (2 - (pow & 1));
        x0.shift_left(pow / 2)?;
    }

    let resscale = grow(realscale, SQRT_GUARD_DIGITS)?;

    let half = Number {
        limbs: smallvec![(RADIX / 2) as Limb],
        rdx: 1,
        scale: 1,
        neg: false,
    };

    let mut x1 = Number::new();
    let mut f = Number::new();
    let mut fprime = Number::new();

    while x1 != x0 {
        int.check()?;

        div_general(a, &x0, &mut f, resscale, int)?;

        fprime.expand(add_req(&x0, &f)?)?;
        add_sub(&x0, &f, &mut fprime, false);

        mul_general(&fprime, &half, &mut x1, resscale, int)?;

        std::mem::swap(&mut x0, &mut x1);
    }

    b.copy_from(&x0);
    if b.scale > realscale {
        b.truncate(b.scale - realscale);
    }
    Ok(())
}

/// `d = a ^ b mod c` for integers by square-and-multiply.
///
/// # Errors
/// - `DivisionByZero` if `c` is zero
/// - `Negative` if `b` is negative
/// - `NonInteger` if any operand has a non-zero fraction
pub fn modexp<I>(a: &Number, b: &Number, c: &Number, d: &mut Number, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    let result = modexp_inner(a, b, c, d, int);
    if result.is_err() {
        d.set_zero(0);
    }
    result
}

fn modexp_inner<I>(a: &Number, b: &Number, c: &Number, d: &mut Number, int: &I) -> NumericResult<()>
where
    I: Interrupt + ?Sized,
{
    if c.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    if b.neg {
        return Err(NumericError::Negative);
    }

    let base_int = a.integer_view().ok_or(NumericError::NonInteger)?;
    let mut exp = b.integer_view().ok_or(NumericError::NonInteger)?;
    let modulus = c.integer_view().ok_or(NumericError::NonInteger)?;

    d.expand(modulus.limbs.len())?;
    d.set_one();

    let two = Number::from_u64(2);
    let mut base = Number::with_capacity(modulus.limbs.len());
    let mut temp = Number::with_capacity(exp.limbs.len() + 1);
    let mut quotient = Number::with_capacity(exp.limbs.len());

    rem(&base_int, &modulus, &mut base, 0, int)?;

    while !exp.is_zero() {
        int.check()?;

        divmod(&exp, &two, &mut quotient, &mut temp, 0, int)?;
        std::mem::swap(&mut exp, &mut quotient);

        if temp.is_one() && !temp.neg {
            mul_general(d, &base, &mut temp, 0, int)?;
            rem(&temp, &modulus, d, 0, int)?;
        }

        mul_general(&base, &base, &mut temp, 0, int)?;
        rem(&temp, &modulus, &mut base, 0, int)?;
    }

    Ok(())
}
