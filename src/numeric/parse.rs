// ============================================================================
// Literal Parsing
// Decimal fast path and generic base conversion from text
// ============================================================================

use super::binary::{add, div};
use super::errors::{NumericError, NumericResult};
use super::limb::{rdx_for, BigLimb, Limb, LIMB_DIGITS, POW10, RADIX};
use super::multiply::mul_limb;
use super::number::Number;
use crate::interfaces::Interrupt;

/// Smallest accepted input base.
pub const MIN_BASE: u32 = 2;

/// Largest input base: every digit and upper-case letter is meaningful.
pub const MAX_IBASE: u32 = 36;

/// Whether `val` is a well-formed literal: digits and `A`-`Z` with at most one
/// radix point.
pub fn is_valid_literal(val: &str) -> bool {
    let mut dot = false;
    for c in val.bytes() {
        match c {
            b'.' if dot => return false,
            b'.' => dot = true,
            b'0'..=b'9' | b'A'..=b'Z' => {},
            _ => return false,
        }
    }
    !val.is_empty()
}

/// Digit value of one character.
///
/// With `clamp` a letter at or above `base` reads as `base - 1`.
fn parse_char(c: u8, base: u32, clamp: bool) -> BigLimb {
    if c.is_ascii_uppercase() {
        let v = (c - b'A') as u32 + 10;
        if clamp && v >= base {
            (base - 1) as BigLimb
        } else {
            v as BigLimb
        }
    } else {
        (c - b'0') as BigLimb
    }
}

/// Parse an unsigned literal in `base`.
///
/// A literal of a single character is always read as though the base were
/// [`MAX_IBASE`].
///
/// # Errors
/// - `InvalidInput` for a malformed literal or a base outside `2..=36`
/// - `Interrupted` if `int` fires during a long conversion
pub fn parse<I>(val: &str, base: u32, clamp: bool, int: &I) -> NumericResult<Number>
where
    I: Interrupt + ?Sized,
{
    if !(MIN_BASE..=MAX_IBASE).contains(&base) || !is_valid_literal(val) {
        return Err(NumericError::InvalidInput);
    }

    let bytes = val.as_bytes();
    if bytes.len() == 1 {
        let c = bytes[0];
        if c == b'.' {
            return Ok(Number::new());
        }
        return Ok(Number::from_u64(parse_char(c, MAX_IBASE, clamp)));
    }

    if base == 10 {
        parse_decimal(bytes, clamp)
    } else {
        parse_base(bytes, base, clamp, int)
    }
}

/// Pack decimal digits straight into limbs, least significant first.
///
/// Letters are worth 9 when clamped and their letter value otherwise; an
/// unclamped letter may carry into the next limb.
fn parse_decimal(val: &[u8], clamp: bool) -> NumericResult<Number> {
    let start = val.iter().take_while(|&&c| c == b'0').count();
    let val = &val[start..];

    let mut n = Number::new();
    if val.is_empty() {
        return Ok(n);
    }

    let len = val.len();
    let dot = val.iter().position(|&c| c == b'.');
    let scale = dot.map_or(0, |pos| len - pos - 1);
    let zero = val.iter().all(|&c| c == b'0' || c == b'.');

    if zero {
        n.set_zero(scale);
        return Ok(n);
    }

    let digits = len - usize::from(dot.is_some());
    let pad = match scale % LIMB_DIGITS {
        0 => 0,
        m => LIMB_DIGITS - m,
    };
    let nlimbs = (digits + (LIMB_DIGITS - 1) + pad) / LIMB_DIGITS;

    n.expand(nlimbs + usize::from(!clamp))?;
    n.limbs.resize(nlimbs + usize::from(!clamp), 0);
    n.rdx = rdx_for(scale);
    n.scale = scale;

    let mut exp = pad;
    let mut pow = POW10[pad];

    for &c in val.iter().rev() {
        if c == b'.' {
            continue;
        }

        let idx = exp / LIMB_DIGITS;
        let d = if c.is_ascii_uppercase() {
            if clamp {
                9
            } else {
                (c - b'A') as BigLimb + 10
            }
        } else {
            (c - b'0') as BigLimb
        };

        let dig = n.limbs[idx] as BigLimb + d * pow;
        if dig >= RADIX {
            n.limbs[idx + 1] = (dig / RADIX) as Limb;
            n.limbs[idx] = (dig % RADIX) as Limb;
        } else {
            n.limbs[idx] = dig as Limb;
        }

        pow = if (exp + 1) % LIMB_DIGITS == 0 { 1 } else { pow * 10 };
        exp += 1;
    }

    n.clean();
    Ok(n)
}

/// Generic base conversion.
///
/// The integer part accumulates by multiply-then-add. The fraction builds a
/// numerator and the matching power of the base, divides at twice the digit
/// count and keeps exactly as many decimal places as there were digits.
fn parse_base<I>(val: &[u8], base: u32, clamp: bool, int: &I) -> NumericResult<Number>
where
    I: Interrupt + ?Sized,
{
    let mut n = Number::new();
    if val.iter().all(|&c| c == b'.' || c == b'0') {
        return Ok(n);
    }

    let base_limb = base as BigLimb;
    let mut digit = Number::new();
    let mut mult = Number::new();

    let dot = val.iter().position(|&c| c == b'.');
    let (int_part, frac_part) = match dot {
        Some(pos) => (&val[..pos], Some(&val[pos + 1..])),
        None => (val, None),
    };

    for &c in int_part {
        int.check()?;
        mul_limb(&n, base_limb, &mut mult);
        digit.set_u64(parse_char(c, base, clamp));
        add(&mult, &digit, &mut n)?;
    }

    let Some(frac) = frac_part else {
        return Ok(n);
    };

    let mut numer = Number::new();
    let mut denom = Number::one();
    let mut next = Number::new();

    for &c in frac {
        int.check()?;
        mul_limb(&numer, base_limb, &mut mult);
        digit.set_u64(parse_char(c, base, clamp));
        add(&mult, &digit, &mut numer)?;

        mul_limb(&denom, base_limb, &mut next);
        std::mem::swap(&mut denom, &mut next);
    }

    let digs = frac.len();
    let mut fraction = Number::new();
    div(&numer, &denom, &mut fraction, digs * 2, int)?;
    fraction.truncate(digs);

    let whole = std::mem::take(&mut n);
    add(&whole, &fraction, &mut n)?;

    if n.is_zero() {
        n.set_zero(0);
    } else if n.scale < digs {
        n.extend(digs - n.scale)?;
    }
    Ok(n)
}
