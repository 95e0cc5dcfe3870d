// ============================================================================
// Limb Primitives
// Single-limb and limb-array arithmetic in radix 10^9
// ============================================================================

use std::cmp::Ordering;

/// One base-`RADIX` digit of a number.
pub type Limb = u32;

/// Accumulator wide enough to hold the product of two limbs.
pub type BigLimb = u64;

/// Decimal digits stored per limb.
pub const LIMB_DIGITS: usize = 9;

/// Per-limb modulus: the largest power of ten whose square fits a `BigLimb`.
pub const RADIX: BigLimb = 1_000_000_000;

/// Inline limb slots before a number spills to the heap.
pub const DEF_SIZE: usize = 8;

/// Operand length (in limbs) at which multiplication switches to Karatsuba.
pub const KARATSUBA_LEN: usize = 32;

/// Limbs needed to hold any `u64`.
pub(crate) const BIGDIG_LIMBS: usize = 3;

/// Powers of ten up to `RADIX`.
pub(crate) const POW10: [BigLimb; LIMB_DIGITS + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// Fractional limbs needed for `scale` decimal places.
#[inline]
pub(crate) const fn rdx_for(scale: usize) -> usize {
    scale.div_ceil(LIMB_DIGITS)
}

/// Number of decimal digits in `i`; zero has none.
#[inline]
pub(crate) fn log10(mut i: BigLimb) -> usize {
    let mut len = 0;
    while i != 0 {
        i /= 10;
        len += 1;
    }
    len
}

/// Leading zero digits in a limb.
#[inline]
pub(crate) fn zero_digits(limb: Limb) -> usize {
    LIMB_DIGITS - log10(limb as BigLimb)
}

/// Add two limbs and an incoming carry.
#[inline]
pub(crate) fn add_digits(a: Limb, b: Limb, carry: &mut bool) -> Limb {
    let mut sum = a + b + *carry as Limb;
    *carry = sum as BigLimb >= RADIX;
    if *carry {
        sum -= RADIX as Limb;
    }
    sum
}

/// Subtract `b` and an incoming borrow from `a`.
#[inline]
pub(crate) fn sub_digits(a: Limb, b: Limb, carry: &mut bool) -> Limb {
    let b = b + *carry as Limb;
    *carry = a < b;
    if *carry {
        a + RADIX as Limb - b
    } else {
        a - b
    }
}

/// `a += b`, propagating the final carry into the rest of `a`.
pub(crate) fn add_arrays(a: &mut [Limb], b: &[Limb]) {
    let mut carry = false;
    for (x, &y) in a.iter_mut().zip(b) {
        *x = add_digits(*x, y, &mut carry);
    }
    let mut i = b.len();
    while carry {
        a[i] = add_digits(a[i], 0, &mut carry);
        i += 1;
    }
}

/// `a -= b`, propagating the final borrow into the rest of `a`.
///
/// The value held by `a` must not be smaller than `b`.
pub(crate) fn sub_arrays(a: &mut [Limb], b: &[Limb]) {
    let mut carry = false;
    for (x, &y) in a.iter_mut().zip(b) {
        *x = sub_digits(*x, y, &mut carry);
    }
    let mut i = b.len();
    while carry {
        a[i] = sub_digits(a[i], 0, &mut carry);
        i += 1;
    }
}

/// Compare the low `len` limbs of two arrays, most significant first.
pub(crate) fn compare(a: &[Limb], b: &[Limb], len: usize) -> Ordering {
    for i in (0..len).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Whether any limb in the slice is non-zero.
#[inline]
pub(crate) fn any_nonzero(a: &[Limb]) -> bool {
    a.iter().rev().any(|&limb| limb != 0)
}

/// Checked size growth; sizes that wrap are a numeric overflow.
#[inline]
pub(crate) fn grow(a: usize, b: usize) -> super::NumericResult<usize> {
    a.checked_add(b).ok_or(super::NumericError::Overflow)
}
