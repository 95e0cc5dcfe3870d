// ============================================================================
// Addition and Subtraction
// Signed limb-aligned add/subtract with magnitude ordering
// ============================================================================

use super::limb::{add_digits, compare, sub_digits};
use super::number::Number;
use std::cmp::Ordering;

/// `c = a + b` when `sub` is false, `c = a - b` otherwise.
///
/// The result scale is the larger operand scale. `c` must already be sized
/// for the result; see `add_req`.
pub(crate) fn add_sub(a: &Number, b: &Number, c: &mut Number, sub: bool) {
    if b.is_zero() {
        c.copy_from(a);
        return;
    }

    if a.is_zero() {
        c.copy_from(b);
        c.neg = b.neg != sub;
        return;
    }

    // Subtraction is addition of the negated operand.
    let b_neg = b.neg != sub;
    let do_sub = a.neg != b_neg;

    let a_int = a.int_limbs();
    let b_int = b.int_limbs();
    let max_int = a_int.max(b_int);

    let ardx = a.rdx;
    let brdx = b.rdx;
    let min_rdx = ardx.min(brdx);
    let max_rdx = ardx.max(brdx);
    let diff = max_rdx - min_rdx;

    let mut max_len = max_int + max_rdx;

    let do_rev_sub = if do_sub {
        if a_int != b_int {
            a_int < b_int
        } else if ardx > brdx {
            compare(&a.limbs[diff..], &b.limbs, b.limbs.len()) == Ordering::Less
        } else {
            compare(&a.limbs, &b.limbs[diff..], a.limbs.len()) != Ordering::Greater
        }
    } else {
        // Carry out of the top limb
        max_len += 1;
        a_int < b_int
    };

    let (mut left, mut right) = if do_rev_sub {
        (&b.limbs[..], &a.limbs[..])
    } else {
        (&a.limbs[..], &b.limbs[..])
    };

    c.limbs.clear();
    c.limbs.resize(max_len, 0);

    let mut carry = false;
    let mut offset = 0;

    // Low limbs present in only one operand.
    if diff > 0 {
        if (ardx > brdx) != do_rev_sub {
            c.limbs[..diff].copy_from_slice(&left[..diff]);
            left = &left[diff..];
        } else {
            if do_sub {
                for (dst, &limb) in c.limbs[..diff].iter_mut().zip(right) {
                    *dst = sub_digits(0, limb, &mut carry);
                }
            } else {
                c.limbs[..diff].copy_from_slice(&right[..diff]);
            }
            right = &right[diff..];
        }
        offset = diff;
    }

    let min_len = left.len().min(right.len());
    let dst = &mut c.limbs[offset..];

    if do_sub {
        for i in 0..min_len {
            dst[i] = sub_digits(left[i], right[i], &mut carry);
        }
        for i in min_len..left.len() {
            dst[i] = sub_digits(left[i], 0, &mut carry);
        }
    } else {
        for i in 0..min_len {
            dst[i] = add_digits(left[i], right[i], &mut carry);
        }
        for i in min_len..left.len() {
            dst[i] = add_digits(left[i], 0, &mut carry);
        }
        dst[left.len()] = add_digits(0, 0, &mut carry);
    }

    debug_assert!(!carry);

    c.rdx = max_rdx;
    c.neg = a.neg != (do_sub && do_rev_sub);
    c.scale = a.scale.max(b.scale);
    c.clean();
}
