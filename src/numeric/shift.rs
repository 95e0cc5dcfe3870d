// ============================================================================
// Decimal Shifts
// Multiply or divide by powers of ten by moving digits across limbs
// ============================================================================

use super::errors::NumericResult;
use super::limb::{grow, rdx_for, BigLimb, Limb, LIMB_DIGITS, POW10};
use super::number::Number;

impl Number {
    /// Multiply by `10^places` in place.
    ///
    /// Fractional digits are consumed first; the scale never goes below zero.
    pub(crate) fn shift_left(&mut self, places: usize) -> NumericResult<()> {
        if places == 0 {
            return Ok(());
        }

        if places > self.scale {
            grow(rdx_for(places - self.scale), self.limbs.len())?;
        }

        if self.is_zero() {
            self.scale = self.scale.saturating_sub(places);
            return Ok(());
        }

        let dig = places % LIMB_DIGITS;
        let mut places_rdx = rdx_for(places);

        // With a fraction present, only whole limbs beyond the fraction are
        // inserted, plus one more when the in-limb shift crosses a boundary.
        if self.scale > 0 {
            let nrdx = self.rdx;
            if nrdx >= places_rdx {
                let modulo = match self.scale % LIMB_DIGITS {
                    0 => LIMB_DIGITS,
                    m => m,
                };
                let revdig = if dig > 0 { LIMB_DIGITS - dig } else { 0 };
                places_rdx = usize::from(modulo + revdig > LIMB_DIGITS);
            } else {
                places_rdx -= nrdx;
            }
        }

        if places_rdx > 0 {
            self.expand(grow(self.limbs.len(), places_rdx)?)?;
            self.limbs
                .insert_many(0, std::iter::repeat_n(0, places_rdx));
        }

        if places > self.scale {
            self.scale = 0;
            self.rdx = 0;
        } else {
            self.scale -= places;
            self.rdx = rdx_for(self.scale);
        }

        if dig != 0 {
            self.shift_digits_right(LIMB_DIGITS - dig);
        }

        self.clean();
        Ok(())
    }

    /// Divide by `10^places` in place; the scale grows by `places`.
    pub(crate) fn shift_right(&mut self, places: usize) -> NumericResult<()> {
        if places == 0 {
            return Ok(());
        }

        if self.is_zero() {
            self.scale = grow(self.scale, places)?;
            self.expand(rdx_for(self.scale))?;
            return Ok(());
        }

        let dig = places % LIMB_DIGITS;
        let scale = self.scale;
        let new_scale = grow(scale, places)?;

        let scale_mod = match scale % LIMB_DIGITS {
            0 => LIMB_DIGITS,
            m => m,
        };

        let int_len = self.int_limbs();
        let places_rdx = rdx_for(places);

        let (expand, extra_rdx) = if scale_mod + dig > LIMB_DIGITS {
            (places_rdx - 1, 1)
        } else {
            (places_rdx, 0)
        };

        // High zero limbs are only needed once the integer limbs run out.
        let expand = expand.saturating_sub(int_len);

        self.extend(extra_rdx * LIMB_DIGITS)?;
        self.expand(grow(expand, self.limbs.len())?)?;
        let len = self.limbs.len();
        self.limbs.resize(len + expand, 0);

        if dig != 0 {
            self.shift_digits_right(dig);
        }

        self.scale = new_scale;
        self.rdx = rdx_for(new_scale);
        self.clean();

        debug_assert!(self.is_canonical());
        Ok(())
    }

    /// Shift every digit right by `dig < 9` places across the whole limb
    /// array. Digits shifted out of the lowest limb must be zero.
    pub(crate) fn shift_digits_right(&mut self, dig: usize) {
        debug_assert!(dig < LIMB_DIGITS);

        let pow = POW10[dig];
        let mul = POW10[LIMB_DIGITS - dig];
        let mut carry: BigLimb = 0;

        for limb in self.limbs.iter_mut().rev() {
            let value = *limb as BigLimb;
            let temp = carry * mul;
            carry = value % pow;
            *limb = (value / pow + temp) as Limb;
        }

        debug_assert_eq!(carry, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> Number {
        s.parse().unwrap()
    }

    #[test]
    fn test_shift_left_integer() {
        let mut n = num("5");
        n.shift_left(1).unwrap();
        assert_eq!(n, num("50"));
        assert_eq!(n.scale(), 0);

        let mut m = num("123");
        m.shift_left(20).unwrap();
        assert_eq!(m.to_string(), "12300000000000000000000");
    }

    #[test]
    fn test_shift_left_consumes_fraction() {
        let mut n = num("0.5");
        n.shift_left(1).unwrap();
        assert_eq!(n, num("5"));
        assert_eq!(n.scale(), 0);

        let mut m = num("1.23456");
        m.shift_left(2).unwrap();
        assert_eq!(m.to_string(), "123.456");
        assert_eq!(m.scale(), 3);

        let mut p = num("0.0000000001");
        p.shift_left(12).unwrap();
        assert_eq!(p.to_string(), "100");
        assert!(p.is_canonical());
    }

    #[test]
    fn test_shift_left_zero_keeps_scale_floor() {
        let mut z = Number::zero_with_scale(3);
        z.shift_left(5).unwrap();
        assert!(z.is_zero());
        assert_eq!(z.scale(), 0);
    }

    #[test]
    fn test_shift_right() {
        let mut n = num("5");
        n.shift_right(1).unwrap();
        assert_eq!(n.to_string(), "0.5");
        assert_eq!(n.scale(), 1);

        let mut m = num("5");
        m.shift_right(18).unwrap();
        assert_eq!(m.to_string(), "0.000000000000000005");
        assert!(m.is_canonical());

        let mut p = num("123.45");
        p.shift_right(3).unwrap();
        assert_eq!(p.to_string(), "0.12345");
        assert_eq!(p.scale(), 5);
    }

    #[test]
    fn test_shift_right_zero_grows_scale() {
        let mut z = Number::new();
        z.shift_right(4).unwrap();
        assert!(z.is_zero());
        assert_eq!(z.scale(), 4);
    }

    #[test]
    fn test_shift_round_trip() {
        let mut n = num("987654321.123456789");
        n.shift_right(13).unwrap();
        n.shift_left(13).unwrap();
        assert_eq!(n, num("987654321.123456789"));
    }
}
