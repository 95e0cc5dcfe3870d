// ============================================================================
// Decimal Number
// Arbitrary-precision scaled decimal value stored as radix-10^9 limbs
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::limb::{
    compare, grow, rdx_for, zero_digits, BigLimb, Limb, BIGDIG_LIMBS, DEF_SIZE, LIMB_DIGITS,
    POW10, RADIX,
};
use crate::interfaces::NeverInterrupt;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

/// Limb storage: little endian, inline up to `DEF_SIZE` limbs.
pub(crate) type Limbs = SmallVec<[Limb; DEF_SIZE]>;

/// Signed decimal number with unbounded integer and fractional precision.
///
/// The value is `limbs × 10^-(9 × rdx)` where `rdx = ceil(scale / 9)` is the
/// count of fractional limbs. Digits past `scale` in the lowest fractional
/// limb are always zero.
///
/// Every public operation leaves the number *clean*:
/// - the most significant limb is non-zero, unless the number is a pure
///   fraction, in which case exactly `rdx` limbs are kept
/// - zero has no limbs, no fractional limbs and is never negative, but may
///   carry a scale
///
/// # Example
/// ```ignore
/// use decimal_engine::numeric::Number;
///
/// let a: Number = "1.50".parse()?;
/// let b = Number::from_u64(3);
/// let c = a.checked_mul(&b, 2)?;     // 4.50
/// ```
#[derive(Clone, Default)]
pub struct Number {
    pub(crate) limbs: Limbs,
    pub(crate) rdx: usize,
    pub(crate) scale: usize,
    pub(crate) neg: bool,
}

impl Number {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create zero with the default inline capacity.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create zero with room for at least `cap` limbs.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            limbs: Limbs::with_capacity(cap.max(DEF_SIZE)),
            ..Self::default()
        }
    }

    /// Zero with the given scale.
    pub fn zero_with_scale(scale: usize) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// The integer one.
    pub fn one() -> Self {
        let mut n = Self::new();
        n.limbs.push(1);
        n
    }

    /// Create from a machine integer.
    pub fn from_u64(val: u64) -> Self {
        let mut n = Self::new();
        n.set_u64(val);
        n
    }

    /// Overwrite with a machine integer at scale 0.
    pub fn set_u64(&mut self, mut val: u64) {
        self.set_zero(0);
        while val != 0 {
            self.limbs.push((val % RADIX) as Limb);
            val /= RADIX;
        }
    }

    /// Overwrite with zero at the given scale, keeping capacity.
    pub fn set_zero(&mut self, scale: usize) {
        self.limbs.clear();
        self.rdx = 0;
        self.scale = scale;
        self.neg = false;
    }

    /// Overwrite with one, keeping capacity.
    pub fn set_one(&mut self) {
        self.set_zero(0);
        self.limbs.push(1);
    }

    /// Deep copy `src` into `self`, reusing the existing allocation.
    pub fn copy_from(&mut self, src: &Number) {
        self.limbs.clear();
        self.limbs.extend_from_slice(&src.limbs);
        self.rdx = src.rdx;
        self.scale = src.scale;
        self.neg = src.neg;
    }

    /// Grow capacity to at least `req` limbs. Capacity never shrinks.
    ///
    /// # Errors
    /// Returns `AllocationFailure` if the storage cannot be allocated.
    pub fn expand(&mut self, req: usize) -> NumericResult<()> {
        let req = req.max(DEF_SIZE);
        if req > self.limbs.capacity() {
            self.limbs
                .try_reserve_exact(req - self.limbs.len())
                .map_err(|_| NumericError::AllocationFailure)?;
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Check if value is negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.neg
    }

    /// True for the integers 1 and -1.
    #[inline]
    pub(crate) fn is_one(&self) -> bool {
        self.limbs.len() == 1 && self.rdx == 0 && self.limbs[0] == 1
    }

    /// Sign test: `Less` for negative, `Equal` for zero, `Greater` otherwise.
    #[inline]
    pub fn cmp_zero(&self) -> Ordering {
        if self.is_zero() {
            Ordering::Equal
        } else if self.neg {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Decimal digits after the radix point.
    #[inline]
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Number of limbs in use.
    #[inline]
    pub fn limb_len(&self) -> usize {
        self.limbs.len()
    }

    /// Allocated limb slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.limbs.capacity()
    }

    /// Limbs holding the fractional part.
    #[inline]
    pub fn frac_limbs(&self) -> usize {
        self.rdx
    }

    /// Limbs holding the integer part.
    #[inline]
    pub fn int_limbs(&self) -> usize {
        if self.limbs.is_empty() {
            0
        } else {
            self.limbs.len() - self.rdx
        }
    }

    /// Decimal digits in the integer part.
    pub fn int_digits(&self) -> usize {
        let digits = self.int_limbs() * LIMB_DIGITS;
        if digits > 0 {
            digits - zero_digits(self.limbs[self.limbs.len() - 1])
        } else {
            0
        }
    }

    /// Significant decimal digits, counting the full scale.
    ///
    /// Pure fractions do not count the zeros between the radix point and the
    /// first non-zero digit.
    pub fn digit_len(&self) -> usize {
        if self.is_zero() {
            return if self.scale > 0 { self.scale } else { 1 };
        }

        if self.rdx == self.limbs.len() {
            let len = self.non_zero_len();
            let scale = match self.scale % LIMB_DIGITS {
                0 => LIMB_DIGITS,
                s => s,
            };
            let zero = zero_digits(self.limbs[len - 1]);
            len * LIMB_DIGITS - zero - (LIMB_DIGITS - scale)
        } else {
            self.int_digits() + self.scale
        }
    }

    /// Limb count up to and including the highest non-zero limb.
    pub(crate) fn non_zero_len(&self) -> usize {
        let mut i = self.limbs.len();
        while i > 0 && self.limbs[i - 1] == 0 {
            i -= 1;
        }
        i
    }

    /// Whether the clean-number invariants hold.
    pub(crate) fn is_canonical(&self) -> bool {
        if self.limbs.is_empty() {
            return self.rdx == 0 && !self.neg;
        }
        self.limbs.len() >= self.rdx
            && self.rdx == rdx_for(self.scale)
            && (self.limbs[self.limbs.len() - 1] != 0 || self.limbs.len() == self.rdx)
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Strip leading zero limbs, keeping at least the fractional limbs.
    pub(crate) fn clean(&mut self) {
        while let Some(&0) = self.limbs.last() {
            self.limbs.pop();
        }
        if self.limbs.is_empty() {
            self.rdx = 0;
            self.neg = false;
        } else if self.limbs.len() < self.rdx {
            self.limbs.resize(self.rdx, 0);
        }
    }

    /// Flip the sign. Zero stays unsigned.
    pub fn negate(&mut self) {
        if !self.is_zero() {
            self.neg = !self.neg;
        }
    }

    /// Drop `places` digits from the end of the fraction.
    ///
    /// `places` is clamped to the current scale.
    pub fn truncate(&mut self, places: usize) {
        let places = places.min(self.scale);
        if places == 0 {
            return;
        }

        let nrdx = self.rdx;
        let places_rdx = if nrdx > 0 {
            nrdx - rdx_for(self.scale - places)
        } else {
            0
        };

        self.scale -= places;
        self.rdx = nrdx - places_rdx;

        if !self.is_zero() {
            let pow = match self.scale % LIMB_DIGITS {
                0 => 0,
                m => LIMB_DIGITS - m,
            };
            let pow = POW10[pow] as Limb;

            self.limbs.drain(..places_rdx);
            if let Some(low) = self.limbs.first_mut() {
                *low -= *low % pow;
            }
            self.clean();
        }
    }

    /// Append `places` zero digits to the fraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `AllocationFailure` if the new size cannot be
    /// represented or allocated.
    pub fn extend(&mut self, places: usize) -> NumericResult<()> {
        if places == 0 {
            return Ok(());
        }

        let new_scale = grow(self.scale, places)?;
        if self.is_zero() {
            self.scale = new_scale;
            return Ok(());
        }

        let places_rdx = rdx_for(new_scale) - self.rdx;
        if places_rdx > 0 {
            self.expand(grow(self.limbs.len(), places_rdx)?)?;
            self.limbs
                .insert_many(0, std::iter::repeat_n(0, places_rdx));
        }

        self.rdx += places_rdx;
        self.scale = new_scale;
        Ok(())
    }

    /// Force the scale after a multiply-class operation and set the sign.
    pub(crate) fn retire_mul(&mut self, scale: usize, neg1: bool, neg2: bool) -> NumericResult<()> {
        if self.scale < scale {
            self.extend(scale - self.scale)?;
        } else {
            self.truncate(self.scale - scale);
        }
        self.clean();
        if !self.is_zero() {
            self.neg = neg1 != neg2;
        }
        Ok(())
    }

    /// The value as an integer at scale 0, or `None` if any fractional digit
    /// is non-zero.
    pub(crate) fn integer_view(&self) -> Option<Number> {
        if self.rdx == 0 {
            let mut view = self.clone();
            view.scale = 0;
            return Some(view);
        }
        if self.limbs[..self.rdx].iter().any(|&limb| limb != 0) {
            return None;
        }

        let mut view = Number::with_capacity(self.limbs.len() - self.rdx);
        view.limbs.extend_from_slice(&self.limbs[self.rdx..]);
        view.neg = self.neg;
        view.clean();
        Some(view)
    }

    // ========================================================================
    // Machine Integer Conversion
    // ========================================================================

    /// Convert the integer part to a `u64`, discarding the fraction.
    ///
    /// # Errors
    /// - `Negative` if the value is negative
    /// - `Overflow` if the value is 2^64 or more
    pub fn to_u64(&self) -> NumericResult<u64> {
        if self.neg {
            return Err(NumericError::Negative);
        }
        if self.int_limbs() > BIGDIG_LIMBS {
            return Err(NumericError::Overflow);
        }

        let mut r: u64 = 0;
        for &limb in self.limbs[self.rdx..].iter().rev() {
            r = r
                .checked_mul(RADIX)
                .and_then(|r| r.checked_add(limb as u64))
                .ok_or(NumericError::Overflow)?;
        }
        Ok(r)
    }

    /// Integer part as a `u64` for values already known to be in range.
    pub(crate) fn int_to_u64(&self) -> BigLimb {
        debug_assert!(self.int_limbs() <= BIGDIG_LIMBS);
        if self.limbs.len() <= self.rdx {
            return 0;
        }
        self.limbs[self.rdx..]
            .iter()
            .rev()
            .fold(0, |r: BigLimb, &limb| r * RADIX + limb as BigLimb)
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare two values numerically; scale does not matter.
    pub fn compare(&self, other: &Number) -> Ordering {
        if self.is_zero() {
            return if other.is_zero() {
                Ordering::Equal
            } else if other.neg {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        if other.is_zero() {
            return self.cmp_zero();
        }

        let neg = match (self.neg, other.neg) {
            (true, true) => true,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => false,
        };
        let apply_sign = |ord: Ordering| if neg { ord.reverse() } else { ord };

        let a_int = self.int_limbs();
        let b_int = other.int_limbs();
        if a_int != b_int {
            return apply_sign(a_int.cmp(&b_int));
        }

        let a_max = self.rdx > other.rdx;
        let (max_num, min_num, min, diff) = if a_max {
            (&self.limbs[..], &other.limbs[..], other.rdx, self.rdx - other.rdx)
        } else {
            (&other.limbs[..], &self.limbs[..], self.rdx, other.rdx - self.rdx)
        };

        let orient = |ord: Ordering| apply_sign(if a_max { ord } else { ord.reverse() });

        let cmp = compare(&max_num[diff..], min_num, b_int + min);
        if cmp != Ordering::Equal {
            return orient(cmp);
        }

        if max_num[..diff].iter().any(|&limb| limb != 0) {
            return orient(Ordering::Greater);
        }

        Ordering::Equal
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition. The result scale is the larger operand scale.
    ///
    /// # Errors
    /// Returns `Overflow` or `AllocationFailure` if storage cannot grow.
    pub fn checked_add(&self, rhs: &Number) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::add(self, rhs, &mut c)?;
        Ok(c)
    }

    /// Checked subtraction. The result scale is the larger operand scale.
    ///
    /// # Errors
    /// Returns `Overflow` or `AllocationFailure` if storage cannot grow.
    pub fn checked_sub(&self, rhs: &Number) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::sub(self, rhs, &mut c)?;
        Ok(c)
    }

    /// Checked multiplication.
    ///
    /// The result keeps `min(self.scale + rhs.scale, max(scale, self.scale,
    /// rhs.scale))` digits; excess digits are truncated.
    pub fn checked_mul(&self, rhs: &Number, scale: usize) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::mul(self, rhs, &mut c, scale, &NeverInterrupt)?;
        Ok(c)
    }

    /// Checked division truncated to `scale` digits.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_div(&self, rhs: &Number, scale: usize) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::div(self, rhs, &mut c, scale, &NeverInterrupt)?;
        Ok(c)
    }

    /// Checked modulus: `self - (self / rhs) × rhs`.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_rem(&self, rhs: &Number, scale: usize) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::rem(self, rhs, &mut c, scale, &NeverInterrupt)?;
        Ok(c)
    }

    /// Quotient and remainder in one pass.
    ///
    /// # Errors
    /// Returns `DivisionByZero` if `rhs` is zero.
    pub fn checked_divmod(&self, rhs: &Number, scale: usize) -> NumericResult<(Number, Number)> {
        let mut q = Number::new();
        let mut r = Number::new();
        super::binary::divmod(self, rhs, &mut q, &mut r, scale, &NeverInterrupt)?;
        Ok((q, r))
    }

    /// Raise to an integer power.
    ///
    /// # Errors
    /// - `NonInteger` if the exponent has a fractional part
    /// - `DivisionByZero` for zero raised to a negative power
    /// - `Overflow` if the exponent does not fit a machine integer
    pub fn checked_pow(&self, exponent: &Number, scale: usize) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::pow(self, exponent, &mut c, scale, &NeverInterrupt)?;
        Ok(c)
    }

    /// Square root to at least `scale` digits.
    ///
    /// # Errors
    /// Returns `Negative` for negative values.
    pub fn sqrt(&self, scale: usize) -> NumericResult<Number> {
        let mut b = Number::new();
        super::power::sqrt(self, &mut b, scale, &NeverInterrupt)?;
        Ok(b)
    }

    /// `self ^ exponent mod modulus` for integers.
    ///
    /// # Errors
    /// - `DivisionByZero` if `modulus` is zero
    /// - `Negative` if `exponent` is negative
    /// - `NonInteger` if any operand has a fractional part
    pub fn modexp(&self, exponent: &Number, modulus: &Number) -> NumericResult<Number> {
        let mut d = Number::new();
        super::power::modexp(self, exponent, modulus, &mut d, &NeverInterrupt)?;
        Ok(d)
    }

    /// Multiply by `10^places`.
    pub fn checked_shl(&self, places: &Number) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::lshift(self, places, &mut c)?;
        Ok(c)
    }

    /// Divide by `10^places`, growing the scale.
    pub fn checked_shr(&self, places: &Number) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::rshift(self, places, &mut c)?;
        Ok(c)
    }

    /// Copy truncated or extended to exactly `places` fractional digits.
    pub fn with_places(&self, places: &Number) -> NumericResult<Number> {
        let mut c = Number::new();
        super::binary::places(self, places, &mut c)?;
        Ok(c)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Number {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Number {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<u64> for Number {
    #[inline]
    fn from(val: u64) -> Self {
        Self::from_u64(val)
    }
}

impl TryFrom<&Number> for u64 {
    type Error = NumericError;

    #[inline]
    fn try_from(n: &Number) -> Result<Self, Self::Error> {
        n.to_u64()
    }
}

impl Neg for Number {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self::Output {
        self.negate();
        self
    }
}

impl Neg for &Number {
    type Output = Number;

    #[inline]
    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

// Infallible Add/Sub for ergonomics (panics if storage cannot grow - use checked_* in production)
impl Add for &Number {
    type Output = Number;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("Number addition failed")
    }
}

impl Sub for &Number {
    type Output = Number;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("Number subtraction failed")
    }
}

// ============================================================================
// Display and Debug
// ============================================================================

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number({}, len={}, rdx={}, scale={})",
            self,
            self.limbs.len(),
            self.rdx,
            self.scale
        )
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::print::to_decimal_string(self))
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl FromStr for Number {
    type Err = NumericError;

    /// Parse a base-10 literal with an optional leading `-`.
    ///
    /// # Examples
    /// - "123" -> 123
    /// - "-0.050" -> -0.050 (scale 3)
    /// - ".5" -> 0.5
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (is_negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() {
            return Err(NumericError::InvalidInput);
        }

        let mut n = super::parse::parse(digits, 10, false, &NeverInterrupt)?;
        if is_negative {
            n.negate();
        }
        Ok(n)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl Number {
    /// Convert from rust_decimal::Decimal, keeping its scale.
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        d.to_string().parse()
    }

    /// Convert to rust_decimal::Decimal.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the value has more digits than `Decimal` keeps
    /// - `Overflow` if the value is too large
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        // Decimal::MAX has 29 integer digits
        let int_digits = self.int_digits();
        if int_digits > 29 {
            return Err(NumericError::Overflow);
        }

        rust_decimal::Decimal::from_str_exact(&self.to_string()).map_err(|_| {
            if int_digits == 29 {
                NumericError::Overflow
            } else {
                NumericError::PrecisionLoss
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
