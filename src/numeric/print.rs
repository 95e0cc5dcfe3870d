// ============================================================================
// Number Printing
// Decimal, arbitrary-base and exponent output through a line-wrapping writer
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::limb::{log10, BigLimb, Limb, LIMB_DIGITS, POW10, RADIX};
use super::multiply::mul_limb;
use super::number::{Limbs, Number};
use crate::interfaces::{CharSink, Interrupt};

/// Largest output base.
pub const MAX_OBASE: u32 = RADIX as u32;

/// Bases up to this one print a single `0-9A-F` character per digit.
const MAX_HEX_BASE: u32 = 16;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// How a number is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Positional notation in the given base.
    Base(u32),
    /// Decimal mantissa with one integer digit and a power-of-ten exponent.
    Scientific,
    /// Like `Scientific` with the exponent a multiple of three.
    Engineering,
}

impl Default for Notation {
    fn default() -> Self {
        Notation::Base(10)
    }
}

/// Per-call printing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    pub notation: Notation,
    /// Print `0` before the radix point of a pure fraction.
    pub leading_zero: bool,
    /// Terminate the output with a newline.
    pub newline: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            notation: Notation::default(),
            leading_zero: true,
            newline: false,
        }
    }
}

// ============================================================================
// Line Writer
// ============================================================================

/// Character sink adapter that breaks long lines with a backslash-newline.
///
/// Once `line_len - 1` characters sit on the current line the next wrappable
/// character is preceded by `\` and a newline. A `line_len` of zero disables
/// wrapping. The column survives across prints so consecutive numbers on one
/// line wrap together.
#[derive(Debug)]
pub struct LineWriter<S> {
    sink: S,
    line_len: usize,
    nchars: usize,
}

impl<S: CharSink> LineWriter<S> {
    pub fn new(sink: S, line_len: usize) -> Self {
        Self {
            sink,
            line_len,
            nchars: 0,
        }
    }

    /// Writer that never wraps.
    pub fn unwrapped(sink: S) -> Self {
        Self::new(sink, 0)
    }

    /// Characters on the current line.
    #[inline]
    pub fn column(&self) -> usize {
        self.nchars
    }

    #[inline]
    pub fn line_len(&self) -> usize {
        self.line_len
    }

    pub fn into_inner(self) -> S {
        self.sink
    }

    fn emit(&mut self, c: char) {
        self.sink.put_char(c);
        if c == '\n' {
            self.nchars = 0;
        } else {
            self.nchars += 1;
        }
    }

    fn wrap_if_full(&mut self) {
        if self.line_len != 0 && self.nchars >= self.line_len - 1 {
            self.emit('\\');
            self.emit('\n');
        }
    }

    /// Write `c`, wrapping first when `bslash` allows it.
    pub fn put(&mut self, c: char, bslash: bool) {
        if c != '\n' && bslash {
            self.wrap_if_full();
        }
        self.emit(c);
    }
}

// ============================================================================
// Base Cache
// ============================================================================

/// The largest power of an output base that fits a limb.
///
/// `pow = base^exp <= RADIX` with `exp` maximal, and `rem = RADIX - pow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCache {
    base: u32,
    pow: BigLimb,
    exp: usize,
    rem: BigLimb,
}

impl BaseCache {
    /// Compute the entry for `base`.
    pub fn for_base(base: u32) -> Self {
        debug_assert!(base >= 2);
        let b = base as BigLimb;
        let mut pow: BigLimb = 1;
        let mut exp = 0;
        while pow * b <= RADIX {
            pow *= b;
            exp += 1;
        }
        Self {
            base,
            pow,
            exp,
            rem: RADIX - pow,
        }
    }

    /// Refresh the entry when `base` differs from the cached one.
    pub fn update(&mut self, base: u32) -> &Self {
        if self.base != base {
            tracing::trace!(base, "recomputing output base power");
            *self = Self::for_base(base);
        }
        self
    }

    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    #[inline]
    pub fn pow(&self) -> BigLimb {
        self.pow
    }

    #[inline]
    pub fn exp(&self) -> usize {
        self.exp
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Print `n` according to `opts`.
///
/// # Errors
/// - `InvalidInput` for a base outside `2..=MAX_OBASE`; nothing is written
/// - `Interrupted` if `int` fires during base conversion
pub fn print<S, I>(
    n: &Number,
    opts: PrintOptions,
    cache: &mut BaseCache,
    out: &mut LineWriter<S>,
    int: &I,
) -> NumericResult<()>
where
    S: CharSink,
    I: Interrupt + ?Sized,
{
    if let Notation::Base(base) = opts.notation {
        if !(2..=MAX_OBASE).contains(&base) {
            return Err(NumericError::InvalidInput);
        }
    }

    out.wrap_if_full();

    let exponent = !matches!(opts.notation, Notation::Base(_));
    print_head(n, opts.leading_zero && !exponent, opts.newline, out);

    if !n.is_zero() {
        match opts.notation {
            Notation::Base(10) => print_decimal(n, opts.newline, out),
            Notation::Scientific => print_exponent(n, false, opts.newline, out)?,
            Notation::Engineering => print_exponent(n, true, opts.newline, out)?,
            Notation::Base(base) => {
                let cache = *cache.update(base);
                print_base(n, &cache, opts.newline, out, int)?;
            },
        }
    }

    if opts.newline {
        out.put('\n', false);
    }
    Ok(())
}

/// Base-10 rendering with a leading zero and no wrapping.
pub fn to_decimal_string(n: &Number) -> String {
    let mut out = LineWriter::unwrapped(String::with_capacity(n.digit_len() + 3));
    print_head(n, true, false, &mut out);
    if !n.is_zero() {
        print_decimal(n, false, &mut out);
    }
    out.into_inner()
}

/// Unwrapped rendering in any notation.
///
/// # Errors
/// Returns `InvalidInput` for an unsupported base.
pub fn to_string_with<I>(n: &Number, notation: Notation, int: &I) -> NumericResult<String>
where
    I: Interrupt + ?Sized,
{
    let mut out = LineWriter::unwrapped(String::new());
    let opts = PrintOptions {
        notation,
        ..PrintOptions::default()
    };
    print(n, opts, &mut BaseCache::default(), &mut out, int)?;
    Ok(out.into_inner())
}

/// Sign, optional leading zero, and the lone `0` of a zero value.
fn print_head<S: CharSink>(n: &Number, leading_zero: bool, newline: bool, out: &mut LineWriter<S>) {
    if n.is_zero() {
        print_hex(0, false, !newline, out);
        return;
    }
    if n.neg {
        out.put('-', true);
    }
    if leading_zero && n.rdx == n.limbs.len() {
        print_hex(0, false, !newline, out);
    }
}

// ============================================================================
// Digit Emitters
// ============================================================================

/// One `0-9A-F` character, preceded by the radix point when `rdx` is set.
fn print_hex<S: CharSink>(dig: BigLimb, rdx: bool, bslash: bool, out: &mut LineWriter<S>) {
    if rdx {
        out.put('.', true);
    }
    out.put(HEX_DIGITS[dig as usize] as char, bslash);
}

/// A zero-padded decimal group of `width` characters for large bases.
///
/// The group is separated from the previous one by a space, or by the radix
/// point when `rdx` is set.
fn print_digits<S: CharSink>(
    mut dig: BigLimb,
    width: usize,
    rdx: bool,
    bslash: bool,
    out: &mut LineWriter<S>,
) {
    out.put(if rdx { '.' } else { ' ' }, true);

    let mut pow = POW10[width - 1];
    for exp in 0..width {
        let d = dig / pow;
        dig -= d * pow;
        out.put((b'0' + d as u8) as char, bslash || exp != width - 1);
        pow /= 10;
    }
}

/// Emit one digit of an arbitrary base.
fn print_digit<S: CharSink>(
    dig: BigLimb,
    width: usize,
    rdx: bool,
    bslash: bool,
    out: &mut LineWriter<S>,
) {
    if width == 1 {
        print_hex(dig, rdx, bslash, out);
    } else {
        print_digits(dig, width, rdx, bslash, out);
    }
}

// ============================================================================
// Decimal
// ============================================================================

/// Limb-by-limb decimal output, skipping leading zeros of the integer part
/// and stopping at the last digit of the scale.
fn print_decimal<S: CharSink>(n: &Number, newline: bool, out: &mut LineWriter<S>) {
    let rdx = n.rdx;
    let mut zero = true;
    let mut buffer = [0 as BigLimb; LIMB_DIGITS];

    for i in (0..n.limbs.len()).rev() {
        let irdx = i + 1 == rdx;
        zero &= !irdx;

        let temp = match n.scale % LIMB_DIGITS {
            m if i == 0 && m != 0 => LIMB_DIGITS - m,
            _ => 0,
        };

        let mut limb = n.limbs[i] as BigLimb;
        for slot in buffer.iter_mut() {
            *slot = limb % 10;
            limb /= 10;
        }

        for j in (temp..LIMB_DIGITS).rev() {
            let print_rdx = irdx && j == LIMB_DIGITS - 1;
            zero = zero && buffer[j] == 0;
            if !zero {
                print_hex(buffer[j], print_rdx, !newline || j > temp || i != 0, out);
            }
        }
    }
}

/// Scientific or engineering output: a shifted mantissa, `e`, and the signed
/// decimal exponent.
fn print_exponent<S: CharSink>(
    n: &Number,
    eng: bool,
    newline: bool,
    out: &mut LineWriter<S>,
) -> NumericResult<()> {
    let neg = n.limbs.len() <= n.rdx;
    let mut temp = n.clone();

    let places = if neg {
        let idx = n.non_zero_len() - 1;
        let top = n.limbs[idx] as BigLimb;

        let mut places = 1 + (0..LIMB_DIGITS)
            .rev()
            .take_while(|&i| POW10[i] > top)
            .count();
        places += (n.rdx - (idx + 1)) * LIMB_DIGITS;

        if eng && places % 3 != 0 {
            places += 3 - places % 3;
        }
        temp.shift_left(places)?;
        places
    } else {
        let mut places = n.int_digits() - 1;
        if eng {
            places -= places % 3;
        }
        temp.shift_right(places)?;
        places
    };

    print_decimal(&temp, newline, out);
    out.put('e', !newline);

    if places == 0 {
        print_hex(0, false, !newline, out);
        return Ok(());
    }

    if neg {
        out.put('-', true);
    }
    print_decimal(&Number::from_u64(places as u64), newline, out);
    Ok(())
}

// ============================================================================
// Arbitrary Base
// ============================================================================

/// Convert limbs `idx..` from radix `RADIX` to radix `pow` by sweeping from
/// the most significant limb down, carrying overflow upwards.
fn print_fixup(limbs: &mut Limbs, rem: BigLimb, pow: BigLimb, idx: usize) {
    let mut len = limbs.len() - idx;
    if len < 2 {
        return;
    }

    for i in (1..len).rev() {
        let hi = limbs[idx + i] as BigLimb;
        let mut acc = hi * rem + limbs[idx + i - 1] as BigLimb;
        limbs[idx + i - 1] = (acc % pow) as Limb;
        acc /= pow;
        acc += hi;

        if acc >= RADIX {
            if i == len - 1 {
                len += 1;
                limbs.push(0);
            }
            limbs[idx + i + 1] += (acc / RADIX) as Limb;
            acc %= RADIX;
        }

        limbs[idx + i] = acc as Limb;
    }
}

/// Re-express integer limbs in radix `pow`.
fn print_prepare(limbs: &mut Limbs, rem: BigLimb, pow: BigLimb) {
    let mut i = 0;
    while i < limbs.len() {
        print_fixup(limbs, rem, pow, i);
        i += 1;
    }

    let pow = pow as Limb;
    let mut i = 0;
    while i < limbs.len() {
        if limbs[i] >= pow {
            if i + 1 == limbs.len() {
                limbs.push(0);
            }
            limbs[i + 1] += limbs[i] / pow;
            limbs[i] %= pow;
        }
        i += 1;
    }
}

fn print_base<S, I>(
    n: &Number,
    cache: &BaseCache,
    newline: bool,
    out: &mut LineWriter<S>,
    int: &I,
) -> NumericResult<()>
where
    S: CharSink,
    I: Interrupt + ?Sized,
{
    let width = if cache.base <= MAX_HEX_BASE {
        1
    } else {
        log10((cache.base - 1) as BigLimb)
    };

    let mut abs = n.clone();
    abs.neg = false;
    print_num(&abs, cache, width, newline, out, int)
}

/// Positional output of a non-negative value in `cache.base`.
fn print_num<S, I>(
    n: &Number,
    cache: &BaseCache,
    width: usize,
    newline: bool,
    out: &mut LineWriter<S>,
    int: &I,
) -> NumericResult<()>
where
    S: CharSink,
    I: Interrupt + ?Sized,
{
    let base = cache.base as BigLimb;

    let mut intp = n.clone();
    intp.truncate(intp.scale);

    let mut fracp1 = Number::with_capacity(n.rdx);
    super::binary::sub(n, &intp, &mut fracp1)?;

    let mut limbs = std::mem::take(&mut intp.limbs);
    if cache.rem != 0 {
        print_prepare(&mut limbs, cache.rem, cache.pow);
    }

    let mut stack: Vec<BigLimb> = Vec::with_capacity(limbs.len() * cache.exp);
    for (i, &limb) in limbs.iter().enumerate() {
        int.check()?;

        let last = i + 1 == limbs.len();
        let mut acc = limb as BigLimb;
        let mut j = 0;
        while j < cache.exp && (!last || acc != 0) {
            let dig = if j != cache.exp - 1 {
                let dig = acc % base;
                acc /= base;
                dig
            } else {
                std::mem::take(&mut acc)
            };
            debug_assert!(dig < base);
            stack.push(dig);
            j += 1;
        }
        debug_assert_eq!(acc, 0);
    }

    for (i, &dig) in stack.iter().rev().enumerate() {
        let bslash = !newline || n.scale != 0 || i + 1 != stack.len();
        print_digit(dig, width, false, bslash, out);
    }

    if n.scale == 0 {
        return Ok(());
    }

    // Emit fraction digits until base^k has more decimal digits than the
    // scale.
    let mut place = Number::one();
    let mut next_place = Number::new();
    let mut fracp2 = Number::with_capacity(fracp1.limbs.len() + 1);
    let mut digit = Number::new();
    let mut radix = true;

    loop {
        let idigits = place.int_digits();
        if idigits > n.scale {
            break;
        }
        int.check()?;

        mul_limb(&fracp1, base, &mut fracp2);
        let dig = fracp2.int_to_u64();

        digit.set_u64(dig);
        super::binary::sub(&fracp2, &digit, &mut fracp1)?;

        print_digit(dig, width, radix, !newline || idigits != n.scale, out);

        mul_limb(&place, base, &mut next_place);
        std::mem::swap(&mut place, &mut next_place);
        radix = false;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{InterruptFlag, NeverInterrupt};

    fn num(s: &str) -> Number {
        s.parse().unwrap()
    }

    fn render(n: &Number, notation: Notation, leading_zero: bool) -> String {
        let mut out = LineWriter::unwrapped(String::new());
        let opts = PrintOptions {
            notation,
            leading_zero,
            newline: false,
        };
        print(n, opts, &mut BaseCache::default(), &mut out, &NeverInterrupt).unwrap();
        out.into_inner()
    }

    fn in_base(s: &str, base: u32) -> String {
        render(&num(s), Notation::Base(base), false)
    }

    #[test]
    fn test_decimal() {
        assert_eq!(to_decimal_string(&num("123.450")), "123.450");
        assert_eq!(to_decimal_string(&num("-0.050")), "-0.050");
        assert_eq!(to_decimal_string(&num("1000000000")), "1000000000");
        assert_eq!(to_decimal_string(&num("1.000000000")), "1.000000000");
        assert_eq!(to_decimal_string(&num("0.000")), "0");
        assert_eq!(
            to_decimal_string(&num("0.000000000000000001")),
            "0.000000000000000001"
        );
    }

    #[test]
    fn test_leading_zero_switch() {
        assert_eq!(render(&num("-0.25"), Notation::Base(10), false), "-.25");
        assert_eq!(render(&num("-0.25"), Notation::Base(10), true), "-0.25");
        assert_eq!(render(&num("1.25"), Notation::Base(10), false), "1.25");
    }

    #[test]
    fn test_hex_and_binary() {
        assert_eq!(in_base("255", 16), "FF");
        assert_eq!(in_base("-255", 16), "-FF");
        assert_eq!(in_base("5", 2), "101");
        assert_eq!(in_base("0.5", 16), ".8");
        assert_eq!(in_base("10.7", 16), "A.B");
        assert_eq!(in_base("0", 16), "0");
    }

    #[test]
    fn test_multi_limb_conversion() {
        // 3^20
        assert_eq!(in_base("3486784401", 3), format!("1{}", "0".repeat(20)));
        // 2^80 - 1
        assert_eq!(
            in_base("1208925819614629174706175", 16),
            "F".repeat(20)
        );
    }

    #[test]
    fn test_large_base_groups() {
        assert_eq!(in_base("123456", 1000), " 123 456");
        assert_eq!(in_base("1.5", 100), " 01.50");
        assert_eq!(in_base("35", 36), " 35");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(render(&num("12345"), Notation::Scientific, true), "1.2345e4");
        assert_eq!(render(&num("1.5"), Notation::Scientific, true), "1.5e0");
        assert_eq!(render(&num("0.00123"), Notation::Scientific, true), "1.23e-3");
        assert_eq!(render(&num("-0.0123"), Notation::Scientific, true), "-1.23e-2");
    }

    #[test]
    fn test_engineering() {
        assert_eq!(render(&num("12345"), Notation::Engineering, true), "12.345e3");
        assert_eq!(render(&num("0.0123"), Notation::Engineering, true), "12.3e-3");
        assert_eq!(render(&num("0.00123"), Notation::Engineering, true), "1.23e-3");
    }

    #[test]
    fn test_line_wrapping() {
        let n = num("123456789");
        let mut out = LineWriter::new(String::new(), 5);
        let opts = PrintOptions::default();
        print(&n, opts, &mut BaseCache::default(), &mut out, &NeverInterrupt).unwrap();
        assert_eq!(out.into_inner(), "1234\\\n5678\\\n9");

        let mut out = LineWriter::new(String::new(), 5);
        let opts = PrintOptions {
            newline: true,
            ..PrintOptions::default()
        };
        print(&n, opts, &mut BaseCache::default(), &mut out, &NeverInterrupt).unwrap();
        assert_eq!(out.into_inner(), "1234\\\n56789\n");
    }

    #[test]
    fn test_invalid_base() {
        let mut out = LineWriter::unwrapped(String::new());
        let opts = PrintOptions {
            notation: Notation::Base(1),
            ..PrintOptions::default()
        };
        let res = print(&num("5"), opts, &mut BaseCache::default(), &mut out, &NeverInterrupt);
        assert_eq!(res, Err(NumericError::InvalidInput));
        assert!(out.into_inner().is_empty());
    }

    #[test]
    fn test_base_cache() {
        let c = BaseCache::for_base(2);
        assert_eq!(c.pow(), 536_870_912);
        assert_eq!(c.exp(), 29);

        let c = BaseCache::for_base(10);
        assert_eq!(c.pow(), RADIX);
        assert_eq!(c.rem, 0);

        let mut cache = BaseCache::default();
        assert_eq!(cache.update(16).base(), 16);
        assert_eq!(cache.update(16).exp(), 7);
    }

    #[test]
    fn test_interrupted_conversion() {
        let flag = InterruptFlag::new();
        flag.raise();
        let mut out = LineWriter::unwrapped(String::new());
        let opts = PrintOptions {
            notation: Notation::Base(16),
            ..PrintOptions::default()
        };
        let res = print(&num("255"), opts, &mut BaseCache::default(), &mut out, &flag);
        assert_eq!(res, Err(NumericError::Interrupted));
    }
}
