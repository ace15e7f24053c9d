//! Arbitrary precision numeric values.
//!
//! Expressions treat numbers as an opaque exact value type; this module
//! wraps `dashu`'s big rationals behind that interface.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::{IBig, UBig};
use dashu::rational::RBig;
use num_traits::{One, Zero};
use thiserror::Error;

/// An exact arbitrary precision rational number.
///
/// Values are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Numeric(RBig);

/// Error returned when a numeric literal cannot be parsed.
#[derive(Clone, Debug, Error)]
#[error("malformed numeric literal")]
pub struct ParseNumericError;

impl Numeric {
    /// Creates a rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "denominator cannot be zero");
        let mut num = IBig::from(numerator);
        if denominator < 0 {
            num = -num;
        }
        Self(RBig::from_parts(num, UBig::from(denominator.unsigned_abs())))
    }

    /// Creates an integer value.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self(RBig::from_parts(IBig::from(value), UBig::ONE))
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> IBig {
        self.0.numerator().clone()
    }

    /// Returns the denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> UBig {
        self.0.denominator().clone()
    }

    /// Returns true if the denominator is 1.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        *self.0.denominator() == UBig::ONE
    }

    /// Converts to an `i64` if the value is an integer in range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            i64::try_from(self.0.numerator().clone()).ok()
        } else {
            None
        }
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the value is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Raises the value to an integer power by repeated squaring.
    ///
    /// # Panics
    ///
    /// Panics if the value is zero and the exponent is negative.
    #[must_use]
    pub fn pow(&self, exp: i64) -> Self {
        if exp == 0 {
            return Self::one();
        }
        let mut base = if exp < 0 { self.recip() } else { self.clone() };
        let mut e = exp.unsigned_abs();
        let mut acc = Self::one();
        while e > 0 {
            if e & 1 == 1 {
                acc = acc * base.clone();
            }
            base = base.clone() * base;
            e >>= 1;
        }
        acc
    }
}

impl Zero for Numeric {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == RBig::ZERO
    }
}

impl One for Numeric {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl Add for Numeric {
    type Output = Numeric;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Numeric {
    type Output = Numeric;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Numeric {
    type Output = Numeric;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Numeric {
    type Output = Numeric;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for Numeric {
    /// Formats as `n` for integers and `n/d` otherwise.
    ///
    /// This is the exact textual form the archive stores, so `Display` and
    /// `FromStr` must stay inverses of each other.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0.numerator())
        } else {
            write!(f, "{}/{}", self.0.numerator(), self.0.denominator())
        }
    }
}

impl fmt::Debug for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl FromStr for Numeric {
    type Err = ParseNumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((num, den)) => {
                let num = IBig::from_str(num).map_err(|_| ParseNumericError)?;
                let den = IBig::from_str(den).map_err(|_| ParseNumericError)?;
                if !DashuSigned::is_positive(&den) {
                    return Err(ParseNumericError);
                }
                Ok(Self(RBig::from_parts(num, den.unsigned_abs())))
            }
            None => {
                let num = IBig::from_str(s).map_err(|_| ParseNumericError)?;
                Ok(Self(RBig::from_parts(num, UBig::ONE)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_terms() {
        assert_eq!(Numeric::new(2, 4), Numeric::new(1, 2));
        assert_eq!(Numeric::new(1, -2), Numeric::new(-1, 2));
        assert_eq!(Numeric::new(-6, -3), Numeric::from_i64(2));
    }

    #[test]
    fn predicates() {
        assert!(Numeric::zero().is_zero());
        assert!(Numeric::one().is_one());
        assert!(Numeric::from_i64(7).is_integer());
        assert!(!Numeric::new(1, 2).is_integer());
        assert!(Numeric::new(-1, 2).is_negative());
    }

    #[test]
    fn arithmetic() {
        let half = Numeric::new(1, 2);
        let third = Numeric::new(1, 3);
        assert_eq!(half.clone() + third.clone(), Numeric::new(5, 6));
        assert_eq!(half.clone() * third, Numeric::new(1, 6));
        assert_eq!(half.clone() - half.clone(), Numeric::zero());
        assert_eq!(-half, Numeric::new(-1, 2));
    }

    #[test]
    fn pow() {
        assert_eq!(Numeric::from_i64(2).pow(10), Numeric::from_i64(1024));
        assert_eq!(Numeric::from_i64(2).pow(-2), Numeric::new(1, 4));
        assert_eq!(Numeric::new(-3, 2).pow(3), Numeric::new(-27, 8));
        assert_eq!(Numeric::from_i64(5).pow(0), Numeric::one());
    }

    #[test]
    fn display_parse_round_trip() {
        for n in [
            Numeric::zero(),
            Numeric::from_i64(-42),
            Numeric::new(22, 7),
            Numeric::new(-1, 3),
        ] {
            let s = n.to_string();
            assert_eq!(s.parse::<Numeric>().unwrap(), n);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("1/0x".parse::<Numeric>().is_err());
        assert!("".parse::<Numeric>().is_err());
        assert!("3/-4".parse::<Numeric>().is_err());
    }

    #[test]
    fn to_i64() {
        assert_eq!(Numeric::from_i64(-5).to_i64(), Some(-5));
        assert_eq!(Numeric::new(1, 2).to_i64(), None);
    }
}
