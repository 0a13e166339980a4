use crate::error::{GeometryError, Result};

/// Powers of ten for every supported digit count.
const SCALES: [f64; 10] = [1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9];

/// Number of decimal digits kept before two values are compared.
///
/// Two scalars `a` and `b` are equal at precision `p` iff `round(a - b, p) == 0`.
/// Every comparison and construction entry point of the kernel takes a
/// `Precision` explicitly so that tolerances cannot drift along a call chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Precision(u32);

impl Precision {
    /// Three decimal digits.
    pub const DEFAULT: Self = Self(3);

    /// The finest supported precision (nine decimal digits).
    pub const MAX: Self = Self(9);

    /// Creates a precision of `digits` decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidPrecision`] if `digits` exceeds 9.
    pub fn new(digits: u32) -> Result<Self> {
        if digits > Self::MAX.0 {
            return Err(GeometryError::InvalidPrecision(digits).into());
        }
        Ok(Self(digits))
    }

    /// Returns the number of decimal digits.
    #[must_use]
    pub const fn digits(self) -> u32 {
        self.0
    }

    /// Returns `10^digits`.
    #[must_use]
    pub fn scale(self) -> f64 {
        SCALES[self.0 as usize]
    }

    /// Largest magnitude that still rounds to zero: half a unit in the last kept digit.
    #[must_use]
    pub fn epsilon(self) -> f64 {
        0.5 / self.scale()
    }

    /// Iterates over every supported precision, coarsest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Self::MAX.0).map(Self)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sign of a value after rounding to a precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

/// Rounds `x` to `p` decimal digits (half away from zero).
#[must_use]
pub fn round_to(x: f64, p: Precision) -> f64 {
    let scale = p.scale();
    (x * scale).round() / scale
}

/// Returns `true` if `x` rounds to zero at precision `p`.
#[must_use]
pub fn almost_zero(x: f64, p: Precision) -> bool {
    // round(x * s) == 0  <=>  |x * s| < 0.5
    (x * p.scale()).abs() < 0.5
}

/// Returns `true` if `a - b` rounds to zero at precision `p`.
#[must_use]
pub fn almost_equal(a: f64, b: f64, p: Precision) -> bool {
    almost_zero(a - b, p)
}

/// Classifies `x` as negative, zero or positive at precision `p`.
#[must_use]
pub fn sign(x: f64, p: Precision) -> Sign {
    if almost_zero(x, p) {
        Sign::Zero
    } else if x < 0.0 {
        Sign::Negative
    } else {
        Sign::Positive
    }
}

/// Precision-bounded equality.
pub trait AlmostEq<Rhs: ?Sized = Self> {
    /// Returns `true` if `self` and `other` are equal at precision `p`.
    fn almost_eq(&self, other: &Rhs, p: Precision) -> bool;
}

impl AlmostEq for f64 {
    fn almost_eq(&self, other: &f64, p: Precision) -> bool {
        almost_equal(*self, *other, p)
    }
}
