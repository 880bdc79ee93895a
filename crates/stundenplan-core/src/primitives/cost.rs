// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

/// Accumulated soft-constraint penalty. Lower is better; a complete
/// schedule always scores non-negative, while per-move deltas may be
/// negative.
#[repr(transparent)]
#[must_use]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Penalty(i64);

impl Penalty {
    pub const ZERO: Penalty = Penalty(0);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Penalty(value)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    #[inline]
    pub fn saturating_add(self, other: Penalty) -> Penalty {
        Penalty(self.0.saturating_add(other.0))
    }

    #[inline]
    pub fn checked_add(self, other: Penalty) -> Option<Penalty> {
        self.0.checked_add(other.0).map(Penalty)
    }
}

impl Zero for Penalty {
    #[inline]
    fn zero() -> Self {
        Penalty::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Add for Penalty {
    type Output = Penalty;

    #[inline]
    fn add(self, rhs: Penalty) -> Penalty {
        Penalty(self.0 + rhs.0)
    }
}

impl AddAssign for Penalty {
    #[inline]
    fn add_assign(&mut self, rhs: Penalty) {
        self.0 += rhs.0;
    }
}

impl Sub for Penalty {
    type Output = Penalty;

    #[inline]
    fn sub(self, rhs: Penalty) -> Penalty {
        Penalty(self.0 - rhs.0)
    }
}

impl SubAssign for Penalty {
    #[inline]
    fn sub_assign(&mut self, rhs: Penalty) {
        self.0 -= rhs.0;
    }
}

impl Neg for Penalty {
    type Output = Penalty;

    #[inline]
    fn neg(self) -> Penalty {
        Penalty(-self.0)
    }
}

impl Sum for Penalty {
    #[inline]
    fn sum<I: Iterator<Item = Penalty>>(iter: I) -> Penalty {
        iter.fold(Penalty::ZERO, |acc, p| acc + p)
    }
}

impl std::fmt::Display for Penalty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Penalty({})", self.0)
    }
}

/// Multiplier attached to an enabled soft rule. Weights scale the rule's
/// raw violation count into [`Penalty`] units.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(i64);

impl Weight {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Weight(value)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl Default for Weight {
    #[inline]
    fn default() -> Self {
        Weight(1)
    }
}

impl Mul<i64> for Weight {
    type Output = Penalty;

    #[inline]
    fn mul(self, units: i64) -> Penalty {
        Penalty(self.0 * units)
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Weight({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_arithmetic() {
        let a = Penalty::new(5);
        let b = Penalty::new(3);
        assert_eq!(a + b, Penalty::new(8));
        assert_eq!(a - b, Penalty::new(2));
        assert_eq!(-a, Penalty::new(-5));
        let mut c = a;
        c += b;
        assert_eq!(c, Penalty::new(8));
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_penalty_zero_and_sum() {
        assert!(Penalty::ZERO.is_zero());
        assert_eq!(Penalty::zero(), Penalty::new(0));
        let total: Penalty = [1, 2, 3].into_iter().map(Penalty::new).sum();
        assert_eq!(total, Penalty::new(6));
    }

    #[test]
    fn test_penalty_saturating_add() {
        let max = Penalty::new(i64::MAX);
        assert_eq!(max.saturating_add(Penalty::new(1)), max);
        assert_eq!(max.checked_add(Penalty::new(1)), None);
        assert_eq!(
            Penalty::new(1).checked_add(Penalty::new(2)),
            Some(Penalty::new(3))
        );
    }

    #[test]
    fn test_weight_scales_units() {
        let w = Weight::new(4);
        assert_eq!(w * 3, Penalty::new(12));
        assert_eq!(w * 0, Penalty::ZERO);
        assert_eq!(Weight::default() * 7, Penalty::new(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Penalty::new(-2)), "Penalty(-2)");
        assert_eq!(format!("{}", Weight::new(9)), "Weight(9)");
    }
}
