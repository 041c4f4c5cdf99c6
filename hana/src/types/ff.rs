#![allow(non_upper_case_globals)]

use std::ops::{Add, Neg, Sub, Mul, Div, Rem, AddAssign, SubAssign, MulAssign, DivAssign, RemAssign};
use std::str::FromStr;
use derive_more::{Display, Debug};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, AddMonOps, AddGrpOps, MonOps, RingOps, FieldOps, EucRingOps, AddMon, AddGrp, Mon, Ring, EucRing, Field};

type I = i32;

/// The prime field `Z/p`, stored by its representative in `0..p`.
/// `p` is assumed to be prime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Display, Debug)]
#[display("{}", _0)]
#[debug("{}", _0)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FF<const p: I>(I);

/// The field `F₂`.
pub type FF2 = FF<2>;

impl<const p: I> FF<p> {
    pub fn new(a: I) -> Self {
        assert!(p > 1);
        Self(a.rem_euclid(p))
    }

    pub fn rep(&self) -> &I {
        &self.0
    }

    fn reduce(a: i64) -> Self {
        Self(a.rem_euclid(p as i64) as I)
    }

    // s with s a + t p = 1.
    fn inv_rep(&self) -> Option<I> {
        if self.0 == 0 {
            return None
        }
        let (d, s, _) = I::gcdx(&self.0, &p);
        debug_assert_eq!(d, 1);
        Some(s.rem_euclid(p))
    }
}

impl<const p: I> From<I> for FF<p> {
    fn from(a: I) -> Self {
        Self::new(a)
    }
}

impl<const p: I> From<bool> for FF<p> {
    fn from(b: bool) -> Self {
        Self(b as I)
    }
}

impl<const p: I> FromStr for FF<p> {
    type Err = <I as FromStr>::Err;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<I>().map(Self::new)
    }
}

impl<const p: I> Zero for FF<p> {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const p: I> One for FF<p> {
    fn one() -> Self {
        Self(1 % p)
    }

    fn is_one(&self) -> bool {
        self.0 == 1
    }
}

impl<const p: I> Neg for FF<p> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a, const p: I> Neg for &'a FF<p> {
    type Output = FF<p>;
    fn neg(self) -> Self::Output {
        FF::new(-self.0)
    }
}

#[auto_ops]
impl<'a, 'b, const p: I> Add<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn add(self, rhs: &'b FF<p>) -> Self::Output {
        FF::reduce(self.0 as i64 + rhs.0 as i64)
    }
}

#[auto_ops]
impl<'a, 'b, const p: I> Sub<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn sub(self, rhs: &'b FF<p>) -> Self::Output {
        FF::reduce(self.0 as i64 - rhs.0 as i64)
    }
}

#[auto_ops]
impl<'a, 'b, const p: I> Mul<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn mul(self, rhs: &'b FF<p>) -> Self::Output {
        FF::reduce(self.0 as i64 * rhs.0 as i64)
    }
}

#[auto_ops]
impl<'a, 'b, const p: I> Div<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn div(self, rhs: &'b FF<p>) -> Self::Output {
        match rhs.inv_rep() {
            Some(r) => self * FF(r),
            None => panic!("division by zero")
        }
    }
}

// Every nonzero element divides every other, so remainders vanish.
#[auto_ops]
impl<'a, 'b, const p: I> Rem<&'b FF<p>> for &'a FF<p> {
    type Output = FF<p>;
    fn rem(self, rhs: &'b FF<p>) -> Self::Output {
        assert!(!rhs.is_zero(), "division by zero");
        FF::zero()
    }
}

macro_rules! impl_alg_ops {
    ($($trait:ident),*) => {
        $(
            impl<const p: I> $trait for FF<p> {}
            impl<'a, const p: I> $trait<FF<p>> for &'a FF<p> {}
        )*
    };
}

impl_alg_ops!(AddMonOps, AddGrpOps, MonOps, RingOps, EucRingOps, FieldOps);

impl<const p: I> Elem for FF<p> {
    fn math_symbol() -> String {
        use crate::util::format::subscript;
        format!("F{}", subscript(p as isize))
    }
}

impl<const p: I> AddMon for FF<p> {}
impl<const p: I> AddGrp for FF<p> {}
impl<const p: I> Mon for FF<p> {}

impl<const p: I> Ring for FF<p> {
    fn inv(&self) -> Option<Self> {
        self.inv_rep().map(Self)
    }

    fn is_unit(&self) -> bool {
        !self.is_zero()
    }

    fn normalizing_unit(&self) -> Self {
        self.inv().unwrap_or(Self::one())
    }
}

impl<const p: I> EucRing for FF<p> {}
impl<const p: I> Field for FF<p> {}

#[cfg(test)]
mod tests {
    use super::*;

    type F3 = FF<3>;
    type F7 = FF<7>;

    #[test]
    fn reps() {
        assert_eq!(F3::new(-7).rep(), &2);
        assert_eq!(F7::new(15).rep(), &1);
        assert_eq!(FF2::from(-3), FF2::one());
        assert_eq!(FF2::from(true), FF2::one());
        assert_eq!("12".parse::<F7>(), Ok(F7::new(5)));
    }

    #[test]
    fn symbols() {
        assert_eq!(FF2::math_symbol(), "F₂");
        assert_eq!(F7::math_symbol(), "F₇");
        assert_eq!(format!("{} {:?}", F7::new(-1), F3::new(4)), "6 1");
    }

    #[test]
    fn arith() {
        let (a, b) = (F7::new(5), F7::new(4));
        assert_eq!(a + b, F7::new(2));
        assert_eq!(a - b, F7::one());
        assert_eq!(b - a, F7::new(6));
        assert_eq!(a * b, F7::new(6));
        assert_eq!(-a, F7::new(2));
        assert_eq!(a / b, F7::new(3));
        assert_eq!(a % b, F7::zero());

        let mut c = a;
        c *= b;
        c += F7::one();
        assert_eq!(c, F7::zero());
    }

    #[test]
    fn f2_arith() {
        let (o, l) = (FF2::zero(), FF2::one());
        assert_eq!(l + l, o);
        assert_eq!(-l, l);
        assert_eq!(l * l / l, l);
    }

    #[test]
    fn units() {
        for a in 1..7 {
            let a = F7::new(a);
            assert!((a * a.inv().unwrap()).is_one());
            assert!((a * a.normalizing_unit()).is_one());
        }
        assert_eq!(F7::zero().inv(), None);
        assert_eq!(F7::zero().normalizing_unit(), F7::one());
    }

    #[test]
    #[should_panic]
    fn div_by_zero() {
        let _ = FF2::one() / FF2::zero();
    }
}
