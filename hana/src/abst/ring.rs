use std::ops::{Mul, MulAssign};
use num_traits::One;
use crate::{AddGrp, AddGrpOps, Elem};

pub trait MonOps<T = Self>:
    Sized +
    Mul<T, Output = T> +
    for<'a> Mul<&'a T, Output = T>
{}

/// A monoid under `*` with identity `one()`.
pub trait Mon:
    Elem +
    MonOps +
    MulAssign +
    for<'a> MulAssign<&'a Self> +
    One
where
    for<'a> &'a Self: MonOps<Self>
{
    fn product<'a, I>(iter: I) -> Self
    where I: IntoIterator<Item = &'a Self> {
        let mut res = Self::one();
        for x in iter {
            res *= x;
        }
        res
    }
}

pub trait RingOps<T = Self>:
    AddGrpOps<T> +
    MonOps<T>
{}

/// A commutative ring with unit. Integer literals embed through `From<i32>`.
pub trait Ring:
    AddGrp +
    Mon +
    RingOps +
    From<i32>
where
    for<'a> &'a Self: RingOps<Self>
{
    fn inv(&self) -> Option<Self>;
    fn is_unit(&self) -> bool;

    /// A unit `u` such that `u * self` is the canonical
    /// representative of the associate class of `self`.
    fn normalizing_unit(&self) -> Self;

    fn is_pm_one(&self) -> bool {
        self.is_one() || (-self).is_one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert!((-1).is_pm_one());
        assert!(!2.is_pm_one());
        assert_eq!((-6i64).normalizing_unit() * -6, 6);
        assert_eq!(3i32.inv(), None);
    }

    #[test]
    fn product() {
        assert_eq!(i64::product(&[2, -3, 5]), -30);
        assert_eq!(i64::product(&[]), 1);
    }
}
