use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use num_traits::Zero;
use crate::Elem;

/// Operators `+` available on `T` (and, via `for<'a> &'a T: AddMonOps<T>`, on `&T`).
pub trait AddMonOps<T = Self>:
    Sized +
    Add<T, Output = T> +
    for<'a> Add<&'a T, Output = T>
{}

/// A commutative monoid under `+` with identity `zero()`.
pub trait AddMon:
    Elem +
    AddMonOps +
    AddAssign +
    for<'a> AddAssign<&'a Self> +
    Zero
where
    for<'a> &'a Self: AddMonOps<Self>
{
    fn sum<'a, I>(iter: I) -> Self
    where I: IntoIterator<Item = &'a Self> {
        let mut res = Self::zero();
        for x in iter {
            res += x;
        }
        res
    }
}

pub trait AddGrpOps<T = Self>:
    AddMonOps<T> +
    Neg<Output = T> +
    Sub<T, Output = T> +
    for<'a> Sub<&'a T, Output = T>
{}

/// An abelian group.
pub trait AddGrp:
    AddMon +
    AddGrpOps +
    SubAssign +
    for<'a> SubAssign<&'a Self>
where
    for<'a> &'a Self: AddGrpOps<Self>
{}
