use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, Neg, Sub};

use num_traits::Zero;

/// An index of a grid. Indices form an additive group, so that 
/// degrees of maps can be added and grids can be shifted.
pub trait GridDeg:
    Sized
    + Display
    + Debug
    + Clone
    + Copy
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{}

impl GridDeg for isize {}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, Debug, derive_more::Add, derive_more::Sub)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("({}, {})", _0, _1)]
pub struct isize2(pub isize, pub isize);

impl From<(isize, isize)> for isize2 {
    fn from(i: (isize, isize)) -> Self {
        Self(i.0, i.1)
    }
}

impl From<isize2> for (isize, isize) {
    fn from(i: isize2) -> Self {
        (i.0, i.1)
    }
}

impl Zero for isize2 {
    fn zero() -> Self {
        Self(0, 0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0 && self.1 == 0
    }
}

impl Neg for isize2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0, -self.1)
    }
}

impl GridDeg for isize2 {}

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, Debug, derive_more::Add, derive_more::Sub)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("({}, {}, {})", _0, _1, _2)]
pub struct isize3(pub isize, pub isize, pub isize);

impl From<(isize, isize, isize)> for isize3 {
    fn from(i: (isize, isize, isize)) -> Self {
        Self(i.0, i.1, i.2)
    }
}

impl From<isize3> for (isize, isize, isize) {
    fn from(i: isize3) -> Self {
        (i.0, i.1, i.2)
    }
}

impl Zero for isize3 {
    fn zero() -> Self {
        Self(0, 0, 0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0 && self.1 == 0 && self.2 == 0
    }
}

impl Neg for isize3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0, -self.1, -self.2)
    }
}

impl GridDeg for isize3 {}

#[cfg(test)]
mod tests { 
    use super::*;

    #[test]
    fn ops() { 
        let a = isize2(1, 2);
        let b = isize2(3, -1);
        assert_eq!(a + b, isize2(4, 1));
        assert_eq!(a - b, isize2(-2, 3));
        assert_eq!(-a, isize2(-1, -2));
        assert!(isize2::zero().is_zero());
    }

    #[test]
    fn ops3() { 
        let a = isize3(1, 2, 3);
        assert_eq!(a + (-a), isize3::zero());
        assert_eq!(a.to_string(), "(1, 2, 3)");
    }

    #[test]
    fn ord() { 
        assert!(isize2(0, 5) < isize2(1, 0));
        assert!(isize2(1, 0) < isize2(1, 1));
    }
}
