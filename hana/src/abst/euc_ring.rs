use std::ops::{Div, DivAssign, Rem, RemAssign};
use crate::{Ring, RingOps};

pub trait EucRingOps<T = Self>: 
    RingOps<T> + 
    Div<T, Output = T> + 
    for<'a> Div<&'a T, Output = T> + 
    Rem<T, Output = T> + 
    for<'a> Rem<&'a T, Output = T> 
{}

/// A ring with division with remainder. `x / y` and `x % y` satisfy
/// `x = (x / y) * y + x % y`.
pub trait EucRing: 
    Ring + 
    EucRingOps + 
    DivAssign + 
    for<'a> DivAssign<&'a Self> + 
    RemAssign + 
    for<'a> RemAssign<&'a Self>
where
    for<'a> &'a Self: EucRingOps<Self>
{
    fn divides(&self, y: &Self) -> bool { 
        if self.is_zero() { 
            y.is_zero()
        } else { 
            (y % self).is_zero()
        }
    }

    fn gcd(x: &Self, y: &Self) -> Self { 
        let (mut x, mut y) = (x.clone(), y.clone());
        while !y.is_zero() { 
            let r = &x % &y;
            (x, y) = (y, r);
        }
        let u = x.normalizing_unit();
        x * u
    }

    /// Returns `(d, s, t)` with `d = gcd(x, y) = s * x + t * y`.
    fn gcdx(x: &Self, y: &Self) -> (Self, Self, Self) { 
        let (mut x, mut y) = (x.clone(), y.clone());
        let (mut s0, mut s1) = (Self::one(), Self::zero());
        let (mut t0, mut t1) = (Self::zero(), Self::one());

        while !y.is_zero() { 
            let q = &x / &y;
            let r = &x - &q * &y;
            (x, y) = (y, r);

            let s2 = &s0 - &q * &s1;
            (s0, s1) = (s1, s2);

            let t2 = &t0 - &q * &t1;
            (t0, t1) = (t1, t2);
        }

        let u = x.normalizing_unit();
        (x * &u, s0 * &u, t0 * &u)
    }

    fn lcm(x: &Self, y: &Self) -> Self { 
        if x.is_zero() && y.is_zero() { 
            return Self::zero()
        }
        let d = Self::gcd(x, y);
        let l = &(x * y) / &d;
        let u = l.normalizing_unit();
        l * u
    }
}

pub trait FieldOps<T = Self>:
    EucRingOps<T>
{}

/// A Euclidean ring in which every nonzero element is a unit.
pub trait Field:
    EucRing +
    FieldOps
where
    for<'a> &'a Self: FieldOps<Self>
{}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use crate::Ratio;

    #[test]
    fn divides() {
        assert!(3i64.divides(&-12));
        assert!(!5i64.divides(&12));
        assert!(0i64.divides(&0));
        assert!(!0i64.divides(&1));
    }

    #[test]
    fn default_gcd() {
        type Q = Ratio<i64>;
        let (x, y) = (Q::new(2, 3), Q::from(4));
        let (d, s, t) = Q::gcdx(&x, &y);
        assert!(d.is_one());
        assert_eq!(&s * &x + &t * &y, d);
        assert!(Q::lcm(&x, &y).is_one());
    }
}
