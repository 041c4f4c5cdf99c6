use std::fmt::{Display, Debug};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign, Mul, MulAssign};
use ahash::AHashMap;
use itertools::Itertools;
use num_traits::Zero;
use auto_impl_ops::auto_ops;
use crate::{Ring, RingOps};
use crate::util::format::lc;

use super::gen::*;

/// A finite linear combination `Σ rᵢ xᵢ` of generators `xᵢ` with 
/// coefficients in `R`. Terms with zero coefficients are never stored.
#[derive(PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{ 
    data: AHashMap<X, R>
}

impl<X, R> Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{ 
    pub fn new() -> Self {
        let hasher = ahash::RandomState::with_seeds(0, 0, 0, 0);
        Self { data: AHashMap::with_hasher(hasher) }
    }

    fn clean(&mut self) { 
        self.data.retain(|_, r| !r.is_zero());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&X, &R)> {
        self.data.iter()
    }

    /// `Some(x)` if `self` is a single generator with coefficient one.
    pub fn as_gen(&self) -> Option<X> { 
        match self.data.iter().exactly_one() { 
            Ok((x, r)) if r.is_one() => Some(x.clone()),
            _ => None
        }
    }

    /// Extends `f: X -> Lc<Y, R>` linearly.
    pub fn apply<Y, F>(&self, f: F) -> Lc<Y, R> 
    where 
        Y: Gen,
        F: Fn(&X) -> Lc<Y, R> 
    {
        self.iter().flat_map(|(x, r)| { 
            f(x).into_iter().map(move |(y, s)| (y, r * &s))
        }).collect()
    }

    fn add_pair(&mut self, x: X, r: R) { 
        if r.is_zero() { return }
        *self.data.entry(x).or_insert_with(R::zero) += r;
    } 
}

impl<X, R> Default for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, R> From<X> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(x: X) -> Self {
        Self::from((x, R::one()))
    }    
}

impl<X, R> From<(X, R)> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from(value: (X, R)) -> Self {
        Self::from_iter([value])
    }
}

impl<X, R> FromIterator<(X, R)> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn from_iter<T: IntoIterator<Item = (X, R)>>(iter: T) -> Self {
        let mut res = Self::new();
        for (x, r) in iter { 
            res.add_pair(x, r);
        }
        res.clean();
        res
    }
}

impl<X, R> IntoIterator for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Item = (X, R);
    type IntoIter = std::collections::hash_map::IntoIter<X, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<X, R> Display for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.data.is_empty() { 
            return write!(f, "0");
        }
        let terms = self.iter().sorted_by(|(x, _), (y, _)| x.cmp(y));
        write!(f, "{}", lc(terms))
    }
}

impl<X, R> Debug for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<X, R> Zero for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn zero() -> Self {
        Self::new()
    }

    fn is_zero(&self) -> bool {
        self.data.is_empty()
    }
}

impl<X, R> Neg for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.into_iter().map(|(x, r)| (x, -r)).collect()
    }
}

impl<X, R> Neg for &Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    type Output = Lc<X, R>;

    fn neg(self) -> Self::Output {
        self.iter().map(|(x, r)| (x.clone(), -r)).collect()
    }
}

#[auto_ops]
impl<X, R> AddAssign<&Lc<X, R>> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn add_assign(&mut self, rhs: &Self) {
        for (x, r) in rhs.iter() { 
            self.add_pair(x.clone(), r.clone());
        }
        self.clean()
    }
}

#[auto_ops]
impl<X, R> SubAssign<&Lc<X, R>> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn sub_assign(&mut self, rhs: &Self) {
        for (x, r) in rhs.iter() { 
            self.add_pair(x.clone(), -r);
        }
        self.clean()
    }
}

#[auto_ops]
impl<X, R> MulAssign<&R> for Lc<X, R>
where
    X: Gen,
    R: Ring, for<'x> &'x R: RingOps<R>
{
    fn mul_assign(&mut self, rhs: &R) {
        let data = std::mem::take(&mut self.data);
        self.data = data.into_iter().map(|(x, r)| (x, &r * rhs)).collect();
        self.clean()
    }
}
