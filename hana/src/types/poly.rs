use std::fmt::{Display, Debug};
use std::ops::{Add, Sub, Neg, Mul, Div, Rem, AddAssign, SubAssign, MulAssign, DivAssign, RemAssign};
use itertools::Itertools;
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;

use crate::{Elem, AddMonOps, AddGrpOps, MonOps, RingOps, EucRingOps, AddMon, AddGrp, Mon, Ring, EucRing, Field, FieldOps};
use crate::util::format::{lc, superscript};

/// Univariate polynomials `K[X]` over a field `K`, stored as a dense 
/// coefficient list (constant term first) without trailing zeros.
#[derive(Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poly<const X: char, K> { 
    coeffs: Vec<K>
}

impl<const X: char, K> Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    pub fn new(coeffs: Vec<K>) -> Self { 
        let mut res = Self { coeffs };
        res.trim();
        res
    }

    pub fn constant(a: K) -> Self { 
        Self::new(vec![a])
    }

    pub fn variable() -> Self { 
        Self::new(vec![K::zero(), K::one()])
    }

    pub fn coeffs(&self) -> &[K] { 
        &self.coeffs
    }

    pub fn coeff(&self, i: usize) -> K { 
        self.coeffs.get(i).cloned().unwrap_or_else(K::zero)
    }

    /// `None` for the zero polynomial.
    pub fn deg(&self) -> Option<usize> { 
        self.coeffs.len().checked_sub(1)
    }

    pub fn lead(&self) -> K { 
        self.coeffs.last().cloned().unwrap_or_else(K::zero)
    }

    pub fn is_const(&self) -> bool { 
        self.coeffs.len() <= 1
    }

    pub fn eval(&self, a: &K) -> K { 
        self.coeffs.iter().rev().fold(K::zero(), |res, c| res * a + c)
    }

    pub fn div_rem(&self, rhs: &Self) -> (Self, Self) { 
        assert!(!rhs.is_zero(), "division by zero");

        let n = rhs.coeffs.len();
        let l = rhs.lead();
        let mut q = vec![K::zero(); self.coeffs.len().saturating_sub(n - 1)];
        let mut r = self.coeffs.clone();

        while r.len() >= n { 
            let k = r.len() - n;
            let c = r[r.len() - 1].clone() / &l;
            for (i, b) in rhs.coeffs.iter().enumerate() { 
                r[k + i] -= &c * b;
            }
            q[k] = c;
            r.pop(); // the leading term is cancelled.
            while r.last().map(|a| a.is_zero()).unwrap_or(false) { 
                r.pop();
            }
        }

        (Self::new(q), Self::new(r))
    }

    fn trim(&mut self) { 
        while self.coeffs.last().map(|a| a.is_zero()).unwrap_or(false) { 
            self.coeffs.pop();
        }
    }
}

impl<const X: char, K> From<i32> for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn from(a: i32) -> Self {
        Self::constant(K::from(a))
    }
}

impl<const X: char, K> Display for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() { 
            return write!(f, "0")
        }

        let terms = self.coeffs.iter().enumerate().rev().filter(|(_, a)| !a.is_zero()).map(|(i, a)| {
            let x = match i { 
                0 => String::from("1"),
                1 => X.to_string(),
                _ => format!("{X}{}", superscript(i as isize))
            };
            (x, a)
        }).collect_vec();

        write!(f, "{}", lc(terms.into_iter()))
    }
}

impl<const X: char, K> Debug for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<const X: char, K> Zero for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn zero() -> Self {
        Self { coeffs: vec![] }
    }

    fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }
}

impl<const X: char, K> One for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn one() -> Self {
        Self::constant(K::one())
    }

    fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_one()
    }
}

impl<const X: char, K> Neg for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self { coeffs: self.coeffs.into_iter().map(|a| -a).collect() }
    }
}

impl<const X: char, K> Neg for &Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    type Output = Poly<X, K>;
    fn neg(self) -> Self::Output {
        Poly { coeffs: self.coeffs.iter().map(|a| -a).collect() }
    }
}

#[auto_ops]
impl<const X: char, K> AddAssign<&Poly<X, K>> for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn add_assign(&mut self, rhs: &Poly<X, K>) {
        if self.coeffs.len() < rhs.coeffs.len() { 
            self.coeffs.resize(rhs.coeffs.len(), K::zero());
        }
        for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) { 
            *a += b;
        }
        self.trim();
    }
}

#[auto_ops]
impl<const X: char, K> SubAssign<&Poly<X, K>> for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn sub_assign(&mut self, rhs: &Poly<X, K>) {
        self.add_assign(&-rhs)
    }
}

#[auto_ops]
impl<const X: char, K> MulAssign<&Poly<X, K>> for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn mul_assign(&mut self, rhs: &Poly<X, K>) {
        if self.is_zero() || rhs.is_zero() { 
            self.coeffs.clear();
            return
        }

        let mut c = vec![K::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() { 
            for (j, b) in rhs.coeffs.iter().enumerate() { 
                c[i + j] += a * b;
            }
        }

        self.coeffs = c;
        self.trim();
    }
}

#[auto_ops]
impl<const X: char, K> DivAssign<&Poly<X, K>> for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn div_assign(&mut self, rhs: &Poly<X, K>) {
        *self = self.div_rem(rhs).0
    }
}

#[auto_ops]
impl<const X: char, K> RemAssign<&Poly<X, K>> for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn rem_assign(&mut self, rhs: &Poly<X, K>) {
        *self = self.div_rem(rhs).1
    }
}

macro_rules! impl_alg_ops {
    ($trait:ident) => {
        impl<const X: char, K> $trait for Poly<X, K>
        where K: Field, for<'x> &'x K: FieldOps<K> {}
        impl<'a, const X: char, K> $trait<Poly<X, K>> for &'a Poly<X, K>
        where K: Field, for<'x> &'x K: FieldOps<K> {}
    };
}

impl_alg_ops!(AddMonOps);
impl_alg_ops!(AddGrpOps);
impl_alg_ops!(MonOps);
impl_alg_ops!(RingOps);
impl_alg_ops!(EucRingOps);

impl<const X: char, K> Elem for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn math_symbol() -> String {
        format!("{}[{X}]", K::math_symbol())
    }
}

impl<const X: char, K> AddMon for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {}

impl<const X: char, K> AddGrp for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {}

impl<const X: char, K> Mon for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {}

impl<const X: char, K> Ring for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {
    fn inv(&self) -> Option<Self> {
        if self.coeffs.len() == 1 { 
            self.coeffs[0].inv().map(Self::constant)
        } else { 
            None
        }
    }

    fn is_unit(&self) -> bool {
        self.coeffs.len() == 1
    }

    fn normalizing_unit(&self) -> Self {
        match self.lead().inv() { 
            Some(u) => Self::constant(u),
            None => Self::one()
        }
    }
}

impl<const X: char, K> EucRing for Poly<X, K>
where K: Field, for<'x> &'x K: FieldOps<K> {}
