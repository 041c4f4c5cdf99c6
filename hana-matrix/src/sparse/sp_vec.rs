use std::ops::{Add, AddAssign, Neg, Range, Sub, SubAssign, Mul, MulAssign};
use std::fmt::{Display, Debug};
use nalgebra_sparse::CscMatrix;
use num_traits::Zero;
use auto_impl_ops::auto_ops;
use hana::{Ring, RingOps};
use crate::MatTrait;
use super::sp_mat::SpMat;

/// A sparse column vector, stored as an `n x 1` compressed-column matrix.
#[derive(Clone, PartialEq, Eq)]
pub struct SpVec<R> { 
    inner: SpMat<R>
}

impl<R> SpVec<R> { 
    pub fn dim(&self) -> usize { 
        self.inner.nrows()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &R)> { 
        self.inner.iter().map(|(i, _, a)| (i, a))
    }

    pub fn nnz(&self) -> usize { 
        self.inner.nnz()
    }

    pub fn as_mat(&self) -> &SpMat<R> { 
        &self.inner
    }

    pub fn into_mat(self) -> SpMat<R> { 
        self.inner
    }
}

impl<R> SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> { 
    pub fn zero(dim: usize) -> Self { 
        SpMat::zero((dim, 1)).into()
    }

    pub fn unit(dim: usize, i: usize) -> Self { 
        Self::from_entries(dim, [(i, R::one())])
    }

    pub fn from_entries<T>(dim: usize, entries: T) -> Self
    where T: IntoIterator<Item = (usize, R)> {
        SpMat::from_entries((dim, 1), entries.into_iter().map(|(i, a)| (i, 0, a))).into()
    }

    pub fn is_zero(&self) -> bool { 
        self.inner.is_zero()
    }

    pub fn get(&self, i: usize) -> R { 
        assert!(i < self.dim());
        let col = self.inner.inner().col(0);
        match col.row_indices().binary_search(&i) { 
            Ok(k) => col.values()[k].clone(),
            Err(_) => R::zero()
        }
    }

    pub fn subvec(&self, range: Range<usize>) -> Self { 
        self.inner.submat_rows(range).into()
    }

    pub fn stack(&self, other: &Self) -> Self { 
        self.inner.stack(&other.inner).into()
    }

    pub fn to_vec(&self) -> Vec<R> { 
        let mut v = vec![R::zero(); self.dim()];
        for (i, a) in self.iter() { 
            v[i] = a.clone();
        }
        v
    }
}

impl<R> From<SpMat<R>> for SpVec<R> {
    fn from(inner: SpMat<R>) -> Self {
        assert_eq!(inner.ncols(), 1);
        Self { inner }
    }
}

impl<R> From<CscMatrix<R>> for SpVec<R> {
    fn from(inner: CscMatrix<R>) -> Self {
        SpMat::from(inner).into()
    }
}

impl<R> From<Vec<R>> for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(v: Vec<R>) -> Self {
        Self::from_entries(v.len(), v.into_iter().enumerate())
    }
}

impl<R> From<SpVec<R>> for Vec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(v: SpVec<R>) -> Self {
        v.to_vec()
    }
}

impl<R> FromIterator<R> for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<R> Neg for &SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn neg(self) -> Self::Output {
        (-&self.inner).into()
    }
}

#[auto_ops]
impl<'a, 'b, R> Add<&'b SpVec<R>> for &'a SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn add(self, rhs: &'b SpVec<R>) -> Self::Output {
        assert_eq!(self.dim(), rhs.dim());
        let entries = self.iter().chain(rhs.iter()).map(|(i, a)| (i, a.clone()));
        SpVec::from_entries(self.dim(), entries)
    }
}

#[auto_ops]
impl<'a, 'b, R> Sub<&'b SpVec<R>> for &'a SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn sub(self, rhs: &'b SpVec<R>) -> Self::Output {
        self + &(-rhs)
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b R> for &'a SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpVec<R>;
    fn mul(self, r: &'b R) -> Self::Output {
        SpVec::from_entries(self.dim(), self.iter().map(|(i, a)| (i, a * r)))
    }
}

impl<R> Display for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.to_vec();
        write!(f, "[")?;
        for (k, a) in v.iter().enumerate() { 
            if k > 0 { write!(f, ", ")? }
            write!(f, "{a}")?;
        }
        write!(f, "]")
    }
}

impl<R> Debug for SpVec<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// Dot product of two sparse vectors.
pub fn dot<R>(v: &SpVec<R>, w: &SpVec<R>) -> R
where R: Ring, for<'x> &'x R: RingOps<R> { 
    assert_eq!(v.dim(), w.dim());
    let w = w.to_vec();
    R::sum(v.iter().map(|(i, a)| a * &w[i]).collect::<Vec<_>>().iter())
}
