use std::ops::{Mul, MulAssign, Neg, Range};
use std::iter::zip;
use std::fmt::{Display, Debug};
use ahash::AHashMap;
use nalgebra_sparse::{CscMatrix, CooMatrix};
use num_traits::{Zero, One};
use auto_impl_ops::auto_ops;
use hana::{Ring, RingOps};
use crate::dense::*;
use super::sp_vec::SpVec;

/// A sparse matrix in compressed-column form. Entries built through 
/// `from_entries` are summed per position and stored only when nonzero, 
/// so equality compares the nonzero pattern and values.
#[derive(Clone, PartialEq, Eq)]
pub struct SpMat<R> { 
    inner: CscMatrix<R>
}

impl<R> MatTrait for SpMat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }
}

impl<R> SpMat<R> { 
    pub(crate) fn inner(&self) -> &CscMatrix<R> { 
        &self.inner
    }

    pub(crate) fn into_inner(self) -> CscMatrix<R> { 
        self.inner
    }

    pub fn zero(shape: (usize, usize)) -> Self {
        CscMatrix::zeros(shape.0, shape.1).into()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> { 
        self.inner.triplet_iter()
    }

    pub fn nnz(&self) -> usize { 
        self.inner.nnz()
    }
}

impl<R> From<CscMatrix<R>> for SpMat<R> {
    fn from(inner: CscMatrix<R>) -> Self {
        Self { inner }
    }
}

impl<R> SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> { 
    pub fn from_entries<T>(shape: (usize, usize), entries: T) -> Self
    where T: IntoIterator<Item = (usize, usize, R)> {
        let (m, n) = shape;
        let mut acc: AHashMap<(usize, usize), R> = AHashMap::new();

        for (i, j, a) in entries { 
            assert!(i < m && j < n, "({i}, {j}) is out of bounds for {m}x{n}.");
            if a.is_zero() { continue }
            *acc.entry((i, j)).or_insert_with(R::zero) += a;
        }

        let mut coo = CooMatrix::new(m, n);
        for ((i, j), a) in acc { 
            if !a.is_zero() { 
                coo.push(i, j, a);
            }
        }

        CscMatrix::from(&coo).into()
    }

    /// `data` is given in row-major order.
    pub fn from_dense_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> { 
        let n = shape.1;
        Self::from_entries(
            shape, 
            data.into_iter().enumerate().map(|(k, a)| (k / n, k % n, a))
        )
    }

    pub fn from_col_vecs<I>(nrows: usize, vecs: I) -> Self 
    where I: IntoIterator<Item = SpVec<R>> { 
        let mut ncols = 0;
        let mut entries = vec![];

        for (j, v) in vecs.into_iter().enumerate() { 
            assert_eq!(v.dim(), nrows);
            entries.extend(v.iter().map(|(i, a)| (i, j, a.clone())));
            ncols = j + 1;
        }

        Self::from_entries((nrows, ncols), entries)
    }

    pub fn id(n: usize) -> Self { 
        Self::from_entries((n, n), (0..n).map(|i| (i, i, R::one())))
    }

    pub fn is_zero(&self) -> bool { 
        self.inner.values().iter().all(|a| a.is_zero())
    }

    pub fn is_id(&self) -> bool { 
        self.is_square() && self.iter().all(|(i, j, a)| 
            (i == j && a.is_one()) || (i != j && a.is_zero())
        ) && self.nnz() == self.nrows()
    }

    pub fn col_vec(&self, j: usize) -> SpVec<R> { 
        let col = self.inner.col(j);
        let entries = zip(
            col.row_indices().iter().cloned(), 
            col.values().iter().cloned()
        );
        SpVec::from_entries(self.nrows(), entries)
    }

    pub fn col_vecs(&self) -> impl Iterator<Item = SpVec<R>> + '_ { 
        (0 .. self.ncols()).map(|j| self.col_vec(j))
    }

    pub fn transpose(&self) -> Self { 
        self.inner.transpose().into()
    }

    pub fn to_dense(&self) -> Mat<R> { 
        let mut a = Mat::zero(self.shape());
        for (i, j, r) in self.iter() { 
            a[(i, j)] += r;
        }
        a
    }

    pub fn extract<F>(&self, shape: (usize, usize), f: F) -> Self
    where F: Fn(usize, usize) -> Option<(usize, usize)> { 
        Self::from_entries(shape, self.iter().filter_map(|(i, j, a)|
            f(i, j).map(|(i, j)| (i, j, a.clone()))
        ))
    }

    pub fn submat(&self, rows: Range<usize>, cols: Range<usize>) -> Self { 
        let (i0, i1) = (rows.start, rows.end);
        let (j0, j1) = (cols.start, cols.end);

        assert!(i0 <= i1 && i1 <= self.nrows());
        assert!(j0 <= j1 && j1 <= self.ncols());

        let shape = (i1 - i0, j1 - j0);
        self.extract(shape, |i, j|
            (rows.contains(&i) && cols.contains(&j)).then(|| (i - i0, j - j0))
        )
    }

    pub fn submat_rows(&self, rows: Range<usize>) -> Self { 
        self.submat(rows, 0 .. self.ncols())
    }

    pub fn submat_cols(&self, cols: Range<usize>) -> Self { 
        self.submat(0 .. self.nrows(), cols)
    }

    /// `[a, b; c, d]`
    pub fn combine_blocks(blocks: [&Self; 4]) -> Self {
        let [a, b, c, d] = blocks;

        assert_eq!(a.nrows(), b.nrows());
        assert_eq!(c.nrows(), d.nrows());
        assert_eq!(a.ncols(), c.ncols());
        assert_eq!(b.ncols(), d.ncols());

        let (m, n) = (a.nrows() + c.nrows(), a.ncols() + b.ncols());
        let (k, l) = a.shape();

        let entries = zip(
            [a, b, c, d], 
            [(0,0), (0,l), (k,0), (k,l)]
        ).flat_map(|(x, (di, dj))| 
            x.iter().map(move |(i, j, r)| (i + di, j + dj, r.clone()))
        );

        Self::from_entries((m, n), entries)
    }

    /// `[self, b]`
    pub fn concat(&self, b: &Self) -> Self { 
        Self::combine_blocks([
            self, 
            b, 
            &Self::zero((0, self.ncols())), 
            &Self::zero((0, b.ncols()))
        ])
    }

    /// `[self; b]`
    pub fn stack(&self, b: &Self) -> Self { 
        Self::combine_blocks([
            self, 
            &Self::zero((self.nrows(), 0)), 
            b, 
            &Self::zero((b.nrows(), 0))
        ])
    }

    pub fn apply(&self, v: &SpVec<R>) -> SpVec<R> { 
        assert_eq!(self.ncols(), v.dim());
        let col = |k: usize| self.inner.col(k);
        SpVec::from_entries(self.nrows(), v.iter().flat_map(|(k, b)| { 
            let c = col(k);
            zip(c.row_indices().iter(), c.values().iter()).map(move |(&i, a)| (i, a * b)).collect::<Vec<_>>()
        }))
    }
}

impl<R> From<Mat<R>> for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(a: Mat<R>) -> Self {
        a.to_sparse()
    }
}

impl<R> From<SpMat<R>> for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn from(a: SpMat<R>) -> Self {
        a.to_dense()
    }
}

impl<R> Default for SpMat<R> {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}

impl<R> Neg for &SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpMat<R>;
    fn neg(self) -> Self::Output {
        SpMat::from_entries(self.shape(), self.iter().map(|(i, j, a)| (i, j, -a)))
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b SpMat<R>> for &'a SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = SpMat<R>;
    fn mul(self, rhs: &'b SpMat<R>) -> Self::Output {
        assert_eq!(self.ncols(), rhs.nrows());
        let entries = rhs.iter().flat_map(|(k, j, b)| { 
            let c = self.inner.col(k);
            zip(c.row_indices().iter(), c.values().iter()).map(move |(&i, a)| (i, j, a * b)).collect::<Vec<_>>()
        });
        SpMat::from_entries((self.nrows(), rhs.ncols()), entries)
    }
}

impl<R> Display for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_dense(), f)
    }
}

impl<R> Debug for SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_dense(), f)
    }
}

#[cfg(test)]
impl<R> SpMat<R>
where R: Ring, for<'x> &'x R: RingOps<R> { 
    pub fn rand(shape: (usize, usize), density: f64) -> Self {
        use cartesian::cartesian;
        use rand::Rng;

        let (m, n) = shape;
        let mut rng = rand::thread_rng();

        Self::from_entries(shape, cartesian!(0..m, 0..n).filter_map(|(i, j)|
            if rng.gen::<f64>() < density { 
                Some((i, j, R::from(rng.gen_range(-3..=3))))
            } else { 
                None
            }
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests { 
    use super::*;

    #[test]
    fn init() { 
        let a = SpMat::from_entries((2, 2), [
            (0, 0, 1),
            (0, 1, 2),
            (1, 0, 3),
            (1, 1, 4),
            (1, 1, -4),
        ]);
        assert_eq!(a.nnz(), 3);
        assert_eq!(a.to_dense(), Mat::from_data((2, 2), [1,2,3,0]));
    }

    #[test]
    fn from_dense_data() { 
        let a = SpMat::from_dense_data((2, 3), [1,0,3,0,5,6]);
        let b = SpMat::from_entries((2, 3), [(0, 0, 1), (0, 2, 3), (1, 1, 5), (1, 2, 6)]);
        assert_eq!(a, b);
    }

    #[test]
    fn id() { 
        let a: SpMat<i32> = SpMat::id(3);
        assert!(a.is_id());
        assert_eq!(a.to_dense(), Mat::id(3));
    }

    #[test]
    fn col_vec() { 
        let a = SpMat::from_dense_data((3, 2), [1,0,0,2,3,0]);
        assert_eq!(a.col_vec(0), SpVec::from(vec![1, 0, 3]));
        assert_eq!(a.col_vec(1), SpVec::from(vec![0, 2, 0]));
        assert_eq!(SpMat::from_col_vecs(3, a.col_vecs()), a);
    }

    #[test]
    fn transpose() { 
        let a = SpMat::from_dense_data((2, 3), [1,2,3,4,5,6]);
        assert_eq!(a.transpose(), SpMat::from_dense_data((3, 2), [1,4,2,5,3,6]));
    }

    #[test]
    fn submat() { 
        let a = SpMat::from_dense_data((3, 4), [
            1, 2, 3, 7,
            4, 5, 6, 8,
            9,10,11,12           
        ]);
        assert_eq!(a.submat(1..3, 2..4), SpMat::from_dense_data((2, 2), [
             6, 8,
            11,12           
        ]));
    }

    #[test]
    fn stack_concat() { 
        let a = SpMat::from_dense_data((1, 2), [1,2]);
        let b = SpMat::from_dense_data((1, 2), [3,4]);
        assert_eq!(a.stack(&b), SpMat::from_dense_data((2, 2), [1,2,3,4]));
        assert_eq!(a.concat(&b), SpMat::from_dense_data((1, 4), [1,2,3,4]));
    }

    #[test]
    fn mul() { 
        let a = SpMat::from_dense_data((2, 3), [1,2,3,4,5,6]);
        let b = SpMat::from_dense_data((3, 2), [1,2,1,-1,0,2]);
        assert_eq!(&a * &b, SpMat::from_dense_data((2, 2), [3,6,9,15]));
    }

    #[test]
    fn mul_rand() { 
        let a: SpMat<i64> = SpMat::rand((5, 7), 0.4);
        let b: SpMat<i64> = SpMat::rand((7, 4), 0.4);
        assert_eq!((&a * &b).to_dense(), &a.to_dense() * &b.to_dense());
    }

    #[test]
    fn apply() { 
        let a = SpMat::from_dense_data((2, 3), [1,2,3,4,5,6]);
        let v = SpVec::from(vec![1, 0, -1]);
        assert_eq!(a.apply(&v), SpVec::from(vec![-2, -2]));
    }

    #[test]
    fn neg() { 
        let a = SpMat::from_dense_data((1, 2), [1,-2]);
        assert_eq!(-&a, SpMat::from_dense_data((1, 2), [-1,2]));
    }
}
