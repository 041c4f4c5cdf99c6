use std::ops::{Index, IndexMut, Mul, MulAssign, Range};
use std::fmt::Display;
use nalgebra::{DMatrix, Scalar};
use delegate::delegate;
use auto_impl_ops::auto_ops;
use num_traits::Zero;
use hana::{Ring, RingOps};
use crate::MatTrait;
use crate::sparse::SpMat;

/// A dense matrix over a ring. Row and column operations are written 
/// entrywise so that only the ring operations of `R` are required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mat<R> {
    inner: DMatrix<R>
}

impl<R> MatTrait for Mat<R> {
    fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }
}

impl<R> Mat<R> {
    pub fn inner(&self) -> &DMatrix<R> {
        &self.inner
    }

    pub fn into_inner(self) -> DMatrix<R> {
        self.inner
    }

    /// Entries `(i, j, a)` in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &R)> { 
        let m = self.nrows();
        self.inner.iter().enumerate().map(move |(k, a)| 
            (k % m, k / m, a)
        )
    }
}

impl<R> From<DMatrix<R>> for Mat<R> {
    fn from(inner: DMatrix<R>) -> Self {
        Self { inner }
    }
}

impl<R> Index<(usize, usize)> for Mat<R>
where R: Scalar {
    type Output = R;
    delegate! { 
        to self.inner { 
            fn index(&self, index: (usize, usize)) -> &R;
        }
    }
}

impl<R> IndexMut<(usize, usize)> for Mat<R>
where R: Scalar {
    delegate! { 
        to self.inner { 
            fn index_mut(&mut self, index: (usize, usize)) -> &mut R;
        }
    }
}

impl<R> Display for Mat<R>
where R: Scalar + Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<R> Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    /// `data` is given in row-major order.
    pub fn from_data<I>(shape: (usize, usize), data: I) -> Self
    where I: IntoIterator<Item = R> { 
        DMatrix::from_row_iterator(shape.0, shape.1, data).into()
    }

    pub fn from_col_vec(v: Vec<R>) -> Self { 
        let n = v.len();
        Self::from_data((n, 1), v)
    }

    pub fn zero(shape: (usize, usize)) -> Self { 
        DMatrix::zeros(shape.0, shape.1).into()
    }

    pub fn is_zero(&self) -> bool { 
        self.inner.iter().all(|a| a.is_zero())
    }

    pub fn id(size: usize) -> Self { 
        DMatrix::identity(size, size).into()
    }

    pub fn is_id(&self) -> bool { 
        self.is_square() && self.iter().all(|(i, j, a)| 
            (i == j && a.is_one()) || (i != j && a.is_zero())
        )
    }

    pub fn diag<I>(shape: (usize, usize), entries: I) -> Self
    where I: IntoIterator<Item = R> {
        let mut mat = Self::zero(shape);
        for (i, a) in entries.into_iter().enumerate() {
            mat[(i, i)] = a;
        }
        mat
    }

    pub fn is_diag(&self) -> bool { 
        self.iter().all(|(i, j, a)| i == j || a.is_zero())
    }

    pub fn submat(&self, rows: Range<usize>, cols: Range<usize>) -> Self { 
        let (i0, i1) = (rows.start, rows.end);
        let (j0, j1) = (cols.start, cols.end);

        assert!(i0 <= i1 && i1 <= self.nrows());
        assert!(j0 <= j1 && j1 <= self.ncols());

        let view = self.inner.view((i0, j0), (i1 - i0, j1 - j0));
        Self::from(view.clone_owned())
    }

    pub fn submat_rows(&self, rows: Range<usize>) -> Self { 
        self.submat(rows, 0 .. self.ncols())
    }

    pub fn submat_cols(&self, cols: Range<usize>) -> Self { 
        self.submat(0 .. self.nrows(), cols)
    }

    pub fn transpose(&self) -> Self { 
        self.inner.transpose().into()
    }

    pub fn col(&self, j: usize) -> Vec<R> { 
        (0 .. self.nrows()).map(|i| self[(i, j)].clone()).collect()
    }

    /// Computes `self * v`.
    pub fn apply(&self, v: &[R]) -> Vec<R> { 
        assert_eq!(self.ncols(), v.len());
        let mut w = vec![R::zero(); self.nrows()];
        for (j, b) in v.iter().enumerate() { 
            if b.is_zero() { continue }
            for i in 0 .. self.nrows() { 
                let a = &self[(i, j)];
                if !a.is_zero() { 
                    w[i] += a * b;
                }
            }
        }
        w
    }

    pub fn to_sparse(&self) -> SpMat<R> { 
        SpMat::from_entries(
            self.shape(), 
            self.iter().filter(|(_, _, a)| !a.is_zero()).map(|(i, j, a)| (i, j, a.clone()))
        )
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.inner.swap_rows(i, j);
    }

    pub fn swap_cols(&mut self, i: usize, j: usize) {
        self.inner.swap_columns(i, j);
    }

    pub fn mul_row(&mut self, i: usize, r: &R) {
        for k in 0 .. self.ncols() { 
            self[(i, k)] *= r;
        }
    }

    pub fn mul_col(&mut self, j: usize, r: &R) {
        for k in 0 .. self.nrows() { 
            self[(k, j)] *= r;
        }
    }

    /// row[j] += r * row[i]
    pub fn add_row_to(&mut self, i: usize, j: usize, r: &R) { 
        for k in 0 .. self.ncols() { 
            let a = &self[(i, k)] * r;
            self[(j, k)] += a;
        }
    }

    /// col[j] += r * col[i]
    pub fn add_col_to(&mut self, i: usize, j: usize, r: &R) {  
        for k in 0 .. self.nrows() { 
            let a = &self[(k, i)] * r;
            self[(k, j)] += a;
        }
    }

    // Multiply [a, b; c, d] from left. 
    pub fn left_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) { 
        let [a, b, c, d] = comps;
        for k in 0 .. self.ncols() { 
            let (x, y) = (&self[(i, k)], &self[(j, k)]);
            let s = a * x + b * y;
            let t = c * x + d * y;
            self[(i, k)] = s;
            self[(j, k)] = t;
        }
    }

    // Multiply [a, c; b, d] from right. 
    pub fn right_elementary(&mut self, comps: [&R; 4], i: usize, j: usize) { 
        let [a, b, c, d] = comps;
        for k in 0 .. self.nrows() { 
            let (x, y) = (&self[(k, i)], &self[(k, j)]);
            let s = x * a + y * b;
            let t = x * c + y * d;
            self[(k, i)] = s;
            self[(k, j)] = t;
        }
    }
}

#[auto_ops]
impl<'a, 'b, R> Mul<&'b Mat<R>> for &'a Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    type Output = Mat<R>;
    fn mul(self, rhs: &'b Mat<R>) -> Self::Output {
        assert_eq!(self.ncols(), rhs.nrows());
        let (l, m, n) = (self.nrows(), self.ncols(), rhs.ncols());
        let mut res = Mat::zero((l, n));
        for k in 0..m { 
            for j in 0..n { 
                let b = &rhs[(k, j)];
                if b.is_zero() { continue }
                for i in 0..l { 
                    let a = &self[(i, k)];
                    if !a.is_zero() { 
                        res[(i, j)] += a * b;
                    }
                }
            }
        }
        res
    }
}

impl<R> Default for Mat<R>
where R: Ring, for<'x> &'x R: RingOps<R> {
    fn default() -> Self {
        Self::zero((0, 0))
    }
}
